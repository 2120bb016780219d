pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod levels;
pub mod overworld;
pub mod physics;
pub mod render;
pub mod screen;
pub mod terrain;
