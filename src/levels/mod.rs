//! Level construction for all three variants.
//!
//! Every builder is deterministic in the level index: any randomness is
//! seeded from the index, so retrying a level reproduces it exactly.

pub mod arcade;
pub mod classic;
pub mod deluxe;

use std::fmt;

use crate::config::Variant;
use crate::entities::{Coin, EnemySpawn};
use crate::error::GameError;
use crate::geometry::Rect;
use crate::terrain::Terrain;

/// Number of levels in every variant.
pub const MAX_LEVEL: u8 = 32;

/// A validated 1-based level number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LevelIndex(u8);

impl LevelIndex {
    pub const FIRST: LevelIndex = LevelIndex(1);
    pub const LAST: LevelIndex = LevelIndex(MAX_LEVEL);

    pub fn new(n: u8) -> Result<Self, GameError> {
        if (1..=MAX_LEVEL).contains(&n) {
            Ok(Self(n))
        } else {
            Err(GameError::InvalidLevel(n))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// 0-based position, used by the difficulty formulas.
    pub fn zero_based(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// The following level, or `None` after the last one.
    pub fn next(self) -> Option<LevelIndex> {
        (self.0 < MAX_LEVEL).then(|| LevelIndex(self.0 + 1))
    }

    pub fn is_last(self) -> bool {
        self.0 == MAX_LEVEL
    }

    /// World and stage numbers (four stages per world).
    pub fn world_stage(self) -> (u8, u8) {
        ((self.0 - 1) / 4 + 1, (self.0 - 1) % 4 + 1)
    }

    pub fn all() -> impl Iterator<Item = LevelIndex> {
        (1..=MAX_LEVEL).map(LevelIndex)
    }
}

impl fmt::Display for LevelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (world, stage) = self.world_stage();
        write!(f, "{world}-{stage}")
    }
}

/// One playable level: terrain, spawn, goal and initial entity placement.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    pub index: LevelIndex,
    pub name: String,
    pub terrain: Terrain,
    /// Top-left corner of the player at spawn.
    pub spawn: (f32, f32),
    pub goal: Rect,
    pub enemies: Vec<EnemySpawn>,
    pub coins: Vec<Coin>,
    pub width: f32,
    pub height: f32,
}

/// Build level `n` of `variant`. Indices outside `1..=32` are rejected rather
/// than clamped.
pub fn load(variant: Variant, n: u8) -> Result<Level, GameError> {
    let index = LevelIndex::new(n)?;
    Ok(build(variant, index))
}

pub fn build(variant: Variant, index: LevelIndex) -> Level {
    let level = match variant {
        Variant::Classic => classic::generate(index),
        Variant::Arcade => arcade::build(index),
        Variant::Deluxe => deluxe::build(index),
    };
    tracing::info!(
        ?variant,
        level = index.get(),
        name = %level.name,
        enemies = level.enemies.len(),
        "level built"
    );
    level
}
