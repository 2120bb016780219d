//! Top-level screen machine.
//!
//! `transition` is pure: it only decides where to go. Side effects of
//! entering a screen (loading a level, resetting progression) belong to
//! `GameContext`.

use crate::levels::LevelIndex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Title,
    Map,
    Playing,
    LevelComplete,
    GameOver,
    Win,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenEvent {
    Confirm,
    GoalReached,
    OutOfLives,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Goto(Screen),
    Quit,
}

/// Where `event` leads from `screen`. `level` is the level being played or
/// just finished.
pub fn transition(screen: Screen, event: ScreenEvent, level: LevelIndex) -> Transition {
    use Screen::*;
    match (screen, event) {
        (_, ScreenEvent::Quit) => Transition::Quit,
        (Title, ScreenEvent::Confirm) => Transition::Goto(Map),
        (Map, ScreenEvent::Confirm) => Transition::Goto(Playing),
        (Playing, ScreenEvent::GoalReached) => Transition::Goto(LevelComplete),
        (Playing, ScreenEvent::OutOfLives) => Transition::Goto(GameOver),
        (LevelComplete, ScreenEvent::Confirm) if level.is_last() => Transition::Goto(Win),
        (LevelComplete, ScreenEvent::Confirm) => Transition::Goto(Map),
        (GameOver, ScreenEvent::Confirm) | (Win, ScreenEvent::Confirm) => Transition::Goto(Title),
        _ => Transition::Stay,
    }
}
