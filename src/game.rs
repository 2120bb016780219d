//! Game context: owns every piece of session state and applies screen
//! transitions with their side effects.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::compute::{init_world, tick, TickOutcome, World};
use crate::config::GameConfig;
use crate::entities::Progression;
use crate::input::{InputSnapshot, InputState, Key};
use crate::levels::{self, LevelIndex};
use crate::overworld::Overworld;
use crate::screen::{transition, Screen, ScreenEvent, Transition};

pub struct GameContext {
    pub config: GameConfig,
    pub screen: Screen,
    pub progress: Progression,
    pub overworld: Overworld,
    /// Present while a level is loaded (Playing and the screens after it).
    pub world: Option<World>,
    pub input: InputState,
    /// Level the map opens on after a reset.
    start: LevelIndex,
    starting_lives: u32,
    rng: StdRng,
    running: bool,
}

impl GameContext {
    pub fn new(config: GameConfig, start: LevelIndex, seed: u64) -> Self {
        let starting_lives = config.rules.starting_lives;
        Self {
            config,
            screen: Screen::Title,
            progress: Progression::new(starting_lives),
            overworld: Overworld::starting_at(start),
            world: None,
            input: InputState::default(),
            start,
            starting_lives,
            rng: StdRng::seed_from_u64(seed),
            running: true,
        }
    }

    /// Override the lives a new game starts with.
    pub fn with_lives(mut self, lives: u32) -> Self {
        self.starting_lives = lives;
        self.progress.lives = lives;
        self
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Level currently selected or being played.
    pub fn current_level(&self) -> LevelIndex {
        self.world
            .as_ref()
            .map(|w| w.level.index)
            .unwrap_or_else(|| self.overworld.selected())
    }

    /// One frame: edge update, quit check, per-screen update, transition.
    pub fn update(&mut self, snapshot: InputSnapshot) {
        if !self.running {
            return;
        }
        self.input.advance(snapshot);

        let event = if self.input.pressed(Key::Quit) {
            Some(ScreenEvent::Quit)
        } else {
            self.update_screen()
        };

        if let Some(event) = event {
            let level = self.current_level();
            match transition(self.screen, event, level) {
                Transition::Stay => {}
                Transition::Goto(next) => self.enter(next),
                Transition::Quit => {
                    tracing::info!("quit requested");
                    self.running = false;
                }
            }
        }
    }

    fn update_screen(&mut self) -> Option<ScreenEvent> {
        match self.screen {
            Screen::Playing => {
                let world = self.world.as_mut()?;
                match tick(
                    world,
                    &mut self.progress,
                    &self.input,
                    &self.config,
                    &mut self.rng,
                ) {
                    TickOutcome::Continue | TickOutcome::LifeLost => None,
                    TickOutcome::GoalReached => Some(ScreenEvent::GoalReached),
                    TickOutcome::OutOfLives => Some(ScreenEvent::OutOfLives),
                }
            }
            Screen::Map => {
                if self.input.pressed(Key::Left) || self.input.pressed(Key::Up) {
                    self.overworld.move_selection(-1);
                }
                if self.input.pressed(Key::Right) || self.input.pressed(Key::Down) {
                    self.overworld.move_selection(1);
                }
                self.confirmed()
            }
            Screen::Title | Screen::LevelComplete | Screen::GameOver | Screen::Win => {
                self.confirmed()
            }
        }
    }

    fn confirmed(&self) -> Option<ScreenEvent> {
        self.input
            .pressed(Key::Confirm)
            .then_some(ScreenEvent::Confirm)
    }

    /// Switch screens, running the entry side effects of `next`.
    fn enter(&mut self, next: Screen) {
        tracing::info!(from = ?self.screen, to = ?next, "screen transition");
        match (self.screen, next) {
            (Screen::Title, Screen::Map) => {
                self.progress = Progression::new(self.starting_lives);
                self.overworld = Overworld::starting_at(self.start);
                self.world = None;
            }
            (Screen::LevelComplete, _) => {
                if let Some(world) = self.world.take() {
                    self.overworld.complete_level(world.level.index);
                }
            }
            (_, Screen::Playing) => {
                let level = levels::build(self.config.variant, self.overworld.selected());
                self.world = Some(init_world(level, &self.config));
                self.progress.invulnerable = 0;
            }
            (_, Screen::Title) => self.world = None,
            _ => {}
        }
        self.screen = next;
    }
}
