//! Per-variant tuning tables.
//!
//! Every constant the simulation reads lives here so the three game variants
//! differ only in data, never in code paths.

use clap::ValueEnum;

/// Target simulation rate.
pub const DEFAULT_FPS: u32 = 60;

/// Which of the three level schemes (and its matching feel) is being played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum Variant {
    /// Procedurally generated tile grids.
    Classic,
    /// World/stage rectangle layouts with power-ups and fireballs.
    Arcade,
    /// Hand-authored level table with patrolling enemies.
    Deluxe,
}

impl Variant {
    pub fn title(self) -> &'static str {
        match self {
            Variant::Classic => "PLATFORM QUEST",
            Variant::Arcade => "PLATFORM QUEST 3",
            Variant::Deluxe => "PLATFORM QUEST DELUXE",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Physics {
    /// Added to vertical velocity every tick.
    pub gravity: f32,
    /// Maximum downward speed.
    pub terminal_velocity: f32,
}

/// How directional input turns into horizontal velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Steering {
    /// Accelerate toward the held direction; friction (ground) or drag (air)
    /// when nothing is held.
    Momentum {
        accel: f32,
        max_speed: f32,
        ground_friction: f32,
        air_drag: f32,
    },
    /// Velocity is set straight from input: walk speed, or run speed while
    /// the run key is held.
    Direct { walk: f32, run: f32 },
    /// Acceleration opposed by friction proportional to current speed.
    Damped {
        accel: f32,
        friction: f32,
        max_speed: f32,
    },
}

impl Steering {
    /// Fastest horizontal speed the player can sustain.
    pub fn top_speed(&self) -> f32 {
        match *self {
            Steering::Momentum { max_speed, .. } => max_speed,
            Steering::Direct { run, .. } => run,
            Steering::Damped { max_speed, .. } => max_speed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    /// Upward speed applied on jump (positive number).
    pub jump_speed: f32,
    /// Upward speed applied after a stomp.
    pub stomp_bounce: f32,
    pub steering: Steering,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rules {
    pub starting_lives: u32,
    pub stomp_reward: u32,
    pub coin_reward: u32,
    pub power_up_reward: u32,
    pub fireball_reward: u32,
    pub goal_reward: u32,
    /// Ticks of damage immunity after a hit or a respawn.
    pub invulnerability: u32,
    /// Ticks a stomped enemy stays on screen, flattened and inert.
    pub squash_ticks: u32,
    /// Distance below the level bottom at which a body counts as fallen off.
    pub fall_margin: f32,
    /// Ground walkers turn around before stepping off a ledge.
    pub ledge_avoidance: bool,
    /// Run meter and flight at the Raccoon tier.
    pub flight: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    pub variant: Variant,
    pub fps: u32,
    pub physics: Physics,
    pub player: PlayerTuning,
    pub rules: Rules,
}

impl GameConfig {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Self {
                variant,
                fps: DEFAULT_FPS,
                physics: Physics {
                    gravity: 0.6,
                    terminal_velocity: 15.0,
                },
                player: PlayerTuning {
                    width: 16.0,
                    height: 28.0,
                    jump_speed: 10.5,
                    stomp_bounce: 10.5 * 0.6,
                    steering: Steering::Momentum {
                        accel: 0.6,
                        max_speed: 5.2,
                        ground_friction: 0.82,
                        air_drag: 0.98,
                    },
                },
                rules: Rules {
                    starting_lives: 3,
                    goal_reward: 500,
                    fall_margin: 200.0,
                    ledge_avoidance: true,
                    flight: false,
                    ..Rules::base()
                },
            },
            Variant::Arcade => Self {
                variant,
                fps: DEFAULT_FPS,
                physics: Physics {
                    gravity: 0.8,
                    terminal_velocity: 15.0,
                },
                player: PlayerTuning {
                    width: 32.0,
                    height: 32.0,
                    jump_speed: 15.0,
                    stomp_bounce: 10.0,
                    steering: Steering::Direct { walk: 5.0, run: 7.0 },
                },
                rules: Rules {
                    starting_lives: 5,
                    goal_reward: 1000,
                    fall_margin: 0.0,
                    ledge_avoidance: false,
                    flight: true,
                    ..Rules::base()
                },
            },
            Variant::Deluxe => Self {
                variant,
                fps: DEFAULT_FPS,
                physics: Physics {
                    gravity: 0.8,
                    terminal_velocity: 15.0,
                },
                player: PlayerTuning {
                    width: 30.0,
                    height: 50.0,
                    jump_speed: 16.0,
                    stomp_bounce: 8.0,
                    steering: Steering::Damped {
                        accel: 0.5,
                        friction: -0.12,
                        max_speed: 8.0,
                    },
                },
                rules: Rules {
                    starting_lives: 3,
                    goal_reward: 0,
                    fall_margin: 0.0,
                    ledge_avoidance: false,
                    flight: false,
                    ..Rules::base()
                },
            },
        }
    }
}

impl Rules {
    fn base() -> Self {
        Self {
            starting_lives: 3,
            stomp_reward: 100,
            coin_reward: 10,
            power_up_reward: 1000,
            fireball_reward: 100,
            goal_reward: 0,
            invulnerability: 120,
            squash_ticks: 30,
            fall_margin: 0.0,
            ledge_avoidance: false,
            flight: false,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_variant(Variant::Classic)
    }
}

/// Widest gap, in whole tiles of `tile` units, that a full-speed jump clears.
///
/// Air time is the rise-and-fall of a jump launched at `jump_speed`; the
/// body's own width has to clear the far edge as well.
pub fn max_jump_tiles(physics: &Physics, player: &PlayerTuning, tile: f32) -> usize {
    let air_ticks = 2.0 * player.jump_speed / physics.gravity;
    let reach = air_ticks * player.steering.top_speed() - player.width;
    if reach <= 0.0 {
        return 0;
    }
    (reach / tile).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_jump_clears_five_tiles() {
        let c = GameConfig::for_variant(Variant::Classic);
        assert_eq!(max_jump_tiles(&c.physics, &c.player, 32.0), 5);
    }
}
