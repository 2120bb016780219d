//! The 32 hand-authored levels.
//!
//! Each descriptor lists its platforms in drawing order, a start point, a goal
//! point and enemies as `(x, y, size, speed)`. Enemies patrol from their start
//! x to `PATROL_DISTANCE` to the right of it.

use crate::config::{GameConfig, Variant};
use crate::entities::{EnemyKind, EnemySpawn, Patrol};
use crate::geometry::Rect;
use crate::levels::{Level, LevelIndex, MAX_LEVEL};
use crate::physics::Facing;
use crate::terrain::{Material, Platform, Terrain};

pub const WIDTH: f32 = 800.0;
pub const HEIGHT: f32 = 600.0;
pub const PATROL_DISTANCE: f32 = 100.0;
pub const GOAL_SIZE: (f32, f32) = (30.0, 60.0);

type PlatformRow = (f32, f32, f32, f32, Material);
type EnemyRow = (f32, f32, f32, f32);

pub struct Descriptor {
    pub name: &'static str,
    pub start: (f32, f32),
    pub platforms: &'static [PlatformRow],
    pub goal: (f32, f32),
    pub enemies: &'static [EnemyRow],
}

const G: Material = Material::Grass;
const B: Material = Material::Ground;
const S: Material = Material::Castle;
const R: Material = Material::Lava;

#[rustfmt::skip]
pub static LEVELS: [Descriptor; MAX_LEVEL as usize] = [
    // World 1
    Descriptor {
        name: "First Steps",
        start: (50.0, 400.0),
        platforms: &[(0.0, 560.0, 800.0, 40.0, G), (200.0, 480.0, 150.0, 20.0, B), (450.0, 400.0, 150.0, 20.0, B)],
        goal: (720.0, 490.0),
        enemies: &[],
    },
    Descriptor {
        name: "Jump Training",
        start: (50.0, 400.0),
        platforms: &[(0.0, 560.0, 200.0, 40.0, G), (250.0, 560.0, 200.0, 40.0, G), (500.0, 560.0, 300.0, 40.0, G),
                     (300.0, 450.0, 100.0, 20.0, B)],
        goal: (750.0, 490.0),
        enemies: &[],
    },
    Descriptor {
        name: "First Enemy",
        start: (50.0, 400.0),
        platforms: &[(0.0, 560.0, 800.0, 40.0, G), (300.0, 480.0, 200.0, 20.0, B)],
        goal: (720.0, 490.0),
        enemies: &[(400.0, 440.0, 30.0, 2.0)],
    },
    Descriptor {
        name: "Stairway",
        start: (50.0, 400.0),
        platforms: &[(0.0, 560.0, 200.0, 40.0, G), (150.0, 500.0, 100.0, 20.0, B), (250.0, 440.0, 100.0, 20.0, B),
                     (350.0, 380.0, 100.0, 20.0, B), (450.0, 320.0, 100.0, 20.0, B), (550.0, 380.0, 100.0, 20.0, B),
                     (650.0, 440.0, 150.0, 20.0, B)],
        goal: (750.0, 370.0),
        enemies: &[],
    },
    // World 2
    Descriptor {
        name: "Gap Jumps",
        start: (50.0, 400.0),
        platforms: &[(0.0, 560.0, 150.0, 40.0, G), (250.0, 560.0, 150.0, 40.0, G), (500.0, 560.0, 150.0, 40.0, G),
                     (700.0, 560.0, 100.0, 40.0, G)],
        goal: (730.0, 490.0),
        enemies: &[(300.0, 520.0, 30.0, 2.0)],
    },
    Descriptor {
        name: "Platform Hopping",
        start: (50.0, 400.0),
        platforms: &[(0.0, 560.0, 800.0, 40.0, G), (150.0, 450.0, 80.0, 20.0, B), (300.0, 380.0, 80.0, 20.0, B),
                     (450.0, 310.0, 80.0, 20.0, B), (600.0, 380.0, 80.0, 20.0, B)],
        goal: (650.0, 310.0),
        enemies: &[(200.0, 520.0, 30.0, 2.0), (500.0, 520.0, 30.0, 2.0)],
    },
    Descriptor {
        name: "Enemy Patrol",
        start: (50.0, 400.0),
        platforms: &[(0.0, 560.0, 800.0, 40.0, G), (200.0, 460.0, 400.0, 20.0, B)],
        goal: (520.0, 390.0),
        enemies: &[(250.0, 420.0, 30.0, 3.0), (450.0, 420.0, 30.0, 2.0)],
    },
    Descriptor {
        name: "Vertical Challenge",
        start: (50.0, 500.0),
        platforms: &[(0.0, 560.0, 150.0, 40.0, G), (100.0, 480.0, 100.0, 20.0, B), (250.0, 400.0, 100.0, 20.0, B),
                     (150.0, 320.0, 100.0, 20.0, B), (300.0, 240.0, 100.0, 20.0, B), (450.0, 240.0, 200.0, 20.0, B)],
        goal: (600.0, 170.0),
        enemies: &[(350.0, 200.0, 30.0, 2.0)],
    },
    // World 3
    Descriptor {
        name: "The Gauntlet",
        start: (50.0, 400.0),
        platforms: &[(0.0, 560.0, 800.0, 40.0, G), (200.0, 450.0, 100.0, 20.0, B), (400.0, 450.0, 100.0, 20.0, B),
                     (600.0, 450.0, 100.0, 20.0, B)],
        goal: (650.0, 380.0),
        enemies: &[(250.0, 410.0, 30.0, 2.0), (450.0, 410.0, 30.0, 3.0), (650.0, 410.0, 30.0, 2.0)],
    },
    Descriptor {
        name: "Precision Jumps",
        start: (50.0, 400.0),
        platforms: &[(0.0, 560.0, 120.0, 40.0, G), (200.0, 500.0, 60.0, 20.0, B), (340.0, 440.0, 60.0, 20.0, B),
                     (480.0, 380.0, 60.0, 20.0, B), (620.0, 440.0, 60.0, 20.0, B), (740.0, 500.0, 60.0, 20.0, B)],
        goal: (770.0, 430.0),
        enemies: &[],
    },
    Descriptor {
        name: "Enemy Swarm",
        start: (50.0, 400.0),
        platforms: &[(0.0, 560.0, 800.0, 40.0, G), (300.0, 420.0, 200.0, 20.0, B)],
        goal: (720.0, 490.0),
        enemies: &[(200.0, 520.0, 30.0, 2.0), (350.0, 380.0, 30.0, 3.0), (500.0, 520.0, 30.0, 2.0),
                   (600.0, 520.0, 30.0, 3.0)],
    },
    Descriptor {
        name: "Up and Down",
        start: (50.0, 500.0),
        platforms: &[(0.0, 560.0, 100.0, 40.0, G), (120.0, 480.0, 80.0, 20.0, B), (220.0, 400.0, 80.0, 20.0, B),
                     (320.0, 320.0, 80.0, 20.0, B), (420.0, 400.0, 80.0, 20.0, B), (520.0, 480.0, 80.0, 20.0, B),
                     (620.0, 560.0, 180.0, 40.0, G)],
        goal: (720.0, 490.0),
        enemies: &[(270.0, 360.0, 30.0, 2.0), (470.0, 440.0, 30.0, 2.0)],
    },
    // World 4
    Descriptor {
        name: "Speed Run",
        start: (50.0, 400.0),
        platforms: &[(0.0, 560.0, 150.0, 40.0, G), (200.0, 560.0, 100.0, 40.0, G), (350.0, 560.0, 100.0, 40.0, G),
                     (500.0, 560.0, 100.0, 40.0, G), (650.0, 560.0, 150.0, 40.0, G)],
        goal: (730.0, 490.0),
        enemies: &[(250.0, 520.0, 30.0, 4.0), (400.0, 520.0, 30.0, 4.0), (550.0, 520.0, 30.0, 4.0)],
    },
    Descriptor {
        name: "Sky Platforms",
        start: (50.0, 500.0),
        platforms: &[(0.0, 560.0, 100.0, 40.0, G), (150.0, 450.0, 80.0, 20.0, B), (280.0, 360.0, 80.0, 20.0, B),
                     (410.0, 270.0, 80.0, 20.0, B), (540.0, 270.0, 80.0, 20.0, B), (670.0, 360.0, 130.0, 20.0, B)],
        goal: (730.0, 290.0),
        enemies: &[(200.0, 410.0, 30.0, 2.0), (330.0, 320.0, 30.0, 2.0)],
    },
    Descriptor {
        name: "Danger Zone",
        start: (50.0, 400.0),
        platforms: &[(0.0, 560.0, 800.0, 40.0, G), (150.0, 440.0, 120.0, 20.0, B), (350.0, 440.0, 120.0, 20.0, B),
                     (550.0, 440.0, 120.0, 20.0, B)],
        goal: (620.0, 370.0),
        enemies: &[(200.0, 400.0, 30.0, 3.0), (400.0, 400.0, 30.0, 3.0), (300.0, 520.0, 30.0, 2.0),
                   (500.0, 520.0, 30.0, 2.0), (600.0, 400.0, 30.0, 3.0)],
    },
    Descriptor {
        name: "Castle Stairs",
        start: (50.0, 500.0),
        platforms: &[(0.0, 560.0, 100.0, 40.0, G), (80.0, 500.0, 60.0, 20.0, S), (140.0, 440.0, 60.0, 20.0, S),
                     (200.0, 380.0, 60.0, 20.0, S), (260.0, 320.0, 60.0, 20.0, S), (320.0, 260.0, 60.0, 20.0, S),
                     (380.0, 200.0, 60.0, 20.0, S), (440.0, 200.0, 360.0, 20.0, S)],
        goal: (750.0, 130.0),
        enemies: &[(190.0, 340.0, 30.0, 2.0), (310.0, 220.0, 30.0, 2.0), (550.0, 160.0, 30.0, 3.0)],
    },
    // World 5
    Descriptor {
        name: "Maze Runner",
        start: (50.0, 500.0),
        platforms: &[(0.0, 560.0, 200.0, 40.0, G), (250.0, 480.0, 100.0, 80.0, B), (250.0, 380.0, 100.0, 20.0, B),
                     (400.0, 480.0, 100.0, 80.0, B), (550.0, 380.0, 100.0, 180.0, B), (700.0, 480.0, 100.0, 80.0, B)],
        goal: (730.0, 410.0),
        enemies: &[(300.0, 340.0, 30.0, 2.0), (450.0, 440.0, 30.0, 2.0)],
    },
    Descriptor {
        name: "Floating Islands",
        start: (50.0, 500.0),
        platforms: &[(0.0, 560.0, 80.0, 40.0, G), (140.0, 480.0, 70.0, 15.0, B), (250.0, 400.0, 70.0, 15.0, B),
                     (360.0, 320.0, 70.0, 15.0, B), (470.0, 320.0, 70.0, 15.0, B), (580.0, 400.0, 70.0, 15.0, B),
                     (690.0, 480.0, 110.0, 15.0, B)],
        goal: (740.0, 410.0),
        enemies: &[(300.0, 360.0, 30.0, 2.0), (520.0, 360.0, 30.0, 2.0)],
    },
    Descriptor {
        name: "Narrow Escape",
        start: (50.0, 400.0),
        platforms: &[(0.0, 560.0, 800.0, 40.0, G), (200.0, 460.0, 50.0, 20.0, B), (300.0, 460.0, 50.0, 20.0, B),
                     (400.0, 460.0, 50.0, 20.0, B), (500.0, 460.0, 50.0, 20.0, B), (600.0, 460.0, 50.0, 20.0, B)],
        goal: (630.0, 390.0),
        enemies: &[(240.0, 420.0, 30.0, 3.0), (340.0, 420.0, 30.0, 3.0), (440.0, 420.0, 30.0, 3.0),
                   (540.0, 420.0, 30.0, 3.0)],
    },
    Descriptor {
        name: "Tower Climb",
        start: (50.0, 520.0),
        platforms: &[(0.0, 560.0, 100.0, 40.0, G), (120.0, 490.0, 70.0, 15.0, B), (70.0, 420.0, 70.0, 15.0, B),
                     (140.0, 350.0, 70.0, 15.0, B), (70.0, 280.0, 70.0, 15.0, B), (140.0, 210.0, 70.0, 15.0, B),
                     (70.0, 140.0, 130.0, 15.0, B), (250.0, 140.0, 550.0, 15.0, B)],
        goal: (750.0, 70.0),
        enemies: &[(120.0, 310.0, 30.0, 2.0), (120.0, 170.0, 30.0, 2.0), (400.0, 100.0, 30.0, 3.0)],
    },
    // World 6
    Descriptor {
        name: "Death From Above",
        start: (50.0, 500.0),
        platforms: &[(0.0, 560.0, 100.0, 40.0, G), (150.0, 500.0, 60.0, 15.0, B), (250.0, 440.0, 60.0, 15.0, B),
                     (350.0, 380.0, 60.0, 15.0, B), (450.0, 320.0, 60.0, 15.0, B), (550.0, 260.0, 60.0, 15.0, B),
                     (650.0, 200.0, 150.0, 15.0, B)],
        goal: (750.0, 130.0),
        enemies: &[(200.0, 460.0, 30.0, 2.0), (300.0, 400.0, 30.0, 2.0), (400.0, 340.0, 30.0, 2.0),
                   (500.0, 280.0, 30.0, 2.0), (600.0, 220.0, 30.0, 2.0)],
    },
    Descriptor {
        name: "Platform Hell",
        start: (50.0, 500.0),
        platforms: &[(0.0, 560.0, 70.0, 40.0, G), (120.0, 480.0, 50.0, 15.0, B), (220.0, 400.0, 50.0, 15.0, B),
                     (320.0, 320.0, 50.0, 15.0, B), (420.0, 400.0, 50.0, 15.0, B), (520.0, 480.0, 50.0, 15.0, B),
                     (620.0, 400.0, 50.0, 15.0, B), (720.0, 480.0, 80.0, 15.0, B)],
        goal: (750.0, 410.0),
        enemies: &[(270.0, 360.0, 30.0, 2.0), (370.0, 440.0, 30.0, 2.0), (470.0, 520.0, 30.0, 3.0)],
    },
    Descriptor {
        name: "The Grinder",
        start: (50.0, 400.0),
        platforms: &[(0.0, 560.0, 800.0, 40.0, G), (100.0, 450.0, 80.0, 20.0, B), (250.0, 450.0, 80.0, 20.0, B),
                     (400.0, 450.0, 80.0, 20.0, B), (550.0, 450.0, 80.0, 20.0, B), (700.0, 450.0, 100.0, 20.0, B)],
        goal: (750.0, 380.0),
        enemies: &[(140.0, 410.0, 30.0, 4.0), (290.0, 410.0, 30.0, 4.0), (440.0, 410.0, 30.0, 4.0),
                   (590.0, 410.0, 30.0, 4.0)],
    },
    Descriptor {
        name: "Final Castle",
        start: (50.0, 500.0),
        platforms: &[(0.0, 560.0, 80.0, 40.0, S), (100.0, 500.0, 60.0, 15.0, S), (180.0, 440.0, 60.0, 15.0, S),
                     (260.0, 380.0, 60.0, 15.0, S), (340.0, 320.0, 60.0, 15.0, S), (420.0, 260.0, 60.0, 15.0, S),
                     (500.0, 320.0, 60.0, 15.0, S), (580.0, 380.0, 60.0, 15.0, S), (660.0, 320.0, 140.0, 15.0, S)],
        goal: (760.0, 250.0),
        enemies: &[(130.0, 460.0, 30.0, 2.0), (210.0, 400.0, 30.0, 2.0), (290.0, 340.0, 30.0, 3.0),
                   (370.0, 280.0, 30.0, 2.0), (530.0, 340.0, 30.0, 3.0), (610.0, 400.0, 30.0, 2.0)],
    },
    // World 7
    Descriptor {
        name: "No Ground",
        start: (50.0, 450.0),
        platforms: &[(0.0, 500.0, 80.0, 15.0, B), (120.0, 420.0, 60.0, 15.0, B), (220.0, 360.0, 60.0, 15.0, B),
                     (320.0, 300.0, 60.0, 15.0, B), (420.0, 360.0, 60.0, 15.0, B), (520.0, 420.0, 60.0, 15.0, B),
                     (620.0, 360.0, 60.0, 15.0, B), (720.0, 300.0, 80.0, 15.0, B)],
        goal: (760.0, 230.0),
        enemies: &[(170.0, 380.0, 30.0, 2.0), (370.0, 320.0, 30.0, 2.0), (570.0, 380.0, 30.0, 2.0)],
    },
    Descriptor {
        name: "Bullet Hell",
        start: (50.0, 400.0),
        platforms: &[(0.0, 560.0, 800.0, 40.0, G)],
        goal: (750.0, 490.0),
        enemies: &[(150.0, 520.0, 30.0, 5.0), (250.0, 520.0, 30.0, 5.0), (350.0, 520.0, 30.0, 5.0),
                   (450.0, 520.0, 30.0, 5.0), (550.0, 520.0, 30.0, 5.0), (650.0, 520.0, 30.0, 5.0)],
    },
    Descriptor {
        name: "Spiral Ascent",
        start: (50.0, 520.0),
        platforms: &[(0.0, 560.0, 100.0, 40.0, G), (120.0, 490.0, 60.0, 15.0, B), (200.0, 420.0, 60.0, 15.0, B),
                     (280.0, 350.0, 60.0, 15.0, B), (360.0, 280.0, 60.0, 15.0, B), (440.0, 210.0, 60.0, 15.0, B),
                     (520.0, 140.0, 60.0, 15.0, B), (440.0, 140.0, 60.0, 15.0, B), (360.0, 140.0, 60.0, 15.0, B),
                     (280.0, 140.0, 60.0, 15.0, B), (280.0, 70.0, 520.0, 15.0, B)],
        goal: (760.0, 0.0),
        enemies: &[(170.0, 450.0, 30.0, 2.0), (250.0, 380.0, 30.0, 2.0), (330.0, 310.0, 30.0, 2.0),
                   (410.0, 240.0, 30.0, 2.0), (490.0, 170.0, 30.0, 2.0)],
    },
    Descriptor {
        name: "The Gauntlet Supreme",
        start: (50.0, 500.0),
        platforms: &[(0.0, 560.0, 70.0, 40.0, S), (100.0, 490.0, 50.0, 15.0, S), (180.0, 420.0, 50.0, 15.0, S),
                     (260.0, 350.0, 50.0, 15.0, S), (340.0, 280.0, 50.0, 15.0, S), (420.0, 350.0, 50.0, 15.0, S),
                     (500.0, 420.0, 50.0, 15.0, S), (580.0, 350.0, 50.0, 15.0, S), (660.0, 280.0, 140.0, 15.0, S)],
        goal: (760.0, 210.0),
        enemies: &[(130.0, 450.0, 30.0, 3.0), (210.0, 380.0, 30.0, 3.0), (290.0, 310.0, 30.0, 4.0),
                   (370.0, 380.0, 30.0, 3.0), (450.0, 450.0, 30.0, 3.0), (530.0, 380.0, 30.0, 4.0)],
    },
    // World 8
    Descriptor {
        name: "Nightmare",
        start: (50.0, 480.0),
        platforms: &[(0.0, 530.0, 60.0, 15.0, B), (100.0, 460.0, 50.0, 15.0, B), (190.0, 390.0, 50.0, 15.0, B),
                     (280.0, 320.0, 50.0, 15.0, B), (370.0, 250.0, 50.0, 15.0, B), (460.0, 320.0, 50.0, 15.0, B),
                     (550.0, 390.0, 50.0, 15.0, B), (640.0, 460.0, 50.0, 15.0, B), (730.0, 390.0, 70.0, 15.0, B)],
        goal: (760.0, 320.0),
        enemies: &[(140.0, 420.0, 30.0, 3.0), (230.0, 350.0, 30.0, 3.0), (320.0, 280.0, 30.0, 4.0),
                   (410.0, 350.0, 30.0, 3.0), (500.0, 420.0, 30.0, 3.0), (590.0, 490.0, 30.0, 3.0)],
    },
    Descriptor {
        name: "The Void",
        start: (50.0, 450.0),
        platforms: &[(0.0, 500.0, 70.0, 15.0, B), (120.0, 430.0, 55.0, 15.0, B), (225.0, 360.0, 55.0, 15.0, B),
                     (330.0, 290.0, 55.0, 15.0, B), (435.0, 220.0, 55.0, 15.0, B), (540.0, 290.0, 55.0, 15.0, B),
                     (645.0, 360.0, 55.0, 15.0, B), (745.0, 290.0, 55.0, 15.0, B)],
        goal: (770.0, 220.0),
        enemies: &[(165.0, 390.0, 30.0, 2.0), (270.0, 320.0, 30.0, 3.0), (375.0, 250.0, 30.0, 4.0),
                   (480.0, 180.0, 30.0, 3.0), (585.0, 250.0, 30.0, 3.0), (690.0, 320.0, 30.0, 2.0)],
    },
    Descriptor {
        name: "Perfect Timing",
        start: (50.0, 500.0),
        platforms: &[(0.0, 550.0, 60.0, 15.0, B), (110.0, 480.0, 45.0, 15.0, B), (205.0, 410.0, 45.0, 15.0, B),
                     (300.0, 340.0, 45.0, 15.0, B), (395.0, 270.0, 45.0, 15.0, B), (490.0, 200.0, 45.0, 15.0, B),
                     (585.0, 270.0, 45.0, 15.0, B), (680.0, 340.0, 120.0, 15.0, B)],
        goal: (760.0, 270.0),
        enemies: &[(140.0, 440.0, 30.0, 4.0), (235.0, 370.0, 30.0, 4.0), (330.0, 300.0, 30.0, 5.0),
                   (425.0, 230.0, 30.0, 4.0), (520.0, 160.0, 30.0, 4.0), (615.0, 230.0, 30.0, 4.0)],
    },
    Descriptor {
        name: "The Final Challenge",
        start: (50.0, 520.0),
        platforms: &[(0.0, 560.0, 60.0, 40.0, R), (90.0, 500.0, 45.0, 15.0, S), (165.0, 440.0, 45.0, 15.0, S),
                     (240.0, 380.0, 45.0, 15.0, S), (315.0, 320.0, 45.0, 15.0, S), (390.0, 260.0, 45.0, 15.0, S),
                     (465.0, 200.0, 45.0, 15.0, S), (540.0, 260.0, 45.0, 15.0, S), (615.0, 320.0, 45.0, 15.0, S),
                     (690.0, 260.0, 110.0, 15.0, S)],
        goal: (760.0, 190.0),
        enemies: &[(120.0, 460.0, 30.0, 4.0), (195.0, 400.0, 30.0, 4.0), (270.0, 340.0, 30.0, 5.0),
                   (345.0, 280.0, 30.0, 5.0), (420.0, 220.0, 30.0, 5.0), (495.0, 160.0, 30.0, 4.0),
                   (570.0, 220.0, 30.0, 5.0), (645.0, 280.0, 30.0, 4.0)],
    },
];

pub fn descriptor(index: LevelIndex) -> &'static Descriptor {
    &LEVELS[index.zero_based()]
}

/// Lift a start point out of any platform the player would overlap there.
/// A few table rows start the player sunk into the floor.
fn settle_spawn(start: (f32, f32), platforms: &[Platform], size: (f32, f32)) -> (f32, f32) {
    let mut player = Rect::new(start.0, start.1, size.0, size.1);
    while let Some(top) = platforms
        .iter()
        .filter(|p| p.rect.intersects(&player))
        .map(|p| p.rect.top())
        .reduce(f32::min)
    {
        player.set_bottom(top);
    }
    (player.x, player.y)
}

pub fn build(index: LevelIndex) -> Level {
    let d = descriptor(index);
    let platforms: Vec<Platform> = d
        .platforms
        .iter()
        .map(|&(x, y, w, h, material)| Platform::new(x, y, w, h, material))
        .collect();
    let player = GameConfig::for_variant(Variant::Deluxe).player;
    let spawn = settle_spawn(d.start, &platforms, (player.width, player.height));
    let enemies = d
        .enemies
        .iter()
        .map(|&(x, y, size, speed)| EnemySpawn {
            rect: Rect::new(x, y, size, size),
            speed,
            facing: Facing::Right,
            kind: EnemyKind::Blob,
            patrol: Patrol::Span {
                min_x: x,
                max_x: x + PATROL_DISTANCE,
            },
            walker: false,
        })
        .collect();

    Level {
        index,
        name: format!("Level {index}: {}", d.name),
        terrain: Terrain::Platforms(platforms),
        spawn,
        goal: Rect::new(d.goal.0, d.goal.1, GOAL_SIZE.0, GOAL_SIZE.1),
        enemies,
        coins: Vec::new(),
        width: WIDTH,
        height: HEIGHT,
    }
}
