//! Single-screen world/stage layouts.
//!
//! Eight worlds of four stages; the stage picks the theme (grass,
//! underground, sky, castle) and the world scales the enemy count. Question
//! block contents and the scattered coins come from an RNG seeded by the level
//! index so a retry lays out the same level.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::entities::{Coin, EnemyKind, EnemySpawn, Patrol};
use crate::geometry::Rect;
use crate::levels::{Level, LevelIndex};
use crate::physics::Facing;
use crate::terrain::{BlockPayload, Material, Platform, QuestionBlock, Terrain};

pub const WIDTH: f32 = 800.0;
pub const HEIGHT: f32 = 600.0;
pub const GROUND_Y: f32 = 550.0;
pub const BLOCK_SIZE: f32 = 32.0;
/// Question blocks hang this far above the platform they belong to, leaving
/// head room to walk underneath and bump them.
pub const BLOCK_LIFT: f32 = 80.0;
pub const ENEMY_SIZE: f32 = 32.0;
pub const ENEMY_SPEED: f32 = 2.0;
pub const SPAWN: (f32, f32) = (50.0, 400.0);

const SEED_BASE: u64 = 2000;
const SEED_STRIDE: u64 = 97;

pub fn seed_for(index: LevelIndex) -> u64 {
    SEED_BASE + u64::from(index.get()) * SEED_STRIDE
}

struct Layout {
    rng: StdRng,
    platforms: Vec<Platform>,
    coins: Vec<Coin>,
    enemies: Vec<EnemySpawn>,
}

impl Layout {
    fn platform(&mut self, x: f32, y: f32, w: f32, h: f32, material: Material) {
        self.platforms.push(Platform::new(x, y, w, h, material));
    }

    /// A question block over the platform whose top is at `platform_y`.
    fn question_block(&mut self, x: f32, platform_y: f32) {
        let payload = BlockPayload::ALL[self.rng.gen_range(0..BlockPayload::ALL.len())];
        self.platform(
            x,
            platform_y - BLOCK_LIFT,
            BLOCK_SIZE,
            BLOCK_SIZE,
            Material::Question(QuestionBlock::Active(payload)),
        );
    }

    fn coin(&mut self, x: f32, y: f32) {
        self.coins.push(Coin::at(x, y));
    }

    /// Enemy standing on the main ground. Positions past the right edge of
    /// the screen fold back into the playfield.
    fn enemy(&mut self, x: f32, kind: EnemyKind) {
        let span = WIDTH - 2.0 * 40.0;
        let x = 40.0 + (x - 40.0).rem_euclid(span);
        self.enemies.push(EnemySpawn {
            rect: Rect::new(x, GROUND_Y - 40.0, ENEMY_SIZE, ENEMY_SIZE),
            speed: ENEMY_SPEED,
            facing: Facing::Right,
            kind,
            patrol: Patrol::Free,
            walker: true,
        });
    }
}

fn alternating(i: usize) -> EnemyKind {
    if i % 2 == 0 {
        EnemyKind::Koopa
    } else {
        EnemyKind::Goomba
    }
}

pub fn build(index: LevelIndex) -> Level {
    let (world, stage) = index.world_stage();
    let world = usize::from(world);
    let mut l = Layout {
        rng: StdRng::seed_from_u64(seed_for(index)),
        platforms: Vec::new(),
        coins: Vec::new(),
        enemies: Vec::new(),
    };

    l.platform(0.0, GROUND_Y, WIDTH, 50.0, Material::Ground);

    let theme = match stage {
        1 => {
            for i in 0..6 {
                let x = 120.0 + i as f32 * 130.0;
                let y = 450.0 - (i % 3) as f32 * 60.0;
                l.platform(x, y, 80.0, 20.0, Material::Brick);
                if i % 2 == 0 {
                    l.question_block(x + 25.0, y);
                } else {
                    l.coin(x + 30.0, y - 30.0);
                }
            }
            for i in 0..world + 1 {
                l.enemy(180.0 + i as f32 * 180.0, alternating(i));
            }
            "Grassland"
        }
        2 => {
            for i in 0..7 {
                let x = 90.0 + i as f32 * 110.0;
                let y = 400.0 - (i % 2) as f32 * 90.0;
                l.platform(x, y, 70.0, 20.0, Material::Stone);
                l.coin(x + 25.0, y - 30.0);
                if i % 3 == 0 {
                    l.question_block(x + 20.0, y);
                }
            }
            for i in 0..world + 2 {
                l.enemy(140.0 + i as f32 * 160.0, EnemyKind::Goomba);
            }
            "Underground"
        }
        3 => {
            for i in 0..8 {
                let x = 70.0 + i as f32 * 100.0;
                let y = 320.0 - (i % 4) as f32 * 70.0;
                l.platform(x, y, 60.0, 20.0, Material::Cloud);
                if i % 2 == 0 {
                    l.question_block(x + 15.0, y);
                }
            }
            for i in 0..world {
                l.enemy(90.0 + i as f32 * 220.0, EnemyKind::Koopa);
            }
            "Sky"
        }
        _ => {
            for i in 0..5 {
                let x = 140.0 + i as f32 * 150.0;
                let y = 420.0 - i as f32 * 45.0;
                l.platform(x, y, 90.0, 25.0, Material::Brick);
                l.question_block(x + 30.0, y);
            }
            for i in 0..world + 3 {
                l.enemy(110.0 + i as f32 * 130.0, alternating(i));
            }
            l.platform(650.0, 450.0, 120.0, 20.0, Material::Castle);
            "Castle"
        }
    };

    for _ in 0..8 + world {
        let x = l.rng.gen_range(100..=700) as f32;
        let y = l.rng.gen_range(200..=500) as f32;
        l.coin(x, y);
    }

    Level {
        index,
        name: format!("World {index} {theme}"),
        terrain: Terrain::Platforms(l.platforms),
        spawn: SPAWN,
        goal: Rect::new(750.0, 450.0, 20.0, 100.0),
        enemies: l.enemies,
        coins: l.coins,
        width: WIDTH,
        height: HEIGHT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enemies_fold_into_playfield() {
        let level = build(LevelIndex::LAST);
        assert_eq!(level.enemies.len(), 8 + 3);
        for e in &level.enemies {
            assert!(e.rect.left() >= 40.0 && e.rect.right() <= WIDTH);
        }
    }
}
