//! Procedural tile-grid levels.
//!
//! Layouts get longer and more broken up as the index rises. The generator
//! draws everything from one RNG seeded by the index, so the same index always
//! yields the same grid.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{max_jump_tiles, GameConfig, Variant};
use crate::entities::{EnemyKind, EnemySpawn, Patrol};
use crate::geometry::Rect;
use crate::levels::{Level, LevelIndex};
use crate::physics::Facing;
use crate::terrain::{BlockPayload, QuestionBlock, Terrain, Tile, TileGrid, TILE};

pub const HEIGHT: usize = 16;
/// Upper of the two solid ground rows.
pub const GROUND_ROW: usize = HEIGHT - 2;
pub const MAX_WIDTH: usize = 280;

const SEED_BASE: u64 = 1000;
const SEED_STRIDE: u64 = 73;

/// Question-block contents, weighted toward coins.
const PAYLOAD_TABLE: [BlockPayload; 6] = [
    BlockPayload::Coin,
    BlockPayload::Coin,
    BlockPayload::Coin,
    BlockPayload::Mushroom,
    BlockPayload::FireFlower,
    BlockPayload::Leaf,
];

/// Non-terrain features placed during generation, in grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    Enemy { x: usize, y: usize },
    Spawn { x: usize, y: usize },
    Goal { x: usize, y: usize },
}

/// Generator output before entities are instantiated.
#[derive(Clone, Debug, PartialEq)]
pub struct Blueprint {
    pub grid: TileGrid,
    pub markers: Vec<Marker>,
    /// Spawn speed and direction for each enemy marker, in marker order.
    pub enemy_motion: Vec<(f32, Facing)>,
}

pub fn seed_for(index: LevelIndex) -> u64 {
    SEED_BASE + index.zero_based() as u64 * SEED_STRIDE
}

pub fn width_for(index: LevelIndex) -> usize {
    MAX_WIDTH.min(180 + index.zero_based() * 3)
}

/// Largest gap carved at this index: the difficulty curve capped by what
/// a full-speed jump can clear.
pub fn max_gap_for(index: LevelIndex) -> usize {
    let wanted = 4.min(2 + index.zero_based() / 8);
    let config = GameConfig::for_variant(Variant::Classic);
    let reach = max_jump_tiles(&config.physics, &config.player, TILE);
    if wanted > reach {
        tracing::warn!(level = index.get(), wanted, reach, "gap width clamped to jump range");
    }
    wanted.min(reach).max(1)
}

pub fn blueprint(index: LevelIndex) -> Blueprint {
    let i = index.zero_based();
    let mut rng = StdRng::seed_from_u64(seed_for(index));
    let width = width_for(index);
    let mut grid = TileGrid::new(width, HEIGHT);
    let ground = GROUND_ROW as i64;
    let w = width as i64;

    for x in 0..w {
        grid.set(x, ground, Tile::Ground);
        grid.set(x, ground + 1, Tile::Ground);
    }

    // Gaps. After each one the sweep skips ahead by at least two tiles so
    // there is always somewhere to land.
    let hole_prob = (0.08 + i as f64 * 0.003).min(0.18);
    let max_hole = max_gap_for(index);
    let mut x = 10;
    while x < w - 10 {
        if rng.gen::<f64>() < hole_prob {
            let gap = rng.gen_range(1..=max_hole) as i64;
            for dx in 0..gap {
                if x + dx < w - 2 {
                    grid.set(x + dx, ground, Tile::Empty);
                    grid.set(x + dx, ground + 1, Tile::Empty);
                }
            }
            x += gap + rng.gen_range(2..=6);
        } else {
            x += 1;
        }
    }

    // Floating blocks, kept clear of the ground rows.
    for _ in 0..(26 + i * 2) {
        let bx = rng.gen_range(4..=w - 4);
        let by = rng.gen_range(4..=ground - 3);
        let tile = if rng.gen::<f64>() < 0.6 {
            Tile::Brick
        } else {
            let payload = PAYLOAD_TABLE[rng.gen_range(0..PAYLOAD_TABLE.len())];
            Tile::Question(QuestionBlock::Active(payload))
        };
        grid.set(bx, by, tile);
    }

    // Final approach: six pillars rising one tile per step.
    for step in 0..6_i64 {
        let base_x = w - 20 + step * 2;
        for k in 0..=step {
            grid.set(base_x, ground - k, Tile::Ground);
        }
    }

    // Enemies stand on solid ground; give up after a bounded number of tries.
    let mut markers = Vec::new();
    let mut enemy_motion = Vec::new();
    let enemy_count = 8 + i / 2;
    let (mut attempts, mut placed) = (0, 0);
    while placed < enemy_count && attempts < enemy_count * 12 {
        attempts += 1;
        let ex = rng.gen_range(6..=width - 8);
        let standing = grid.get(ex as i64, ground).is_solid()
            && !grid.get(ex as i64, ground - 1).is_solid();
        if !standing {
            continue;
        }
        let marker = Marker::Enemy { x: ex, y: GROUND_ROW - 1 };
        if !markers.contains(&marker) {
            markers.push(marker);
            let speed = 1.0 + rng.gen::<f32>() * 0.6;
            let facing = if rng.gen_bool(0.5) { Facing::Right } else { Facing::Left };
            enemy_motion.push((speed, facing));
        }
        placed += 1;
    }

    markers.push(Marker::Spawn { x: 2, y: GROUND_ROW - 1 });
    markers.push(Marker::Goal { x: width - 6, y: GROUND_ROW - 2 });

    Blueprint {
        grid,
        markers,
        enemy_motion,
    }
}

/// First empty cell (scanning columns left to right, rows top to bottom)
/// that has a solid cell directly beneath it.
pub fn spawn_fallback(grid: &TileGrid) -> Option<(usize, usize)> {
    for tx in 0..grid.width() {
        for ty in 0..grid.height().saturating_sub(1) {
            let (x, y) = (tx as i64, ty as i64);
            if !grid.get(x, y).is_solid() && grid.get(x, y + 1).is_solid() {
                return Some((tx, ty));
            }
        }
    }
    None
}

/// Goal column used when the generator placed no goal marker.
pub fn goal_fallback(grid: &TileGrid) -> usize {
    grid.width().saturating_sub(3)
}

fn spawn_point(tx: usize, ty: usize) -> (f32, f32) {
    (tx as f32 * TILE + 8.0, ty as f32 * TILE + 4.0)
}

fn goal_region(tx: usize, grid: &TileGrid) -> Rect {
    Rect::new(tx as f32 * TILE, 0.0, 2.0 * TILE, grid.pixel_height())
}

pub fn generate(index: LevelIndex) -> Level {
    let Blueprint {
        grid,
        markers,
        enemy_motion,
    } = blueprint(index);

    let mut spawn = None;
    let mut goal = None;
    let mut enemies = Vec::new();
    let mut motion = enemy_motion.into_iter();
    for marker in &markers {
        match *marker {
            Marker::Enemy { x, y } => {
                let (speed, facing) = motion.next().unwrap_or((1.0, Facing::Right));
                enemies.push(EnemySpawn {
                    rect: Rect::new(x as f32 * TILE + 8.0, y as f32 * TILE + 16.0, 16.0, 16.0),
                    speed,
                    facing,
                    kind: EnemyKind::Goomba,
                    patrol: Patrol::Free,
                    walker: true,
                });
            }
            Marker::Spawn { x, y } => spawn = Some(spawn_point(x, y)),
            Marker::Goal { x, .. } => goal = Some(goal_region(x, &grid)),
        }
    }

    let spawn = spawn
        .or_else(|| spawn_fallback(&grid).map(|(x, y)| spawn_point(x, y)))
        .unwrap_or_else(|| spawn_point(2, GROUND_ROW - 1));
    let goal = goal.unwrap_or_else(|| goal_region(goal_fallback(&grid), &grid));

    Level {
        index,
        name: format!("Level {index}"),
        width: grid.pixel_width(),
        height: grid.pixel_height(),
        terrain: Terrain::Grid(grid),
        spawn,
        goal,
        enemies,
        coins: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_finds_first_standing_cell() {
        let mut grid = TileGrid::new(6, 4);
        grid.set(3, 3, Tile::Ground);
        assert_eq!(spawn_fallback(&grid), Some((3, 2)));
        assert_eq!(goal_fallback(&grid), 3);
    }

    #[test]
    fn width_grows_then_caps() {
        assert_eq!(width_for(LevelIndex::FIRST), 180);
        assert_eq!(width_for(LevelIndex::LAST), 273);
    }
}
