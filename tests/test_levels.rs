use platform_quest::compute::{init_world, tick};
use platform_quest::config::{max_jump_tiles, GameConfig, Variant};
use platform_quest::entities::{Patrol, Progression};
use platform_quest::error::GameError;
use platform_quest::geometry::Rect;
use platform_quest::input::{InputSnapshot, InputState, Key};
use platform_quest::levels::{self, arcade, classic, LevelIndex};
use platform_quest::terrain::{Material, SolidMap, TILE};

use rand::rngs::StdRng;
use rand::SeedableRng;

const VARIANTS: [Variant; 3] = [Variant::Classic, Variant::Arcade, Variant::Deluxe];

// ── Loading ───────────────────────────────────────────────────────────────────

#[test]
fn every_level_rebuilds_identically() {
    for variant in VARIANTS {
        for index in LevelIndex::all() {
            assert_eq!(
                levels::build(variant, index),
                levels::build(variant, index),
                "{variant:?} level {index}"
            );
        }
    }
}

#[test]
fn out_of_range_levels_are_rejected() {
    for variant in VARIANTS {
        assert!(matches!(levels::load(variant, 0), Err(GameError::InvalidLevel(0))));
        assert!(matches!(levels::load(variant, 33), Err(GameError::InvalidLevel(33))));
        assert!(levels::load(variant, 32).is_ok());
    }
}

#[test]
fn goal_lies_inside_the_level() {
    for variant in VARIANTS {
        for index in LevelIndex::all() {
            let level = levels::build(variant, index);
            assert!(level.goal.left() >= 0.0 && level.goal.right() <= level.width);
            assert!(level.goal.w > 0.0 && level.goal.h > 0.0);
            assert!(level.spawn.0 < level.goal.left(), "{variant:?} level {index}");
        }
    }
}

#[test]
fn spawn_is_clear_of_terrain() {
    for variant in VARIANTS {
        let config = GameConfig::for_variant(variant);
        for index in LevelIndex::all() {
            let level = levels::build(variant, index);
            let (x, y) = level.spawn;
            let player = Rect::new(x, y, config.player.width, config.player.height);
            let mut hits = Vec::new();
            level.terrain.solids_overlapping(&player, &mut hits);
            assert!(hits.is_empty(), "{variant:?} level {index}: {hits:?}");
        }
    }
}

// ── Classic ───────────────────────────────────────────────────────────────────

#[test]
fn classic_gaps_stay_within_jump_range() {
    let config = GameConfig::for_variant(Variant::Classic);
    let reach = max_jump_tiles(&config.physics, &config.player, TILE);
    for index in LevelIndex::all() {
        let level = classic::generate(index);
        let grid = level.terrain.as_grid().expect("classic levels are grids");
        assert!(grid.widest_gap(classic::GROUND_ROW) <= reach, "level {index}");
        assert!(grid.widest_gap(classic::GROUND_ROW + 1) <= reach, "level {index}");
    }
}

#[test]
fn classic_levels_grow_and_get_harder() {
    let first = classic::generate(LevelIndex::FIRST);
    let last = classic::generate(LevelIndex::LAST);
    assert!(last.width > first.width);
    assert!(last.enemies.len() >= first.enemies.len());
    assert!(classic::max_gap_for(LevelIndex::LAST) >= classic::max_gap_for(LevelIndex::FIRST));
    assert_ne!(classic::seed_for(LevelIndex::FIRST), classic::seed_for(LevelIndex::LAST));
}

#[test]
fn classic_enemies_start_on_solid_ground() {
    for index in LevelIndex::all() {
        let level = classic::generate(index);
        assert!(!level.enemies.is_empty());
        for e in &level.enemies {
            assert!(e.walker);
            assert!(level.terrain.is_solid_at(e.rect.center_x(), e.rect.bottom() + 1.0));
        }
    }
}

#[test]
fn walking_into_a_classic_wall_stops_at_its_face() {
    let config = GameConfig::for_variant(Variant::Classic);
    let level = classic::generate(LevelIndex::FIRST);
    let grid = level.terrain.as_grid().expect("classic levels are grids").clone();
    let row = classic::GROUND_ROW as i64 - 1;
    let open = |x: i64| !grid.get(x, row).is_solid() && !grid.get(x, row - 1).is_solid();
    let floor = |x: i64| grid.get(x, row + 1).is_solid();
    let wall = (1..grid.width() as i64)
        .find(|&c| grid.get(c, row).is_solid() && open(c - 1) && floor(c - 1))
        .expect("level 1 has a step to walk into");

    let mut world = init_world(level, &config);
    world.enemies.clear();
    let body = &mut world.player.body;
    body.rect.x = (wall - 1) as f32 * TILE + 8.0;
    body.rect.y = row as f32 * TILE + 4.0;
    body.on_ground = true;

    let mut progress = Progression::new(3);
    let mut rng = StdRng::seed_from_u64(42);
    let mut input = InputState::default();
    for _ in 0..90 {
        input.advance(InputSnapshot::default().with(Key::Right));
        tick(&mut world, &mut progress, &input, &config, &mut rng);
        assert!(world.player.body.rect.right() <= wall as f32 * TILE);
    }
    assert_eq!(world.player.body.rect.right(), wall as f32 * TILE);
    assert_eq!(world.player.body.vx, 0.0);
    assert_eq!(progress.lives, 3);
}

// ── Arcade ────────────────────────────────────────────────────────────────────

#[test]
fn arcade_question_blocks_start_active() {
    let level = arcade::build(LevelIndex::FIRST);
    let blocks = level
        .terrain
        .platforms()
        .iter()
        .filter(|p| matches!(p.material, Material::Question(block) if block.is_active()))
        .count();
    assert!(blocks > 0);
    assert!(!level.coins.is_empty());
}

#[test]
fn arcade_enemy_count_scales_with_world() {
    let first = arcade::build(LevelIndex::FIRST);
    let later = arcade::build(LevelIndex::new(29).expect("valid level"));
    assert!(later.enemies.len() > first.enemies.len());
    for e in &later.enemies {
        assert!(e.rect.left() >= 40.0 && e.rect.left() < arcade::WIDTH - 40.0);
    }
}

// ── Deluxe ────────────────────────────────────────────────────────────────────

#[test]
fn deluxe_sunken_starts_stand_on_their_platform() {
    let config = GameConfig::for_variant(Variant::Deluxe);
    for n in [20, 27, 32] {
        let level = levels::load(Variant::Deluxe, n).expect("valid level");
        assert_eq!(level.spawn, (50.0, 510.0), "level {n}");

        let mut world = init_world(level, &config);
        let mut progress = Progression::new(3);
        let mut rng = StdRng::seed_from_u64(42);
        let mut input = InputState::default();
        for _ in 0..120 {
            input.advance(InputSnapshot::default().with(Key::Left));
            tick(&mut world, &mut progress, &input, &config, &mut rng);
        }
        let body = &world.player.body;
        assert_eq!(progress.lives, 3, "level {n}");
        assert_eq!(body.rect.x, 0.0, "level {n}");
        assert_eq!(body.rect.bottom(), 560.0, "level {n}");
        assert!(body.on_ground);
    }
}

#[test]
fn deluxe_enemies_hover_on_a_fixed_patrol() {
    for index in LevelIndex::all() {
        let level = levels::build(Variant::Deluxe, index);
        assert!(level.name.starts_with(&format!("Level {index}: ")));
        for e in &level.enemies {
            assert!(!e.walker);
            assert_eq!(
                e.patrol,
                Patrol::Span {
                    min_x: e.rect.x,
                    max_x: e.rect.x + levels::deluxe::PATROL_DISTANCE
                }
            );
        }
    }
}
