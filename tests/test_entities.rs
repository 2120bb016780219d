use platform_quest::config::{GameConfig, Variant};
use platform_quest::entities::*;
use platform_quest::geometry::Rect;
use platform_quest::physics::Facing;
use platform_quest::terrain::{Material, Platform};

#[test]
fn tiers_are_ordered_by_survivability() {
    assert!(PowerTier::Small < PowerTier::Super);
    assert!(PowerTier::Super < PowerTier::Fire);
    assert!(PowerTier::Fire < PowerTier::Raccoon);
    assert_eq!(PowerTier::default(), PowerTier::Small);
}

#[test]
fn demotion_drops_one_tier_and_floors_at_small() {
    assert_eq!(PowerTier::Raccoon.demoted(), PowerTier::Fire);
    assert_eq!(PowerTier::Fire.demoted(), PowerTier::Super);
    assert_eq!(PowerTier::Super.demoted(), PowerTier::Small);
    assert_eq!(PowerTier::Small.demoted(), PowerTier::Small);
}

#[test]
fn power_up_upgrades() {
    assert_eq!(PowerUpKind::Mushroom.upgrade(PowerTier::Small), PowerTier::Super);
    assert_eq!(PowerUpKind::Mushroom.upgrade(PowerTier::Raccoon), PowerTier::Raccoon);
    assert_eq!(PowerUpKind::FireFlower.upgrade(PowerTier::Small), PowerTier::Fire);
    assert_eq!(PowerUpKind::Leaf.upgrade(PowerTier::Fire), PowerTier::Raccoon);
}

#[test]
fn new_progression_only_has_lives() {
    let p = Progression::new(5);
    assert_eq!(p.lives, 5);
    assert_eq!((p.score, p.coins, p.p_meter, p.fly_timer), (0, 0, 0, 0));
    assert!(!p.is_invulnerable());
}

#[test]
fn enemy_turn_around_flips_velocity() {
    let spawn = EnemySpawn {
        rect: Rect::new(0.0, 0.0, 16.0, 16.0),
        speed: 1.5,
        facing: Facing::Right,
        kind: EnemyKind::Goomba,
        patrol: Patrol::Free,
        walker: true,
    };
    let mut e = Enemy::from_spawn(&spawn);
    assert_eq!(e.body.vx, 1.5);
    e.turn_around();
    assert_eq!(e.body.facing, Facing::Left);
    assert_eq!(e.body.vx, -1.5);
    e.squash(30);
    assert!(!e.is_alive());
    assert_eq!(e.body.vx, 0.0);
}

#[test]
fn power_up_rises_then_hangs() {
    let mut p = PowerUp::at(0.0, 100.0, PowerUpKind::Leaf);
    for _ in 0..40 {
        p.update();
    }
    let settled = p.rect.y;
    assert!(settled < 100.0);
    p.update();
    assert_eq!(p.rect.y, settled);
    assert_eq!(p.vy, 0.0);
}

#[test]
fn particle_life_runs_out() {
    let mut part = Particle {
        x: 0.0,
        y: 0.0,
        vx: 1.0,
        vy: -4.0,
        life: Particle::LIFETIME,
        color: Default::default(),
    };
    for _ in 0..Particle::LIFETIME {
        part.update();
    }
    assert_eq!(part.life, 0);
    assert_eq!(part.x, Particle::LIFETIME as f32);
}

// ── Fireballs ─────────────────────────────────────────────────────────────────

#[test]
fn fireball_is_spent_after_too_many_bounces() {
    let physics = GameConfig::for_variant(Variant::Arcade).physics;
    let floor = vec![Platform::new(0.0, 400.0, 100_000.0, 50.0, Material::Ground)];
    let mut fb = Fireball::launch(0.0, 300.0, Facing::Right);
    let mut steps = 0;
    while fb.step(&physics, floor.as_slice()) {
        steps += 1;
        assert!(steps < 1000, "fireball never expired");
    }
    assert_eq!(fb.bounces, Fireball::MAX_BOUNCES + 1);
    assert!(fb.body.rect.bottom() <= 400.0);
}

#[test]
fn fireball_is_spent_on_a_wall() {
    let physics = GameConfig::for_variant(Variant::Arcade).physics;
    let wall = vec![Platform::new(50.0, 0.0, 20.0, 400.0, Material::Brick)];
    let mut fb = Fireball::launch(30.0, 300.0, Facing::Right);
    assert!(fb.step(&physics, wall.as_slice()));
    assert!(!fb.step(&physics, wall.as_slice()));
    assert_eq!(fb.body.rect.right(), 50.0);
    assert_eq!(fb.bounces, 0);
}

#[test]
fn fireball_flies_the_way_it_faces() {
    let fb = Fireball::launch(10.0, 10.0, Facing::Left);
    assert_eq!(fb.body.vx, -Fireball::SPEED);
    assert_eq!(fb.body.rect.w, Fireball::SIZE);
}
