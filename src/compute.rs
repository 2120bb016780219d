//! Per-tick game logic.
//!
//! `tick` advances one `World` by one frame against the shared
//! `Progression`. All randomness (particle spray only) comes through the
//! injected RNG, so a seeded RNG makes a run fully reproducible.

use rand::Rng;

use crate::config::{GameConfig, Rules, Steering};
use crate::entities::{
    Coin, Damage, Enemy, Fireball, Particle, Patrol, Player, PowerTier, PowerUp, PowerUpKind,
    Progression,
};
use crate::input::{InputState, Key};
use crate::levels::Level;
use crate::physics::{Body, Facing};
use crate::render::{Rgb, DARK_ORANGE, GOLD, RED};
use crate::terrain::{BlockPayload, Terrain};

/// Forward and downward offsets of the ledge probe, from the enemy's
/// centre and feet.
const LEDGE_PROBE_AHEAD: f32 = 12.0;
const LEDGE_PROBE_BELOW: f32 = 2.0;
/// Items released from a question block appear this far above it.
const ITEM_RISE: f32 = 40.0;
const FLIGHT_TICKS: u32 = 100;
const FLIGHT_LIFT: f32 = -3.0;

/// Everything alive inside the level being played.
#[derive(Clone, Debug)]
pub struct World {
    /// Live level; question blocks mutate as they are hit.
    pub level: Level,
    /// The level as loaded, restored after a lost life.
    pub fresh: Level,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub power_ups: Vec<PowerUp>,
    pub fireballs: Vec<Fireball>,
    pub particles: Vec<Particle>,
    pub frame: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    GoalReached,
    /// A life was lost and the level restarted.
    LifeLost,
    OutOfLives,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fresh world for `level`, player at the spawn point.
pub fn init_world(level: Level, config: &GameConfig) -> World {
    let (sx, sy) = level.spawn;
    World {
        player: Player::new(sx, sy, config.player.width, config.player.height),
        enemies: level.enemies.iter().map(Enemy::from_spawn).collect(),
        coins: level.coins.clone(),
        power_ups: Vec::new(),
        fireballs: Vec::new(),
        particles: Vec::new(),
        frame: 0,
        fresh: level.clone(),
        level,
    }
}

/// Reload the level from its pristine copy and put the player back at spawn.
pub fn respawn(world: &mut World, config: &GameConfig) {
    let level = world.fresh.clone();
    *world = init_world(level, config);
}

// ── Damage and lives ─────────────────────────────────────────────────────────

/// Resolve one hit against the player's progression.
pub fn take_damage(progress: &mut Progression, rules: &Rules) -> Damage {
    if progress.is_invulnerable() {
        return Damage::Ignored;
    }
    progress.invulnerable = rules.invulnerability;
    if progress.tier > PowerTier::Small {
        progress.tier = progress.tier.demoted();
        Damage::Demoted
    } else {
        progress.lives = progress.lives.saturating_sub(1);
        Damage::LifeLost
    }
}

/// Falling out of the level costs a life regardless of tier.
pub fn pit_death(progress: &mut Progression, rules: &Rules) {
    progress.lives = progress.lives.saturating_sub(1);
    progress.tier = PowerTier::Small;
    progress.invulnerable = rules.invulnerability;
}

/// After a life is gone: restart the level, or report the game is over.
fn after_life_lost(
    world: &mut World,
    progress: &mut Progression,
    config: &GameConfig,
) -> TickOutcome {
    progress.p_meter = 0;
    progress.fly_timer = 0;
    if progress.lives == 0 {
        tracing::debug!(level = world.level.index.get(), "out of lives");
        return TickOutcome::OutOfLives;
    }
    tracing::debug!(lives = progress.lives, "life lost, restarting level");
    respawn(world, config);
    TickOutcome::LifeLost
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn burst(
    particles: &mut Vec<Particle>,
    rng: &mut impl Rng,
    x: f32,
    y: f32,
    count: usize,
    color: Rgb,
) {
    for _ in 0..count {
        particles.push(Particle {
            x,
            y,
            vx: rng.gen_range(-3..=3) as f32,
            vy: rng.gen_range(-8..=-3) as f32,
            life: Particle::LIFETIME,
            color,
        });
    }
}

fn power_up_for(payload: BlockPayload) -> Option<PowerUpKind> {
    match payload {
        BlockPayload::Coin => None,
        BlockPayload::Mushroom => Some(PowerUpKind::Mushroom),
        BlockPayload::FireFlower => Some(PowerUpKind::FireFlower),
        BlockPayload::Leaf => Some(PowerUpKind::Leaf),
    }
}

/// Turn directional input into horizontal velocity.
fn steer(body: &mut Body, steering: &Steering, input: &InputState) {
    let dir = input.axis();
    match *steering {
        Steering::Momentum {
            accel,
            max_speed,
            ground_friction,
            air_drag,
        } => {
            if dir == 0.0 {
                body.vx *= if body.on_ground { ground_friction } else { air_drag };
            } else {
                body.vx += dir * accel;
            }
            body.vx = body.vx.clamp(-max_speed, max_speed);
        }
        Steering::Direct { walk, run } => {
            let speed = if input.held(Key::Run) { run } else { walk };
            body.vx = dir * speed;
        }
        Steering::Damped {
            accel,
            friction,
            max_speed,
        } => {
            let ax = dir * accel + body.vx * friction;
            body.vx = (body.vx + ax).clamp(-max_speed, max_speed);
        }
    }
    if dir < 0.0 {
        body.facing = Facing::Left;
    } else if dir > 0.0 {
        body.facing = Facing::Right;
    }
}

fn update_enemy(enemy: &mut Enemy, terrain: &Terrain, level_width: f32, config: &GameConfig) {
    if enemy.walker {
        let contacts = enemy.body.step(&config.physics, terrain);
        if contacts.hit_wall {
            enemy.turn_around();
        } else if contacts.on_ground && config.rules.ledge_avoidance {
            let r = enemy.body.rect;
            let ahead = r.center_x() + LEDGE_PROBE_AHEAD * enemy.body.facing.sign();
            if !terrain.is_solid_at(ahead, r.bottom() + LEDGE_PROBE_BELOW) {
                enemy.turn_around();
            }
        }
    } else {
        enemy.body.rect.x += enemy.body.vx;
    }

    let facing = enemy.body.facing;
    let r = enemy.body.rect;
    if (r.left() < 0.0 && facing == Facing::Left)
        || (r.right() > level_width && facing == Facing::Right)
    {
        enemy.turn_around();
    } else if let Patrol::Span { min_x, max_x } = enemy.patrol {
        if (r.x > max_x && facing == Facing::Right) || (r.x < min_x && facing == Facing::Left) {
            enemy.turn_around();
        }
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the world by one frame.
pub fn tick(
    world: &mut World,
    progress: &mut Progression,
    input: &InputState,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> TickOutcome {
    world.frame += 1;
    progress.invulnerable = progress.invulnerable.saturating_sub(1);
    let rules = &config.rules;

    // ── 1. Player intent ─────────────────────────────────────────────────────
    let body = &mut world.player.body;
    steer(body, &config.player.steering, input);

    if rules.flight {
        if input.held(Key::Run) && input.axis() != 0.0 && body.on_ground {
            progress.p_meter = (progress.p_meter + 1).min(Progression::P_METER_MAX);
        } else {
            progress.p_meter = progress.p_meter.saturating_sub(2);
        }
    }

    body.apply_gravity(&config.physics);
    if input.pressed(Key::Jump) && body.on_ground {
        body.vy = -config.player.jump_speed;
        if rules.flight
            && progress.tier == PowerTier::Raccoon
            && progress.p_meter >= Progression::P_METER_MAX
        {
            progress.fly_timer = FLIGHT_TICKS;
        }
    }
    let flying = rules.flight && progress.tier == PowerTier::Raccoon && progress.fly_timer > 0;
    if flying && input.held(Key::Jump) {
        body.vy = FLIGHT_LIFT;
        progress.fly_timer -= 1;
    }

    if input.pressed(Key::Action) && progress.tier == PowerTier::Fire {
        let r = body.rect;
        world
            .fireballs
            .push(Fireball::launch(r.center_x(), r.center_y(), body.facing));
    }

    // ── 2. Player movement ───────────────────────────────────────────────────
    let mut scratch = Vec::new();
    let body = &mut world.player.body;
    body.move_x(&world.level.terrain, &mut scratch);
    let max_x = (world.level.width - body.rect.w).max(0.0);
    body.rect.x = body.rect.x.clamp(0.0, max_x);
    let (_, head_bumps) = body.move_y(&world.level.terrain, &mut scratch);

    for id in head_bumps {
        let Some((payload, block)) = world.level.terrain.bump(id) else {
            continue;
        };
        tracing::debug!(?payload, x = block.x, y = block.y, "question block hit");
        match power_up_for(payload) {
            Some(kind) => world.power_ups.push(PowerUp::at(block.x, block.y - ITEM_RISE, kind)),
            None => world.coins.push(Coin::at(block.x, block.y - ITEM_RISE)),
        }
        burst(&mut world.particles, rng, block.center_x(), block.top(), 5, GOLD);
    }

    // ── 3. Everything else moves ─────────────────────────────────────────────
    for enemy in world.enemies.iter_mut() {
        match enemy.squashed.as_mut() {
            Some(ticks) => *ticks = ticks.saturating_sub(1),
            None => update_enemy(enemy, &world.level.terrain, world.level.width, config),
        }
    }
    for p in world.power_ups.iter_mut() {
        p.update();
    }
    let (level_w, level_h) = (world.level.width, world.level.height);
    let terrain = &world.level.terrain;
    world.fireballs.retain_mut(|fb| {
        fb.step(&config.physics, terrain)
            && fb.body.rect.right() >= 0.0
            && fb.body.rect.left() <= level_w
            && !fb.body.fell_out(level_h, rules.fall_margin)
    });
    for p in world.particles.iter_mut() {
        p.update();
    }
    world.particles.retain(|p| p.life > 0);

    // ── 4. Player ↔ enemies ──────────────────────────────────────────────────
    let player = world.player.body.rect;
    let mut life_lost = false;
    for enemy in world.enemies.iter_mut().filter(|e| e.is_alive()) {
        if progress.is_invulnerable() || !player.intersects(&enemy.body.rect) {
            continue;
        }
        let target = enemy.body.rect;
        if world.player.body.vy > 0.0 && player.bottom() <= target.center_y() {
            enemy.squash(rules.squash_ticks);
            progress.score += rules.stomp_reward;
            world.player.body.vy = -config.player.stomp_bounce;
            burst(&mut world.particles, rng, target.center_x(), target.center_y(), 8, DARK_ORANGE);
            continue;
        }
        match take_damage(progress, rules) {
            Damage::LifeLost => {
                life_lost = true;
                break;
            }
            Damage::Demoted => tracing::debug!(tier = ?progress.tier, "player demoted"),
            Damage::Ignored => {}
        }
    }
    if life_lost {
        return after_life_lost(world, progress, config);
    }

    // ── 5. Fireballs ↔ enemies ───────────────────────────────────────────────
    let mut spent = vec![false; world.fireballs.len()];
    for enemy in world.enemies.iter_mut().filter(|e| e.is_alive()) {
        let hit = world
            .fireballs
            .iter()
            .zip(spent.iter_mut())
            .find(|(fb, used)| !**used && fb.body.rect.intersects(&enemy.body.rect));
        if let Some((_, used)) = hit {
            *used = true;
            // Removed at the end of the tick along with squashed enemies.
            enemy.squashed = Some(0);
            progress.score += rules.fireball_reward;
            let r = enemy.body.rect;
            burst(&mut world.particles, rng, r.center_x(), r.center_y(), 10, DARK_ORANGE);
        }
    }
    let mut keep = spent.into_iter().map(|used| !used);
    world.fireballs.retain(|_| keep.next().unwrap_or(true));

    // ── 6. Pickups ───────────────────────────────────────────────────────────
    let player = world.player.body.rect;
    let mut collected = Vec::new();
    world.coins.retain(|c| {
        let hit = player.intersects(&c.rect);
        if hit {
            collected.push(c.rect);
        }
        !hit
    });
    for rect in collected {
        progress.coins += 1;
        progress.score += rules.coin_reward;
        burst(&mut world.particles, rng, rect.center_x(), rect.center_y(), 5, GOLD);
    }

    let mut grabbed = Vec::new();
    world.power_ups.retain(|p| {
        let hit = player.intersects(&p.rect);
        if hit {
            grabbed.push(*p);
        }
        !hit
    });
    for p in grabbed {
        progress.tier = p.kind.upgrade(progress.tier);
        progress.score += rules.power_up_reward;
        burst(&mut world.particles, rng, p.rect.center_x(), p.rect.center_y(), 10, RED);
    }

    // ── 7. Goal and fall-off ─────────────────────────────────────────────────
    if player.intersects(&world.level.goal) {
        progress.score += rules.goal_reward;
        tracing::info!(level = world.level.index.get(), score = progress.score, "goal reached");
        return TickOutcome::GoalReached;
    }
    if world.player.body.fell_out(level_h, rules.fall_margin) {
        pit_death(progress, rules);
        return after_life_lost(world, progress, config);
    }

    // ── 8. End-of-tick removal ───────────────────────────────────────────────
    world.enemies.retain(|e| {
        e.squashed != Some(0) && !(e.walker && e.body.fell_out(level_h, rules.fall_margin))
    });

    TickOutcome::Continue
}
