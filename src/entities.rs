//! Game entity types: pure data plus the small state transitions that
//! belong to a single entity.

use crate::config::Physics;
use crate::geometry::Rect;
use crate::physics::{Body, Facing};
use crate::render::Rgb;
use crate::terrain::SolidMap;

// ── Power tiers ───────────────────────────────────────────────────────────────

/// Ordered by survivability: each tier absorbs one more hit than the last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum PowerTier {
    #[default]
    Small,
    Super,
    Fire,
    Raccoon,
}

impl PowerTier {
    /// One tier down; Small stays Small.
    pub fn demoted(self) -> PowerTier {
        match self {
            PowerTier::Small | PowerTier::Super => PowerTier::Small,
            PowerTier::Fire => PowerTier::Super,
            PowerTier::Raccoon => PowerTier::Fire,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    Mushroom,
    FireFlower,
    Leaf,
}

impl PowerUpKind {
    /// Tier after collecting this power-up from `tier`. A mushroom only
    /// lifts a Small player.
    pub fn upgrade(self, tier: PowerTier) -> PowerTier {
        match self {
            PowerUpKind::Mushroom if tier == PowerTier::Small => PowerTier::Super,
            PowerUpKind::Mushroom => tier,
            PowerUpKind::FireFlower => PowerTier::Fire,
            PowerUpKind::Leaf => PowerTier::Raccoon,
        }
    }
}

// ── Progression ───────────────────────────────────────────────────────────────

/// Everything that survives between levels, plus the player's hit timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Progression {
    pub lives: u32,
    pub score: u32,
    pub coins: u32,
    pub tier: PowerTier,
    /// Ticks of damage immunity left.
    pub invulnerable: u32,
    /// Run charge, 0..=100.
    pub p_meter: u32,
    /// Ticks of flight left.
    pub fly_timer: u32,
}

impl Progression {
    pub const P_METER_MAX: u32 = 100;

    pub fn new(lives: u32) -> Self {
        Self {
            lives,
            ..Self::default()
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0
    }
}

/// How a hit resolved against the player's state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Damage {
    /// Invulnerable: nothing happened.
    Ignored,
    /// Lost a tier, kept the life.
    Demoted,
    /// Lost a life; the player goes back to the spawn point.
    LifeLost,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub body: Body,
}

impl Player {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            body: Body::new(x, y, w, h),
        }
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Goomba,
    Koopa,
    /// Plain patrolling block from the hand-authored levels.
    Blob,
}

/// Horizontal range an enemy keeps to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Patrol {
    /// Walks until a wall, a ledge (if avoided) or the level edge.
    Free,
    /// Turns around at either end of `[min_x, max_x]` (left edge).
    Span { min_x: f32, max_x: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySpawn {
    pub rect: Rect,
    pub speed: f32,
    pub facing: Facing,
    pub kind: EnemyKind,
    pub patrol: Patrol,
    /// Falls under gravity and walks on terrain; otherwise hovers along its
    /// patrol line.
    pub walker: bool,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub body: Body,
    pub kind: EnemyKind,
    pub speed: f32,
    pub patrol: Patrol,
    pub walker: bool,
    /// `Some(ticks)` once stomped: inert and flattened until it hits zero.
    pub squashed: Option<u32>,
}

impl Enemy {
    pub fn from_spawn(spawn: &EnemySpawn) -> Self {
        let mut body = Body::new(spawn.rect.x, spawn.rect.y, spawn.rect.w, spawn.rect.h);
        body.facing = spawn.facing;
        body.vx = spawn.speed * spawn.facing.sign();
        Self {
            body,
            kind: spawn.kind,
            speed: spawn.speed,
            patrol: spawn.patrol,
            walker: spawn.walker,
            squashed: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.squashed.is_none()
    }

    pub fn squash(&mut self, ticks: u32) {
        self.squashed = Some(ticks);
        self.body.vx = 0.0;
    }

    pub fn turn_around(&mut self) {
        self.body.facing = self.body.facing.flipped();
        self.body.vx = self.speed * self.body.facing.sign();
    }
}

// ── Collectibles ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coin {
    pub rect: Rect,
}

impl Coin {
    pub const SIZE: f32 = 20.0;

    pub fn at(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::new(x, y, Self::SIZE, Self::SIZE),
        }
    }
}

/// A power-up pops upward out of its block and then hangs in place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerUp {
    pub rect: Rect,
    pub vy: f32,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub const SIZE: f32 = 28.0;
    const LAUNCH: f32 = -5.0;
    const RISE_DECAY: f32 = 0.3;

    pub fn at(x: f32, y: f32, kind: PowerUpKind) -> Self {
        Self {
            rect: Rect::new(x, y, Self::SIZE, Self::SIZE),
            vy: Self::LAUNCH,
            kind,
        }
    }

    pub fn update(&mut self) {
        if self.vy < 0.0 {
            self.vy = (self.vy + Self::RISE_DECAY).min(0.0);
            self.rect.y += self.vy;
        }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Fireball {
    pub body: Body,
    pub bounces: u32,
}

impl Fireball {
    pub const SIZE: f32 = 12.0;
    pub const SPEED: f32 = 8.0;
    /// Vertical speed after touching a surface.
    pub const BOUNCE: f32 = -8.0;
    /// Removed once this many bounces have been exceeded.
    pub const MAX_BOUNCES: u32 = 4;

    pub fn launch(cx: f32, cy: f32, facing: Facing) -> Self {
        let mut body = Body::new(cx, cy, Self::SIZE, Self::SIZE);
        body.vx = Self::SPEED * facing.sign();
        body.facing = facing;
        Self { body, bounces: 0 }
    }

    /// Advance one tick, bouncing off anything landed on. Returns false once
    /// the fireball is spent: it struck a wall or exceeded its bounces.
    pub fn step(&mut self, physics: &Physics, solids: &(impl SolidMap + ?Sized)) -> bool {
        let contacts = self.body.step(physics, solids);
        if contacts.on_ground {
            self.body.vy = Self::BOUNCE;
            self.bounces += 1;
        }
        !contacts.hit_wall && self.bounces <= Self::MAX_BOUNCES
    }
}

// ── Cosmetics ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub life: u32,
    pub color: Rgb,
}

impl Particle {
    pub const LIFETIME: u32 = 30;

    pub fn update(&mut self) {
        self.vy += 0.5;
        self.x += self.vx;
        self.y += self.vy;
        self.life = self.life.saturating_sub(1);
    }
}
