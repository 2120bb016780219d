//! Kinematic bodies and axis-separated collision resolution.
//!
//! Resolution order is fixed: gravity, then the horizontal axis, then the
//! vertical axis. Resolving x before y is what stops bodies snagging on the
//! seams between adjacent floor tiles.

use crate::config::Physics;
use crate::geometry::Rect;
use crate::terrain::{Solid, SolidId, SolidMap};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Facing {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// What a body touched during one step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contacts {
    pub on_ground: bool,
    pub hit_wall: bool,
    /// Solids struck from below while rising, in scan order.
    pub head_bumps: Vec<SolidId>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub rect: Rect,
    pub vx: f32,
    pub vy: f32,
    pub on_ground: bool,
    pub facing: Facing,
}

impl Body {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            vx: 0.0,
            vy: 0.0,
            on_ground: false,
            facing: Facing::Right,
        }
    }

    /// One full tick: gravity, then x, then y.
    pub fn step(&mut self, physics: &Physics, solids: &(impl SolidMap + ?Sized)) -> Contacts {
        self.apply_gravity(physics);
        let mut scratch = Vec::new();
        let hit_wall = self.move_x(solids, &mut scratch);
        let (on_ground, head_bumps) = self.move_y(solids, &mut scratch);
        Contacts {
            on_ground,
            hit_wall,
            head_bumps,
        }
    }

    pub fn apply_gravity(&mut self, physics: &Physics) {
        self.vy = (self.vy + physics.gravity).min(physics.terminal_velocity);
    }

    /// Integrate x and push out of every overlap along x only. Returns true
    /// if any solid was touched.
    pub fn move_x(&mut self, solids: &(impl SolidMap + ?Sized), scratch: &mut Vec<Solid>) -> bool {
        self.rect.x += self.vx;
        scratch.clear();
        solids.solids_overlapping(&self.rect, scratch);
        let mut hit = false;
        for solid in scratch.iter() {
            // Earlier pushes may already have cleared this one.
            if !self.rect.intersects(&solid.rect) {
                continue;
            }
            if self.vx > 0.0 {
                self.rect.set_right(solid.rect.left());
            } else if self.vx < 0.0 {
                self.rect.x = solid.rect.right();
            }
            self.vx = 0.0;
            hit = true;
        }
        hit
    }

    /// Integrate y and push out of every overlap along y only. Ground
    /// contact is recomputed here from scratch every call.
    pub fn move_y(
        &mut self,
        solids: &(impl SolidMap + ?Sized),
        scratch: &mut Vec<Solid>,
    ) -> (bool, Vec<SolidId>) {
        self.rect.y += self.vy;
        self.on_ground = false;
        let mut bumps = Vec::new();
        scratch.clear();
        solids.solids_overlapping(&self.rect, scratch);
        for solid in scratch.iter() {
            if !self.rect.intersects(&solid.rect) {
                continue;
            }
            if self.vy > 0.0 {
                self.rect.set_bottom(solid.rect.top());
                self.vy = 0.0;
                self.on_ground = true;
            } else if self.vy < 0.0 {
                self.rect.y = solid.rect.bottom();
                self.vy = 0.0;
                bumps.push(solid.id);
            }
        }
        (self.on_ground, bumps)
    }

    /// True once the body's top edge is more than `margin` below the level.
    pub fn fell_out(&self, level_height: f32, margin: f32) -> bool {
        self.rect.top() > level_height + margin
    }
}
