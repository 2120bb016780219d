//! Turns the game context into an abstract draw list.
//!
//! Nothing here touches the terminal: a `Frame` is a list of primitives in
//! view coordinates (camera already applied) that any backend can rasterize.

use crate::compute::World;
use crate::config::Variant;
use crate::entities::{EnemyKind, PowerTier, PowerUpKind, Progression};
use crate::game::GameContext;
use crate::geometry::Rect;
use crate::screen::Screen;
use crate::terrain::{Material, QuestionBlock, Terrain, Tile, TileGrid, TILE};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

// ── Palette ───────────────────────────────────────────────────────────────────

pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const SKY: Rgb = Rgb(92, 148, 252);
pub const NIGHT: Rgb = Rgb(20, 20, 40);
pub const GRASS: Rgb = Rgb(0, 168, 0);
pub const DIRT: Rgb = Rgb(139, 69, 19);
pub const BRICK: Rgb = Rgb(200, 76, 12);
pub const STONE: Rgb = Rgb(120, 120, 120);
pub const CLOUD: Rgb = Rgb(240, 240, 255);
pub const LAVA: Rgb = Rgb(230, 60, 20);
pub const GOLD: Rgb = Rgb(252, 188, 60);
pub const USED_BLOCK: Rgb = Rgb(150, 110, 70);
pub const RED: Rgb = Rgb(220, 30, 30);
pub const SHELL_GREEN: Rgb = Rgb(50, 180, 50);
pub const DARK_ORANGE: Rgb = Rgb(230, 120, 30);
pub const LOCKED: Rgb = Rgb(90, 90, 90);

/// One drawing primitive, in view coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    /// Clear the whole view.
    Fill(Rgb),
    Rect { rect: Rect, color: Rgb },
    Circle { cx: f32, cy: f32, r: f32, color: Rgb },
    Polygon { points: Vec<(f32, f32)>, color: Rgb },
    Line { from: (f32, f32), to: (f32, f32), color: Rgb },
    Text { x: f32, y: f32, text: String, color: Rgb },
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCmd>,
}

impl Frame {
    fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }

    fn rect(&mut self, rect: Rect, color: Rgb) {
        self.push(DrawCmd::Rect { rect, color });
    }

    fn circle(&mut self, cx: f32, cy: f32, r: f32, color: Rgb) {
        self.push(DrawCmd::Circle { cx, cy, r, color });
    }

    fn text(&mut self, x: f32, y: f32, text: impl Into<String>, color: Rgb) {
        self.push(DrawCmd::Text {
            x,
            y,
            text: text.into(),
            color,
        });
    }

    /// Text horizontally centred on the view.
    fn centered(&mut self, y: f32, text: impl Into<String>, color: Rgb) {
        let text = text.into();
        let x = (self.width - text.chars().count() as f32 * TEXT_ADVANCE) / 2.0;
        self.text(x, y, text, color);
    }
}

/// Nominal width of one text character in view units, used for centring.
pub const TEXT_ADVANCE: f32 = 12.0;

/// View size for a variant. Grid levels scroll, so their view is wider.
pub fn view_size(variant: Variant) -> (f32, f32) {
    match variant {
        Variant::Classic => (960.0, 540.0),
        Variant::Arcade | Variant::Deluxe => (800.0, 600.0),
    }
}

pub fn frame(ctx: &GameContext) -> Frame {
    let (w, h) = view_size(ctx.config.variant);
    let mut f = Frame::new(w, h);
    match ctx.screen {
        Screen::Title => title(&mut f, ctx),
        Screen::Map => map(&mut f, ctx),
        Screen::Playing => match &ctx.world {
            Some(world) => {
                playfield(&mut f, world, ctx);
                hud(&mut f, ctx);
            }
            None => f.push(DrawCmd::Fill(SKY)),
        },
        Screen::LevelComplete => banner(
            &mut f,
            SKY,
            "LEVEL COMPLETE!",
            &format!("Score: {}   Coins: {}", ctx.progress.score, ctx.progress.coins),
            "Press ENTER to continue",
        ),
        Screen::GameOver => banner(
            &mut f,
            BLACK,
            "GAME OVER",
            &format!("Final score: {}", ctx.progress.score),
            "Press ENTER to return to the title",
        ),
        Screen::Win => banner(
            &mut f,
            SKY,
            "YOU WIN!",
            &format!("All 32 levels cleared. Score: {}", ctx.progress.score),
            "Press ENTER to play again",
        ),
    }
    f
}

// ── Menus ─────────────────────────────────────────────────────────────────────

fn title(f: &mut Frame, ctx: &GameContext) {
    f.push(DrawCmd::Fill(SKY));
    let ground = Rect::new(0.0, f.height - 80.0, f.width, 80.0);
    f.rect(ground, DIRT);
    f.rect(Rect::new(0.0, ground.top(), f.width, 12.0), GRASS);
    f.centered(f.height * 0.3, ctx.config.variant.title(), GOLD);
    f.centered(f.height * 0.45, "Press ENTER to start", WHITE);
    f.centered(
        f.height * 0.55,
        "Arrows/WASD move  SPACE jump  SHIFT run  F fire  ESC quit",
        WHITE,
    );
}

fn map(f: &mut Frame, ctx: &GameContext) {
    f.push(DrawCmd::Fill(Rgb(60, 140, 60)));
    let nodes = ctx.overworld.nodes();
    for pair in nodes.windows(2) {
        let color = if pair[1].unlocked { GOLD } else { LOCKED };
        f.push(DrawCmd::Line {
            from: (pair[0].x, pair[0].y),
            to: (pair[1].x, pair[1].y),
            color,
        });
    }
    for (i, node) in nodes.iter().enumerate() {
        if i == ctx.overworld.selected().zero_based() {
            f.circle(node.x, node.y, 20.0, WHITE);
        }
        let color = if node.completed {
            GOLD
        } else if node.unlocked {
            RED
        } else {
            LOCKED
        };
        f.circle(node.x, node.y, 15.0, color);
    }
    let selected = ctx.overworld.selected();
    f.text(10.0, 10.0, format!("WORLD {selected}"), WHITE);
    f.text(
        10.0,
        40.0,
        format!("Lives: {}  Score: {}", ctx.progress.lives, ctx.progress.score),
        WHITE,
    );
    f.centered(f.height - 30.0, "LEFT/RIGHT choose  ENTER play", WHITE);
}

fn banner(f: &mut Frame, bg: Rgb, headline: &str, detail: &str, prompt: &str) {
    f.push(DrawCmd::Fill(bg));
    f.centered(f.height * 0.4, headline, if bg == BLACK { RED } else { GOLD });
    f.centered(f.height * 0.5, detail, WHITE);
    f.centered(f.height * 0.6, prompt, WHITE);
}

// ── Playfield ─────────────────────────────────────────────────────────────────

/// Left/top of the view in world coordinates, keeping the player centred
/// where the level is larger than the view.
pub fn camera(world: &World, view_w: f32, view_h: f32) -> (f32, f32) {
    let focus = world.player.body.rect;
    let max_x = (world.level.width - view_w).max(0.0);
    let max_y = (world.level.height - view_h).max(0.0);
    let x = (focus.center_x() - view_w / 2.0).clamp(0.0, max_x);
    let y = (focus.center_y() - view_h / 2.0).clamp(0.0, max_y);
    (x, y)
}

fn playfield(f: &mut Frame, world: &World, ctx: &GameContext) {
    let (cam_x, cam_y) = camera(world, f.width, f.height);
    let view = Rect::new(cam_x, cam_y, f.width, f.height);
    let to_view = |r: Rect| r.translated(-cam_x, -cam_y);

    let (_, stage) = world.level.index.world_stage();
    let sky = match (ctx.config.variant, stage) {
        (Variant::Arcade, 2) | (Variant::Arcade, 4) => NIGHT,
        _ => SKY,
    };
    f.push(DrawCmd::Fill(sky));

    match &world.level.terrain {
        Terrain::Grid(grid) => tiles(f, grid, view, cam_x, cam_y),
        Terrain::Platforms(list) => {
            for p in list.iter().filter(|p| p.rect.intersects(&view)) {
                f.rect(to_view(p.rect), material_color(p.material));
            }
        }
    }

    // Flag: pole plus pennant.
    let goal = to_view(world.level.goal);
    let pole = Rect::new(goal.center_x() - 2.0, goal.top(), 4.0, goal.h);
    f.rect(pole, Rgb(180, 180, 180));
    f.push(DrawCmd::Polygon {
        points: vec![
            (pole.right(), pole.top() + 10.0),
            (pole.right(), pole.top() + 40.0),
            (pole.right() + 24.0, pole.top() + 25.0),
        ],
        color: SHELL_GREEN,
    });

    for coin in &world.coins {
        let r = to_view(coin.rect);
        f.circle(r.center_x(), r.center_y(), r.w / 2.0, GOLD);
    }

    for p in &world.power_ups {
        let r = to_view(p.rect);
        match p.kind {
            PowerUpKind::Mushroom => f.circle(r.center_x(), r.center_y(), r.w / 2.0, RED),
            PowerUpKind::FireFlower => {
                f.circle(r.center_x(), r.center_y(), r.w / 3.0, DARK_ORANGE);
            }
            PowerUpKind::Leaf => f.push(DrawCmd::Polygon {
                points: vec![
                    (r.center_x(), r.bottom()),
                    (r.left(), r.center_y()),
                    (r.center_x(), r.top()),
                    (r.right(), r.center_y()),
                ],
                color: DIRT,
            }),
        }
    }

    for e in &world.enemies {
        let mut r = to_view(e.body.rect);
        if !e.is_alive() {
            r = Rect::new(r.x, r.bottom() - r.h / 3.0, r.w, r.h / 3.0);
        }
        let color = match e.kind {
            EnemyKind::Goomba => DIRT,
            EnemyKind::Koopa => SHELL_GREEN,
            EnemyKind::Blob => RED,
        };
        f.rect(r, color);
    }

    for fb in &world.fireballs {
        let r = to_view(fb.body.rect);
        f.circle(r.center_x(), r.center_y(), r.w / 2.0, DARK_ORANGE);
    }

    for p in &world.particles {
        f.rect(Rect::new(p.x - cam_x, p.y - cam_y, 4.0, 4.0), p.color);
    }

    // Blink while invulnerable.
    let blink = ctx.progress.is_invulnerable() && (ctx.progress.invulnerable / 4) % 2 == 1;
    if !blink {
        let color = match ctx.progress.tier {
            PowerTier::Small | PowerTier::Super => RED,
            PowerTier::Fire => WHITE,
            PowerTier::Raccoon => DIRT,
        };
        f.rect(to_view(world.player.body.rect), color);
    }
}

fn tiles(f: &mut Frame, grid: &TileGrid, view: Rect, cam_x: f32, cam_y: f32) {
    let x0 = (view.left() / TILE).floor().max(0.0) as usize;
    let x1 = ((view.right() / TILE).ceil() as usize).min(grid.width());
    for (y, row) in grid.rows().enumerate() {
        for (x, tile) in row.iter().enumerate().take(x1).skip(x0) {
            let color = match tile {
                Tile::Empty => continue,
                Tile::Ground => DIRT,
                Tile::Brick => BRICK,
                Tile::Question(QuestionBlock::Active(_)) => GOLD,
                Tile::Question(QuestionBlock::Consumed) => USED_BLOCK,
            };
            let cell = TileGrid::cell_rect(x as i64, y as i64);
            f.rect(cell.translated(-cam_x, -cam_y), color);
        }
    }
}

fn material_color(m: Material) -> Rgb {
    match m {
        Material::Grass => GRASS,
        Material::Ground => DIRT,
        Material::Brick => BRICK,
        Material::Stone => STONE,
        Material::Cloud => CLOUD,
        Material::Castle => Rgb(100, 100, 110),
        Material::Lava => LAVA,
        Material::Question(QuestionBlock::Active(_)) => GOLD,
        Material::Question(QuestionBlock::Consumed) => USED_BLOCK,
    }
}

fn hud(f: &mut Frame, ctx: &GameContext) {
    let Some(world) = &ctx.world else { return };
    let p = &ctx.progress;
    f.text(
        10.0,
        10.0,
        format!("SCORE {:06}  COINS {:02}  LIVES {}", p.score, p.coins, p.lives),
        WHITE,
    );
    f.text(f.width - 300.0, 10.0, world.level.name.clone(), WHITE);
    if ctx.config.rules.flight {
        // Run meter: six pips, filled in proportion to the charge.
        let filled = (p.p_meter * 6 / Progression::P_METER_MAX) as usize;
        for i in 0..6 {
            let color = if i < filled { GOLD } else { LOCKED };
            f.rect(Rect::new(10.0 + i as f32 * 14.0, 36.0, 10.0, 8.0), color);
        }
    }
}
