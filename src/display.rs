//! Terminal backend: rasterizes a `Frame` into character cells.
//!
//! Each cell shows two vertical pixels with the upper-half block glyph
//! (foreground = top pixel, background = bottom pixel), and text is laid
//! over the pixels afterwards. No game logic lives here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};
use platform_quest::render::{DrawCmd, Frame, Rgb};

const HALF_BLOCK: char = '▀';

fn color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

/// Pixel grid of `cols × rows*2`, plus a text layer of `cols × rows`.
pub struct Canvas {
    cols: usize,
    rows: usize,
    /// View units per pixel, horizontally and vertically.
    scale: (f32, f32),
    pixels: Vec<Rgb>,
    glyphs: Vec<Option<(char, Rgb)>>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16, view_w: f32, view_h: f32) -> Self {
        let cols = usize::from(cols.max(1));
        let rows = usize::from(rows.max(1));
        Self {
            cols,
            rows,
            scale: (view_w / cols as f32, view_h / (rows * 2) as f32),
            pixels: vec![Rgb::default(); cols * rows * 2],
            glyphs: vec![None; cols * rows],
        }
    }

    fn pixel_height(&self) -> usize {
        self.rows * 2
    }

    fn set(&mut self, px: i64, py: i64, c: Rgb) {
        if px >= 0 && py >= 0 && (px as usize) < self.cols && (py as usize) < self.pixel_height() {
            self.pixels[py as usize * self.cols + px as usize] = c;
        }
    }

    /// Pixel range covered by the view-space span `[lo, hi)`, at least one
    /// pixel wide when the span is non-empty.
    fn span(lo: f32, hi: f32, scale: f32) -> (i64, i64) {
        let a = (lo / scale).floor() as i64;
        let b = ((hi / scale).ceil() as i64).max(a + 1);
        (a, b)
    }

    /// View-space centre of a pixel.
    fn center(&self, px: i64, py: i64) -> (f32, f32) {
        (
            (px as f32 + 0.5) * self.scale.0,
            (py as f32 + 0.5) * self.scale.1,
        )
    }

    /// Fill every pixel in the view-space box whose centre passes `inside`.
    fn fill_where(
        &mut self,
        bounds: (f32, f32, f32, f32),
        c: Rgb,
        inside: impl Fn(f32, f32) -> bool,
    ) {
        let (x0, y0, x1, y1) = bounds;
        let (px0, px1) = Self::span(x0, x1, self.scale.0);
        let (py0, py1) = Self::span(y0, y1, self.scale.1);
        for py in py0.max(0)..py1.min(self.pixel_height() as i64) {
            for px in px0.max(0)..px1.min(self.cols as i64) {
                let (vx, vy) = self.center(px, py);
                if inside(vx, vy) {
                    self.set(px, py, c);
                }
            }
        }
    }

    pub fn draw(&mut self, cmd: &DrawCmd) {
        match cmd {
            DrawCmd::Fill(c) => self.pixels.fill(*c),
            DrawCmd::Rect { rect, color } => {
                let (px0, px1) = Self::span(rect.left(), rect.right(), self.scale.0);
                let (py0, py1) = Self::span(rect.top(), rect.bottom(), self.scale.1);
                for py in py0.max(0)..py1.min(self.pixel_height() as i64) {
                    for px in px0.max(0)..px1.min(self.cols as i64) {
                        self.set(px, py, *color);
                    }
                }
            }
            DrawCmd::Circle { cx, cy, r, color } => {
                let (cx, cy, r) = (*cx, *cy, *r);
                // Small circles still get their centre pixel.
                self.set(
                    (cx / self.scale.0).floor() as i64,
                    (cy / self.scale.1).floor() as i64,
                    *color,
                );
                self.fill_where((cx - r, cy - r, cx + r, cy + r), *color, |x, y| {
                    (x - cx).powi(2) + (y - cy).powi(2) <= r * r
                });
            }
            DrawCmd::Polygon { points, color } => {
                if points.len() < 3 {
                    return;
                }
                let (mut x0, mut y0) = (f32::MAX, f32::MAX);
                let (mut x1, mut y1) = (f32::MIN, f32::MIN);
                for &(x, y) in points {
                    x0 = x0.min(x);
                    y0 = y0.min(y);
                    x1 = x1.max(x);
                    y1 = y1.max(y);
                }
                self.fill_where((x0, y0, x1, y1), *color, |x, y| point_in_polygon(points, x, y));
            }
            DrawCmd::Line { from, to, color } => {
                let (ax, ay) = (from.0 / self.scale.0, from.1 / self.scale.1);
                let (bx, by) = (to.0 / self.scale.0, to.1 / self.scale.1);
                let steps = (bx - ax).abs().max((by - ay).abs()).ceil().max(1.0) as i64;
                for i in 0..=steps {
                    let t = i as f32 / steps as f32;
                    let x = ax + (bx - ax) * t;
                    let y = ay + (by - ay) * t;
                    self.set(x.floor() as i64, y.floor() as i64, *color);
                }
            }
            DrawCmd::Text { x, y, text, color } => {
                let col = (x / self.scale.0).floor() as i64;
                let row = (y / (self.scale.1 * 2.0)).floor() as i64;
                if row < 0 || row as usize >= self.rows {
                    return;
                }
                for (i, ch) in text.chars().enumerate() {
                    let c = col + i as i64;
                    if c >= 0 && (c as usize) < self.cols {
                        self.glyphs[row as usize * self.cols + c as usize] = Some((ch, *color));
                    }
                }
            }
        }
    }

    /// Queue the whole canvas, one row at a time, only switching colours
    /// when they change.
    pub fn flush_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let mut current: Option<(Rgb, Rgb)> = None;
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row as u16))?;
            for col in 0..self.cols {
                let top = self.pixels[row * 2 * self.cols + col];
                let bottom = self.pixels[(row * 2 + 1) * self.cols + col];
                let (ch, fg, bg) = match self.glyphs[row * self.cols + col] {
                    Some((ch, fg)) => (ch, fg, bottom),
                    None => (HALF_BLOCK, top, bottom),
                };
                if current != Some((fg, bg)) {
                    out.queue(style::SetForegroundColor(color(fg)))?;
                    out.queue(style::SetBackgroundColor(color(bg)))?;
                    current = Some((fg, bg));
                }
                out.queue(Print(ch))?;
            }
        }
        out.queue(style::ResetColor)?;
        Ok(())
    }
}

/// Even-odd rule.
fn point_in_polygon(points: &[(f32, f32)], x: f32, y: f32) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame to a terminal of `cols × rows` cells.
pub fn render<W: Write>(out: &mut W, frame: &Frame, cols: u16, rows: u16) -> std::io::Result<()> {
    let mut canvas = Canvas::new(cols, rows, frame.width, frame.height);
    for cmd in &frame.commands {
        canvas.draw(cmd);
    }
    canvas.flush_to(out)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform_quest::geometry::Rect;

    #[test]
    fn rect_fills_its_pixels_only() {
        let mut c = Canvas::new(10, 5, 100.0, 100.0);
        c.draw(&DrawCmd::Fill(Rgb(1, 1, 1)));
        c.draw(&DrawCmd::Rect {
            rect: Rect::new(0.0, 0.0, 50.0, 50.0),
            color: Rgb(9, 9, 9),
        });
        assert_eq!(c.pixels[0], Rgb(9, 9, 9));
        assert_eq!(c.pixels[4], Rgb(9, 9, 9));
        assert_eq!(c.pixels[5], Rgb(1, 1, 1));
        assert_eq!(c.pixels[5 * 10], Rgb(1, 1, 1));
    }

    #[test]
    fn triangle_contains_its_centroid() {
        let tri = [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)];
        assert!(point_in_polygon(&tri, 2.0, 2.0));
        assert!(!point_in_polygon(&tri, 9.0, 9.0));
    }

    #[test]
    fn text_outside_the_canvas_is_dropped() {
        let mut c = Canvas::new(4, 2, 40.0, 40.0);
        c.draw(&DrawCmd::Text {
            x: 20.0,
            y: 0.0,
            text: "hello".into(),
            color: Rgb(1, 2, 3),
        });
        assert_eq!(c.glyphs[2], Some(('h', Rgb(1, 2, 3))));
        assert_eq!(c.glyphs[3], Some(('e', Rgb(1, 2, 3))));
        assert!(c.glyphs[4].is_none());
    }
}
