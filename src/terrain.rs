//! Static level geometry: tile grids and rectangle lists behind a single
//! solid-query seam.
//!
//! Terrain is immutable once a level is built, with two exceptions: question
//! blocks flip from active to consumed, and tiles may be removed.

use crate::geometry::Rect;

/// Edge length of one grid cell in world units.
pub const TILE: f32 = 32.0;

// ── Question blocks ───────────────────────────────────────────────────────────

/// What a question block releases when it is bumped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockPayload {
    Coin,
    Mushroom,
    FireFlower,
    Leaf,
}

impl BlockPayload {
    pub const ALL: [BlockPayload; 4] = [
        BlockPayload::Mushroom,
        BlockPayload::FireFlower,
        BlockPayload::Leaf,
        BlockPayload::Coin,
    ];
}

/// Two-state block: active with a payload, or consumed. The only transition
/// is active → consumed, and it happens once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionBlock {
    Active(BlockPayload),
    Consumed,
}

impl QuestionBlock {
    /// Consume the block, returning its payload the first time only.
    pub fn hit(&mut self) -> Option<BlockPayload> {
        match *self {
            QuestionBlock::Active(payload) => {
                *self = QuestionBlock::Consumed;
                Some(payload)
            }
            QuestionBlock::Consumed => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, QuestionBlock::Active(_))
    }
}

// ── Tile grid ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Ground,
    Brick,
    Question(QuestionBlock),
}

impl Tile {
    pub fn is_solid(&self) -> bool {
        !matches!(self, Tile::Empty)
    }
}

/// Row-major grid of tiles: index = y * width + x.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * TILE
    }

    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * TILE
    }

    fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Tile at grid coordinates. Anything outside the grid reads as ground so
    /// probes never see open space past the playfield.
    pub fn get(&self, x: i64, y: i64) -> Tile {
        if self.in_bounds(x, y) {
            self.tiles[y as usize * self.width + x as usize]
        } else {
            Tile::Ground
        }
    }

    /// Out-of-range writes are ignored.
    pub fn set(&mut self, x: i64, y: i64, tile: Tile) {
        if self.in_bounds(x, y) {
            let i = y as usize * self.width + x as usize;
            self.tiles[i] = tile;
        }
    }

    /// Tile under a world-space point.
    pub fn tile_at_point(&self, px: f32, py: f32) -> Tile {
        let tx = (px / TILE).floor() as i64;
        let ty = (py / TILE).floor() as i64;
        self.get(tx, ty)
    }

    pub fn cell_rect(x: i64, y: i64) -> Rect {
        Rect::new(x as f32 * TILE, y as f32 * TILE, TILE, TILE)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width.max(1))
    }

    /// Widest run of consecutive non-solid cells in `row`.
    pub fn widest_gap(&self, row: usize) -> usize {
        let mut widest = 0;
        let mut run = 0;
        for x in 0..self.width {
            if self.get(x as i64, row as i64).is_solid() {
                run = 0;
            } else {
                run += 1;
                widest = widest.max(run);
            }
        }
        widest
    }
}

// ── Rectangle lists ───────────────────────────────────────────────────────────

/// Surface style of a platform; drives colour only, except for question
/// blocks which carry state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Material {
    Grass,
    Ground,
    Brick,
    Stone,
    Cloud,
    Castle,
    Lava,
    Question(QuestionBlock),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Platform {
    pub rect: Rect,
    pub material: Material,
}

impl Platform {
    pub const fn new(x: f32, y: f32, w: f32, h: f32, material: Material) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            material,
        }
    }
}

// ── Solid queries ─────────────────────────────────────────────────────────────

/// Stable handle of a solid so a collision can be traced back to the cell or
/// platform that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SolidId {
    Cell { x: i64, y: i64 },
    Platform(usize),
    /// Column outside the grid, acting as a wall.
    Boundary,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Solid {
    pub id: SolidId,
    pub rect: Rect,
}

/// Anything a body can collide against.
pub trait SolidMap {
    /// Append every solid overlapping `rect` to `out`, in a fixed order
    /// (row-major for grids, list order for platforms).
    fn solids_overlapping(&self, rect: &Rect, out: &mut Vec<Solid>);
}

impl SolidMap for TileGrid {
    /// Columns past the left and right edges are walls; rows below the grid
    /// are open (bodies must be able to fall out) and so is the sky above it.
    fn solids_overlapping(&self, rect: &Rect, out: &mut Vec<Solid>) {
        if rect.w <= 0.0 || rect.h <= 0.0 {
            return;
        }
        let left = (rect.left() / TILE).floor() as i64;
        let right = ((rect.right() / TILE).ceil() as i64) - 1;
        let top = ((rect.top() / TILE).floor() as i64).max(0);
        let bottom = (((rect.bottom() / TILE).ceil() as i64) - 1).min(self.height as i64 - 1);
        for ty in top..=bottom {
            for tx in left..=right {
                let cell = TileGrid::cell_rect(tx, ty);
                if tx < 0 || tx >= self.width as i64 {
                    out.push(Solid {
                        id: SolidId::Boundary,
                        rect: cell,
                    });
                } else if self.get(tx, ty).is_solid() {
                    out.push(Solid {
                        id: SolidId::Cell { x: tx, y: ty },
                        rect: cell,
                    });
                }
            }
        }
    }
}

impl SolidMap for [Platform] {
    fn solids_overlapping(&self, rect: &Rect, out: &mut Vec<Solid>) {
        for (i, p) in self.iter().enumerate() {
            if p.rect.intersects(rect) {
                out.push(Solid {
                    id: SolidId::Platform(i),
                    rect: p.rect,
                });
            }
        }
    }
}

/// Level geometry in either representation.
#[derive(Clone, Debug, PartialEq)]
pub enum Terrain {
    Grid(TileGrid),
    Platforms(Vec<Platform>),
}

impl SolidMap for Terrain {
    fn solids_overlapping(&self, rect: &Rect, out: &mut Vec<Solid>) {
        match self {
            Terrain::Grid(grid) => grid.solids_overlapping(rect, out),
            Terrain::Platforms(list) => list.as_slice().solids_overlapping(rect, out),
        }
    }
}

impl Terrain {
    /// Is there anything solid under this world-space point?
    pub fn is_solid_at(&self, px: f32, py: f32) -> bool {
        match self {
            Terrain::Grid(grid) => grid.tile_at_point(px, py).is_solid(),
            Terrain::Platforms(list) => list.iter().any(|p| {
                px >= p.rect.left() && px < p.rect.right() && py >= p.rect.top() && py < p.rect.bottom()
            }),
        }
    }

    /// Bump the solid from below. Returns the payload and the solid's rect
    /// when it was an active question block; a consumed block stays solid.
    pub fn bump(&mut self, id: SolidId) -> Option<(BlockPayload, Rect)> {
        match (self, id) {
            (Terrain::Grid(grid), SolidId::Cell { x, y }) => {
                if let Tile::Question(mut block) = grid.get(x, y) {
                    let payload = block.hit()?;
                    grid.set(x, y, Tile::Question(block));
                    Some((payload, TileGrid::cell_rect(x, y)))
                } else {
                    None
                }
            }
            (Terrain::Platforms(list), SolidId::Platform(i)) => {
                let platform = list.get_mut(i)?;
                if let Material::Question(block) = &mut platform.material {
                    let payload = block.hit()?;
                    Some((payload, platform.rect))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// The tile grid, for grid-based levels.
    pub fn as_grid(&self) -> Option<&TileGrid> {
        match self {
            Terrain::Grid(grid) => Some(grid),
            Terrain::Platforms(_) => None,
        }
    }

    pub fn platforms(&self) -> &[Platform] {
        match self {
            Terrain::Grid(_) => &[],
            Terrain::Platforms(list) => list,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_block_yields_payload_once() {
        let mut block = QuestionBlock::Active(BlockPayload::Leaf);
        assert_eq!(block.hit(), Some(BlockPayload::Leaf));
        assert_eq!(block.hit(), None);
        assert_eq!(block, QuestionBlock::Consumed);
    }

    #[test]
    fn grid_scan_is_row_major() {
        let mut grid = TileGrid::new(4, 4);
        grid.set(1, 1, Tile::Brick);
        grid.set(0, 2, Tile::Ground);
        grid.set(1, 2, Tile::Ground);
        let mut out = Vec::new();
        grid.solids_overlapping(&Rect::new(10.0, 40.0, 40.0, 40.0), &mut out);
        let ids: Vec<SolidId> = out.iter().map(|s| s.id).collect();
        assert_eq!(
            ids,
            vec![
                SolidId::Cell { x: 1, y: 1 },
                SolidId::Cell { x: 0, y: 2 },
                SolidId::Cell { x: 1, y: 2 },
            ]
        );
    }

    #[test]
    fn outside_columns_are_walls_but_below_is_open() {
        let grid = TileGrid::new(4, 4);
        let mut out = Vec::new();
        grid.solids_overlapping(&Rect::new(-8.0, 40.0, 16.0, 16.0), &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, SolidId::Boundary);

        out.clear();
        grid.solids_overlapping(&Rect::new(40.0, 200.0, 16.0, 16.0), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn point_query_outside_grid_is_ground() {
        let grid = TileGrid::new(2, 2);
        assert_eq!(grid.get(-1, 0), Tile::Ground);
        assert_eq!(grid.get(0, 5), Tile::Ground);
        assert_eq!(grid.get(0, 0), Tile::Empty);
    }
}
