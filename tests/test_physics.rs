use platform_quest::config::Physics;
use platform_quest::physics::Body;
use platform_quest::terrain::{SolidId, SolidMap, Terrain, Tile, TileGrid, TILE};

const PHYS: Physics = Physics {
    gravity: 0.6,
    terminal_velocity: 15.0,
};

/// 20 × 8 grid with a solid floor on row 6 and a gap at columns 10..12.
fn floor_grid() -> TileGrid {
    let mut grid = TileGrid::new(20, 8);
    for x in 0..20 {
        if !(10..12).contains(&x) {
            grid.set(x, 6, Tile::Ground);
            grid.set(x, 7, Tile::Ground);
        }
    }
    grid
}

fn standing_body(x: f32) -> Body {
    let mut b = Body::new(x, 6.0 * TILE - 28.0, 16.0, 28.0);
    b.on_ground = true;
    b
}

// ── Ground contact ────────────────────────────────────────────────────────────

#[test]
fn body_lands_on_the_floor() {
    let grid = floor_grid();
    let mut b = Body::new(40.0, 20.0, 16.0, 28.0);
    for _ in 0..60 {
        b.step(&PHYS, &grid);
    }
    assert_eq!(b.rect.bottom(), 6.0 * TILE);
    assert!(b.on_ground);
    assert_eq!(b.vy, 0.0);
}

#[test]
fn walking_across_tile_seams_never_snags() {
    let grid = floor_grid();
    let mut b = standing_body(0.0);
    for _ in 0..100 {
        b.vx = 3.0;
        let contacts = b.step(&PHYS, &grid);
        assert!(!contacts.hit_wall);
        assert!(contacts.on_ground);
        if b.rect.right() > 9.0 * TILE {
            break;
        }
    }
    assert!(b.rect.right() > 9.0 * TILE);
}

#[test]
fn walking_off_a_ledge_is_airborne_next_tick() {
    let grid = floor_grid();
    let mut b = standing_body(10.0 * TILE + 4.0);
    let contacts = b.step(&PHYS, &grid);
    assert!(!contacts.on_ground);
    assert!(!b.on_ground);
    assert!(b.rect.bottom() > 6.0 * TILE);
}

#[test]
fn bodies_fall_through_the_bottom_of_the_grid() {
    let grid = floor_grid();
    let mut b = Body::new(10.0 * TILE + 8.0, 0.0, 16.0, 28.0);
    for _ in 0..120 {
        b.step(&PHYS, &grid);
    }
    assert!(b.rect.top() > grid.pixel_height());
    assert!(b.fell_out(grid.pixel_height(), 0.0));
    assert!(!b.fell_out(grid.pixel_height(), 10_000.0));
}

// ── Walls ─────────────────────────────────────────────────────────────────────

#[test]
fn grid_sides_act_as_walls() {
    let grid = floor_grid();
    let mut b = standing_body(2.0);
    b.vx = -5.0;
    let contacts = b.step(&PHYS, &grid);
    assert!(contacts.hit_wall);
    assert_eq!(b.rect.x, 0.0);
    assert_eq!(b.vx, 0.0);

    let mut b = standing_body(grid.pixel_width() - 18.0);
    b.vx = 5.0;
    assert!(b.step(&PHYS, &grid).hit_wall);
    assert_eq!(b.rect.right(), grid.pixel_width());
}

#[test]
fn moving_right_into_a_block_pins_the_right_edge() {
    let mut grid = floor_grid();
    grid.set(5, 5, Tile::Brick);
    let mut b = standing_body(5.0 * TILE - 20.0);
    for _ in 0..10 {
        b.vx = 3.0;
        b.step(&PHYS, &grid);
        assert!(b.rect.right() <= 5.0 * TILE);
    }
    assert_eq!(b.rect.right(), 5.0 * TILE);
    assert!(b.on_ground);
}

#[test]
fn head_bump_reports_the_cell() {
    let mut grid = floor_grid();
    grid.set(3, 4, Tile::Brick);
    let mut b = standing_body(3.0 * TILE + 8.0);
    b.vy = -12.0;
    let contacts = b.step(&PHYS, &grid);
    assert_eq!(contacts.head_bumps, vec![SolidId::Cell { x: 3, y: 4 }]);
    assert_eq!(b.rect.top(), 5.0 * TILE);
}

// ── Solid queries ─────────────────────────────────────────────────────────────

#[test]
fn out_of_grid_point_reads_as_ground() {
    let grid = TileGrid::new(4, 4);
    assert_eq!(grid.get(-1, 0), Tile::Ground);
    assert_eq!(grid.get(0, 4), Tile::Ground);
    assert_eq!(grid.get(0, 0), Tile::Empty);
}

#[test]
fn overlap_query_is_row_major() {
    let mut grid = TileGrid::new(4, 4);
    grid.set(0, 1, Tile::Ground);
    grid.set(1, 0, Tile::Ground);
    grid.set(0, 0, Tile::Brick);
    let mut out = Vec::new();
    grid.solids_overlapping(&TileGrid::cell_rect(0, 0).translated(4.0, 4.0), &mut out);
    let ids: Vec<SolidId> = out.iter().map(|s| s.id).collect();
    assert_eq!(
        ids,
        vec![
            SolidId::Cell { x: 0, y: 0 },
            SolidId::Cell { x: 1, y: 0 },
            SolidId::Cell { x: 0, y: 1 },
        ]
    );
}

#[test]
fn terrain_point_probe() {
    let terrain = Terrain::Grid(floor_grid());
    assert!(terrain.is_solid_at(5.0, 6.0 * TILE + 1.0));
    assert!(!terrain.is_solid_at(5.0, 6.0 * TILE - 1.0));
    assert!(!terrain.is_solid_at(10.5 * TILE, 6.5 * TILE));
}
