//! Overworld map: one node per level along a winding path.

use crate::levels::{LevelIndex, MAX_LEVEL};

/// Node centres in view coordinates, eight worlds of four.
const NODE_POSITIONS: [(f32, f32); MAX_LEVEL as usize] = [
    (100.0, 500.0),
    (150.0, 450.0),
    (200.0, 400.0),
    (250.0, 350.0),
    (300.0, 320.0),
    (350.0, 280.0),
    (400.0, 250.0),
    (450.0, 220.0),
    (500.0, 250.0),
    (550.0, 280.0),
    (600.0, 310.0),
    (650.0, 340.0),
    (680.0, 380.0),
    (650.0, 420.0),
    (600.0, 450.0),
    (550.0, 480.0),
    (500.0, 500.0),
    (450.0, 470.0),
    (400.0, 440.0),
    (350.0, 410.0),
    (300.0, 380.0),
    (250.0, 350.0),
    (200.0, 320.0),
    (150.0, 290.0),
    (120.0, 250.0),
    (150.0, 210.0),
    (200.0, 180.0),
    (250.0, 150.0),
    (300.0, 130.0),
    (350.0, 110.0),
    (400.0, 100.0),
    (450.0, 90.0),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapNode {
    pub x: f32,
    pub y: f32,
    pub unlocked: bool,
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Overworld {
    nodes: Vec<MapNode>,
    selected: LevelIndex,
}

impl Default for Overworld {
    fn default() -> Self {
        Self::new()
    }
}

impl Overworld {
    /// Fresh map: only the first node is open.
    pub fn new() -> Self {
        let nodes = NODE_POSITIONS
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| MapNode {
                x,
                y,
                unlocked: i == 0,
                completed: false,
            })
            .collect();
        Self {
            nodes,
            selected: LevelIndex::FIRST,
        }
    }

    /// Map with every node up to and including `index` unlocked and
    /// selected, for starting part-way through.
    pub fn starting_at(index: LevelIndex) -> Self {
        let mut map = Self::new();
        for node in map.nodes.iter_mut().take(index.zero_based() + 1) {
            node.unlocked = true;
        }
        map.selected = index;
        map
    }

    pub fn nodes(&self) -> &[MapNode] {
        &self.nodes
    }

    pub fn node(&self, index: LevelIndex) -> &MapNode {
        &self.nodes[index.zero_based()]
    }

    pub fn selected(&self) -> LevelIndex {
        self.selected
    }

    /// Step the selection by `delta` nodes. Locked or missing targets leave
    /// the selection where it is.
    pub fn move_selection(&mut self, delta: i32) {
        let target = i32::from(self.selected.get()) + delta;
        let Ok(target) = u8::try_from(target) else { return };
        let Ok(index) = LevelIndex::new(target) else { return };
        if self.node(index).unlocked {
            self.selected = index;
        }
    }

    /// Mark `index` completed, unlock the next node and move the selection
    /// onto it.
    pub fn complete_level(&mut self, index: LevelIndex) {
        self.nodes[index.zero_based()].completed = true;
        if let Some(next) = index.next() {
            self.nodes[next.zero_based()].unlocked = true;
            self.selected = next;
        }
        tracing::debug!(level = index.get(), "level completed on map");
    }

    pub fn completed_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.completed).count()
    }
}
