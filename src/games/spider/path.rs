use super::grid::{Edge, EdgeSet, Grid, GridPos};

/// The trail being drawn through unclaimed space.
///
/// Only ever lives inside `SpiderMode::DrawingPath`, so leaving that mode
/// drops it along with every provisional edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTracker {
    /// Vertex on secured territory where drawing began
    start: GridPos,
    /// Every vertex visited since `start`, in order
    vertices: Vec<GridPos>,
    /// Edges traversed so far
    edges: EdgeSet,
}

impl PathTracker {
    pub fn begin(grid: &Grid, at_vertex: GridPos) -> Self {
        let (width, height) = grid.get_grid_dimensions();
        let mut path = Self {
            start: at_vertex,
            vertices: Vec::new(),
            edges: EdgeSet::new(width, height),
        };
        path.restart(at_vertex);
        path
    }

    /// Discard stale data and start again from `at_vertex`.
    pub fn restart(&mut self, at_vertex: GridPos) {
        self.clear();
        self.start = at_vertex;
        self.vertices.push(at_vertex);
    }

    pub fn extend(&mut self, grid: &Grid, from: GridPos, to: GridPos) -> Edge {
        let edge = grid.edge_between(&from, &to);
        self.edges.insert(edge);
        self.vertices.push(to);
        edge
    }

    /// Whether `vertex` was visited before the most recently appended vertex.
    pub fn self_intersects(&self, vertex: &GridPos) -> bool {
        self.vertices.iter().rev().skip(1).any(|v| v == vertex)
    }

    pub fn clear(&mut self) {
        self.edges.clear();
        self.vertices.clear();
    }

    pub fn start(&self) -> GridPos {
        self.start
    }

    pub fn vertices(&self) -> &[GridPos] {
        &self.vertices
    }

    pub fn edges(&self) -> &EdgeSet {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
