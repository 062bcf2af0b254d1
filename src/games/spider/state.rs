use super::config::SpiderConfig;
use super::grid::{Direction, Edge, EdgeSet, Grid, GridPos, PixelPos};
use super::path::PathTracker;

/// Claimed cells plus committed edges. Both only ever grow until a reset.
#[derive(Clone, PartialEq, Eq)]
pub struct Territory {
    grid: Grid,
    /// Row-major claim flags
    claimed: Vec<bool>,
    claimed_count: usize,
    /// Edges locked in by the outer border and by closed paths
    committed: EdgeSet,
}

impl Territory {
    /// Fresh territory: nothing claimed, only the outer rectangle committed.
    pub fn new(grid: Grid) -> Self {
        let (width, height) = grid.get_grid_dimensions();
        let mut committed = EdgeSet::new(width, height);
        for edge in grid.border_edges() {
            committed.insert(edge);
        }

        Self {
            grid,
            claimed: vec![false; grid.total_cells()],
            claimed_count: 0,
            committed,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn is_claimed(&self, cell: &GridPos) -> bool {
        self.claimed[self.grid.cell_index(cell)]
    }

    pub fn is_committed_edge(&self, edge: &Edge) -> bool {
        self.committed.contains(edge)
    }

    /// Edge the spider may walk without drawing: committed, or with every
    /// in-grid cell on both sides already claimed.
    pub fn is_secured_edge(&self, edge: &Edge) -> bool {
        if self.is_committed_edge(edge) {
            return true;
        }
        let flanking = self.grid.flanking_cells(edge);
        !flanking.is_empty() && flanking.iter().all(|c| self.is_claimed(c))
    }

    /// A path may start along `edge` only through unclaimed space.
    pub fn can_start_path(&self, edge: &Edge) -> bool {
        self.grid
            .flanking_cells(edge)
            .iter()
            .all(|c| !self.is_claimed(c))
    }

    /// Whether `vertex` touches a committed edge or is a corner of a claimed cell.
    pub fn is_vertex_on_claimed_border(&self, vertex: &GridPos) -> bool {
        let touches_committed = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
        .into_iter()
        .filter_map(|dir| self.grid.edge_toward(vertex, dir))
        .any(|edge| self.is_committed_edge(&edge));
        if touches_committed {
            return true;
        }

        [(0, 0), (-1, 0), (0, -1), (-1, -1)]
            .into_iter()
            .map(|(dx, dy)| vertex.offset(dx, dy))
            .filter(|cell| self.grid.cell_in_bounds(cell))
            .any(|cell| self.is_claimed(&cell))
    }

    /// Claim `cells` and lock in `edges`. Returns how many cells were newly claimed.
    pub fn commit_region(&mut self, cells: &[GridPos], edges: &EdgeSet) -> usize {
        let mut newly_claimed = 0;
        for cell in cells {
            let idx = self.grid.cell_index(cell);
            if !self.claimed[idx] {
                self.claimed[idx] = true;
                newly_claimed += 1;
            }
        }
        self.claimed_count += newly_claimed;
        self.committed.union_with(edges);
        newly_claimed
    }

    pub fn claimed_count(&self) -> usize {
        self.claimed_count
    }

    pub fn get_total_cells(&self) -> usize {
        self.claimed.len()
    }

    pub fn claimed_percentage(&self) -> f32 {
        (self.claimed_count as f32 / self.get_total_cells() as f32) * 100.0
    }

    pub fn claimed_cells(&self) -> &[bool] {
        &self.claimed
    }

    pub fn committed_edges(&self) -> &EdgeSet {
        &self.committed
    }
}

impl std::fmt::Debug for Territory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (width, height) = self.grid.get_grid_dimensions();
        f.debug_struct("Territory")
            .field("width", &width)
            .field("height", &height)
            .field("claimed_cells", &self.claimed_count)
            .field("committed_edges", &self.committed.len())
            .finish()
    }
}

/// What the spider is doing. The path only exists while drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpiderMode {
    /// Stationary on secured territory or the border
    IdleOnClaimed,
    /// Travelling along secured edges
    MovingOnClaimed,
    /// Travelling through unclaimed space, leaving a path
    DrawingPath(PathTracker),
}

impl SpiderMode {
    pub fn is_drawing(&self) -> bool {
        matches!(self, SpiderMode::DrawingPath(_))
    }

    pub fn path(&self) -> Option<&PathTracker> {
        match self {
            SpiderMode::DrawingPath(path) => Some(path),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SpiderMode::IdleOnClaimed => "idle",
            SpiderMode::MovingOnClaimed => "moving",
            SpiderMode::DrawingPath(_) => "drawing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spider {
    /// Current position in pixels
    pub position: PixelPos,
    /// One pixel per tick in this direction, or stationary
    pub velocity: Direction,
    /// Most recent cross-section visited
    pub last_vertex: GridPos,
    /// Pending direction, applied at the next cross-section or on a reversal
    pub queued_intent: Option<Direction>,
    pub mode: SpiderMode,
}

impl Spider {
    pub fn new(grid: &Grid, start: GridPos) -> Self {
        Self {
            position: grid.vertex_to_pixel(&start),
            velocity: Direction::None,
            last_vertex: start,
            queued_intent: None,
            mode: SpiderMode::IdleOnClaimed,
        }
    }

    pub fn is_stationary(&self) -> bool {
        self.velocity == Direction::None
    }

    /// Stop and return to secured territory at `vertex`.
    pub fn settle_at(&mut self, grid: &Grid, vertex: GridPos) {
        self.position = grid.vertex_to_pixel(&vertex);
        self.last_vertex = vertex;
        self.velocity = Direction::None;
        self.mode = SpiderMode::IdleOnClaimed;
    }
}

/// The whole simulation: geometry, territory and the spider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arena {
    pub grid: Grid,
    pub territory: Territory,
    pub spider: Spider,
    /// Vertex the spider starts from after a reset
    start_vertex: GridPos,
}

impl Arena {
    pub fn new(config: &SpiderConfig) -> Self {
        let grid = Grid::new(config.grid_width, config.grid_height, config.step());
        let start_vertex = config.start_vertex;
        assert!(
            grid.vertex_in_bounds(&start_vertex),
            "start vertex {:?} outside grid",
            start_vertex
        );

        Self {
            grid,
            territory: Territory::new(grid),
            spider: Spider::new(&grid, start_vertex),
            start_vertex,
        }
    }

    /// Back to the start-of-game state with the same geometry.
    pub fn reset(&mut self) {
        self.territory = Territory::new(self.grid);
        self.spider = Spider::new(&self.grid, self.start_vertex);
    }

    pub fn path(&self) -> Option<&PathTracker> {
        self.spider.mode.path()
    }
}
