/// A position on the cell grid or on the vertex lattice
///
/// (0,0) is the top-left corner,
/// x increases to the right, y increases downward.
/// Cell (x,y) has vertex (x,y) as its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn moved(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }

    pub fn distance(&self, other: &GridPos) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }
}

/// Spider position in sub-cell pixel units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelPos {
    pub x: i32,
    pub y: i32,
}

impl PixelPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// A unit segment of the vertex lattice, always indexed by its lower-bound vertex.
///
/// `Horizontal(p)` joins `p` and `p + (1,0)`, `Vertical(p)` joins `p` and `p + (0,1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Horizontal(GridPos),
    Vertical(GridPos),
}

impl Edge {
    pub fn origin(&self) -> GridPos {
        match self {
            Edge::Horizontal(p) | Edge::Vertical(p) => *p,
        }
    }

    /// Both vertices joined by this edge, lower-bound first.
    pub fn endpoints(&self) -> (GridPos, GridPos) {
        match self {
            Edge::Horizontal(p) => (*p, p.offset(1, 0)),
            Edge::Vertical(p) => (*p, p.offset(0, 1)),
        }
    }
}

/// Dense boolean set over every edge of a `width x height` grid.
#[derive(Clone, PartialEq, Eq)]
pub struct EdgeSet {
    width: u32,
    height: u32,
    /// `H[x][y]` at `y * width + x`, `width * (height + 1)` entries
    horizontal: Vec<bool>,
    /// `V[x][y]` at `y * (width + 1) + x`, `(width + 1) * height` entries
    vertical: Vec<bool>,
}

impl EdgeSet {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            horizontal: vec![false; (width * (height + 1)) as usize],
            vertical: vec![false; ((width + 1) * height) as usize],
        }
    }

    fn index(&self, edge: &Edge) -> (bool, usize) {
        let p = edge.origin();
        match edge {
            Edge::Horizontal(_) => {
                assert!(
                    p.x >= 0
                        && p.y >= 0
                        && (p.x as u32) < self.width
                        && (p.y as u32) <= self.height,
                    "horizontal edge {:?} outside {}x{} grid",
                    p,
                    self.width,
                    self.height
                );
                (true, (p.y as u32 * self.width + p.x as u32) as usize)
            }
            Edge::Vertical(_) => {
                assert!(
                    p.x >= 0
                        && p.y >= 0
                        && (p.x as u32) <= self.width
                        && (p.y as u32) < self.height,
                    "vertical edge {:?} outside {}x{} grid",
                    p,
                    self.width,
                    self.height
                );
                (false, (p.y as u32 * (self.width + 1) + p.x as u32) as usize)
            }
        }
    }

    pub fn contains(&self, edge: &Edge) -> bool {
        match self.index(edge) {
            (true, idx) => self.horizontal[idx],
            (false, idx) => self.vertical[idx],
        }
    }

    pub fn insert(&mut self, edge: Edge) {
        match self.index(&edge) {
            (true, idx) => self.horizontal[idx] = true,
            (false, idx) => self.vertical[idx] = true,
        }
    }

    pub fn union_with(&mut self, other: &EdgeSet) {
        assert!(
            self.width == other.width && self.height == other.height,
            "edge set dimensions differ"
        );
        for (dst, src) in self.horizontal.iter_mut().zip(&other.horizontal) {
            *dst |= *src;
        }
        for (dst, src) in self.vertical.iter_mut().zip(&other.vertical) {
            *dst |= *src;
        }
    }

    pub fn clear(&mut self) {
        self.horizontal.fill(false);
        self.vertical.fill(false);
    }

    pub fn is_empty(&self) -> bool {
        !self.horizontal.iter().chain(&self.vertical).any(|&set| set)
    }

    pub fn len(&self) -> usize {
        self.horizontal.iter().chain(&self.vertical).filter(|&&set| set).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = Edge> + '_ {
        let w = self.width as usize;
        let horizontal = self
            .horizontal
            .iter()
            .enumerate()
            .filter(|(_, set)| **set)
            .map(move |(i, _)| Edge::Horizontal(GridPos::new((i % w) as i32, (i / w) as i32)));
        let vertical = self
            .vertical
            .iter()
            .enumerate()
            .filter(|(_, set)| **set)
            .map(move |(i, _)| {
                Edge::Vertical(GridPos::new((i % (w + 1)) as i32, (i / (w + 1)) as i32))
            });
        horizontal.chain(vertical)
    }

    /// Row-major `H` bits, for snapshots.
    pub fn horizontal_bits(&self) -> &[bool] {
        &self.horizontal
    }

    /// Row-major `V` bits, for snapshots.
    pub fn vertical_bits(&self) -> &[bool] {
        &self.vertical
    }
}

impl std::fmt::Debug for EdgeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgeSet")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("edges", &self.len())
            .finish()
    }
}

/// Immutable grid geometry: cell counts plus the pixel step between cross-sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    /// cell_size + edge_size
    step: i32,
}

impl Grid {
    pub fn new(width: u32, height: u32, step: i32) -> Self {
        assert!(width > 0 && height > 0, "grid must have at least one cell");
        assert!(step > 0, "pixel step must be positive");
        Self { width, height, step }
    }

    pub fn get_grid_dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn step(&self) -> i32 {
        self.step
    }

    pub fn total_cells(&self) -> usize {
        (self.width * self.height) as usize
    }

    pub fn cell_in_bounds(&self, pos: &GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    pub fn vertex_in_bounds(&self, pos: &GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) <= self.width && (pos.y as u32) <= self.height
    }

    pub fn edge_in_bounds(&self, edge: &Edge) -> bool {
        let (a, b) = edge.endpoints();
        self.vertex_in_bounds(&a) && self.vertex_in_bounds(&b)
    }

    pub fn cell_index(&self, pos: &GridPos) -> usize {
        assert!(
            self.cell_in_bounds(pos),
            "cell {:?} outside {}x{} grid",
            pos,
            self.width,
            self.height
        );
        (pos.y as u32 * self.width + pos.x as u32) as usize
    }

    /// Every cell in scan order: increasing y, then x.
    pub fn cells(&self) -> impl Iterator<Item = GridPos> + use<> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..h).flat_map(move |y| (0..w).map(move |x| GridPos::new(x, y)))
    }

    pub fn max_pixel(&self) -> PixelPos {
        PixelPos::new(self.width as i32 * self.step, self.height as i32 * self.step)
    }

    pub fn is_cross_section(&self, pixel: &PixelPos) -> bool {
        pixel.x % self.step == 0 && pixel.y % self.step == 0
    }

    /// Vertex under a pixel position. Only valid on a cross-section.
    pub fn vertex_at(&self, pixel: &PixelPos) -> GridPos {
        assert!(
            self.is_cross_section(pixel),
            "pixel position {:?} is not on a cross-section",
            pixel
        );
        let vertex = GridPos::new(pixel.x / self.step, pixel.y / self.step);
        assert!(self.vertex_in_bounds(&vertex), "vertex {:?} outside grid", vertex);
        vertex
    }

    pub fn vertex_to_pixel(&self, vertex: &GridPos) -> PixelPos {
        assert!(self.vertex_in_bounds(vertex), "vertex {:?} outside grid", vertex);
        PixelPos::new(vertex.x * self.step, vertex.y * self.step)
    }

    /// Edge leaving `vertex` in `direction`, or `None` if it would leave the lattice.
    pub fn edge_toward(&self, vertex: &GridPos, direction: Direction) -> Option<Edge> {
        let edge = match direction {
            Direction::None => return None,
            Direction::Right => Edge::Horizontal(*vertex),
            Direction::Left => Edge::Horizontal(vertex.offset(-1, 0)),
            Direction::Down => Edge::Vertical(*vertex),
            Direction::Up => Edge::Vertical(vertex.offset(0, -1)),
        };
        self.edge_in_bounds(&edge).then_some(edge)
    }

    /// Edge joining two lattice-adjacent vertices.
    pub fn edge_between(&self, from: &GridPos, to: &GridPos) -> Edge {
        assert!(
            from.distance(to) == 1,
            "vertices {:?} and {:?} are not adjacent",
            from,
            to
        );
        let edge = if from.y == to.y {
            Edge::Horizontal(GridPos::new(from.x.min(to.x), from.y))
        } else {
            Edge::Vertical(GridPos::new(from.x, from.y.min(to.y)))
        };
        assert!(self.edge_in_bounds(&edge), "edge {:?} outside grid", edge);
        edge
    }

    /// In-grid cells on either side of an edge; border edges have one.
    pub fn flanking_cells(&self, edge: &Edge) -> Vec<GridPos> {
        let candidates = match edge {
            Edge::Horizontal(p) => [p.offset(0, -1), *p],
            Edge::Vertical(p) => [p.offset(-1, 0), *p],
        };
        candidates
            .into_iter()
            .filter(|c| self.cell_in_bounds(c))
            .collect()
    }

    /// Edge a flood fill crosses when stepping between 4-adjacent cells.
    pub fn separating_edge(&self, from: &GridPos, to: &GridPos) -> Edge {
        assert!(
            from.distance(to) == 1,
            "cells {:?} and {:?} are not adjacent",
            from,
            to
        );
        if from.y == to.y {
            Edge::Vertical(GridPos::new(from.x.max(to.x), from.y))
        } else {
            Edge::Horizontal(GridPos::new(from.x, from.y.max(to.y)))
        }
    }

    /// Edges of the cell's sides that lie on the outer rectangle.
    pub fn border_edges_of_cell(&self, cell: &GridPos) -> Vec<Edge> {
        let mut edges = Vec::new();
        if cell.x == 0 {
            edges.push(Edge::Vertical(*cell));
        }
        if cell.x as u32 == self.width - 1 {
            edges.push(Edge::Vertical(cell.offset(1, 0)));
        }
        if cell.y == 0 {
            edges.push(Edge::Horizontal(*cell));
        }
        if cell.y as u32 == self.height - 1 {
            edges.push(Edge::Horizontal(cell.offset(0, 1)));
        }
        edges
    }

    /// The outer rectangle of the lattice.
    pub fn border_edges(&self) -> Vec<Edge> {
        let (w, h) = (self.width as i32, self.height as i32);
        let mut edges = Vec::with_capacity((2 * (w + h)) as usize);
        for x in 0..w {
            edges.push(Edge::Horizontal(GridPos::new(x, 0)));
            edges.push(Edge::Horizontal(GridPos::new(x, h)));
        }
        for y in 0..h {
            edges.push(Edge::Vertical(GridPos::new(0, y)));
            edges.push(Edge::Vertical(GridPos::new(w, y)));
        }
        edges
    }

    pub fn neighbours4(&self, cell: &GridPos) -> impl Iterator<Item = GridPos> + use<> {
        let grid = *self;
        let cell = *cell;
        [Direction::Down, Direction::Up, Direction::Right, Direction::Left]
            .into_iter()
            .map(move |direction| cell.moved(direction))
            .filter(move |n| grid.cell_in_bounds(n))
    }

    pub fn neighbours8(&self, cell: &GridPos) -> impl Iterator<Item = GridPos> + use<> {
        let grid = *self;
        let cell = *cell;
        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(move |(dx, dy)| cell.offset(dx, dy))
            .filter(move |n| grid.cell_in_bounds(n))
    }
}
