use std::time::Duration;

use super::grid::GridPos;

#[derive(Debug, Clone)]
pub struct SpiderConfig {
    /// Grid width in cells
    pub grid_width: u32,
    /// Grid height in cells
    pub grid_height: u32,
    /// Inner cell size in pixels
    pub cell_size: u32,
    /// Edge thickness in pixels, shared by neighbouring cells
    pub edge_size: u32,
    /// Simulation tick rate in Hz (ticks per second)
    pub tick_rate_hz: u32,
    /// Vertex the spider starts on after a reset
    pub start_vertex: GridPos,
}

impl SpiderConfig {
    pub fn with_grid_size(width: u32, height: u32) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Pixels between neighbouring cross-sections.
    pub fn step(&self) -> i32 {
        (self.cell_size + self.edge_size) as i32
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(1000 / self.tick_rate_hz as u64)
    }
}

impl Default for SpiderConfig {
    fn default() -> Self {
        Self {
            grid_width: 35,
            grid_height: 29,
            cell_size: 11,
            edge_size: 1,
            tick_rate_hz: 30,
            start_vertex: GridPos::new(0, 0),
        }
    }
}
