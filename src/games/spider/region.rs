use std::collections::VecDeque;

use super::grid::{EdgeSet, GridPos};
use super::state::Territory;

/// A maximal connected set of unclaimed cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Cells in discovery order
    pub cells: Vec<GridPos>,
    pub claim_eligible: bool,
}

impl Region {
    pub fn size(&self) -> usize {
        self.cells.len()
    }
}

/// Partition every unclaimed cell into regions, treating committed edges and
/// `path_edges` as walls. Regions come out in scan order of their first cell.
pub fn find_regions(territory: &Territory, path_edges: &EdgeSet) -> Vec<Region> {
    let grid = *territory.grid();
    let total = grid.total_cells();
    let pre_claimed = territory.claimed_count();

    let mut visited = vec![false; total];
    let mut queue = VecDeque::with_capacity(total);
    let mut regions = Vec::new();
    let mut discovered = 0;

    for seed in grid.cells() {
        let seed_idx = grid.cell_index(&seed);
        if visited[seed_idx] || territory.is_claimed(&seed) {
            continue;
        }

        visited[seed_idx] = true;
        queue.push_back(seed);
        let mut cells = Vec::new();

        while let Some(cell) = queue.pop_front() {
            cells.push(cell);

            for next in grid.neighbours4(&cell) {
                let next_idx = grid.cell_index(&next);
                if visited[next_idx] || territory.is_claimed(&next) {
                    continue;
                }
                let wall = grid.separating_edge(&cell, &next);
                if territory.is_committed_edge(&wall) || path_edges.contains(&wall) {
                    continue;
                }
                visited[next_idx] = true;
                queue.push_back(next);
            }
        }

        discovered += cells.len();
        assert!(
            discovered <= total,
            "flood fill visited {} cells on a {} cell grid",
            discovered,
            total
        );

        let claim_eligible = is_claim_eligible(territory, &cells, pre_claimed);
        regions.push(Region {
            cells,
            claim_eligible,
        });
    }

    regions
}

/// A region may be claimed when it touches claimed territory, counting
/// diagonal contact. With nothing claimed yet, touching the committed outer
/// border is enough.
pub fn is_claim_eligible(territory: &Territory, cells: &[GridPos], pre_claimed: usize) -> bool {
    let grid = territory.grid();
    cells.iter().any(|cell| {
        let near_claimed = grid.neighbours8(cell).any(|n| territory.is_claimed(&n));
        if near_claimed {
            return true;
        }
        pre_claimed == 0
            && grid
                .border_edges_of_cell(cell)
                .iter()
                .any(|edge| territory.is_committed_edge(edge))
    })
}

/// Index of the smallest eligible region; ties go to the first discovered.
pub fn select_region(regions: &[Region]) -> Option<usize> {
    regions
        .iter()
        .enumerate()
        .filter(|(_, region)| region.claim_eligible)
        .min_by_key(|(idx, region)| (region.size(), *idx))
        .map(|(idx, _)| idx)
}
