use super::grid::{Direction, GridPos, PixelPos};
use super::path::PathTracker;
use super::region;
use super::state::{Arena, SpiderMode};

/// One directional intent from the input producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputIntent {
    Move(Direction),
    Stop,
}

/// Why a path was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosureTrigger {
    /// The spider walked onto a vertex of its own path
    SelfIntersection,
    /// The spider reached a vertex on secured territory
    ReachedTerritory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The smallest eligible region and the path were committed
    Claimed { cells_claimed: usize, regions: usize },
    /// Nothing was eligible; the spider went back to the path start
    Rejected { regions: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathClosure {
    pub trigger: ClosureTrigger,
    pub outcome: ClaimOutcome,
}

#[derive(Debug, Default)]
pub struct StepResult {
    /// Set when the path closed during this tick
    pub closure: Option<PathClosure>,
    /// A Stop input threw the current path away
    pub cancelled: bool,
}

/// Advance the arena by one tick.
pub fn tick(arena: &mut Arena, input: Option<InputIntent>) -> StepResult {
    let mut result = StepResult::default();

    if let Some(intent) = input {
        result.cancelled = apply_input(arena, intent);
    }

    consume_intent(arena);
    advance_position(arena);
    result.closure = handle_cross_section(arena);

    result
}

/// Queue a direction, or stop right away. Returns true if a path was cancelled.
pub fn apply_input(arena: &mut Arena, intent: InputIntent) -> bool {
    match intent {
        InputIntent::Move(Direction::None) => false,
        InputIntent::Move(direction) => {
            arena.spider.queued_intent = Some(direction);
            false
        }
        InputIntent::Stop => {
            arena.spider.velocity = Direction::None;
            arena.spider.queued_intent = None;
            if arena.spider.mode == SpiderMode::MovingOnClaimed {
                arena.spider.mode = SpiderMode::IdleOnClaimed;
            }
            cancel_path(arena)
        }
    }
}

/// Apply the queued intent where allowed and check the heading at cross-sections.
pub fn consume_intent(arena: &mut Arena) {
    let grid = arena.grid;
    let spider = &mut arena.spider;
    let at_cross_section = grid.is_cross_section(&spider.position);

    if !at_cross_section {
        // Mid-edge the spider may only turn back along, or resume on, the edge it occupies.
        if let Some(direction) = spider.queued_intent {
            let on_horizontal_edge = spider.position.x % grid.step() != 0;
            let resumes =
                spider.is_stationary() && direction.is_horizontal() == on_horizontal_edge;
            if direction.is_opposite(&spider.velocity) || resumes {
                tracing::trace!("Spider turned {:?} at {:?}", direction, spider.position);
                spider.velocity = direction;
                spider.queued_intent = None;
                if spider.mode == SpiderMode::IdleOnClaimed {
                    spider.mode = SpiderMode::MovingOnClaimed;
                }
            }
        }
        return;
    }

    let vertex = grid.vertex_at(&spider.position);
    let heading = spider.queued_intent.take().unwrap_or(spider.velocity);

    if heading == Direction::None {
        if spider.mode == SpiderMode::MovingOnClaimed {
            spider.mode = SpiderMode::IdleOnClaimed;
        }
        return;
    }

    if spider.mode.is_drawing() {
        spider.velocity = heading;
        return;
    }

    choose_heading(arena, vertex, heading);
}

/// Legality of a heading taken from a vertex on secured territory.
fn choose_heading(arena: &mut Arena, vertex: GridPos, heading: Direction) {
    let edge = arena.grid.edge_toward(&vertex, heading);
    let spider = &mut arena.spider;

    match edge {
        Some(edge) if arena.territory.is_secured_edge(&edge) => {
            if spider.mode == SpiderMode::IdleOnClaimed {
                tracing::debug!("Spider moving {:?} from {:?} on secured edges", heading, vertex);
            }
            spider.velocity = heading;
            spider.mode = SpiderMode::MovingOnClaimed;
        }
        Some(edge) if arena.territory.can_start_path(&edge) => {
            tracing::debug!("Spider started drawing {:?} from {:?}", heading, vertex);
            spider.velocity = heading;
            spider.mode = SpiderMode::DrawingPath(PathTracker::begin(&arena.grid, vertex));
        }
        _ => {
            tracing::debug!("Spider cannot move {:?} from {:?}", heading, vertex);
            spider.velocity = Direction::None;
            if spider.mode == SpiderMode::MovingOnClaimed {
                spider.mode = SpiderMode::IdleOnClaimed;
            }
        }
    }
}

/// Move one pixel along the velocity, stopping at the walls.
pub fn advance_position(arena: &mut Arena) {
    let spider = &mut arena.spider;
    if spider.is_stationary() {
        return;
    }

    let max = arena.grid.max_pixel();
    let (dx, dy) = spider.velocity.delta();
    let target = PixelPos::new(spider.position.x + dx, spider.position.y + dy);
    let clamped = PixelPos::new(target.x.clamp(0, max.x), target.y.clamp(0, max.y));

    if clamped != target {
        let hit_x_wall = clamped.x != target.x;
        tracing::debug!("Spider hit the wall at {:?} moving {:?}", clamped, spider.velocity);

        spider.velocity = Direction::None;
        let drop_intent = spider
            .queued_intent
            .is_some_and(|intent| intent.is_horizontal() == hit_x_wall);
        if drop_intent {
            spider.queued_intent = None;
        }
        if spider.mode == SpiderMode::MovingOnClaimed {
            spider.mode = SpiderMode::IdleOnClaimed;
        }
    }

    spider.position = clamped;
}

/// On arrival at a new vertex, extend the path and close it if needed.
pub fn handle_cross_section(arena: &mut Arena) -> Option<PathClosure> {
    if !arena.grid.is_cross_section(&arena.spider.position) {
        return None;
    }

    let vertex = arena.grid.vertex_at(&arena.spider.position);
    let from = arena.spider.last_vertex;
    if vertex == from {
        return None;
    }
    arena.spider.last_vertex = vertex;

    let SpiderMode::DrawingPath(path) = &mut arena.spider.mode else {
        tracing::trace!("Spider reached {:?}", vertex);
        return None;
    };

    path.extend(&arena.grid, from, vertex);
    tracing::trace!("Path extended to {:?} ({} edges)", vertex, path.len());

    let trigger = if path.self_intersects(&vertex) {
        ClosureTrigger::SelfIntersection
    } else if arena.territory.is_vertex_on_claimed_border(&vertex) {
        ClosureTrigger::ReachedTerritory
    } else {
        return None;
    };

    Some(PathClosure {
        trigger,
        outcome: attempt_claim(arena),
    })
}

/// Resolve a closed path: claim the smallest eligible region, or send the
/// spider back to where the path started.
pub fn attempt_claim(arena: &mut Arena) -> ClaimOutcome {
    let path = match std::mem::replace(&mut arena.spider.mode, SpiderMode::IdleOnClaimed) {
        SpiderMode::DrawingPath(path) => path,
        other => {
            tracing::warn!("Claim attempted while {}", other.name());
            arena.spider.mode = other;
            return ClaimOutcome::Rejected { regions: 0 };
        }
    };

    let regions = region::find_regions(&arena.territory, path.edges());

    match region::select_region(&regions) {
        Some(idx) => {
            let chosen = &regions[idx];
            let cells_claimed = arena.territory.commit_region(&chosen.cells, path.edges());
            arena.spider.velocity = Direction::None;

            tracing::info!(
                "Spider claimed {} cells ({} regions found, {:.2}% claimed)",
                cells_claimed,
                regions.len(),
                arena.territory.claimed_percentage()
            );

            ClaimOutcome::Claimed {
                cells_claimed,
                regions: regions.len(),
            }
        }
        None => {
            arena.spider.settle_at(&arena.grid, path.start());

            tracing::info!(
                "No claimable region among {} regions, spider returned to {:?}",
                regions.len(),
                path.start()
            );

            ClaimOutcome::Rejected {
                regions: regions.len(),
            }
        }
    }
}

/// Throw away the current path and return to its start. Returns false if not drawing.
pub fn cancel_path(arena: &mut Arena) -> bool {
    let Some(start) = arena.path().map(|path| path.start()) else {
        return false;
    };

    arena.spider.settle_at(&arena.grid, start);
    arena.spider.queued_intent = None;

    tracing::info!("Path cancelled, spider returned to {:?}", start);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::spider::config::SpiderConfig;
    use crate::games::spider::grid::{Edge, EdgeSet};
    use rand::{Rng, SeedableRng, rngs::SmallRng};

    fn arena(width: u32, height: u32) -> Arena {
        let config = SpiderConfig {
            cell_size: 2,
            edge_size: 1,
            ..SpiderConfig::with_grid_size(width, height)
        };
        Arena::new(&config)
    }

    /// Queue `direction` and tick long enough to cover `edges` edges.
    fn walk(arena: &mut Arena, direction: Direction, edges: i32) -> Vec<StepResult> {
        let ticks = edges * arena.grid.step();
        let mut results = Vec::new();
        for i in 0..ticks {
            let input = (i == 0).then_some(InputIntent::Move(direction));
            results.push(tick(arena, input));
        }
        results
    }

    fn vertex(arena: &Arena) -> GridPos {
        arena.grid.vertex_at(&arena.spider.position)
    }

    #[test]
    fn test_idle_spider_stays_put() {
        let mut arena = arena(6, 4);
        for _ in 0..10 {
            tick(&mut arena, None);
        }
        assert_eq!(arena.spider.position, PixelPos::new(0, 0));
        assert_eq!(arena.spider.mode, SpiderMode::IdleOnClaimed);
    }

    #[test]
    fn test_walks_along_border() {
        let mut arena = arena(6, 4);
        walk(&mut arena, Direction::Right, 2);

        assert_eq!(vertex(&arena), GridPos::new(2, 0));
        assert_eq!(arena.spider.last_vertex, GridPos::new(2, 0));
        assert_eq!(arena.spider.mode, SpiderMode::MovingOnClaimed);
        assert_eq!(arena.spider.velocity, Direction::Right);
    }

    #[test]
    fn test_border_runs_into_corner_and_stops() {
        let mut arena = arena(3, 3);
        walk(&mut arena, Direction::Right, 3);
        assert_eq!(vertex(&arena), GridPos::new(3, 0));

        tick(&mut arena, None);
        assert_eq!(vertex(&arena), GridPos::new(3, 0));
        assert_eq!(arena.spider.velocity, Direction::None);
        assert_eq!(arena.spider.mode, SpiderMode::IdleOnClaimed);
    }

    #[test]
    fn test_intent_waits_for_cross_section() {
        let mut arena = arena(6, 4);
        tick(&mut arena, Some(InputIntent::Move(Direction::Right)));
        tick(&mut arena, Some(InputIntent::Move(Direction::Down)));

        assert_eq!(arena.spider.position, PixelPos::new(2, 0));
        assert_eq!(arena.spider.velocity, Direction::Right);
        assert_eq!(arena.spider.queued_intent, Some(Direction::Down));

        tick(&mut arena, None);
        assert_eq!(arena.spider.position, PixelPos::new(3, 0));
        tick(&mut arena, None);
        assert_eq!(arena.spider.velocity, Direction::Down);
        assert!(arena.spider.mode.is_drawing());
        assert_eq!(arena.spider.position, PixelPos::new(3, 1));
    }

    #[test]
    fn test_reversal_applies_mid_edge() {
        let mut arena = arena(6, 4);
        tick(&mut arena, Some(InputIntent::Move(Direction::Right)));
        tick(&mut arena, None);
        assert_eq!(arena.spider.position, PixelPos::new(2, 0));

        tick(&mut arena, Some(InputIntent::Move(Direction::Left)));
        assert_eq!(arena.spider.position, PixelPos::new(1, 0));
        assert_eq!(arena.spider.velocity, Direction::Left);
        assert_eq!(arena.spider.queued_intent, None);
        assert_eq!(arena.spider.mode, SpiderMode::MovingOnClaimed);
    }

    #[test]
    fn test_wall_stop_leaves_state_untouched() {
        let mut arena = arena(6, 4);
        let territory = arena.territory.clone();

        tick(&mut arena, Some(InputIntent::Move(Direction::Left)));
        assert_eq!(arena.spider.position, PixelPos::new(0, 0));
        assert_eq!(arena.spider.velocity, Direction::None);
        assert_eq!(arena.spider.mode, SpiderMode::IdleOnClaimed);

        tick(&mut arena, Some(InputIntent::Move(Direction::Up)));
        assert_eq!(arena.spider.position, PixelPos::new(0, 0));
        assert_eq!(arena.spider.velocity, Direction::None);
        assert_eq!(arena.territory, territory);
    }

    #[test]
    fn test_clamp_zeroes_velocity_and_drops_intent_on_that_axis() {
        let mut arena = arena(6, 4);
        arena.spider.velocity = Direction::Left;
        arena.spider.mode = SpiderMode::MovingOnClaimed;
        arena.spider.queued_intent = Some(Direction::Right);

        advance_position(&mut arena);
        assert_eq!(arena.spider.position, PixelPos::new(0, 0));
        assert_eq!(arena.spider.velocity, Direction::None);
        assert_eq!(arena.spider.queued_intent, None);
        assert_eq!(arena.spider.mode, SpiderMode::IdleOnClaimed);

        arena.spider.velocity = Direction::Up;
        arena.spider.queued_intent = Some(Direction::Right);
        advance_position(&mut arena);
        assert_eq!(arena.spider.velocity, Direction::None);
        assert_eq!(arena.spider.queued_intent, Some(Direction::Right));
    }

    #[test]
    fn test_bootstrap_claim_encloses_cells_against_border() {
        // 2x2 pocket in the top-left corner of a fresh 6x5 grid.
        let mut arena = arena(6, 5);
        walk(&mut arena, Direction::Right, 2);
        walk(&mut arena, Direction::Down, 2);
        let results = walk(&mut arena, Direction::Left, 2);

        let closure = results.last().and_then(|r| r.closure);
        assert_eq!(
            closure,
            Some(PathClosure {
                trigger: ClosureTrigger::ReachedTerritory,
                outcome: ClaimOutcome::Claimed {
                    cells_claimed: 4,
                    regions: 2
                },
            })
        );
        assert!(results[..results.len() - 1].iter().all(|r| r.closure.is_none()));

        for cell in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert!(arena.territory.is_claimed(&GridPos::new(cell.0, cell.1)));
        }
        assert_eq!(arena.territory.claimed_count(), 4);
        assert!(arena.territory.is_committed_edge(&Edge::Vertical(GridPos::new(2, 0))));
        assert!(arena.territory.is_committed_edge(&Edge::Horizontal(GridPos::new(0, 2))));
        assert_eq!(arena.spider.mode, SpiderMode::IdleOnClaimed);
        assert_eq!(arena.spider.velocity, Direction::None);
        assert_eq!(vertex(&arena), GridPos::new(0, 2));
    }

    #[test]
    fn test_claims_smaller_of_two_regions() {
        let mut arena = arena(10, 1);
        walk(&mut arena, Direction::Right, 3);
        let results = walk(&mut arena, Direction::Down, 1);

        let closure = results.last().and_then(|r| r.closure).map(|c| c.outcome);
        assert_eq!(
            closure,
            Some(ClaimOutcome::Claimed {
                cells_claimed: 3,
                regions: 2
            })
        );
        for x in 0..10 {
            assert_eq!(arena.territory.is_claimed(&GridPos::new(x, 0)), x < 3);
        }
    }

    #[test]
    fn test_claims_smaller_region_next_to_existing_territory() {
        // Both end cells already claimed; a cut at x=4 leaves 3 cells on the
        // left and 7 on the right, each touching one claimed end.
        let mut arena = arena(12, 1);
        let mut edges = EdgeSet::new(12, 1);
        edges.insert(Edge::Vertical(GridPos::new(1, 0)));
        edges.insert(Edge::Vertical(GridPos::new(11, 0)));
        arena
            .territory
            .commit_region(&[GridPos::new(0, 0), GridPos::new(11, 0)], &edges);
        arena.spider.settle_at(&arena.grid, GridPos::new(4, 0));

        let mut path = PathTracker::begin(&arena.grid, GridPos::new(4, 0));
        path.extend(&arena.grid, GridPos::new(4, 0), GridPos::new(4, 1));
        arena.spider.mode = SpiderMode::DrawingPath(path);

        let path_edges = arena.path().map(|p| p.edges()).unwrap();
        let regions = region::find_regions(&arena.territory, path_edges);
        assert_eq!(regions.iter().map(|r| r.size()).collect::<Vec<_>>(), vec![3, 7]);
        assert!(regions.iter().all(|r| r.claim_eligible));

        let outcome = attempt_claim(&mut arena);
        assert_eq!(
            outcome,
            ClaimOutcome::Claimed {
                cells_claimed: 3,
                regions: 2
            }
        );
        assert_eq!(arena.territory.claimed_count(), 5);
        assert!(arena.territory.is_claimed(&GridPos::new(3, 0)));
        assert!(!arena.territory.is_claimed(&GridPos::new(4, 0)));
        assert!(arena.territory.is_committed_edge(&Edge::Vertical(GridPos::new(4, 0))));
    }

    #[test]
    fn test_self_intersection_closes_on_revisit() {
        let mut arena = arena(6, 6);
        walk(&mut arena, Direction::Right, 2);
        let mut results = walk(&mut arena, Direction::Down, 2);
        results.extend(walk(&mut arena, Direction::Right, 1));
        results.extend(walk(&mut arena, Direction::Down, 1));
        results.extend(walk(&mut arena, Direction::Left, 1));
        assert!(results.iter().all(|r| r.closure.is_none()));
        assert!(arena.spider.mode.is_drawing());

        let results = walk(&mut arena, Direction::Up, 1);
        let (last, before) = results.split_last().unwrap();
        assert!(before.iter().all(|r| r.closure.is_none()));

        let closure = last.closure.expect("path should close on revisit");
        assert_eq!(closure.trigger, ClosureTrigger::SelfIntersection);
        assert_eq!(vertex(&arena), GridPos::new(2, 2));
        assert!(!arena.spider.mode.is_drawing());

        // Nothing claimed yet, so the enclosed loop cell is not eligible and
        // the rest of the board, which touches the border, is taken instead.
        assert_eq!(
            closure.outcome,
            ClaimOutcome::Claimed {
                cells_claimed: 35,
                regions: 2
            }
        );
        assert!(!arena.territory.is_claimed(&GridPos::new(2, 2)));
    }

    #[test]
    fn test_loop_away_from_territory_claims_the_outside() {
        let mut arena = arena(6, 6);
        arena.territory.commit_region(&[GridPos::new(5, 5)], &EdgeSet::new(6, 6));
        arena.spider.settle_at(&arena.grid, GridPos::new(2, 2));

        let mut path = PathTracker::begin(&arena.grid, GridPos::new(2, 2));
        path.extend(&arena.grid, GridPos::new(2, 2), GridPos::new(2, 1));
        path.extend(&arena.grid, GridPos::new(2, 1), GridPos::new(1, 1));
        path.extend(&arena.grid, GridPos::new(1, 1), GridPos::new(1, 2));
        path.extend(&arena.grid, GridPos::new(1, 2), GridPos::new(2, 2));
        arena.spider.mode = SpiderMode::DrawingPath(path);

        // The enclosed cell (1,1) has no claimed neighbour; the outside does.
        let outcome = attempt_claim(&mut arena);
        assert_eq!(
            outcome,
            ClaimOutcome::Claimed {
                cells_claimed: 34,
                regions: 2
            }
        );
        assert_eq!(arena.territory.claimed_count(), 35);
        assert!(!arena.territory.is_claimed(&GridPos::new(1, 1)));
        assert!(arena.territory.is_committed_edge(&Edge::Horizontal(GridPos::new(1, 1))));
    }

    #[test]
    fn test_rejected_claim_returns_to_path_start() {
        let mut arena = arena(3, 3);
        let every_cell: Vec<GridPos> = arena.grid.cells().collect();
        arena.territory.commit_region(&every_cell, &EdgeSet::new(3, 3));

        let mut path = PathTracker::begin(&arena.grid, GridPos::new(1, 0));
        path.extend(&arena.grid, GridPos::new(1, 0), GridPos::new(1, 1));
        arena.spider.mode = SpiderMode::DrawingPath(path);
        arena.spider.position = arena.grid.vertex_to_pixel(&GridPos::new(1, 1));
        arena.spider.last_vertex = GridPos::new(1, 1);
        arena.spider.velocity = Direction::Down;
        let territory = arena.territory.clone();

        let outcome = attempt_claim(&mut arena);
        assert_eq!(outcome, ClaimOutcome::Rejected { regions: 0 });
        assert_eq!(arena.spider.position, PixelPos::new(3, 0));
        assert_eq!(arena.spider.last_vertex, GridPos::new(1, 0));
        assert_eq!(arena.spider.mode, SpiderMode::IdleOnClaimed);
        assert_eq!(arena.spider.velocity, Direction::None);
        assert_eq!(arena.territory, territory);
    }

    #[test]
    fn test_attempt_claim_outside_drawing_is_a_no_op() {
        let mut arena = arena(3, 3);
        let before = arena.clone();
        assert_eq!(attempt_claim(&mut arena), ClaimOutcome::Rejected { regions: 0 });
        assert_eq!(arena, before);
    }

    #[test]
    fn test_stop_while_drawing_restores_origin() {
        let mut arena = arena(6, 5);
        walk(&mut arena, Direction::Right, 2);
        walk(&mut arena, Direction::Down, 2);
        tick(&mut arena, Some(InputIntent::Move(Direction::Right)));
        assert!(arena.spider.mode.is_drawing());
        let territory = arena.territory.clone();

        let result = tick(&mut arena, Some(InputIntent::Stop));
        assert!(result.cancelled);
        assert_eq!(arena.spider.position, arena.grid.vertex_to_pixel(&GridPos::new(2, 0)));
        assert_eq!(arena.spider.last_vertex, GridPos::new(2, 0));
        assert_eq!(arena.spider.mode, SpiderMode::IdleOnClaimed);
        assert_eq!(arena.spider.velocity, Direction::None);
        assert_eq!(arena.spider.queued_intent, None);
        assert!(arena.path().is_none());
        assert_eq!(arena.territory, territory);
    }

    #[test]
    fn test_stop_while_moving_just_stops() {
        let mut arena = arena(6, 5);
        tick(&mut arena, Some(InputIntent::Move(Direction::Right)));
        let result = tick(&mut arena, Some(InputIntent::Stop));

        assert!(!result.cancelled);
        assert_eq!(arena.spider.position, PixelPos::new(1, 0));
        assert_eq!(arena.spider.mode, SpiderMode::IdleOnClaimed);

        // Stopped mid-edge, the spider can still set off along that edge.
        tick(&mut arena, Some(InputIntent::Move(Direction::Down)));
        assert_eq!(arena.spider.position, PixelPos::new(1, 0));
        tick(&mut arena, Some(InputIntent::Move(Direction::Left)));
        assert_eq!(arena.spider.position, PixelPos::new(0, 0));
        assert_eq!(arena.spider.mode, SpiderMode::MovingOnClaimed);
        assert_eq!(arena.spider.queued_intent, None);
    }

    #[test]
    fn test_cannot_start_path_along_claimed_cells() {
        let mut arena = arena(6, 5);
        walk(&mut arena, Direction::Right, 2);
        walk(&mut arena, Direction::Down, 2);
        walk(&mut arena, Direction::Left, 2);
        assert_eq!(arena.territory.claimed_count(), 4);

        // (0,2) sits on the new border; walking back up runs between
        // claimed cells and the left wall, which is secured.
        walk(&mut arena, Direction::Up, 1);
        assert_eq!(arena.spider.mode, SpiderMode::MovingOnClaimed);

        // From (0,1) going right runs between two claimed cells: secured too.
        walk(&mut arena, Direction::Right, 1);
        assert_eq!(arena.spider.mode, SpiderMode::MovingOnClaimed);
        assert_eq!(vertex(&arena), GridPos::new(1, 1));

        // (1,1) is surrounded by claimed cells; every edge is secured.
        let results = walk(&mut arena, Direction::Down, 1);
        assert!(results.iter().all(|r| r.closure.is_none()));
        assert_eq!(arena.spider.mode, SpiderMode::MovingOnClaimed);
    }

    fn random_input(rng: &mut SmallRng) -> Option<InputIntent> {
        match rng.random_range(0..40) {
            0 => Some(InputIntent::Move(Direction::Up)),
            1 => Some(InputIntent::Move(Direction::Down)),
            2 => Some(InputIntent::Move(Direction::Left)),
            3 => Some(InputIntent::Move(Direction::Right)),
            4 if rng.random_range(0..8) == 0 => Some(InputIntent::Stop),
            _ => None,
        }
    }

    fn assert_partition(arena: &Arena) {
        let empty = EdgeSet::new(8, 6);
        let path_edges = arena.path().map(|p| p.edges()).unwrap_or(&empty);
        let regions = region::find_regions(&arena.territory, path_edges);

        let mut seen = arena.territory.claimed_cells().to_vec();
        for region in &regions {
            for cell in &region.cells {
                let idx = arena.grid.cell_index(cell);
                assert!(!seen[idx], "cell {:?} counted twice", cell);
                seen[idx] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_randomized_run_keeps_invariants() {
        for seed in 1..=4u64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut arena = arena(8, 6);
            let step = arena.grid.step();

            for _ in 0..6000 {
                let claimed_before = arena.territory.clone();
                tick(&mut arena, random_input(&mut rng));
                let territory = &arena.territory;

                assert!(territory.claimed_count() >= claimed_before.claimed_count());
                for cell in arena.grid.cells() {
                    if claimed_before.is_claimed(&cell) {
                        assert!(territory.is_claimed(&cell));
                    }
                }
                for edge in claimed_before.committed_edges().iter() {
                    assert!(territory.is_committed_edge(&edge));
                }

                let pos = arena.spider.position;
                let max = arena.grid.max_pixel();
                assert!(pos.x >= 0 && pos.x <= max.x && pos.y >= 0 && pos.y <= max.y);
                assert!(
                    pos.x % step == 0 || pos.y % step == 0,
                    "spider off the lattice at {:?}",
                    pos
                );

                if let Some(path) = arena.path() {
                    assert!(arena.spider.mode.is_drawing());
                    assert_eq!(path.vertices().first(), Some(&path.start()));
                }

                assert_partition(&arena);
            }
        }
    }
}
