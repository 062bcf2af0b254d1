pub mod config;
pub mod grid;
pub mod path;
pub mod region;
pub mod state;
pub mod systems;

use std::time::Duration;

use prost::Message;

use crate::game::traits::{Game, GameError, TickResult};
use crate::protocol::spider::{
    spider_event, ArenaState, InputDirection, SpiderEvent, SpiderInput, SpiderModeKind,
    TerritoryClaimed,
};

pub use config::SpiderConfig;
pub use grid::{Direction, Edge, EdgeSet, Grid, GridPos, PixelPos};
pub use path::PathTracker;
pub use state::{Arena, Spider, SpiderMode, Territory};
pub use systems::{ClaimOutcome, ClosureTrigger, InputIntent, PathClosure, StepResult};

pub struct SpiderGame {
    /// Current simulation state
    arena: Arena,
    /// Game configuration
    config: SpiderConfig,
    /// Current tick number
    tick: u32,
    /// Input waiting for the next tick; the latest one wins
    pending_input: Option<InputIntent>,
}

impl SpiderGame {
    pub fn new() -> Self {
        Self::with_config(SpiderConfig::default())
    }

    pub fn with_config(config: SpiderConfig) -> Self {
        Self {
            arena: Arena::new(&config),
            config,
            tick: 0,
            pending_input: None,
        }
    }

    pub fn current_tick(&self) -> u32 {
        self.tick
    }

    pub fn state(&self) -> &Arena {
        &self.arena
    }

    pub fn state_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    pub fn config(&self) -> &SpiderConfig {
        &self.config
    }

    pub fn queue_input(&mut self, intent: InputIntent) {
        self.pending_input = Some(intent);
    }

    /// Run one tick with whatever input is pending.
    pub fn advance(&mut self) -> StepResult {
        self.tick += 1;
        systems::tick(&mut self.arena, self.pending_input.take())
    }

    /// Read-only view for renderers.
    pub fn snapshot(&self) -> ArenaState {
        let arena = &self.arena;
        let (width, height) = arena.grid.get_grid_dimensions();
        let territory = &arena.territory;
        let (path_h, path_v) = match arena.path() {
            Some(path) => (
                path.edges().horizontal_bits().to_vec(),
                path.edges().vertical_bits().to_vec(),
            ),
            None => {
                let empty = EdgeSet::new(width, height);
                (empty.horizontal_bits().to_vec(), empty.vertical_bits().to_vec())
            }
        };

        ArenaState {
            tick: self.tick,
            width,
            height,
            step: arena.grid.step(),
            claimed: territory.claimed_cells().to_vec(),
            committed_h: territory.committed_edges().horizontal_bits().to_vec(),
            committed_v: territory.committed_edges().vertical_bits().to_vec(),
            path_h,
            path_v,
            spider_x: arena.spider.position.x,
            spider_y: arena.spider.position.y,
            velocity: direction_to_proto(arena.spider.velocity) as i32,
            mode: mode_to_proto(&arena.spider.mode) as i32,
            claimed_count: territory.claimed_count() as u32,
            total_cells: territory.get_total_cells() as u32,
        }
    }
}

impl Default for SpiderGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SpiderGame {
    fn tick(&mut self) -> TickResult {
        let step = self.advance();
        let mut result = TickResult::default();

        if let Some(closure) = step.closure {
            match closure.outcome {
                ClaimOutcome::Claimed { cells_claimed, .. } => {
                    let territory = &self.arena.territory;
                    let event = SpiderEvent {
                        event: Some(spider_event::Event::Claimed(TerritoryClaimed {
                            cells_claimed: cells_claimed as u32,
                            claimed_count: territory.claimed_count() as u32,
                            total_cells: territory.get_total_cells() as u32,
                            self_intersection: closure.trigger
                                == ClosureTrigger::SelfIntersection,
                        })),
                    };
                    result.broadcast = Some(event.encode_to_vec());
                }
                ClaimOutcome::Rejected { regions } => {
                    tracing::debug!(
                        "Tick {}: {:?} closure rejected ({} regions)",
                        self.tick,
                        closure.trigger,
                        regions
                    );
                }
            }

            if self.is_game_over() {
                tracing::info!("Arena fully claimed after {} ticks", self.tick);
            }
        }

        result
    }

    fn handle_input(&mut self, input: &[u8]) -> Result<(), GameError> {
        let spider_input = SpiderInput::decode(input)
            .map_err(|e| GameError::InvalidInput(format!("Failed to decode input: {}", e)))?;

        if self.is_game_over() {
            return Err(GameError::InvalidState("arena is fully claimed".to_string()));
        }

        if let Some(intent) = intent_from_proto(spider_input.direction)? {
            self.queue_input(intent);
        }

        Ok(())
    }

    fn reset(&mut self) {
        self.arena.reset();
        self.tick = 0;
        self.pending_input = None;
        tracing::info!("Arena reset");
    }

    fn encode_state(&self) -> Vec<u8> {
        SpiderEvent {
            event: Some(spider_event::Event::State(self.snapshot())),
        }
        .encode_to_vec()
    }

    fn tick_rate(&self) -> Duration {
        self.config.tick_duration()
    }

    fn is_game_over(&self) -> bool {
        let territory = &self.arena.territory;
        territory.claimed_count() == territory.get_total_cells()
    }
}

pub fn intent_from_proto(value: i32) -> Result<Option<InputIntent>, GameError> {
    let direction = InputDirection::try_from(value)
        .map_err(|_| GameError::InvalidInput(format!("Unknown direction {}", value)))?;

    Ok(match direction {
        InputDirection::Unspecified => None,
        InputDirection::Up => Some(InputIntent::Move(Direction::Up)),
        InputDirection::Down => Some(InputIntent::Move(Direction::Down)),
        InputDirection::Left => Some(InputIntent::Move(Direction::Left)),
        InputDirection::Right => Some(InputIntent::Move(Direction::Right)),
        InputDirection::Stop => Some(InputIntent::Stop),
    })
}

pub fn direction_to_proto(direction: Direction) -> InputDirection {
    match direction {
        Direction::None => InputDirection::Unspecified,
        Direction::Up => InputDirection::Up,
        Direction::Down => InputDirection::Down,
        Direction::Left => InputDirection::Left,
        Direction::Right => InputDirection::Right,
    }
}

fn mode_to_proto(mode: &SpiderMode) -> SpiderModeKind {
    match mode {
        SpiderMode::IdleOnClaimed => SpiderModeKind::Idle,
        SpiderMode::MovingOnClaimed => SpiderModeKind::Moving,
        SpiderMode::DrawingPath(_) => SpiderModeKind::Drawing,
    }
}
