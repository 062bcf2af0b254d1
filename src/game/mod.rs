pub mod traits;

pub use traits::{Game, GameError, TickResult};
