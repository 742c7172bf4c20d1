pub mod core;
mod game;
#[cfg(feature = "std")]
mod logging;
pub mod player;

pub use crate::core::*;
pub use game::{Game, GameError, GameStatus, PlayerId, TurnReport};
#[cfg(feature = "std")]
pub use logging::{init_logging, parse_level};
#[cfg(feature = "std")]
pub use player::CliPlayer;
pub use player::{AiPlayer, Player};
