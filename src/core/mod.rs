//! Core SuperMunition engine.
//!
//! This module holds the board quantum-state model: entangled ship pairs,
//! per-turn measurement, attack resolution, entanglement swaps and the
//! snapshot history. It does no I/O; randomness comes in through
//! [`CoinSource`].

pub mod ai;
pub mod attack;
pub mod bitboard;
pub mod board;
pub mod coin;
pub mod common;
pub mod config;
pub mod history;
pub mod ship;
pub mod state;
pub mod swap;

// Re-export commonly used types
pub use ai::{correlation_scores, pick_target};
pub use attack::{AttackResult, FollowUp};
pub use bitboard::{BitBoard, BitBoardError};
pub use board::{Board, BoardState};
pub use coin::{CoinSource, ScriptedCoins};
pub use common::{BoardError, Conflict, Resolution};
pub use config::*;
pub use history::{HistoryLedger, Reading, Snapshot};
pub use ship::{are_adjacent, Direction, Phase, Ship, ShipKind};
pub use state::{CellState, Correlation, QuantumState};
