//! Player trait and implementations
//!
//! This module defines the Player trait and provides concrete implementations:
//! - AiPlayer: correlation-scoring AI with hunt mode after a hit
//! - CliPlayer: Interactive command-line player

use rand::rngs::SmallRng;

use crate::core::{AttackResult, Board, BoardError, HistoryLedger, ShipKind};

/// Interface implemented by different player types.
///
/// A Player is responsible for:
/// - Placing ships on its own board
/// - Selecting targets on the opponent board from its measured snapshots
/// - Deciding where to swap a half-hit ship after the opponent misses
pub trait Player: Send {
    /// Short name used in reports.
    fn name(&self) -> &str;

    /// Place every ship of the fleet onto the provided board.
    fn place_ships(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError>;

    /// Choose the next target given the opponent board's snapshot history.
    /// The latest snapshot is the current turn's measurement.
    fn select_target(&mut self, rng: &mut SmallRng, opponent: &HistoryLedger) -> (usize, usize);

    /// Pick a new cell for the unresolved half of `kind`, or `None` to leave
    /// it where it is. Only asked when the ship is movable.
    fn choose_swap(
        &mut self,
        rng: &mut SmallRng,
        board: &Board,
        kind: ShipKind,
    ) -> Option<(usize, usize)>;

    /// Inform the player of the result of its last attack.
    fn handle_attack_result(&mut self, _coord: (usize, usize), _result: AttackResult) {}

    /// Inform the player of an opponent attack against its board.
    fn handle_opponent_attack(&mut self, _coord: (usize, usize), _result: AttackResult) {}

    /// Inform the player that a proposed swap was refused.
    fn handle_swap_rejected(&mut self, _kind: ShipKind, _error: &BoardError) {}
}

pub mod ai;
pub use ai::AiPlayer;

#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
pub use cli::CliPlayer;
