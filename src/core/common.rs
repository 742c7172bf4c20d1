//! Common types for SuperMunition: board errors and cell resolutions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::bitboard::BitBoardError;
use crate::core::ship::{Direction, ShipKind};

/// Permanent outcome of attacking a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    Unresolved,
    /// Struck, carrying the kind of ship that stood here when it was hit.
    Hit(ShipKind),
    Miss,
}

impl Resolution {
    pub fn is_resolved(self) -> bool {
        !matches!(self, Resolution::Unresolved)
    }
}

/// Reason a cell cannot take a ship, either at placement or during a swap.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    #[error("({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },
    #[error("a ship at ({row}, {col}) pointing {direction:?} does not fit on the board")]
    DoesNotFit {
        row: usize,
        col: usize,
        direction: Direction,
    },
    #[error("({row}, {col}) is already taken by {by}")]
    Occupied { row: usize, col: usize, by: ShipKind },
    #[error("({row}, {col}) is a permanent miss")]
    PermanentMiss { row: usize, col: usize },
    #[error("({row}, {col}) has already been hit")]
    PermanentHit { row: usize, col: usize },
    #[error("({row}, {col}) is not next to the {kind} pivot")]
    NotAdjacent {
        row: usize,
        col: usize,
        kind: ShipKind,
    },
    #[error("{0} is already on the board")]
    AlreadyPlaced(ShipKind),
}

/// Errors returned by Board operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("conflict: {0}")]
    Conflict(#[from] Conflict),
    #[error("BitBoard error: {0}")]
    BitBoardError(#[from] BitBoardError),
    #[error("board size {0} is not supported")]
    InvalidSize(usize),
    /// The ship is not afloat: never placed, or already sunk.
    #[error("no {0} ship is afloat")]
    ShipNotFound(ShipKind),
    /// Swaps need exactly one hit half.
    #[error("{0} is not half-resolved")]
    NotHalfResolved(ShipKind),
    /// Swaps are only allowed right after a miss.
    #[error("the last attack on this board was not a miss")]
    SwapWindowClosed,
    #[error("history offset {offset} out of range (have {len} snapshots)")]
    HistoryOutOfRange { offset: usize, len: usize },
    #[error("Unable to place ship")]
    UnableToPlaceShip,
    /// A restored state breaks a board invariant.
    #[error("invalid board state: {0}")]
    InvalidState(String),
    #[error("state codec error: {0}")]
    Codec(String),
}
