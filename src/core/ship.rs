//! Ship kinds and two-cell ship placement.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::core::state::Correlation;

/// Direction from a ship's first cell to its second cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in the order neighbours are scanned.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Step one cell from `(row, col)`. Returns `None` when the step would
    /// leave an `size×size` board.
    pub fn step(self, row: usize, col: usize, size: usize) -> Option<(usize, usize)> {
        let (r, c) = match self {
            Direction::Up => (row.checked_sub(1)?, col),
            Direction::Down => (row + 1, col),
            Direction::Left => (row, col.checked_sub(1)?),
            Direction::Right => (row, col + 1),
        };
        if r < size && c < size {
            Some((r, c))
        } else {
            None
        }
    }

    /// Parse `up`/`down`/`left`/`right` (or their first letter), ignoring case.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Phase sign of a Bell pair. It never shows up in measurement statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Plus,
    Minus,
}

/// The four ship kinds, one per Bell state. A kind doubles as the ship's
/// identifier: a board carries at most one ship of each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShipKind {
    /// Kind A, Φ+.
    PhiPlus,
    /// Kind B, Φ-.
    PhiMinus,
    /// Kind C, Ψ+.
    PsiPlus,
    /// Kind D, Ψ-.
    PsiMinus,
}

impl ShipKind {
    /// Every kind, in placement order.
    pub const ALL: [ShipKind; 4] = [
        ShipKind::PhiPlus,
        ShipKind::PhiMinus,
        ShipKind::PsiPlus,
        ShipKind::PsiMinus,
    ];

    /// Position of this kind in [`ShipKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// How the two halves of this ship agree when measured.
    pub fn correlation(self) -> Correlation {
        match self {
            ShipKind::PhiPlus | ShipKind::PhiMinus => Correlation::Same,
            ShipKind::PsiPlus | ShipKind::PsiMinus => Correlation::Opposite,
        }
    }

    pub fn phase(self) -> Phase {
        match self {
            ShipKind::PhiPlus | ShipKind::PsiPlus => Phase::Plus,
            ShipKind::PhiMinus | ShipKind::PsiMinus => Phase::Minus,
        }
    }

    /// Single-character board symbol.
    pub fn symbol(self) -> char {
        match self {
            ShipKind::PhiPlus => 'A',
            ShipKind::PhiMinus => 'B',
            ShipKind::PsiPlus => 'C',
            ShipKind::PsiMinus => 'D',
        }
    }

    /// Bell-state label, e.g. `Φ+`.
    pub fn label(self) -> &'static str {
        match self {
            ShipKind::PhiPlus => "Φ+",
            ShipKind::PhiMinus => "Φ-",
            ShipKind::PsiPlus => "Ψ+",
            ShipKind::PsiMinus => "Ψ-",
        }
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A ship afloat on the board: two grid-adjacent cells sharing one
/// correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    kind: ShipKind,
    positions: [(usize, usize); 2],
}

impl Ship {
    /// Build a ship from `(row, col)` and `direction` on an `size×size` board.
    /// Returns `None` if the second cell falls off the board.
    pub fn new(
        kind: ShipKind,
        row: usize,
        col: usize,
        direction: Direction,
        size: usize,
    ) -> Option<Self> {
        if row >= size || col >= size {
            return None;
        }
        let other = direction.step(row, col, size)?;
        Some(Ship {
            kind,
            positions: [(row, col), other],
        })
    }

    /// Build a ship from two explicit cells. Returns `None` unless they are
    /// distinct and 4-adjacent.
    pub fn from_positions(kind: ShipKind, a: (usize, usize), b: (usize, usize)) -> Option<Self> {
        if are_adjacent(a, b) {
            Some(Ship {
                kind,
                positions: [a, b],
            })
        } else {
            None
        }
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    pub fn positions(&self) -> [(usize, usize); 2] {
        self.positions
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.positions.contains(&(row, col))
    }

    /// The position paired with `(row, col)`, if `(row, col)` belongs to the ship.
    pub fn other(&self, row: usize, col: usize) -> Option<(usize, usize)> {
        match self.positions {
            [a, b] if a == (row, col) => Some(b),
            [a, b] if b == (row, col) => Some(a),
            _ => None,
        }
    }
}

/// True when the two cells share an edge.
pub fn are_adjacent(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1) == 1
}
