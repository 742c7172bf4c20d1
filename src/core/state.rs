//! Per-cell quantum state: independent coins or correlated pairs.
//!
//! The model only tracks what measurement can observe. Each ship pair
//! collapses to one of two joint outcomes chosen by its [`Correlation`]; every
//! other cell is a fair coin independent of all others.

use serde::{Deserialize, Serialize};

use crate::core::coin::CoinSource;
use crate::core::ship::Ship;

/// Joint outcome rule of an entangled pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Correlation {
    /// Both halves read the same bit: (0,0) or (1,1).
    Same,
    /// The halves read opposite bits: (0,1) or (1,0).
    Opposite,
}

impl Correlation {
    /// The partner's bit given the lead's bit.
    #[inline]
    pub fn partner_bit(self, lead: bool) -> bool {
        match self {
            Correlation::Same => lead,
            Correlation::Opposite => !lead,
        }
    }
}

/// State of one cell before measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Fair coin in equal superposition.
    Independent,
    /// One half of a pair. The lead half draws the coin; the other half
    /// derives its bit from the lead's.
    Paired {
        partner: usize,
        correlation: Correlation,
        lead: bool,
    },
}

/// Board-wide state, indexed by `row * size + col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantumState {
    size: usize,
    cells: Vec<CellState>,
}

impl QuantumState {
    /// Every cell independent.
    pub fn superposed(size: usize) -> Self {
        Self {
            size,
            cells: vec![CellState::Independent; size * size],
        }
    }

    /// Default superposition with each ship's two cells entangled.
    pub fn entangled<'a>(size: usize, ships: impl IntoIterator<Item = &'a Ship>) -> Self {
        let mut state = Self::superposed(size);
        for ship in ships {
            state.entangle(ship);
        }
        state
    }

    /// Pair the ship's two cells under its kind's correlation.
    pub fn entangle(&mut self, ship: &Ship) {
        let [a, b] = ship.positions();
        let (a, b) = (self.index(a), self.index(b));
        let correlation = ship.kind().correlation();
        self.cells[a] = CellState::Paired {
            partner: b,
            correlation,
            lead: true,
        };
        self.cells[b] = CellState::Paired {
            partner: a,
            correlation,
            lead: false,
        };
    }

    /// State of `(row, col)`, or `None` off the board.
    pub fn cell(&self, row: usize, col: usize) -> Option<CellState> {
        if row < self.size && col < self.size {
            self.cells.get(self.index((row, col))).copied()
        } else {
            None
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of pairs currently entangled.
    pub fn pair_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, CellState::Paired { lead: true, .. }))
            .count()
    }

    /// Collapse every cell. Draws exactly one coin per independent cell and
    /// one per pair, in row-major order of the independent cells and lead
    /// halves.
    pub fn measure<C: CoinSource + ?Sized>(&self, coins: &mut C) -> Vec<bool> {
        let mut bits = vec![false; self.cells.len()];
        for (idx, cell) in self.cells.iter().enumerate() {
            match *cell {
                CellState::Independent => bits[idx] = coins.flip(),
                CellState::Paired {
                    partner,
                    correlation,
                    lead: true,
                } => {
                    let bit = coins.flip();
                    bits[idx] = bit;
                    bits[partner] = correlation.partner_bit(bit);
                }
                CellState::Paired { lead: false, .. } => {}
            }
        }
        log::trace!("measured {} cells", bits.len());
        bits
    }

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> usize {
        row * self.size + col
    }
}
