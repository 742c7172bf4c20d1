//! Measured snapshots and the append-only ledger that keeps them.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::core::common::BoardError;
use crate::core::config::MISS_SYMBOL;
use crate::core::ship::ShipKind;

/// What one cell shows after a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reading {
    /// Freshly collapsed bit of an unresolved cell.
    Bit(bool),
    /// Permanent hit, shown with the owning ship's symbol.
    Hit(ShipKind),
    /// Permanent miss.
    Miss,
}

impl Reading {
    pub fn symbol(self) -> char {
        match self {
            Reading::Bit(false) => '0',
            Reading::Bit(true) => '1',
            Reading::Hit(kind) => kind.symbol(),
            Reading::Miss => MISS_SYMBOL,
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One fully measured, display-ready board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    turn: usize,
    size: usize,
    readings: Vec<Reading>,
}

impl Snapshot {
    pub(crate) fn new(turn: usize, size: usize, readings: Vec<Reading>) -> Self {
        debug_assert_eq!(readings.len(), size * size);
        Self {
            turn,
            size,
            readings,
        }
    }

    /// Zero-based position of this snapshot in its board's history.
    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Reading at `(row, col)`, or `None` off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Reading> {
        if row < self.size && col < self.size {
            self.readings.get(row * self.size + col).copied()
        } else {
            None
        }
    }

    /// True when there is exactly one reading per cell.
    pub(crate) fn is_complete(&self) -> bool {
        self.size.checked_mul(self.size) == Some(self.readings.len())
    }

    /// Rows of readings, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Reading]> {
        self.readings.chunks(self.size)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(self.size * 2 + 1);
        writeln!(f, "{}", rule)?;
        for row in self.rows() {
            for reading in row {
                write!(f, "|{}", reading)?;
            }
            writeln!(f, "|")?;
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

/// Append-only record of every snapshot a board has produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLedger {
    snapshots: Vec<Snapshot>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    /// Snapshot `offset` turns before the latest; `0` is the latest.
    pub fn get(&self, offset: usize) -> Result<&Snapshot, BoardError> {
        let len = self.snapshots.len();
        if offset >= len {
            return Err(BoardError::HistoryOutOfRange { offset, len });
        }
        Ok(&self.snapshots[len - 1 - offset])
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Oldest first. Each call starts over from the beginning.
    pub fn iter(&self) -> core::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }
}

impl<'a> IntoIterator for &'a HistoryLedger {
    type Item = &'a Snapshot;
    type IntoIter = core::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
