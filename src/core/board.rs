//! Board state: ship pairs, permanent hits and misses, and measurement.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::attack::AttackResult;
use crate::core::bitboard::BitBoard;
use crate::core::coin::CoinSource;
use crate::core::common::{BoardError, Conflict, Resolution};
use crate::core::config::{
    DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE, NUM_SHIPS, PLACEMENT_ATTEMPTS,
};
use crate::core::history::{HistoryLedger, Reading, Snapshot};
use crate::core::ship::{are_adjacent, Direction, Ship, ShipKind};
use crate::core::state::QuantumState;

pub(crate) type BB = BitBoard<u128>;

/// Serializable board state for saving and restoring games.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub size: usize,
    /// Ships still afloat.
    pub ships: Vec<Ship>,
    pub sunk: Vec<ShipKind>,
    pub hits: Vec<((usize, usize), ShipKind)>,
    pub misses: Vec<(usize, usize)>,
    pub history: Vec<Snapshot>,
    pub last_attack: Option<AttackResult>,
}

#[cfg(feature = "std")]
impl BoardState {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, BoardError> {
        bincode::serialize(self).map_err(|e| BoardError::Codec(e.to_string()))
    }

    /// Decode with bincode. The result still has to pass [`Board::from_state`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BoardError> {
        bincode::deserialize(bytes).map_err(|e| BoardError::Codec(e.to_string()))
    }
}

/// One player's board.
///
/// Ships are placed as entangled pairs, every turn the whole board is
/// re-measured, and attacks permanently resolve cells to hits or misses.
#[derive(Debug, Clone)]
pub struct Board {
    pub(super) size: usize,
    pub(super) ships: [Option<Ship>; NUM_SHIPS],
    pub(super) sunk: [bool; NUM_SHIPS],
    pub(super) ship_map: BB,
    pub(super) hits: BB,
    pub(super) hit_owners: Vec<Option<ShipKind>>,
    pub(super) misses: BB,
    pub(super) state: QuantumState,
    pub(super) history: HistoryLedger,
    pub(super) last_attack: Option<AttackResult>,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty(DEFAULT_BOARD_SIZE)
    }
}

impl Board {
    /// Create an empty `size×size` board with every cell unresolved.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self::empty(size))
    }

    fn empty(size: usize) -> Self {
        // sizes reaching here are within MIN_BOARD_SIZE..=MAX_BOARD_SIZE
        let empty = BB::new(size);
        Board {
            size,
            ships: [None; NUM_SHIPS],
            sunk: [false; NUM_SHIPS],
            ship_map: empty,
            hits: empty,
            hit_owners: vec![None; size * size],
            misses: empty,
            state: QuantumState::superposed(size),
            history: HistoryLedger::new(),
            last_attack: None,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Permanent state of a cell, or `None` off the board.
    pub fn resolution(&self, row: usize, col: usize) -> Option<Resolution> {
        if row >= self.size || col >= self.size {
            return None;
        }
        if self.misses.contains(row, col) {
            Some(Resolution::Miss)
        } else if let Some(kind) = self.hit_owner(row, col) {
            Some(Resolution::Hit(kind))
        } else {
            Some(Resolution::Unresolved)
        }
    }

    pub(super) fn hit_owner(&self, row: usize, col: usize) -> Option<ShipKind> {
        if self.hits.contains(row, col) {
            self.hit_owners[row * self.size + col]
        } else {
            None
        }
    }

    /// The ship of `kind`, if it is afloat.
    pub fn ship(&self, kind: ShipKind) -> Option<&Ship> {
        self.ships[kind.index()].as_ref()
    }

    /// Ships still afloat, in kind order.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter().flatten()
    }

    /// Ship currently occupying `(row, col)`.
    pub fn ship_at(&self, row: usize, col: usize) -> Option<&Ship> {
        if !self.ship_map.contains(row, col) {
            return None;
        }
        self.ships().find(|s| s.contains(row, col))
    }

    pub fn is_sunk(&self, kind: ShipKind) -> bool {
        self.sunk[kind.index()]
    }

    pub fn remaining_ship_count(&self) -> usize {
        self.ships().count()
    }

    /// True once no ship is afloat.
    pub fn is_defeated(&self) -> bool {
        self.remaining_ship_count() == 0
    }

    /// Occupancy mask of all ships afloat.
    pub fn ship_map(&self) -> BB {
        self.ship_map
    }

    pub fn hits(&self) -> BB {
        self.hits
    }

    pub fn misses(&self) -> BB {
        self.misses
    }

    /// Cells a ship could stand on: no ship, no hit, no miss.
    pub fn free_cells(&self) -> BB {
        !(self.ship_map | self.hits | self.misses)
    }

    pub fn quantum_state(&self) -> &QuantumState {
        &self.state
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    /// Snapshot `offset` turns before the latest (`0` = latest).
    pub fn get_history(&self, offset: usize) -> Result<&Snapshot, BoardError> {
        self.history.get(offset)
    }

    /// Result of the most recent valid attack against this board.
    pub fn last_attack(&self) -> Option<AttackResult> {
        self.last_attack
    }

    /// Check that a ship may stand on `(row, col)`.
    pub(super) fn check_free(&self, row: usize, col: usize) -> Result<(), Conflict> {
        if row >= self.size || col >= self.size {
            return Err(Conflict::OutOfBounds { row, col });
        }
        if let Some(ship) = self.ship_at(row, col) {
            return Err(Conflict::Occupied {
                row,
                col,
                by: ship.kind(),
            });
        }
        if self.misses.contains(row, col) {
            return Err(Conflict::PermanentMiss { row, col });
        }
        if self.hits.contains(row, col) {
            return Err(Conflict::PermanentHit { row, col });
        }
        Ok(())
    }

    fn validate_placement(
        &self,
        kind: ShipKind,
        row: usize,
        col: usize,
        direction: Direction,
    ) -> Result<Ship, Conflict> {
        if self.ships[kind.index()].is_some() || self.sunk[kind.index()] {
            return Err(Conflict::AlreadyPlaced(kind));
        }
        self.check_free(row, col)?;
        let ship = Ship::new(kind, row, col, direction, self.size).ok_or(Conflict::DoesNotFit {
            row,
            col,
            direction,
        })?;
        let [_, (r, c)] = ship.positions();
        self.check_free(r, c)?;
        Ok(ship)
    }

    /// Place the ship of `kind` on `(row, col)` and the cell one step in
    /// `direction`, entangling the two cells. Nothing changes on error.
    pub fn place_ship(
        &mut self,
        kind: ShipKind,
        row: usize,
        col: usize,
        direction: Direction,
    ) -> Result<(), BoardError> {
        let ship = self.validate_placement(kind, row, col, direction)?;
        for (r, c) in ship.positions() {
            self.ship_map.set(r, c)?;
        }
        self.state.entangle(&ship);
        self.ships[kind.index()] = Some(ship);
        log::debug!("placed {} at {:?}", kind, ship.positions());
        Ok(())
    }

    /// Returns a random valid `(row, col, Direction)` for `kind`.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        kind: ShipKind,
    ) -> Result<(usize, usize, Direction), BoardError> {
        if self.ships[kind.index()].is_some() || self.sunk[kind.index()] {
            return Err(Conflict::AlreadyPlaced(kind).into());
        }
        if self.free_cells().count_ones() < 2 {
            return Err(BoardError::UnableToPlaceShip);
        }
        for _ in 0..PLACEMENT_ATTEMPTS {
            let r = rng.random_range(0..self.size);
            let c = rng.random_range(0..self.size);
            let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
            if self.validate_placement(kind, r, c, direction).is_ok() {
                return Ok((r, c, direction));
            }
        }
        Err(BoardError::UnableToPlaceShip)
    }

    /// Measure the whole board and record the snapshot.
    ///
    /// A coin is drawn for every cell, resolved or not, so the draw count
    /// depends only on the board size and the number of pairs. Resolved
    /// cells then show their hit or miss marker instead of the drawn bit.
    pub fn sample_board<C: CoinSource + ?Sized>(&mut self, coins: &mut C) -> Snapshot {
        let bits = self.state.measure(coins);
        let readings = bits
            .into_iter()
            .enumerate()
            .map(|(idx, bit)| {
                let (r, c) = (idx / self.size, idx % self.size);
                if self.misses.contains(r, c) {
                    Reading::Miss
                } else if let Some(kind) = self.hit_owner(r, c) {
                    Reading::Hit(kind)
                } else {
                    Reading::Bit(bit)
                }
            })
            .collect();
        let snapshot = Snapshot::new(self.history.len(), self.size, readings);
        log::debug!(
            "sampled turn {} with {} pairs",
            snapshot.turn(),
            self.state.pair_count()
        );
        self.history.record(snapshot.clone());
        snapshot
    }

    /// Rebuild the default superposition, re-entangle every ship afloat and
    /// measure. Called once per turn.
    pub fn reset_and_resample<C: CoinSource + ?Sized>(&mut self, coins: &mut C) -> Snapshot {
        self.rebuild_state();
        self.sample_board(coins)
    }

    pub(super) fn rebuild_state(&mut self) {
        self.state = QuantumState::entangled(self.size, self.ships.iter().flatten());
    }

    /// Capture a serializable copy of the board.
    pub fn state(&self) -> BoardState {
        BoardState {
            size: self.size,
            ships: self.ships().copied().collect(),
            sunk: ShipKind::ALL
                .into_iter()
                .filter(|k| self.is_sunk(*k))
                .collect(),
            hits: self
                .hits
                .iter_set_bits()
                .filter_map(|(r, c)| self.hit_owner(r, c).map(|k| ((r, c), k)))
                .collect(),
            misses: self.misses.iter_set_bits().collect(),
            history: self.history.iter().cloned().collect(),
            last_attack: self.last_attack,
        }
    }

    /// Rebuild a board from a saved state, checking every board invariant.
    pub fn from_state(state: BoardState) -> Result<Self, BoardError> {
        let invalid = |msg: String| Err(BoardError::InvalidState(msg));
        let mut board = Board::new(state.size)?;

        for &((r, c), kind) in &state.hits {
            if board.resolution(r, c) != Some(Resolution::Unresolved) {
                return invalid(format!("hit ({}, {}) is off the board or repeated", r, c));
            }
            board.hits.set(r, c)?;
            board.hit_owners[r * board.size + c] = Some(kind);
        }
        for &(r, c) in &state.misses {
            if board.resolution(r, c) != Some(Resolution::Unresolved) {
                return invalid(format!("miss ({}, {}) overlaps another resolution", r, c));
            }
            board.misses.set(r, c)?;
        }
        for &kind in &state.sunk {
            if board.sunk[kind.index()] {
                return invalid(format!("{} is listed as sunk twice", kind));
            }
            let owned = state.hits.iter().filter(|&&(_, k)| k == kind).count();
            if owned < 2 {
                return invalid(format!("{} is sunk but owns {} hit cells", kind, owned));
            }
            board.sunk[kind.index()] = true;
        }
        for ship in &state.ships {
            let kind = ship.kind();
            if board.ships[kind.index()].is_some() || board.sunk[kind.index()] {
                return invalid(format!("{} appears more than once", kind));
            }
            let [a, b] = ship.positions();
            if !are_adjacent(a, b) {
                return invalid(format!("{} halves are not adjacent", kind));
            }
            let mut own_hits = 0;
            for (r, c) in [a, b] {
                match board.check_free(r, c) {
                    Ok(()) => {}
                    Err(Conflict::PermanentHit { .. }) if board.hit_owner(r, c) == Some(kind) => {
                        own_hits += 1;
                    }
                    Err(e) => return invalid(format!("{}: {}", kind, e)),
                }
            }
            if own_hits > 1 {
                return invalid(format!("{} is fully hit but not sunk", kind));
            }
            for (r, c) in [a, b] {
                board.ship_map.set(r, c)?;
            }
            board.ships[kind.index()] = Some(*ship);
        }
        for snapshot in state.history {
            if snapshot.size() != board.size || !snapshot.is_complete() {
                return invalid(format!("snapshot {} has the wrong size", snapshot.turn()));
            }
            if snapshot.turn() != board.history.len() {
                return invalid(format!(
                    "snapshot {} recorded at position {}",
                    snapshot.turn(),
                    board.history.len()
                ));
            }
            board.history.record(snapshot);
        }
        if state.last_attack == Some(AttackResult::Invalid) {
            return invalid("an invalid attack is never recorded".to_string());
        }
        board.last_attack = state.last_attack;
        board.rebuild_state();
        Ok(board)
    }
}
