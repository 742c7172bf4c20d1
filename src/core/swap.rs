//! Entanglement swap: moving the surviving half of a hit ship.
//!
//! After an attacker hits one half of a ship and then misses, the defender
//! may move the unresolved half (the pivot) to a free neighbouring cell. The
//! ship keeps its kind and becomes the pair `{pivot, new position}`; the hit
//! cell stays hit but no longer belongs to the ship.

use crate::core::attack::AttackResult;
use crate::core::board::Board;
use crate::core::common::{BoardError, Conflict};
use crate::core::ship::{are_adjacent, Direction, Ship, ShipKind};

impl Board {
    /// Unresolved half of a ship that has exactly one hit half.
    pub fn pivot(&self, kind: ShipKind) -> Option<(usize, usize)> {
        let ship = self.ship(kind)?;
        let [a, b] = ship.positions();
        match (self.hits.contains(a.0, a.1), self.hits.contains(b.0, b.1)) {
            (true, false) => Some(b),
            (false, true) => Some(a),
            _ => None,
        }
    }

    /// True while the most recent valid attack on this board was a miss.
    pub fn swap_window_open(&self) -> bool {
        self.last_attack == Some(AttackResult::Miss)
    }

    /// Free cells next to the pivot of `kind`. Empty when the ship is not
    /// afloat or not half-resolved.
    pub fn swap_targets(&self, kind: ShipKind) -> Vec<(usize, usize)> {
        let Some((row, col)) = self.pivot(kind) else {
            return Vec::new();
        };
        Direction::ALL
            .into_iter()
            .filter_map(|d| d.step(row, col, self.size))
            .filter(|&(r, c)| self.check_free(r, c).is_ok())
            .collect()
    }

    /// Whether the half-resolved ship of `kind` has somewhere to go. A ship
    /// that is half-resolved but boxed in is trapped.
    pub fn is_movable(&self, kind: ShipKind) -> bool {
        !self.swap_targets(kind).is_empty()
    }

    /// Half-resolved ships the defender may move right now.
    pub fn swap_candidates(&self) -> Vec<ShipKind> {
        if !self.swap_window_open() {
            return Vec::new();
        }
        ShipKind::ALL
            .into_iter()
            .filter(|&k| self.pivot(k).is_some())
            .collect()
    }

    /// Move the unresolved half of `kind` so the ship becomes
    /// `{pivot, (row, col)}`. Nothing changes on error.
    pub fn move_ship(&mut self, kind: ShipKind, row: usize, col: usize) -> Result<(), BoardError> {
        if self.ship(kind).is_none() {
            return Err(BoardError::ShipNotFound(kind));
        }
        let pivot = self.pivot(kind).ok_or(BoardError::NotHalfResolved(kind))?;
        if !self.swap_window_open() {
            return Err(BoardError::SwapWindowClosed);
        }
        if row >= self.size || col >= self.size {
            return Err(Conflict::OutOfBounds { row, col }.into());
        }
        if !are_adjacent(pivot, (row, col)) {
            return Err(Conflict::NotAdjacent { row, col, kind }.into());
        }
        self.check_free(row, col)?;
        let ship = Ship::from_positions(kind, pivot, (row, col))
            .ok_or(Conflict::NotAdjacent { row, col, kind })?;

        if let Some(old) = self.ship(kind).and_then(|s| s.other(pivot.0, pivot.1)) {
            self.ship_map.clear(old.0, old.1)?;
        }
        self.ship_map.set(row, col)?;
        self.ships[kind.index()] = Some(ship);
        self.rebuild_state();
        log::debug!("swapped {} to {:?}", kind, ship.positions());
        Ok(())
    }
}
