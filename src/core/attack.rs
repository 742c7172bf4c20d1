//! Attack resolution: classifying a shot and updating the hit/miss ledger.

use serde::{Deserialize, Serialize};

use crate::core::board::Board;
use crate::core::common::{BoardError, Resolution};
use crate::core::ship::ShipKind;

/// Result of an attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackResult {
    /// Off the board or already resolved. Nothing changed.
    Invalid,
    /// Struck one half of a ship that is still afloat.
    Hit(ShipKind),
    /// Struck the last unresolved half of a ship.
    Sunk(ShipKind),
    /// Hit only water; the cell is now a permanent miss.
    Miss,
}

impl AttackResult {
    /// Hits and sinks earn the attacker another shot.
    pub fn grants_follow_up(self) -> bool {
        matches!(self, AttackResult::Hit(_) | AttackResult::Sunk(_))
    }
}

/// What the attacker does after an attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// The shot was invalid; pick another target.
    Retry,
    /// Shoot again this turn.
    Continue,
    /// The turn passes to the other player.
    TurnOver,
    /// The last ship went down.
    GameOver,
}

impl Board {
    /// Attack `(row, col)`.
    ///
    /// Hitting a ship marks that cell hit for good; once both halves are hit
    /// the ship sinks and leaves the board. Hitting water marks a permanent
    /// miss. Off-board or already resolved targets are `Invalid` and change
    /// nothing.
    pub fn attack(&mut self, row: usize, col: usize) -> AttackResult {
        match self.resolution(row, col) {
            Some(Resolution::Unresolved) => {}
            _ => {
                log::debug!("invalid attack at ({}, {})", row, col);
                return AttackResult::Invalid;
            }
        }

        let result = match self.strike(row, col) {
            Ok(result) => result,
            Err(e) => {
                log::error!("attack at ({}, {}) failed: {}", row, col, e);
                return AttackResult::Invalid;
            }
        };
        log::debug!("attack at ({}, {}): {:?}", row, col, result);
        self.last_attack = Some(result);
        result
    }

    /// Resolve an unresolved, in-bounds cell.
    fn strike(&mut self, row: usize, col: usize) -> Result<AttackResult, BoardError> {
        let target = self
            .ship_at(row, col)
            .map(|ship| (ship.kind(), ship.other(row, col)));
        match target {
            Some((kind, other)) => {
                self.mark_hit(row, col, kind)?;
                let other_hit = other.is_some_and(|(r, c)| self.hit_owner(r, c) == Some(kind));
                if other_hit {
                    self.sink(kind)?;
                    Ok(AttackResult::Sunk(kind))
                } else {
                    Ok(AttackResult::Hit(kind))
                }
            }
            None => {
                self.mark_miss(row, col)?;
                Ok(AttackResult::Miss)
            }
        }
    }

    /// Follow-up rule for `result` given the ships still afloat.
    pub fn follow_up(&self, result: AttackResult) -> FollowUp {
        match result {
            AttackResult::Invalid => FollowUp::Retry,
            AttackResult::Hit(_) => FollowUp::Continue,
            AttackResult::Sunk(_) if self.is_defeated() => FollowUp::GameOver,
            AttackResult::Sunk(_) => FollowUp::Continue,
            AttackResult::Miss => FollowUp::TurnOver,
        }
    }

    fn mark_hit(&mut self, row: usize, col: usize, kind: ShipKind) -> Result<(), BoardError> {
        self.hits.set(row, col)?;
        self.hit_owners[row * self.size + col] = Some(kind);
        Ok(())
    }

    fn mark_miss(&mut self, row: usize, col: usize) -> Result<(), BoardError> {
        self.misses.set(row, col)?;
        Ok(())
    }

    fn sink(&mut self, kind: ShipKind) -> Result<(), BoardError> {
        if let Some(ship) = self.ship(kind).copied() {
            for (r, c) in ship.positions() {
                self.ship_map.clear(r, c)?;
            }
        }
        self.ships[kind.index()] = None;
        self.sunk[kind.index()] = true;
        self.rebuild_state();
        log::info!("{} sunk, {} ships remain", kind, self.remaining_ship_count());
        Ok(())
    }
}
