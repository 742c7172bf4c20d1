use rand::rngs::SmallRng;
use rand::Rng;

use crate::core::{ai, AttackResult, Board, BoardError, Direction, HistoryLedger, ShipKind, FLEET};

use super::Player;

/// AI player: random placement, correlation-scored targeting, and a hunt
/// list of neighbours around hits that have not sunk yet.
#[derive(Debug, Default)]
pub struct AiPlayer {
    open_hits: Vec<((usize, usize), ShipKind)>,
    fired: Vec<(usize, usize)>,
    last_size: usize,
}

impl AiPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    fn focus(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for &((r, c), _) in &self.open_hits {
            for d in Direction::ALL {
                if let Some(cell) = d.step(r, c, self.last_size) {
                    if !cells.contains(&cell) {
                        cells.push(cell);
                    }
                }
            }
        }
        cells
    }
}

impl Player for AiPlayer {
    fn name(&self) -> &str {
        "ai"
    }

    fn place_ships(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError> {
        for kind in FLEET {
            let (r, c, d) = board.random_placement(rng, kind)?;
            board.place_ship(kind, r, c, d)?;
        }
        Ok(())
    }

    fn select_target(&mut self, rng: &mut SmallRng, opponent: &HistoryLedger) -> (usize, usize) {
        self.last_size = opponent.latest().map(|s| s.size()).unwrap_or(0);
        let focus = self.focus();
        ai::pick_target(opponent, &focus, &self.fired, rng).unwrap_or((0, 0))
    }

    fn choose_swap(
        &mut self,
        rng: &mut SmallRng,
        board: &Board,
        kind: ShipKind,
    ) -> Option<(usize, usize)> {
        let targets = board.swap_targets(kind);
        if targets.is_empty() {
            return None;
        }
        Some(targets[rng.random_range(0..targets.len())])
    }

    fn handle_attack_result(&mut self, coord: (usize, usize), result: AttackResult) {
        if result != AttackResult::Invalid {
            self.fired.push(coord);
        }
        match result {
            AttackResult::Hit(kind) => self.open_hits.push((coord, kind)),
            AttackResult::Sunk(kind) => self.open_hits.retain(|&(_, k)| k != kind),
            AttackResult::Miss | AttackResult::Invalid => {}
        }
    }
}
