//! Turn orchestration for two players.
//!
//! Each turn the defender's board is reset and re-measured, the attacker
//! fires until the follow-up rule ends the turn, and after a miss the
//! defender may swap any half-hit ship.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::core::{AttackResult, Board, BoardError, BoardState, FollowUp, ShipKind, NUM_SHIPS};
use crate::player::Player;

/// Invalid answers tolerated from one player before the game gives up on it.
const MAX_RETRIES: usize = 64;

/// Index of a player (and of the board they own).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub fn other(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(PlayerId),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("{player:?} placed only {placed} ships")]
    IncompleteFleet { player: PlayerId, placed: usize },
    #[error("{player:?} gave {attempts} invalid answers in a row")]
    Stalled { player: PlayerId, attempts: usize },
    #[error("the game is already over")]
    Finished,
}

/// Everything that happened during one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub turn: usize,
    pub attacker: PlayerId,
    pub attacks: Vec<((usize, usize), AttackResult)>,
    pub swaps: Vec<(ShipKind, (usize, usize))>,
    pub outcome: FollowUp,
}

/// Two boards, one random source, and whose turn it is.
pub struct Game {
    boards: [Board; 2],
    rng: SmallRng,
    current: PlayerId,
    turn: usize,
    status: GameStatus,
}

impl Game {
    /// Fresh game on two `size×size` boards. A seed makes every measurement,
    /// placement and AI decision reproducible.
    pub fn new(size: usize, seed: Option<u64>) -> Result<Self, GameError> {
        let rng = match seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        Ok(Self {
            boards: [Board::new(size)?, Board::new(size)?],
            rng,
            current: PlayerId::One,
            turn: 0,
            status: GameStatus::InProgress,
        })
    }

    pub fn board(&self, id: PlayerId) -> &Board {
        &self.boards[id.index()]
    }

    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Serializable copies of both boards.
    pub fn board_states(&self) -> [BoardState; 2] {
        [self.boards[0].state(), self.boards[1].state()]
    }

    /// Let both players place their fleets. Every kind must end up placed.
    pub fn setup(&mut self, players: &mut [Box<dyn Player>; 2]) -> Result<(), GameError> {
        for id in [PlayerId::One, PlayerId::Two] {
            let board = &mut self.boards[id.index()];
            players[id.index()].place_ships(&mut self.rng, board)?;
            let placed = board.remaining_ship_count();
            if placed != NUM_SHIPS {
                return Err(GameError::IncompleteFleet {
                    player: id,
                    placed,
                });
            }
            log::info!("{} placed {} ships", players[id.index()].name(), placed);
        }
        Ok(())
    }

    /// Play one full turn for the current player.
    pub fn play_turn(&mut self, players: &mut [Box<dyn Player>; 2]) -> Result<TurnReport, GameError> {
        if self.status != GameStatus::InProgress {
            return Err(GameError::Finished);
        }
        let attacker = self.current;
        let defender = attacker.other();
        let (a, d) = (attacker.index(), defender.index());
        self.boards[d].reset_and_resample(&mut self.rng);

        let mut attacks = Vec::new();
        let mut retries = 0;
        let outcome = loop {
            let target = players[a].select_target(&mut self.rng, self.boards[d].history());
            let result = self.boards[d].attack(target.0, target.1);
            players[a].handle_attack_result(target, result);
            let follow_up = self.boards[d].follow_up(result);
            if follow_up == FollowUp::Retry {
                retries += 1;
                if retries >= MAX_RETRIES {
                    return Err(GameError::Stalled {
                        player: attacker,
                        attempts: retries,
                    });
                }
                continue;
            }
            retries = 0;
            players[d].handle_opponent_attack(target, result);
            attacks.push((target, result));
            if follow_up != FollowUp::Continue {
                break follow_up;
            }
        };

        let swaps = match outcome {
            FollowUp::TurnOver => self.run_swaps(players, defender)?,
            _ => Vec::new(),
        };
        if outcome == FollowUp::GameOver {
            self.status = GameStatus::Won(attacker);
            log::info!("{} wins on turn {}", players[a].name(), self.turn);
        }

        let report = TurnReport {
            turn: self.turn,
            attacker,
            attacks,
            swaps,
            outcome,
        };
        self.turn += 1;
        self.current = defender;
        Ok(report)
    }

    /// Offer the defender a swap for each half-hit ship that can still move.
    fn run_swaps(
        &mut self,
        players: &mut [Box<dyn Player>; 2],
        defender: PlayerId,
    ) -> Result<Vec<(ShipKind, (usize, usize))>, GameError> {
        let d = defender.index();
        let mut swaps = Vec::new();
        for kind in self.boards[d].swap_candidates() {
            if !self.boards[d].is_movable(kind) {
                log::debug!("{} is trapped", kind);
                continue;
            }
            let mut attempts = 0;
            loop {
                let Some(cell) = players[d].choose_swap(&mut self.rng, &self.boards[d], kind) else {
                    break;
                };
                match self.boards[d].move_ship(kind, cell.0, cell.1) {
                    Ok(()) => {
                        swaps.push((kind, cell));
                        break;
                    }
                    Err(e) => {
                        players[d].handle_swap_rejected(kind, &e);
                        attempts += 1;
                        if attempts >= MAX_RETRIES {
                            return Err(GameError::Stalled {
                                player: defender,
                                attempts,
                            });
                        }
                    }
                }
            }
        }
        Ok(swaps)
    }

    /// Play turns until someone wins or `max_turns` have passed.
    pub fn run(
        &mut self,
        players: &mut [Box<dyn Player>; 2],
        max_turns: usize,
    ) -> Result<GameStatus, GameError> {
        while self.status == GameStatus::InProgress && self.turn < max_turns {
            self.play_turn(players)?;
        }
        Ok(self.status)
    }
}
