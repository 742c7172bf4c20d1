use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use supermunition::{
    AttackResult, Board, BoardError, BoardState, Direction, Resolution, Ship, ShipKind, Snapshot,
};

fn played_board(seed: u64) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::default();
    for kind in ShipKind::ALL {
        let (r, c, d) = board.random_placement(&mut rng, kind).unwrap();
        board.place_ship(kind, r, c, d).unwrap();
    }
    for _ in 0..rng.random_range(0..40) {
        board.reset_and_resample(&mut rng);
        let r = rng.random_range(0..8);
        let c = rng.random_range(0..8);
        board.attack(r, c);
    }
    board
}

fn is_invalid_state(result: Result<Board, BoardError>) -> bool {
    matches!(result, Err(BoardError::InvalidState(_)))
}

proptest! {
    #[test]
    fn corrupted_bytes_never_restore_a_broken_board(
        seed in any::<u64>(),
        flips in proptest::collection::vec((any::<prop::sample::Index>(), any::<u8>()), 1..4),
    ) {
        let mut bytes = played_board(seed).state().to_bytes().unwrap();
        for (idx, value) in flips {
            let i = idx.index(bytes.len());
            bytes[i] = value;
        }
        let Ok(state) = BoardState::from_bytes(&bytes) else {
            return Ok(());
        };
        if let Ok(board) = Board::from_state(state) {
            let size = board.size();
            for snap in board.history() {
                for r in 0..size {
                    for c in 0..size {
                        prop_assert!(snap.get(r, c).is_some());
                    }
                }
                prop_assert_eq!(snap.to_string().lines().count(), 2 * size + 1);
            }
            prop_assert_ne!(board.last_attack(), Some(AttackResult::Invalid));
        }
    }

    #[test]
    fn board_state_roundtrip(seed in any::<u64>()) {
        let board = played_board(seed);
        let state = board.state();
        let bytes = bincode::serialize(&state).unwrap();
        let decoded: BoardState = bincode::deserialize(&bytes).unwrap();
        let restored = Board::from_state(decoded).unwrap();
        prop_assert_eq!(restored.state(), state);
        prop_assert_eq!(restored.history(), board.history());
        prop_assert_eq!(restored.quantum_state(), board.quantum_state());
    }
}

#[test]
fn codec_helpers_roundtrip() {
    let board = played_board(5);
    let bytes = board.state().to_bytes().unwrap();
    let restored = Board::from_state(BoardState::from_bytes(&bytes).unwrap()).unwrap();
    assert_eq!(restored.state(), board.state());
    assert!(matches!(
        BoardState::from_bytes(&[0xff, 0x01]),
        Err(BoardError::Codec(_))
    ));
}

#[test]
fn from_state_rejects_ship_on_miss() {
    let mut board = Board::default();
    board
        .place_ship(ShipKind::PhiMinus, 2, 2, Direction::Right)
        .unwrap();
    let mut state = board.state();
    state.misses.push((2, 3));
    assert!(matches!(
        Board::from_state(state),
        Err(BoardError::InvalidState(_))
    ));
}

#[test]
fn from_state_rejects_duplicate_and_sunk_kinds() {
    let mut board = Board::default();
    board
        .place_ship(ShipKind::PsiPlus, 0, 0, Direction::Down)
        .unwrap();
    let mut state = board.state();
    state
        .ships
        .push(Ship::from_positions(ShipKind::PsiPlus, (5, 5), (5, 6)).unwrap());
    assert!(matches!(
        Board::from_state(state),
        Err(BoardError::InvalidState(_))
    ));

    let mut state = board.state();
    state.sunk.push(ShipKind::PsiPlus);
    assert!(matches!(
        Board::from_state(state),
        Err(BoardError::InvalidState(_))
    ));
}

#[test]
fn from_state_keeps_swap_window() {
    let mut board = Board::default();
    board
        .place_ship(ShipKind::PhiPlus, 4, 4, Direction::Left)
        .unwrap();
    board.attack(4, 4);
    board.attack(0, 0);
    let mut restored = Board::from_state(board.state()).unwrap();
    assert!(restored.swap_window_open());
    assert_eq!(
        restored.resolution(4, 4),
        Some(Resolution::Hit(ShipKind::PhiPlus))
    );
    restored.move_ship(ShipKind::PhiPlus, 5, 3).unwrap();
    assert_eq!(
        restored.ship(ShipKind::PhiPlus).unwrap().positions(),
        [(4, 3), (5, 3)]
    );
}

#[test]
fn from_state_rejects_truncated_snapshot() {
    let board = played_board(17);
    let mut state = board.state();
    let turn = state.history.len();
    let short: Snapshot = serde_json::from_str(&format!(
        r#"{{"turn":{},"size":8,"readings":[]}}"#,
        turn
    ))
    .unwrap();
    state.history.push(short);
    assert!(is_invalid_state(Board::from_state(state)));

    let mut fresh = Board::default();
    let snap = fresh.reset_and_resample(&mut SmallRng::seed_from_u64(1));
    let json = serde_json::to_string(&snap).unwrap();
    let padded = json.replacen(r#""readings":["#, r#""readings":["Miss","#, 1);
    let mut state = fresh.state();
    state.history = vec![serde_json::from_str(&padded).unwrap()];
    assert!(is_invalid_state(Board::from_state(state)));
}

#[test]
fn from_state_rejects_out_of_order_history() {
    let mut board = Board::default();
    let mut rng = SmallRng::seed_from_u64(4);
    board.reset_and_resample(&mut rng);
    board.reset_and_resample(&mut rng);
    let mut state = board.state();
    state.history.swap(0, 1);
    assert!(is_invalid_state(Board::from_state(state)));
}

#[test]
fn from_state_rejects_invalid_last_attack() {
    let mut state = Board::default().state();
    state.last_attack = Some(AttackResult::Invalid);
    assert!(is_invalid_state(Board::from_state(state)));
}

#[test]
fn from_state_rejects_sunk_kind_without_hits() {
    let mut board = Board::default();
    board
        .place_ship(ShipKind::PhiPlus, 0, 0, Direction::Right)
        .unwrap();
    board.attack(0, 0);
    let mut state = board.state();
    // one hit half is not enough to have sunk
    state.ships.clear();
    state.sunk.push(ShipKind::PhiPlus);
    assert!(is_invalid_state(Board::from_state(state)));

    let mut state = Board::default().state();
    state.sunk.push(ShipKind::PsiMinus);
    assert!(is_invalid_state(Board::from_state(state)));

    board.attack(0, 1);
    let mut state = board.state();
    assert!(Board::from_state(state.clone()).is_ok());
    state.sunk.push(ShipKind::PhiPlus);
    assert!(is_invalid_state(Board::from_state(state)));
}
