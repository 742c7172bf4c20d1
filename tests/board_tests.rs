use rand::rngs::SmallRng;
use rand::SeedableRng;
use supermunition::{
    AttackResult, Board, BoardError, Conflict, Direction, FollowUp, Reading, Resolution,
    ScriptedCoins, ShipKind,
};

#[test]
fn test_place_attack_and_sink() {
    let mut board = Board::new(8).unwrap();
    board
        .place_ship(ShipKind::PhiPlus, 0, 0, Direction::Right)
        .unwrap();
    board
        .place_ship(ShipKind::PsiMinus, 5, 5, Direction::Down)
        .unwrap();
    let initial = board.remaining_ship_count();
    assert_eq!(initial, 2);

    assert_eq!(board.attack(0, 0), AttackResult::Hit(ShipKind::PhiPlus));
    assert_eq!(board.attack(0, 0), AttackResult::Invalid);
    assert_eq!(board.attack(0, 1), AttackResult::Sunk(ShipKind::PhiPlus));
    assert_eq!(board.remaining_ship_count(), initial - 1);
    assert!(board.ship(ShipKind::PhiPlus).is_none());
    assert!(board.is_sunk(ShipKind::PhiPlus));
    assert!(!board.is_defeated());
}

#[test]
fn test_invalid_attack_changes_nothing() {
    let mut board = Board::default();
    board
        .place_ship(ShipKind::PsiPlus, 2, 2, Direction::Up)
        .unwrap();
    board.attack(2, 2);
    let before = board.state();
    assert_eq!(board.attack(2, 2), AttackResult::Invalid);
    assert_eq!(board.attack(8, 8), AttackResult::Invalid);
    assert_eq!(board.attack(0, 100), AttackResult::Invalid);
    assert_eq!(board.state(), before);
    assert_eq!(board.follow_up(AttackResult::Invalid), FollowUp::Retry);
}

#[test]
fn test_miss_is_permanent_and_blocks_placement() {
    let mut board = Board::default();
    assert_eq!(board.attack(4, 4), AttackResult::Miss);
    assert_eq!(board.resolution(4, 4), Some(Resolution::Miss));
    assert_eq!(board.misses().iter_set_bits().collect::<Vec<_>>(), vec![(4, 4)]);
    assert_eq!(board.attack(4, 4), AttackResult::Invalid);
    assert_eq!(
        board.place_ship(ShipKind::PhiMinus, 4, 3, Direction::Right),
        Err(BoardError::Conflict(Conflict::PermanentMiss { row: 4, col: 4 }))
    );
    assert_eq!(board.remaining_ship_count(), 0);
}

#[test]
fn test_swap_scenario() {
    let mut board = Board::new(8).unwrap();
    board
        .place_ship(ShipKind::PsiPlus, 3, 3, Direction::Right)
        .unwrap();
    assert_eq!(board.ship(ShipKind::PsiPlus).unwrap().positions(), [(3, 3), (3, 4)]);

    assert_eq!(board.attack(3, 3), AttackResult::Hit(ShipKind::PsiPlus));
    assert_eq!(board.attack(5, 5), AttackResult::Miss);
    assert!(board.is_movable(ShipKind::PsiPlus));
    assert_eq!(board.pivot(ShipKind::PsiPlus), Some((3, 4)));

    let err = board.move_ship(ShipKind::PsiPlus, 3, 3).unwrap_err();
    assert!(matches!(err, BoardError::Conflict(_)));
    assert_eq!(board.ship(ShipKind::PsiPlus).unwrap().positions(), [(3, 3), (3, 4)]);

    board.move_ship(ShipKind::PsiPlus, 3, 5).unwrap();
    let ship = board.ship(ShipKind::PsiPlus).unwrap();
    assert_eq!(ship.positions(), [(3, 4), (3, 5)]);
    assert_eq!(ship.kind(), ShipKind::PsiPlus);
    assert_eq!(
        board.resolution(3, 3),
        Some(Resolution::Hit(ShipKind::PsiPlus))
    );
    // the relocated pair keeps its correlation for the next measurement
    let mut coins = ScriptedCoins::from_digits("1");
    let snap = board.reset_and_resample(&mut coins);
    assert_eq!(snap.get(3, 4), Some(Reading::Bit(true)));
    assert_eq!(snap.get(3, 5), Some(Reading::Bit(false)));
    assert_eq!(snap.get(3, 3), Some(Reading::Hit(ShipKind::PsiPlus)));
    assert_eq!(snap.get(5, 5), Some(Reading::Miss));
}

#[test]
fn test_trapped_ship_cannot_move() {
    let mut board = Board::default();
    // Φ+ at (0,0)-(0,1); hit (0,0) so (0,1) is the pivot.
    board
        .place_ship(ShipKind::PhiPlus, 0, 0, Direction::Right)
        .unwrap();
    board
        .place_ship(ShipKind::PhiMinus, 0, 2, Direction::Down)
        .unwrap();
    assert_eq!(board.attack(0, 0), AttackResult::Hit(ShipKind::PhiPlus));
    assert_eq!(board.attack(1, 1), AttackResult::Miss);

    // (0,0) is the hit half, (0,2) holds Φ-, (1,1) is a miss, no cell above
    assert!(!board.is_movable(ShipKind::PhiPlus));
    assert!(board.swap_targets(ShipKind::PhiPlus).is_empty());
    assert_eq!(board.swap_candidates(), vec![ShipKind::PhiPlus]);
    assert!(board.move_ship(ShipKind::PhiPlus, 1, 1).is_err());

    // still vulnerable where it stands
    assert_eq!(board.attack(0, 1), AttackResult::Sunk(ShipKind::PhiPlus));
}

#[test]
fn test_history_recall() {
    let mut board = Board::default();
    board
        .place_ship(ShipKind::PsiMinus, 6, 6, Direction::Left)
        .unwrap();
    let mut rng = SmallRng::seed_from_u64(7);
    let mut taken = Vec::new();
    for _ in 0..5 {
        taken.push(board.reset_and_resample(&mut rng));
    }
    let k = taken.len();
    assert_eq!(board.history().len(), k);
    assert_eq!(board.get_history(0).unwrap(), &taken[k - 1]);
    assert_eq!(board.get_history(k - 1).unwrap(), &taken[0]);
    assert_eq!(
        board.get_history(k).unwrap_err(),
        BoardError::HistoryOutOfRange { offset: k, len: k }
    );
    let turns: Vec<usize> = board.history().iter().map(|s| s.turn()).collect();
    assert_eq!(turns, vec![0, 1, 2, 3, 4]);
    // reading again starts from the beginning
    assert_eq!(board.history().iter().next().unwrap(), &taken[0]);
}

#[test]
fn test_resolved_cells_are_stable_across_turns() {
    let mut board = Board::default();
    board
        .place_ship(ShipKind::PhiPlus, 1, 1, Direction::Down)
        .unwrap();
    board.attack(1, 1);
    board.attack(7, 0);
    let mut rng = SmallRng::seed_from_u64(99);
    let mut free_cell_values = Vec::new();
    for _ in 0..64 {
        let snap = board.reset_and_resample(&mut rng);
        assert_eq!(snap.get(1, 1), Some(Reading::Hit(ShipKind::PhiPlus)));
        assert_eq!(snap.get(7, 0), Some(Reading::Miss));
        free_cell_values.push(snap.get(4, 4));
    }
    assert!(free_cell_values.contains(&Some(Reading::Bit(true))));
    assert!(free_cell_values.contains(&Some(Reading::Bit(false))));
}

#[test]
fn test_random_placement_fills_fleet() {
    let mut board = Board::default();
    let mut rng = SmallRng::seed_from_u64(42);
    for kind in ShipKind::ALL {
        let (r, c, d) = board.random_placement(&mut rng, kind).unwrap();
        board.place_ship(kind, r, c, d).unwrap();
    }
    assert_eq!(board.remaining_ship_count(), 4);
    assert_eq!(board.ship_map().count_ones(), 8);
    assert_eq!(board.quantum_state().pair_count(), 4);
    assert_eq!(
        board.random_placement(&mut rng, ShipKind::PhiPlus),
        Err(BoardError::Conflict(Conflict::AlreadyPlaced(ShipKind::PhiPlus)))
    );
}

#[test]
fn test_sunk_ship_cannot_be_placed_or_moved() {
    let mut board = Board::default();
    board
        .place_ship(ShipKind::PsiPlus, 0, 0, Direction::Down)
        .unwrap();
    board.attack(0, 0);
    board.attack(1, 0);
    board.attack(5, 5);
    assert_eq!(
        board.move_ship(ShipKind::PsiPlus, 2, 0),
        Err(BoardError::ShipNotFound(ShipKind::PsiPlus))
    );
    assert!(!board.is_movable(ShipKind::PsiPlus));
    assert_eq!(
        board.place_ship(ShipKind::PsiPlus, 4, 4, Direction::Right),
        Err(BoardError::Conflict(Conflict::AlreadyPlaced(ShipKind::PsiPlus)))
    );
    assert!(board.is_defeated());
}
