use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use supermunition::{
    are_adjacent, AttackResult, Board, Reading, Resolution, ShipKind, MAX_BOARD_SIZE,
    MIN_BOARD_SIZE,
};

fn random_board(seed: u64, size: usize) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new(size).unwrap();
    for kind in ShipKind::ALL {
        if let Ok((r, c, d)) = board.random_placement(&mut rng, kind) {
            board.place_ship(kind, r, c, d).unwrap();
        }
    }
    let shots = rng.random_range(0..size * size);
    for _ in 0..shots {
        let r = rng.random_range(0..size);
        let c = rng.random_range(0..size);
        board.attack(r, c);
    }
    board
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ships_stay_adjacent_and_disjoint(seed in any::<u64>(), size in 4..=MAX_BOARD_SIZE) {
        let board = random_board(seed, size);
        let mut seen = Vec::new();
        for ship in board.ships() {
            let [a, b] = ship.positions();
            prop_assert!(are_adjacent(a, b));
            for (r, c) in [a, b] {
                prop_assert!(r < size && c < size);
                prop_assert!(!seen.contains(&(r, c)));
                prop_assert_ne!(board.resolution(r, c), Some(Resolution::Miss));
                seen.push((r, c));
            }
        }
        prop_assert_eq!(board.ship_map().count_ones(), seen.len());
    }

    #[test]
    fn attack_is_idempotent(seed in any::<u64>(), row in 0..8usize, col in 0..8usize) {
        let mut board = random_board(seed, 8);
        let first = board.attack(row, col);
        let after = board.state();
        prop_assert_eq!(board.attack(row, col), AttackResult::Invalid);
        prop_assert_eq!(board.state(), after);
        prop_assert!(board.resolution(row, col).unwrap().is_resolved());
        if first != AttackResult::Invalid {
            prop_assert_eq!(board.last_attack(), Some(first));
        }
    }

    #[test]
    fn resolved_cells_never_change(seed in any::<u64>(), size in MIN_BOARD_SIZE..=MAX_BOARD_SIZE) {
        let mut board = random_board(seed, size);
        let mut rng = SmallRng::seed_from_u64(seed ^ 0xabcd);
        for _ in 0..8 {
            let snap = board.reset_and_resample(&mut rng);
            for r in 0..size {
                for c in 0..size {
                    let expected = match board.resolution(r, c).unwrap() {
                        Resolution::Miss => Some(Reading::Miss),
                        Resolution::Hit(kind) => Some(Reading::Hit(kind)),
                        Resolution::Unresolved => None,
                    };
                    match expected {
                        Some(reading) => {
                            prop_assert_eq!(snap.get(r, c), Some(reading));
                        }
                        None => {
                            prop_assert!(matches!(snap.get(r, c), Some(Reading::Bit(_))));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn swaps_respect_board_invariants(seed in any::<u64>()) {
        let mut board = random_board(seed, 8);
        let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(1));
        // find any water cell to open the swap window
        let water = (0..64)
            .map(|i| (i / 8, i % 8))
            .find(|&(r, c)| {
                board.resolution(r, c) == Some(Resolution::Unresolved) && board.ship_at(r, c).is_none()
            });
        if let Some((r, c)) = water {
            prop_assert_eq!(board.attack(r, c), AttackResult::Miss);
            for kind in board.swap_candidates() {
                let targets = board.swap_targets(kind);
                if targets.is_empty() {
                    continue;
                }
                let pivot = board.pivot(kind).unwrap();
                let target = targets[rng.random_range(0..targets.len())];
                board.move_ship(kind, target.0, target.1).unwrap();
                let ship = board.ship(kind).unwrap();
                prop_assert!(ship.contains(pivot.0, pivot.1));
                prop_assert!(ship.contains(target.0, target.1));
            }
            prop_assert!(Board::from_state(board.state()).is_ok());
        }
    }
}
