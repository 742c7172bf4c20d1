use supermunition::{are_adjacent, Correlation, Direction, Phase, Ship, ShipKind};

#[test]
fn test_kinds_share_two_distributions() {
    let same: Vec<_> = ShipKind::ALL
        .into_iter()
        .filter(|k| k.correlation() == Correlation::Same)
        .collect();
    assert_eq!(same, vec![ShipKind::PhiPlus, ShipKind::PhiMinus]);
    assert_eq!(ShipKind::PsiMinus.correlation(), Correlation::Opposite);
    assert_eq!(ShipKind::PhiMinus.phase(), Phase::Minus);
    assert_eq!(ShipKind::PsiPlus.phase(), Phase::Plus);
}

#[test]
fn test_labels_and_symbols() {
    assert_eq!(ShipKind::PsiMinus.to_string(), "Ψ-");
    let symbols: String = ShipKind::ALL.iter().map(|k| k.symbol()).collect();
    assert_eq!(symbols, "ABCD");
    for (i, kind) in ShipKind::ALL.into_iter().enumerate() {
        assert_eq!(kind.index(), i);
    }
}

#[test]
fn test_ship_cells_and_partner() {
    let ship = Ship::new(ShipKind::PhiPlus, 0, 0, Direction::Down, 4).unwrap();
    assert_eq!(ship.positions(), [(0, 0), (1, 0)]);
    assert_eq!(ship.other(1, 0), Some((0, 0)));
    assert_eq!(ship.other(2, 0), None);
    assert!(Ship::new(ShipKind::PhiPlus, 0, 0, Direction::Up, 4).is_none());
    assert!(Ship::new(ShipKind::PhiPlus, 3, 3, Direction::Right, 4).is_none());
    assert!(Ship::from_positions(ShipKind::PsiPlus, (1, 1), (2, 2)).is_none());
    assert!(!are_adjacent((1, 1), (1, 1)));
}

#[test]
fn test_direction_parsing() {
    assert_eq!(Direction::parse("UP"), Some(Direction::Up));
    assert_eq!(Direction::parse(" l"), Some(Direction::Left));
    assert_eq!(Direction::parse("sideways"), None);
    assert_eq!(Direction::Right.step(2, 3, 4), None);
    assert_eq!(Direction::Left.step(2, 3, 4), Some((2, 2)));
}
