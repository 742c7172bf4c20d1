use supermunition::{AiPlayer, Game, GameStatus, Player, PlayerId, DEFAULT_BOARD_SIZE};
use serde_json::json;

const MAX_TURNS: usize = 1000;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <seed> [size]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let size: usize = match args.get(2) {
        Some(s) => s.parse()?,
        None => DEFAULT_BOARD_SIZE,
    };

    let mut players: [Box<dyn Player>; 2] = [Box::new(AiPlayer::new()), Box::new(AiPlayer::new())];
    let mut game = Game::new(size, Some(seed))?;
    game.setup(&mut players)?;

    let mut shots = [0usize; 2];
    let mut swaps = [0usize; 2];
    while game.status() == GameStatus::InProgress && game.turn() < MAX_TURNS {
        let report = game.play_turn(&mut players)?;
        shots[report.attacker.index()] += report.attacks.len();
        swaps[report.attacker.other().index()] += report.swaps.len();
    }

    let winner = match game.status() {
        GameStatus::Won(PlayerId::One) => Some("player1"),
        GameStatus::Won(PlayerId::Two) => Some("player2"),
        GameStatus::InProgress => None,
    };

    let result = json!({
        "seed": seed,
        "size": size,
        "turns": game.turn(),
        "player1": {"shots": shots[0], "swaps": swaps[0], "ships_left": game.board(PlayerId::One).remaining_ship_count()},
        "player2": {"shots": shots[1], "swaps": swaps[1], "ships_left": game.board(PlayerId::Two).remaining_ship_count()},
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
