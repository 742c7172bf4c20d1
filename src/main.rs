#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use supermunition::{
    init_logging, player::cli::render_own_board, AiPlayer, CliPlayer, FollowUp, Game,
    GameStatus, Player, PlayerId, DEFAULT_BOARD_SIZE,
};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use log::LevelFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play on this terminal, against the AI or hot-seat against a friend.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = DEFAULT_BOARD_SIZE, help = "Board side length (2-11)")]
        size: usize,
        #[arg(long, help = "Two humans take turns at the same terminal")]
        hotseat: bool,
        #[arg(long, default_value_t = 500)]
        max_turns: usize,
        #[arg(long, help = "Write both final boards to this file (bincode)")]
        save: Option<std::path::PathBuf>,
    },
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging(LevelFilter::Warn);
    let cli = Cli::parse();

    match cli.command {
        Commands::Local {
            seed,
            size,
            hotseat,
            max_turns,
            save,
        } => {
            println!("Welcome to SuperMunition. The board size is {}.", size);
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let second: Box<dyn Player> = if hotseat {
                Box::new(CliPlayer::new("Player 2"))
            } else {
                Box::new(AiPlayer::new())
            };
            let mut players: [Box<dyn Player>; 2] = [Box::new(CliPlayer::new("Player 1")), second];

            let mut game = Game::new(size, seed)?;
            game.setup(&mut players)?;
            while game.status() == GameStatus::InProgress && game.turn() < max_turns {
                let report = game.play_turn(&mut players)?;
                let name = players[report.attacker.index()].name().to_string();
                println!(
                    "Turn {}: {} fired {} shot(s)",
                    report.turn,
                    name,
                    report.attacks.len()
                );
                for (kind, (r, c)) in &report.swaps {
                    println!("  the defender swapped {} to ({}, {})", kind, r, c);
                }
                if report.outcome == FollowUp::GameOver {
                    break;
                }
            }

            println!("\n════════════════════ GAME OVER ════════════════════\n");
            for id in [PlayerId::One, PlayerId::Two] {
                println!("{} board:", players[id.index()].name());
                println!("{}", render_own_board(game.board(id)));
            }
            match game.status() {
                GameStatus::Won(id) => println!("🎉 {} wins!", players[id.index()].name()),
                GameStatus::InProgress => println!("No winner after {} turns.", game.turn()),
            }

            if let Some(path) = save {
                let states = game.board_states();
                let bytes = bincode::serialize(&states)?;
                std::fs::write(&path, bytes)?;
                println!("Saved both boards to {}", path.display());
            }
        }
    }
    Ok(())
}
