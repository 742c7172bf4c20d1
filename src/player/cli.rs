#![cfg(feature = "std")]

use std::fmt::Write as _;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use rand::rngs::SmallRng;

use crate::core::{
    ai, AttackResult, Board, BoardError, Direction, HistoryLedger, Reading, Resolution, ShipKind,
    FLEET, MISS_SYMBOL,
};

use super::Player;

/// Interactive player reading commands from `input` and writing prompts to
/// `output`. Invalid input is reported and asked for again.
pub struct CliPlayer<R = BufReader<Stdin>, W = Stdout> {
    name: String,
    fired: Vec<(usize, usize)>,
    input: R,
    output: W,
}

impl CliPlayer {
    /// Player on stdin/stdout.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_io(name, BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> CliPlayer<R, W> {
    pub fn with_io(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            fired: Vec::new(),
            input,
            output,
        }
    }

    /// Give back the output sink, e.g. to inspect a transcript.
    pub fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, text: &str) {
        let _ = writeln!(self.output, "{}", text);
    }

    /// Print `msg` and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, msg: &str) -> Option<String> {
        let _ = write!(self.output, "{}", msg);
        let _ = self.output.flush();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

fn parse_coord(input: &str, size: usize) -> Result<(usize, usize), String> {
    let mut parts = input.split(|c: char| c.is_whitespace() || c == ',').filter(|s| !s.is_empty());
    let (Some(r), Some(c)) = (parts.next(), parts.next()) else {
        return Err("need a row and a column, e.g. 3 4".to_string());
    };
    let row: usize = r
        .parse()
        .map_err(|_| format!("invalid row '{}' - must be a number 0-{}", r, size - 1))?;
    let col: usize = c
        .parse()
        .map_err(|_| format!("invalid column '{}' - must be a number 0-{}", c, size - 1))?;
    if row >= size || col >= size {
        return Err(format!("({}, {}) is off the {}x{} board", row, col, size, size));
    }
    Ok((row, col))
}

fn parse_placement(input: &str, size: usize) -> Result<(usize, usize, Direction), String> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() != 3 {
        return Err("expected: <row> <col> <up|down|left|right>".to_string());
    }
    let (row, col) = parse_coord(&parts[..2].join(" "), size)?;
    let direction = Direction::parse(parts[2])
        .ok_or_else(|| format!("invalid direction '{}' - use up, down, left or right", parts[2]))?;
    Ok((row, col, direction))
}

/// Render the defender's own board: ships by kind symbol, hits in lower
/// case, misses as the miss marker, open water as `.`.
pub fn render_own_board(board: &Board) -> String {
    let mut out = String::new();
    let _ = write!(out, "   ");
    for c in 0..board.size() {
        let _ = write!(out, " {}", c);
    }
    out.push('\n');
    for r in 0..board.size() {
        let _ = write!(out, "{:2} ", r);
        for c in 0..board.size() {
            let ch = match board.resolution(r, c) {
                Some(Resolution::Miss) => MISS_SYMBOL,
                Some(Resolution::Hit(kind)) => kind.symbol().to_ascii_lowercase(),
                _ => board.ship_at(r, c).map(|s| s.kind().symbol()).unwrap_or('.'),
            };
            let _ = write!(out, " {}", ch);
        }
        out.push('\n');
    }
    out
}

impl<R, W> Player for CliPlayer<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn place_ships(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError> {
        let size = board.size();
        let banner = format!("\n{}: place your ships on the {}x{} board", self.name, size, size);
        self.say(&banner);
        self.say("Enter <row> <col> <up|down|left|right>, or press ENTER for random placement.");
        for kind in FLEET {
            loop {
                self.say(&render_own_board(board));
                let line = self.prompt(&format!("{} ship ({}): ", kind.label(), kind.symbol()));
                let line = line.unwrap_or_default();
                let (r, c, d) = if line.is_empty() {
                    board.random_placement(rng, kind)?
                } else {
                    match parse_placement(&line, size) {
                        Ok(p) => p,
                        Err(e) => {
                            self.say(&format!("✗ {}", e));
                            continue;
                        }
                    }
                };
                match board.place_ship(kind, r, c, d) {
                    Ok(()) => {
                        self.say(&format!("✓ {} placed at ({}, {}) pointing {:?}", kind, r, c, d));
                        break;
                    }
                    Err(e) => self.say(&format!("✗ {}", e)),
                }
            }
        }
        self.say(&render_own_board(board));
        Ok(())
    }

    fn select_target(&mut self, rng: &mut SmallRng, opponent: &HistoryLedger) -> (usize, usize) {
        let Some(latest) = opponent.latest().cloned() else {
            return (0, 0);
        };
        let size = latest.size();
        self.say(&format!("\n{}: opponent board, turn {}", self.name, latest.turn()));
        self.say(&latest.to_string());
        loop {
            let line = self.prompt("Target <row> <col>, 'history <n>', or ENTER for a suggestion: ");
            let line = match line {
                Some(l) if !l.is_empty() => l,
                _ => {
                    let pick = ai::pick_target(opponent, &[], &self.fired, rng).unwrap_or((0, 0));
                    self.say(&format!("Targeting suggestion ({}, {})", pick.0, pick.1));
                    return pick;
                }
            };
            if let Some(rest) = line.strip_prefix("history") {
                match rest.trim().parse::<usize>() {
                    Ok(offset) => match opponent.get(offset) {
                        Ok(snap) => {
                            let text = format!("Turn {}:\n{}", snap.turn(), snap);
                            self.say(&text);
                        }
                        Err(e) => self.say(&format!("✗ {}", e)),
                    },
                    Err(_) => self.say("✗ usage: history <n> (0 = current turn)"),
                }
                continue;
            }
            match parse_coord(&line, size) {
                Ok((r, c))
                    if matches!(latest.get(r, c), Some(Reading::Bit(_)))
                        && !self.fired.contains(&(r, c)) =>
                {
                    return (r, c)
                }
                Ok((r, c)) => self.say(&format!("✗ ({}, {}) is already resolved", r, c)),
                Err(e) => self.say(&format!("✗ {}", e)),
            }
        }
    }

    fn choose_swap(
        &mut self,
        _rng: &mut SmallRng,
        board: &Board,
        kind: ShipKind,
    ) -> Option<(usize, usize)> {
        let pivot = board.pivot(kind)?;
        let targets = board.swap_targets(kind);
        self.say(&render_own_board(board));
        self.say(&format!(
            "{}: your {} ship was hit and the enemy then missed. Move its half at ({}, {}) to one of {:?}.",
            self.name, kind, pivot.0, pivot.1, targets
        ));
        loop {
            let line = self.prompt("New cell <row> <col>, or ENTER to stay: ")?;
            if line.is_empty() {
                return None;
            }
            match parse_coord(&line, board.size()) {
                Ok(cell) if targets.contains(&cell) => return Some(cell),
                Ok(cell) => self.say(&format!("✗ ({}, {}) is not a free neighbour", cell.0, cell.1)),
                Err(e) => self.say(&format!("✗ {}", e)),
            }
        }
    }

    fn handle_attack_result(&mut self, coord: (usize, usize), result: AttackResult) {
        if result != AttackResult::Invalid {
            self.fired.push(coord);
        }
        let (r, c) = coord;
        let text = match result {
            AttackResult::Hit(kind) => format!("🎯 HIT! ({}, {}) is half of a {} ship. Fire again.", r, c, kind),
            AttackResult::Sunk(kind) => format!("💥 SUNK! You destroyed the enemy {} ship!", kind),
            AttackResult::Miss => format!("💧 Miss at ({}, {}).", r, c),
            AttackResult::Invalid => format!("✗ ({}, {}) cannot be targeted.", r, c),
        };
        self.say(&text);
    }

    fn handle_opponent_attack(&mut self, coord: (usize, usize), result: AttackResult) {
        let (r, c) = coord;
        let text = match result {
            AttackResult::Hit(kind) => format!("⚠️  ENEMY HIT! Your {} ship was struck at ({}, {})", kind, r, c),
            AttackResult::Sunk(kind) => format!("💀 SHIP LOST! Enemy destroyed your {} ship", kind),
            AttackResult::Miss => format!("✓ Enemy missed at ({}, {})", r, c),
            AttackResult::Invalid => return,
        };
        self.say(&text);
    }

    fn handle_swap_rejected(&mut self, kind: ShipKind, error: &BoardError) {
        self.say(&format!("✗ {} could not move: {}", kind, error));
    }
}
