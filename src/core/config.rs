use super::ship::ShipKind;

pub const DEFAULT_BOARD_SIZE: usize = 8;
/// Smallest board a ship fits on.
pub const MIN_BOARD_SIZE: usize = 2;
/// Largest board whose cells fit a `u128` mask.
pub const MAX_BOARD_SIZE: usize = 11;

pub const NUM_SHIPS: usize = 4;
pub const FLEET: [ShipKind; NUM_SHIPS] = ShipKind::ALL;

/// Random placement gives up after this many tries per ship.
pub const PLACEMENT_ATTEMPTS: usize = 100;

/// Board symbol for a permanent miss.
pub const MISS_SYMBOL: char = 'o';

/// Environment variable holding the log level.
pub const LOG_ENV: &str = "SUPERMUNITION_LOG";

/// Snapshots the AI looks back over when scoring correlations.
pub const AI_HISTORY_WINDOW: usize = 12;
