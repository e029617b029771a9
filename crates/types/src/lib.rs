//! Core types module - shared vocabulary and constants
//!
//! This crate defines the small set of types every other crate speaks:
//! move directions, game status, driver commands and the game constants.
//! It has no dependencies so it can be used from the engine, the terminal
//! front end and the persistence layer alike.
//!
//! # Game Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `WIN_VALUE` | 2048 | Tile value that wins the game |
//! | `SPAWN_TWO_PROBABILITY` | 0.9 | Chance a spawned tile is a 2 (otherwise 4) |
//! | `START_TILE_COUNT` | 2 | Tiles spawned on a fresh board |
//! | `DEFAULT_BOARD_SIZE` | 4 | Classic 4x4 board |
//! | `FRAME_MS` | 16 | Terminal loop frame interval (~60 FPS) |
//! | `FLASH_MS` | 120 | How long spawn/merge highlights stay on screen |
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameStatus};
//!
//! // Parse from string (case-insensitive)
//! assert_eq!(Direction::from_str("Left"), Some(Direction::Left));
//! assert_eq!(Direction::Up.as_str(), "up");
//!
//! assert_eq!(GameStatus::Won.as_str(), "won");
//! assert!(GameStatus::Lost.is_terminal());
//! ```

/// Tile value that triggers the win state.
pub const WIN_VALUE: u32 = 2048;

/// Probability that a spawned tile is a 2 rather than a 4.
pub const SPAWN_TWO_PROBABILITY: f64 = 0.9;

/// Number of tiles placed on a fresh board.
pub const START_TILE_COUNT: usize = 2;

/// Classic board edge length.
pub const DEFAULT_BOARD_SIZE: u8 = 4;

/// Smallest board the terminal front end will play on.
pub const MIN_BOARD_SIZE: u8 = 2;

/// Largest board the terminal front end will play on.
pub const MAX_BOARD_SIZE: u8 = 8;

/// Terminal loop frame interval in milliseconds (16ms ≈ 60 FPS).
pub const FRAME_MS: u32 = 16;

/// Duration spawn/merge highlights stay visible before the flags are cleared.
pub const FLASH_MS: u32 = 120;

/// Storage key of the best-score scalar.
pub const BEST_SCORE_KEY: &str = "2048:best:v1";

/// Storage key of the full game snapshot.
pub const SNAPSHOT_KEY: &str = "2048:snapshot:v1";

/// Stable identity of a tile, used to track it across moves.
pub type TileId = u64;

/// Upper bound for a stored `nextTileId` (2^53, the largest integer JSON
/// readers agree on). Counting up from here cannot reach `TileId::MAX`.
pub const MAX_NEXT_TILE_ID: TileId = 1 << 53;

/// The four move directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Parse direction from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("up"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("RIGHT"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("sideways"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// True for `Left`/`Right` (lines are rows), false for `Up`/`Down` (lines are columns).
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Game status.
///
/// Transitions:
/// - `Playing -> Won` when a tile reaches [`WIN_VALUE`] and keep-playing is off
/// - `Playing -> Lost` when the board is full and no merge is possible
/// - `Won -> Playing` only when the player opts to keep playing
///
/// `Lost` is absorbing; only a brand-new game leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    /// Parse status from its persisted name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "playing" => Some(GameStatus::Playing),
            "won" => Some(GameStatus::Won),
            "lost" => Some(GameStatus::Lost),
            _ => None,
        }
    }

    /// Persisted (lowercase) name.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        }
    }

    /// True once no operation other than a new game can change the status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Lost)
    }
}

/// Commands a driver can issue against the held game state.
///
/// Produced by the input translators (keys, mouse swipes) and consumed by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Slide every tile toward one edge
    Move(Direction),
    /// Discard the current game and start over (best score is kept)
    NewGame,
    /// Continue past the win tile
    KeepPlaying,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_names_round_trip() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_str(dir.as_str()), Some(dir));
        }
    }

    #[test]
    fn status_names_match_persisted_vocabulary() {
        assert_eq!(GameStatus::Playing.as_str(), "playing");
        assert_eq!(GameStatus::Won.as_str(), "won");
        assert_eq!(GameStatus::Lost.as_str(), "lost");
        assert_eq!(GameStatus::from_str("Won"), None);
    }

    #[test]
    fn only_lost_is_terminal() {
        assert!(!GameStatus::Playing.is_terminal());
        assert!(!GameStatus::Won.is_terminal());
        assert!(GameStatus::Lost.is_terminal());
    }

    #[test]
    fn horizontal_directions() {
        assert!(Direction::Left.is_horizontal());
        assert!(Direction::Right.is_horizontal());
        assert!(!Direction::Up.is_horizontal());
        assert!(!Direction::Down.is_horizontal());
    }

    #[test]
    fn board_size_bounds_are_ordered() {
        assert!(MIN_BOARD_SIZE <= DEFAULT_BOARD_SIZE);
        assert!(DEFAULT_BOARD_SIZE <= MAX_BOARD_SIZE);
    }
}
