//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the 2048 rules: sliding, merging, spawning and
//! win/loss detection. It has **zero dependencies** on UI, storage, or I/O:
//!
//! - **Deterministic**: randomness is injected, so a seeded source replays a game exactly
//! - **Value semantics**: operations return new states; the input is never mutated
//! - **Change detection**: every operation reports [`Transition::Unchanged`] when it did nothing
//!
//! # Module Structure
//!
//! - [`board`]: N x N occupancy index and line decomposition
//! - [`engine`]: the state transitions (new game, move, spawn, status, keep-playing)
//! - [`rng`]: the [`RandomSource`] capability plus seeded and scripted sources
//! - [`snapshot`]: the persisted projection and its validation
//! - [`state`]: tiles, [`GameState`] and [`Transition`]
//!
//! # Game Rules
//!
//! - A move compacts every row (left/right) or column (up/down) toward the
//!   leading edge; equal neighbours merge into one tile of double value
//! - A tile merges at most once per move: `[2, 2, 2]` moving left is `[4, 2]`
//! - Merged values are added to the score; `best` never decreases
//! - A move that changes nothing spawns nothing and scores nothing
//! - Reaching 2048 wins unless the player chose to keep playing
//! - A full board with no equal neighbours is lost
//!
//! # Example
//!
//! ```
//! use tui_2048_core::{create_new_game, move_tiles, SimpleRng};
//! use tui_2048_types::Direction;
//!
//! let mut rng = SimpleRng::new(12345);
//! let state = create_new_game(4, 0, 1, &mut rng);
//! assert_eq!(state.tiles().len(), 2);
//!
//! // Keep the old state when the move had no effect.
//! let state = move_tiles(&state, Direction::Left, &mut rng).unwrap_or(state);
//! assert!(state.tiles().len() >= 2);
//! ```

pub mod board;
pub mod engine;
pub mod rng;
pub mod snapshot;
pub mod state;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use engine::{
    accepts_moves, available_moves, can_move, clear_transient_flags, create_new_game, max_tile,
    move_tiles, set_keep_playing, spawn_random_tile, update_status_and_best,
};
pub use rng::{RandomSource, SequenceRng, SimpleRng};
pub use snapshot::{from_snapshot, to_snapshot, GameSnapshot, SnapshotError, SnapshotTile};
pub use state::{GameState, Tile, Transition};
