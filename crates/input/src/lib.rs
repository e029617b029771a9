//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameCommand`] and turns
//! left-button mouse drags into move directions. Nothing here knows about
//! game state; the driver decides what a command means.

pub mod map;
pub mod swipe;

pub use tui_2048_types as types;

pub use map::{handle_key_event, should_quit};
pub use swipe::{direction_from_delta, SwipeTracker};
