//! Terminal "game renderer" module.
//!
//! A small rendering layer for terminal gameplay. It avoids widget/layout
//! libraries and renders into a plain framebuffer that is flushed to the
//! terminal as a diff against the previous frame.
//!
//! - [`GameView`] is pure: `GameState` in, `FrameBuffer` out
//! - [`TerminalRenderer`] owns the terminal modes and does all the I/O

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{tile_colors, tile_style, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
