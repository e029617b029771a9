//! TUI 2048 (workspace facade crate).
//!
//! Re-exports the member crates under `tui_2048::{core,input,storage,term,types}`
//! and adds the pieces that tie them together: environment configuration and
//! the [`Session`] driver used by the terminal binary.

pub mod config;
pub mod session;

pub use tui_2048_core as core;
pub use tui_2048_input as input;
pub use tui_2048_storage as storage;
pub use tui_2048_term as term;
pub use tui_2048_types as types;

pub use config::AppConfig;
pub use session::Session;
