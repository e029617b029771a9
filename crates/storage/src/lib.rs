//! Storage module - persistence of best score and game snapshots
//!
//! The engine never touches storage. Drivers hand a [`Persistence`] adapter
//! the values to keep and ask it for them back on start-up.
//!
//! # Keys
//!
//! | Key | Content |
//! |-----|---------|
//! | `2048:best:v1` | Best score as a decimal integer |
//! | `2048:snapshot:v1` | Full game snapshot as JSON |
//!
//! The two keys have independent lifecycles.
//!
//! # Snapshot JSON
//!
//! ```text
//! {"size":4,"score":36,"best":120,"status":"playing","keepPlaying":false,
//!  "nextTileId":9,"tiles":[{"id":3,"value":2,"row":0,"col":0}]}
//! ```
//!
//! # Failure model
//!
//! Storage is best-effort. Backend errors, corrupt text and invalid
//! snapshots are logged (`log::warn!`) and reported as "no data";
//! nothing propagates to the caller.
//!
//! # Backends
//!
//! - [`MemoryStore`]: in-process map (saving disabled, tests)
//! - [`FileStore`]: one file per key in a data directory

pub mod persistence;
pub mod store;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use persistence::{decode_snapshot, encode_snapshot, parse_best_score, Persistence};
pub use store::{FileStore, KeyValueStore, MemoryStore};
