//! Best-effort persistence of the best score and the game snapshot.
//!
//! Nothing here returns an error: a failing or corrupt store degrades to
//! "no data" on load and to a logged no-op on save, so gameplay never stalls
//! on storage.

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::core::GameSnapshot;
use crate::store::KeyValueStore;
use crate::types::{BEST_SCORE_KEY, SNAPSHOT_KEY};

/// Persistence adapter over a [`KeyValueStore`].
///
/// The best score and the snapshot live under separate keys with independent
/// lifecycles; clearing the snapshot keeps the best score.
#[derive(Debug, Clone)]
pub struct Persistence<S> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored best score, 0 when absent, unreadable or not a number.
    pub fn load_best_score(&self) -> u32 {
        match self.store.get(BEST_SCORE_KEY) {
            Ok(Some(raw)) => parse_best_score(&raw).unwrap_or_else(|| {
                warn!("ignoring malformed best score {:?}", raw);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                warn!("failed to load best score: {:#}", e);
                0
            }
        }
    }

    /// Store `candidate` only if it beats the stored value.
    pub fn save_best_score(&mut self, candidate: u32) {
        if candidate <= self.load_best_score() {
            return;
        }
        if let Err(e) = self.store.set(BEST_SCORE_KEY, &candidate.to_string()) {
            warn!("failed to save best score {}: {:#}", candidate, e);
        }
    }

    /// Stored snapshot, `None` when absent, unreadable, malformed or invalid.
    pub fn load_snapshot(&self) -> Option<GameSnapshot> {
        let raw = match self.store.get(SNAPSHOT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("failed to load snapshot: {:#}", e);
                return None;
            }
        };

        match decode_snapshot(&raw) {
            Ok(snap) => Some(snap),
            Err(e) => {
                warn!("discarding stored snapshot: {:#}", e);
                None
            }
        }
    }

    pub fn save_snapshot(&mut self, snapshot: &GameSnapshot) {
        let result = encode_snapshot(snapshot).and_then(|json| self.store.set(SNAPSHOT_KEY, &json));
        match result {
            Ok(()) => debug!(
                "saved snapshot (score {}, {} tiles)",
                snapshot.score,
                snapshot.tiles.len()
            ),
            Err(e) => warn!("failed to save snapshot: {:#}", e),
        }
    }

    pub fn clear_snapshot(&mut self) {
        if let Err(e) = self.store.remove(SNAPSHOT_KEY) {
            warn!("failed to clear snapshot: {:#}", e);
        }
    }
}

/// Parse a stored best score (a plain decimal integer).
pub fn parse_best_score(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// Snapshot to its stored JSON text.
pub fn encode_snapshot(snapshot: &GameSnapshot) -> Result<String> {
    serde_json::to_string(snapshot).context("encoding snapshot")
}

/// Stored JSON text to a snapshot; every field must be present, well-typed and consistent.
pub fn decode_snapshot(raw: &str) -> Result<GameSnapshot> {
    let snap: GameSnapshot = serde_json::from_str(raw).context("decoding snapshot")?;
    snap.validate().context("validating snapshot")?;
    Ok(snap)
}
