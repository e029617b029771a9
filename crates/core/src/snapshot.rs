//! Snapshot module - the persisted projection of a game state
//!
//! A snapshot is a game state without presentation flags. Field names follow
//! the stored JSON shape (`keepPlaying`, `nextTileId`, ...), and status is
//! stored as `"playing" | "won" | "lost"`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::state::{GameState, Tile};
use crate::types::{GameStatus, TileId, MAX_NEXT_TILE_ID};

/// Largest board edge a snapshot may describe.
pub const MAX_SNAPSHOT_SIZE: u8 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotTile {
    pub id: TileId,
    pub value: u32,
    pub row: u8,
    pub col: u8,
}

impl From<&Tile> for SnapshotTile {
    fn from(t: &Tile) -> Self {
        Self {
            id: t.id,
            value: t.value,
            row: t.row,
            col: t.col,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub size: u8,
    pub score: u32,
    pub best: u32,
    #[serde(with = "status_name")]
    pub status: GameStatus,
    pub keep_playing: bool,
    pub next_tile_id: TileId,
    pub tiles: Vec<SnapshotTile>,
}

/// Why a snapshot cannot be turned back into a game state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("board size {0} is out of range")]
    Size(u8),
    #[error("tile {id} at ({row}, {col}) is outside the board")]
    OutOfBounds { id: TileId, row: u8, col: u8 },
    #[error("more than one tile at ({row}, {col})")]
    Overlap { row: u8, col: u8 },
    #[error("tile id {0} is used more than once")]
    DuplicateId(TileId),
    #[error("next tile id {next} is not above tile id {id}")]
    StaleNextId { next: TileId, id: TileId },
    #[error("tile {id} has value {value}, expected a power of two >= 2")]
    Value { id: TileId, value: u32 },
    #[error("next tile id {0} leaves no room for new tiles")]
    IdSpace(TileId),
}

impl GameSnapshot {
    /// Check the invariants a game state relies on.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.size == 0 || self.size > MAX_SNAPSHOT_SIZE {
            return Err(SnapshotError::Size(self.size));
        }
        if self.next_tile_id > MAX_NEXT_TILE_ID {
            return Err(SnapshotError::IdSpace(self.next_tile_id));
        }

        let mut cells = HashSet::with_capacity(self.tiles.len());
        let mut ids = HashSet::with_capacity(self.tiles.len());

        for t in &self.tiles {
            if t.row >= self.size || t.col >= self.size {
                return Err(SnapshotError::OutOfBounds {
                    id: t.id,
                    row: t.row,
                    col: t.col,
                });
            }
            if t.value < 2 || !t.value.is_power_of_two() {
                return Err(SnapshotError::Value {
                    id: t.id,
                    value: t.value,
                });
            }
            if !cells.insert((t.row, t.col)) {
                return Err(SnapshotError::Overlap {
                    row: t.row,
                    col: t.col,
                });
            }
            if !ids.insert(t.id) {
                return Err(SnapshotError::DuplicateId(t.id));
            }
            if t.id >= self.next_tile_id {
                return Err(SnapshotError::StaleNextId {
                    next: self.next_tile_id,
                    id: t.id,
                });
            }
        }

        Ok(())
    }
}

impl From<&GameState> for GameSnapshot {
    fn from(state: &GameState) -> Self {
        Self {
            size: state.size,
            score: state.score,
            best: state.best,
            status: state.status,
            keep_playing: state.keep_playing,
            next_tile_id: state.next_tile_id,
            tiles: state.tiles.iter().map(SnapshotTile::from).collect(),
        }
    }
}

impl TryFrom<GameSnapshot> for GameState {
    type Error = SnapshotError;

    fn try_from(snap: GameSnapshot) -> Result<Self, Self::Error> {
        snap.validate()?;
        Ok(GameState {
            size: snap.size,
            score: snap.score,
            best: snap.best,
            status: snap.status,
            keep_playing: snap.keep_playing,
            next_tile_id: snap.next_tile_id,
            tiles: snap
                .tiles
                .iter()
                .map(|t| Tile::new(t.id, t.value, t.row, t.col))
                .collect(),
        })
    }
}

/// Project a state to its persisted form (presentation flags dropped).
pub fn to_snapshot(state: &GameState) -> GameSnapshot {
    GameSnapshot::from(state)
}

/// Rebuild a state from a snapshot, rejecting anything that breaks a state invariant.
pub fn from_snapshot(snap: GameSnapshot) -> Result<GameState, SnapshotError> {
    GameState::try_from(snap)
}

mod status_name {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::types::GameStatus;

    pub fn serialize<S>(status: &GameStatus, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(status.as_str())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<GameStatus, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        GameStatus::from_str(&s)
            .ok_or_else(|| de::Error::unknown_variant(&s, &["playing", "won", "lost"]))
    }
}
