//! Game state module - tiles, the immutable game state and transition results

use crate::types::{GameStatus, TileId};

/// A single numbered tile.
///
/// `just_spawned`/`just_merged` are presentation hints for one rendered frame;
/// the rules never read them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub value: u32,
    pub row: u8,
    pub col: u8,
    pub just_spawned: bool,
    pub just_merged: bool,
}

impl Tile {
    /// A settled tile with no presentation flags.
    pub fn new(id: TileId, value: u32, row: u8, col: u8) -> Self {
        Self {
            id,
            value,
            row,
            col,
            just_spawned: false,
            just_merged: false,
        }
    }

    pub(crate) fn spawned(id: TileId, value: u32, row: u8, col: u8) -> Self {
        Self {
            just_spawned: true,
            ..Self::new(id, value, row, col)
        }
    }

    pub(crate) fn merged(id: TileId, value: u32, row: u8, col: u8) -> Self {
        Self {
            just_merged: true,
            ..Self::new(id, value, row, col)
        }
    }

    pub fn pos(&self) -> (u8, u8) {
        (self.row, self.col)
    }

    pub fn has_transient_flags(&self) -> bool {
        self.just_spawned || self.just_merged
    }
}

/// Complete game state.
///
/// States are values: engine operations take `&GameState` and hand back a new
/// state inside a [`Transition`], never mutating the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) size: u8,
    pub(crate) score: u32,
    /// High-water mark across games; never decreases along a lineage.
    pub(crate) best: u32,
    pub(crate) status: GameStatus,
    pub(crate) keep_playing: bool,
    /// Strictly greater than every id issued in this game's lineage.
    pub(crate) next_tile_id: TileId,
    pub(crate) tiles: Vec<Tile>,
}

impl GameState {
    /// An empty board. Use [`crate::create_new_game`] for a playable one.
    pub fn empty(size: u8, best: u32, next_tile_id: TileId) -> Self {
        Self {
            size,
            score: 0,
            best,
            status: GameStatus::Playing,
            keep_playing: false,
            next_tile_id,
            tiles: Vec::new(),
        }
    }

    /// Build a `Playing` state from a row-major grid of values (0 = empty).
    ///
    /// Tiles get ids `1..` in reading order and `next_tile_id` follows the last one.
    /// Values beyond `size * size` are ignored.
    pub fn from_values(size: u8, values: &[u32]) -> Self {
        let mut state = Self::empty(size, 0, 1);
        let n = size as usize;
        for (idx, &value) in values.iter().take(n * n).enumerate() {
            if value == 0 {
                continue;
            }
            let tile = Tile::new(state.next_tile_id, value, (idx / n) as u8, (idx % n) as u8);
            state.tiles.push(tile);
            state.next_tile_id += 1;
        }
        state
    }

    pub fn with_score(mut self, score: u32) -> Self {
        self.score = score;
        self
    }

    pub fn with_best(mut self, best: u32) -> Self {
        self.best = best;
        self
    }

    pub fn with_status(mut self, status: GameStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_keep_playing(mut self, keep_playing: bool) -> Self {
        self.keep_playing = keep_playing;
        self
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn keep_playing(&self) -> bool {
        self.keep_playing
    }

    pub fn next_tile_id(&self) -> TileId {
        self.next_tile_id
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Number of cells on the board.
    pub fn cell_count(&self) -> usize {
        (self.size as usize) * (self.size as usize)
    }

    pub fn is_full(&self) -> bool {
        self.tiles.len() >= self.cell_count()
    }

    pub fn tile_at(&self, row: u8, col: u8) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.row == row && t.col == col)
    }

    /// Row-major value grid (0 = empty).
    pub fn values(&self) -> Vec<u32> {
        let n = self.size as usize;
        let mut out = vec![0u32; n * n];
        for t in &self.tiles {
            out[t.row as usize * n + t.col as usize] = t.value;
        }
        out
    }

    /// Sum of all tile values on the board.
    pub fn tile_sum(&self) -> u64 {
        self.tiles.iter().map(|t| t.value as u64).sum()
    }
}

/// Result of an engine operation.
///
/// `Unchanged` is the "nothing happened" signal (an illegal move, a spawn on a
/// full board); callers keep their current state and skip any follow-up work.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Unchanged,
    Changed(GameState),
}

impl Transition {
    pub fn is_changed(&self) -> bool {
        matches!(self, Transition::Changed(_))
    }

    pub fn into_option(self) -> Option<GameState> {
        match self {
            Transition::Unchanged => None,
            Transition::Changed(state) => Some(state),
        }
    }

    /// The new state, or `prev` when nothing changed.
    pub fn unwrap_or(self, prev: GameState) -> GameState {
        match self {
            Transition::Unchanged => prev,
            Transition::Changed(state) => state,
        }
    }

    /// Borrowing variant of [`Transition::unwrap_or`].
    pub fn state_or<'a>(&'a self, prev: &'a GameState) -> &'a GameState {
        match self {
            Transition::Unchanged => prev,
            Transition::Changed(state) => state,
        }
    }

    /// Replace `state` with the new state, if any. Returns whether it changed.
    pub fn apply_to(self, state: &mut GameState) -> bool {
        match self {
            Transition::Unchanged => false,
            Transition::Changed(next) => {
                *state = next;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_values_assigns_ids_in_reading_order() {
        let state = GameState::from_values(2, &[2, 0, 4, 8]);

        assert_eq!(state.tiles().len(), 3);
        assert_eq!(state.tiles()[0], Tile::new(1, 2, 0, 0));
        assert_eq!(state.tiles()[1], Tile::new(2, 4, 1, 0));
        assert_eq!(state.tiles()[2], Tile::new(3, 8, 1, 1));
        assert_eq!(state.next_tile_id(), 4);
        assert_eq!(state.status(), GameStatus::Playing);
    }

    #[test]
    fn values_round_trip_through_grid() {
        let grid = [2, 0, 0, 4, 0, 8, 16, 0, 0];
        let state = GameState::from_values(3, &grid);
        assert_eq!(state.values(), grid.to_vec());
        assert_eq!(state.tile_sum(), 30);
        assert!(!state.is_full());
    }

    #[test]
    fn tile_at_finds_by_position() {
        let state = GameState::from_values(2, &[0, 2, 0, 0]);
        assert_eq!(state.tile_at(0, 1).map(|t| t.value), Some(2));
        assert!(state.tile_at(1, 1).is_none());
    }

    #[test]
    fn transition_apply_to_replaces_only_on_change() {
        let mut state = GameState::from_values(2, &[2, 0, 0, 0]);
        let before = state.clone();

        assert!(!Transition::Unchanged.apply_to(&mut state));
        assert_eq!(state, before);

        let next = before.clone().with_score(4);
        assert!(Transition::Changed(next.clone()).apply_to(&mut state));
        assert_eq!(state, next);
    }

    #[test]
    fn transition_unwrap_or_falls_back() {
        let prev = GameState::empty(4, 10, 1);
        assert_eq!(Transition::Unchanged.unwrap_or(prev.clone()), prev);
        assert!(Transition::Unchanged.into_option().is_none());
    }
}
