//! Engine module - the rules of 2048 as pure state transitions
//!
//! Every function takes the current state by reference and returns either a
//! brand-new state or [`Transition::Unchanged`]. Nothing here performs I/O or
//! holds global state; randomness is injected through [`RandomSource`].
//!
//! A move runs in three phases:
//! 1. **Slide**: each line is compacted toward its leading edge, merging
//!    equal neighbours at most once per tile.
//! 2. **Spawn**: if anything moved, one 2 (90%) or 4 (10%) appears on a
//!    uniformly chosen empty cell.
//! 3. **Status**: best score is ratcheted, then win/loss is recomputed.

use arrayvec::ArrayVec;

use crate::board::{lines, Board};
use crate::rng::{pick_index, RandomSource};
use crate::state::{GameState, Tile, Transition};
use crate::types::{
    Direction, GameStatus, TileId, SPAWN_TWO_PROBABILITY, START_TILE_COUNT, WIN_VALUE,
};

/// Outcome of the slide phase when at least one tile moved or merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Slide {
    pub tiles: Vec<Tile>,
    pub score_delta: u32,
    pub next_tile_id: TileId,
}

/// Start a game: empty board, score 0, two spawned tiles.
///
/// `best` is carried over from the previous game. `starting_tile_id` lets a
/// driver keep tile ids unique across restarts.
pub fn create_new_game<R>(size: u8, best: u32, starting_tile_id: TileId, rng: &mut R) -> GameState
where
    R: RandomSource + ?Sized,
{
    let mut state = GameState::empty(size, best, starting_tile_id);
    for _ in 0..START_TILE_COUNT {
        spawn_random_tile(&state, rng).apply_to(&mut state);
    }
    state
}

/// Apply one move.
///
/// Returns `Unchanged` when the game does not accept moves (lost, or won
/// without keep-playing) or when no tile would move or merge. A `Playing`
/// board that is already full and stuck is settled to its terminal status
/// without touching tiles or score.
pub fn move_tiles<R>(state: &GameState, direction: Direction, rng: &mut R) -> Transition
where
    R: RandomSource + ?Sized,
{
    if !accepts_moves(state) {
        return Transition::Unchanged;
    }

    let Some(slide) = slide(state, direction) else {
        if state.status == GameStatus::Playing && !can_move(state) {
            return Transition::Changed(update_status_and_best(state));
        }
        return Transition::Unchanged;
    };

    let mut next = GameState {
        score: state.score.saturating_add(slide.score_delta),
        next_tile_id: slide.next_tile_id,
        tiles: slide.tiles,
        ..state.clone()
    };
    spawn_random_tile(&next, rng).apply_to(&mut next);

    Transition::Changed(update_status_and_best(&next))
}

/// Place one tile on a uniformly chosen empty cell.
///
/// The cell is `empty[floor(u * count)]` over row-major empty cells; the value
/// is 2 when the next draw is below [`SPAWN_TWO_PROBABILITY`], else 4.
pub fn spawn_random_tile<R>(state: &GameState, rng: &mut R) -> Transition
where
    R: RandomSource + ?Sized,
{
    let empty = Board::from_tiles(state.size, &state.tiles).empty_cells();
    if empty.is_empty() {
        return Transition::Unchanged;
    }

    let (row, col) = empty[pick_index(rng.next_f64(), empty.len())];
    let value = if rng.next_f64() < SPAWN_TWO_PROBABILITY { 2 } else { 4 };

    let mut next = state.clone();
    next.tiles.push(Tile::spawned(next.next_tile_id, value, row, col));
    next.next_tile_id += 1;
    Transition::Changed(next)
}

/// Ratchet `best` and recompute the status.
///
/// `Won` wins over `Lost` when both apply; `Lost` never changes.
pub fn update_status_and_best(state: &GameState) -> GameState {
    let best = state.best.max(state.score);

    let mut status = state.status;
    if status != GameStatus::Lost {
        if max_tile(state) >= WIN_VALUE && !state.keep_playing {
            status = GameStatus::Won;
        }
        if status != GameStatus::Won && !can_move(state) {
            status = GameStatus::Lost;
        }
    }

    GameState {
        best,
        status,
        ..state.clone()
    }
}

/// Set the keep-playing flag. Turning it on demotes `Won` back to `Playing`.
///
/// A lost game is never revived, whatever `value` is.
pub fn set_keep_playing(state: &GameState, value: bool) -> Transition {
    if state.status == GameStatus::Lost {
        return Transition::Unchanged;
    }

    let status = if value && state.status == GameStatus::Won {
        GameStatus::Playing
    } else {
        state.status
    };

    if value == state.keep_playing && status == state.status {
        return Transition::Unchanged;
    }

    Transition::Changed(GameState {
        keep_playing: value,
        status,
        ..state.clone()
    })
}

/// Drop the spawn/merge presentation flags from every tile.
pub fn clear_transient_flags(state: &GameState) -> Transition {
    if !state.tiles.iter().any(Tile::has_transient_flags) {
        return Transition::Unchanged;
    }

    let tiles = state
        .tiles
        .iter()
        .map(|t| Tile::new(t.id, t.value, t.row, t.col))
        .collect();

    Transition::Changed(GameState {
        tiles,
        ..state.clone()
    })
}

/// Whether moves are accepted in this status.
pub fn accepts_moves(state: &GameState) -> bool {
    match state.status {
        GameStatus::Lost => false,
        GameStatus::Won => state.keep_playing,
        GameStatus::Playing => true,
    }
}

/// Whether any direction could still change the board.
pub fn can_move(state: &GameState) -> bool {
    Board::from_tiles(state.size, &state.tiles).can_move()
}

/// Directions that would change the board right now.
pub fn available_moves(state: &GameState) -> ArrayVec<Direction, 4> {
    let mut out = ArrayVec::new();
    if !accepts_moves(state) {
        return out;
    }
    for dir in Direction::ALL {
        if slide(state, dir).is_some() {
            out.push(dir);
        }
    }
    out
}

/// Highest tile value on the board (0 when empty).
pub fn max_tile(state: &GameState) -> u32 {
    state.tiles.iter().map(|t| t.value).max().unwrap_or(0)
}

/// Compact and merge every line toward its leading edge.
///
/// Returns `None` when no tile changed position or identity.
pub(crate) fn slide(state: &GameState, direction: Direction) -> Option<Slide> {
    let board = Board::from_tiles(state.size, &state.tiles);
    let mut tiles: Vec<Tile> = Vec::with_capacity(state.tiles.len());
    let mut next_tile_id = state.next_tile_id;
    let mut score_delta: u32 = 0;
    let mut moved = false;

    for line in lines(state.size, direction) {
        let mut target = 0usize;
        // Last tile placed in this line (index into `tiles`) and whether it is a merge result.
        let mut last: Option<(usize, bool)> = None;

        for &(row, col) in &line {
            let Some(tile) = board.get(row, col) else {
                continue;
            };

            if let Some((idx, false)) = last {
                let prev = tiles[idx];
                if prev.value == tile.value {
                    let value = prev.value.saturating_mul(2);
                    tiles[idx] = Tile::merged(next_tile_id, value, prev.row, prev.col);
                    next_tile_id += 1;
                    score_delta = score_delta.saturating_add(value);
                    last = Some((idx, true));
                    moved = true;
                    continue;
                }
            }

            let (to_row, to_col) = line[target];
            if (to_row, to_col) != (row, col) {
                moved = true;
            }
            tiles.push(Tile::new(tile.id, tile.value, to_row, to_col));
            last = Some((tiles.len() - 1, false));
            target += 1;
        }
    }

    moved.then_some(Slide {
        tiles,
        score_delta,
        next_tile_id,
    })
}
