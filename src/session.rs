//! Session: the driver that owns one game and keeps storage in step with it.
//!
//! The engine is pure, so something has to hold the current state, feed it
//! randomness and persist every change. Each accepted command replaces the
//! held state, then the snapshot and the best score are saved in that order.

use log::{debug, info, warn};

use crate::core::{
    clear_transient_flags, create_new_game, from_snapshot, move_tiles, set_keep_playing,
    to_snapshot, GameState, RandomSource, Transition,
};
use crate::storage::{KeyValueStore, Persistence};
use crate::types::{Direction, GameCommand, GameStatus, MAX_NEXT_TILE_ID};

pub struct Session<S, R> {
    state: GameState,
    persistence: Persistence<S>,
    rng: R,
}

impl<S, R> Session<S, R>
where
    S: KeyValueStore,
    R: RandomSource,
{
    /// Resume the saved game if there is a valid one of this `size`, else start fresh.
    pub fn restore(size: u8, mut rng: R, mut persistence: Persistence<S>) -> Self {
        let best = persistence.load_best_score();

        let resumed = persistence.load_snapshot().and_then(|snap| {
            if snap.size != size {
                info!("saved game is {}x{}, wanted {}x{}", snap.size, snap.size, size, size);
                return None;
            }
            match from_snapshot(snap) {
                Ok(state) => Some(state),
                Err(e) => {
                    warn!("saved game rejected: {}", e);
                    None
                }
            }
        });

        let state = match resumed {
            Some(state) => {
                info!(
                    "resumed game (score {}, {} tiles)",
                    state.score(),
                    state.tiles().len()
                );
                let best = state.best().max(best);
                state.with_best(best)
            }
            None => {
                persistence.clear_snapshot();
                info!("new {}x{} game (best {})", size, size, best);
                create_new_game(size, best, 1, &mut rng)
            }
        };

        Self {
            state,
            persistence,
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    /// Run one driver command. Returns true when the state changed.
    pub fn apply(&mut self, command: GameCommand) -> bool {
        match command {
            GameCommand::Move(direction) => self.apply_move(direction),
            GameCommand::NewGame => self.new_game(),
            GameCommand::KeepPlaying => self.keep_playing(),
        }
    }

    pub fn apply_move(&mut self, direction: Direction) -> bool {
        let transition = move_tiles(&self.state, direction, &mut self.rng);
        let changed = self.commit(transition);
        if changed {
            debug!(
                "move {} -> score {}, status {}",
                direction.as_str(),
                self.state.score(),
                self.state.status().as_str()
            );
            match self.state.status() {
                GameStatus::Won => info!("reached the winning tile"),
                GameStatus::Lost => info!("game over at score {}", self.state.score()),
                _ => {}
            }
        }
        changed
    }

    /// Discard the current game. Tile ids continue from the previous game
    /// until the counter passes what a snapshot may store, then restart at 1.
    pub fn new_game(&mut self) -> bool {
        let mut first_id = self.state.next_tile_id();
        if first_id > MAX_NEXT_TILE_ID {
            warn!("tile id counter at {}, restarting ids", first_id);
            first_id = 1;
        }
        let next = create_new_game(self.state.size(), self.state.best(), first_id, &mut self.rng);
        info!("new game (best {})", next.best());
        self.commit(Transition::Changed(next))
    }

    pub fn keep_playing(&mut self) -> bool {
        let transition = set_keep_playing(&self.state, true);
        let changed = self.commit(transition);
        if changed {
            info!("keep playing past the winning tile");
        }
        changed
    }

    /// Drop spawn/merge highlights. Not persisted; snapshots never carry them.
    pub fn clear_transient_flags(&mut self) -> bool {
        clear_transient_flags(&self.state).apply_to(&mut self.state)
    }

    fn commit(&mut self, transition: Transition) -> bool {
        if !transition.apply_to(&mut self.state) {
            return false;
        }
        self.persistence.save_snapshot(&to_snapshot(&self.state));
        self.persistence.save_best_score(self.state.best());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameSnapshot, SequenceRng, SnapshotTile};
    use crate::storage::MemoryStore;
    use crate::types::TileId;

    fn fresh(rng: SequenceRng) -> Session<MemoryStore, SequenceRng> {
        Session::restore(4, rng, Persistence::new(MemoryStore::new()))
    }

    #[test]
    fn test_restore_without_save_starts_new_game() {
        let s = fresh(SequenceRng::new([0.0, 0.0]));
        assert_eq!(s.state().tiles().len(), 2);
        assert_eq!(s.state().score(), 0);
        assert_eq!(s.state().next_tile_id(), 3);
        // Nothing is written until the first change.
        assert_eq!(s.persistence().load_snapshot(), None);
    }

    #[test]
    fn test_commands_that_change_nothing_are_not_persisted() {
        let mut s = fresh(SequenceRng::new([0.0, 0.0]));
        let before = s.persistence().store().len();

        // Spawns fill (0,0) then (0,1); moving up changes nothing.
        assert!(!s.apply_move(Direction::Up));
        assert_eq!(s.persistence().store().len(), before);
    }

    #[test]
    fn test_new_game_keeps_ids_monotonic() {
        let mut s = fresh(SequenceRng::new([0.0, 0.0]));
        let first_next = s.state().next_tile_id();
        assert!(s.apply(GameCommand::NewGame));
        assert!(s.state().tiles().iter().all(|t| t.id >= first_next));
        assert_eq!(s.state().next_tile_id(), first_next + 2);
        assert!(s.persistence().load_snapshot().is_some());
    }

    #[test]
    fn test_large_saved_id_counter_stays_restorable() {
        let near_limit = GameSnapshot {
            size: 4,
            score: 0,
            best: 0,
            status: GameStatus::Playing,
            keep_playing: false,
            next_tile_id: MAX_NEXT_TILE_ID,
            tiles: vec![SnapshotTile { id: 1, value: 2, row: 0, col: 1 }],
        };
        let mut p = Persistence::new(MemoryStore::new());
        p.save_snapshot(&near_limit);

        let mut s = Session::restore(4, SequenceRng::new([0.0, 0.0]), p);
        assert_eq!(s.state().next_tile_id(), MAX_NEXT_TILE_ID);
        assert!(s.apply_move(Direction::Left));
        assert_eq!(s.state().next_tile_id(), MAX_NEXT_TILE_ID + 1);

        // Past the stored limit: a new game restarts ids and saves a valid snapshot.
        assert!(s.new_game());
        assert_eq!(s.state().next_tile_id(), 3);
        let saved = s.persistence().load_snapshot().unwrap();
        assert_eq!(saved.validate(), Ok(()));
    }

    #[test]
    fn test_snapshot_without_id_room_starts_fresh() {
        let exhausted = GameSnapshot {
            size: 4,
            score: 12,
            best: 12,
            status: GameStatus::Playing,
            keep_playing: false,
            next_tile_id: TileId::MAX,
            tiles: vec![SnapshotTile { id: 1, value: 2, row: 0, col: 1 }],
        };
        let mut p = Persistence::new(MemoryStore::new());
        p.save_snapshot(&exhausted);

        let mut s = Session::restore(4, SequenceRng::new([0.0, 0.0]), p);
        assert_eq!(s.state().score(), 0);
        assert_eq!(s.state().next_tile_id(), 3);
        assert_eq!(s.persistence().load_snapshot(), None);
        assert!(s.apply_move(Direction::Down));
    }

    #[test]
    fn test_clear_transient_flags_is_local() {
        let mut s = fresh(SequenceRng::new([0.0, 0.0]));
        assert!(s.state().tiles().iter().all(|t| t.just_spawned));
        assert!(s.clear_transient_flags());
        assert!(!s.clear_transient_flags());
        assert_eq!(s.persistence().load_snapshot(), None);
    }
}
