//! Mouse drag ("swipe") translation.
//!
//! A left-button press starts a drag and the release ends it. The dominant
//! axis of the drag picks the direction; drags shorter than the threshold
//! are ignored so plain clicks do nothing.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::types::Direction;

/// Minimum drag length, in terminal rows.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 2.0;

/// Width of a terminal column relative to the height of a row.
///
/// Horizontal deltas are scaled by this so a drag across a square area
/// measures the same on both axes.
pub const COLUMN_ASPECT: f32 = 0.5;

/// Direction of a drag by `(dx, dy)`, or `None` below `threshold`.
///
/// Ties between the axes resolve to vertical.
pub fn direction_from_delta(dx: f32, dy: f32, threshold: f32) -> Option<Direction> {
    let abs_x = dx.abs();
    let abs_y = dy.abs();
    if abs_x.max(abs_y) < threshold {
        return None;
    }
    if abs_x > abs_y {
        Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
    } else {
        Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
    }
}

/// Tracks one drag at a time.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    start: Option<(u16, u16)>,
    threshold: f32,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_SWIPE_THRESHOLD)
    }

    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            start: None,
            threshold,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Forget the drag in progress.
    pub fn cancel(&mut self) {
        self.start = None;
    }

    /// Feed a mouse event; returns a direction when a drag completes.
    pub fn handle_mouse_event(&mut self, event: MouseEvent) -> Option<Direction> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.start = Some((event.column, event.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (x0, y0) = self.start.take()?;
                let dx = (event.column as f32 - x0 as f32) * COLUMN_ASPECT;
                let dy = event.row as f32 - y0 as f32;
                direction_from_delta(dx, dy, self.threshold)
            }
            MouseEventKind::Down(_) | MouseEventKind::Up(_) => {
                self.cancel();
                None
            }
            _ => None,
        }
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn drag(tracker: &mut SwipeTracker, from: (u16, u16), to: (u16, u16)) -> Option<Direction> {
        assert_eq!(
            tracker.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), from.0, from.1)),
            None
        );
        tracker.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), to.0, to.1))
    }

    #[test]
    fn test_direction_from_delta() {
        assert_eq!(direction_from_delta(5.0, 1.0, 2.0), Some(Direction::Right));
        assert_eq!(direction_from_delta(-5.0, 1.0, 2.0), Some(Direction::Left));
        assert_eq!(direction_from_delta(1.0, 3.0, 2.0), Some(Direction::Down));
        assert_eq!(direction_from_delta(1.0, -3.0, 2.0), Some(Direction::Up));
        assert_eq!(direction_from_delta(1.0, 1.5, 2.0), None);
        assert_eq!(direction_from_delta(3.0, -3.0, 2.0), Some(Direction::Up));
    }

    #[test]
    fn test_drag_horizontal_is_aspect_scaled() {
        let mut t = SwipeTracker::new();
        assert_eq!(drag(&mut t, (10, 10), (20, 10)), Some(Direction::Right));
        // Three columns is only 1.5 rows worth of distance.
        assert_eq!(drag(&mut t, (10, 10), (7, 10)), None);
        assert_eq!(drag(&mut t, (10, 10), (4, 11)), Some(Direction::Left));
    }

    #[test]
    fn test_drag_vertical() {
        let mut t = SwipeTracker::new();
        assert_eq!(drag(&mut t, (10, 10), (11, 7)), Some(Direction::Up));
        assert_eq!(drag(&mut t, (10, 10), (10, 14)), Some(Direction::Down));
        assert!(!t.is_tracking());
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut t = SwipeTracker::new();
        assert_eq!(
            t.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 30, 30)),
            None
        );
    }

    #[test]
    fn test_other_button_cancels_drag() {
        let mut t = SwipeTracker::new();
        t.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
        assert!(t.is_tracking());

        t.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 0, 0));
        assert!(!t.is_tracking());
        assert_eq!(
            t.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 0, 20)),
            None
        );
    }

    #[test]
    fn test_moves_and_scrolls_do_not_affect_drag() {
        let mut t = SwipeTracker::new();
        t.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
        t.handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 3, 3));
        t.handle_mouse_event(mouse(MouseEventKind::ScrollDown, 3, 3));
        assert!(t.is_tracking());

        t.cancel();
        assert!(!t.is_tracking());
    }
}
