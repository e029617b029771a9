//! GameView: maps `core::GameState` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameState, Tile};
use crate::fb::{decimal_width, CellStyle, FrameBuffer, Rgb};
use crate::types::GameStatus;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const BOARD_BG: Rgb = Rgb::new(187, 173, 160);
const EMPTY_BG: Rgb = Rgb::new(205, 193, 180);
const DARK_TEXT: Rgb = Rgb::new(119, 110, 101);
const LIGHT_TEXT: Rgb = Rgb::new(249, 246, 242);

/// Percent a freshly spawned or merged tile is lightened by.
const HIGHLIGHT_PCT: u8 = 35;

const HELP_LINES: [&str; 4] = ["arrows/wasd move", "n  new game", "c  keep going", "q  quit"];

/// A lightweight terminal renderer for the 2048 board.
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 6x3 reads as roughly square with typical glyph proportions.
        Self {
            cell_w: 6,
            cell_h: 3,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Outer size of the bordered board for a `size`×`size` game.
    pub fn frame_size(&self, size: u8) -> (u16, u16) {
        (
            (size as u16) * self.cell_w + 2,
            (size as u16) * self.cell_h + 2,
        )
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Allocation-free once `fb` has reached the viewport size.
    pub fn render_into(&self, state: &GameState, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size(state.size());
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::new(DARK_TEXT, BOARD_BG),
        );
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for row in 0..state.size() {
            for col in 0..state.size() {
                self.draw_empty_cell(fb, start_x, start_y, row, col);
            }
        }
        for tile in state.tiles() {
            self.draw_tile(fb, start_x, start_y, tile);
        }

        self.draw_side_panel(fb, state, viewport, start_x, start_y, frame_w);

        match state.status() {
            GameStatus::Won => {
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "YOU WIN!")
            }
            GameStatus::Lost => {
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER")
            }
            GameStatus::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, state: &GameState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(state, viewport, &mut fb);
        fb
    }

    /// Top-left framebuffer position of board cell `(row, col)`.
    fn cell_origin(&self, start_x: u16, start_y: u16, row: u8, col: u8) -> (u16, u16) {
        (
            start_x + 1 + (col as u16) * self.cell_w,
            start_y + 1 + (row as u16) * self.cell_h,
        )
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, row: u8, col: u8) {
        let style = CellStyle::new(BOARD_BG, EMPTY_BG);
        let (px, py) = self.cell_origin(start_x, start_y, row, col);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(px + self.cell_w / 2, py + self.cell_h / 2, '·', style);
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, tile: &Tile) {
        let style = tile_style(tile);
        let (px, py) = self.cell_origin(start_x, start_y, tile.row, tile.col);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);

        let label_y = py + self.cell_h / 2;
        let digits = decimal_width(tile.value);
        if digits <= self.cell_w {
            fb.put_u32(px + (self.cell_w - digits) / 2, label_y, tile.value, style);
            return;
        }

        // Too wide for the tile: show it in units of 1024.
        let kilo = tile.value / 1024;
        let width = decimal_width(kilo) + 1;
        if width <= self.cell_w {
            let x = px + (self.cell_w - width) / 2;
            let w = fb.put_u32(x, label_y, kilo, style);
            fb.put_char(x + w, label_y, 'k', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        state: &GameState,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, state.score(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "BEST", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, state.best(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "STATUS", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, status_label(state), value);
        y = y.saturating_add(2);

        let help = value.dim();
        for line in HELP_LINES {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

/// Tile colours by value, brightened while the tile is freshly spawned or merged.
pub fn tile_style(tile: &Tile) -> CellStyle {
    let (bg, fg) = tile_colors(tile.value);
    if tile.just_spawned || tile.just_merged {
        CellStyle::new(fg, bg.lighten(HIGHLIGHT_PCT)).bold()
    } else {
        CellStyle::new(fg, bg)
    }
}

/// `(background, foreground)` for a tile value.
pub fn tile_colors(value: u32) -> (Rgb, Rgb) {
    match value {
        2 => (Rgb::new(238, 228, 218), DARK_TEXT),
        4 => (Rgb::new(237, 224, 200), DARK_TEXT),
        8 => (Rgb::new(242, 177, 121), LIGHT_TEXT),
        16 => (Rgb::new(245, 149, 99), LIGHT_TEXT),
        32 => (Rgb::new(246, 124, 95), LIGHT_TEXT),
        64 => (Rgb::new(246, 94, 59), LIGHT_TEXT),
        128 => (Rgb::new(237, 207, 114), LIGHT_TEXT),
        256 => (Rgb::new(237, 204, 97), LIGHT_TEXT),
        512 => (Rgb::new(237, 200, 80), LIGHT_TEXT),
        1024 => (Rgb::new(237, 197, 63), LIGHT_TEXT),
        2048 => (Rgb::new(237, 194, 46), LIGHT_TEXT),
        _ => (Rgb::new(60, 58, 50), LIGHT_TEXT),
    }
}

fn status_label(state: &GameState) -> &'static str {
    match state.status() {
        GameStatus::Won => "WON",
        GameStatus::Lost => "LOST",
        GameStatus::Playing if state.keep_playing() => "PLAYING ON",
        GameStatus::Playing => "PLAYING",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_size_includes_border() {
        assert_eq!(GameView::default().frame_size(4), (26, 14));
        assert_eq!(GameView::new(2, 1).frame_size(2), (6, 4));
    }

    #[test]
    fn tile_label_is_centred() {
        let state = GameState::from_values(2, &[2, 0, 0, 2048]);
        let fb = GameView::default().render(&state, Viewport::new(14, 8));

        // Frame at (0,0); cell (0,0) origin (1,1), label row 2.
        assert_eq!(fb.row_text(2), "│  2      ·  │");
        // Cell (1,1) origin (7,4), label row 5, "2048" starts at 7 + 1.
        assert_eq!(fb.row_text(5), "│   ·   2048 │");
    }

    #[test]
    fn oversized_values_fall_back_to_kilo_units() {
        let state = GameState::from_values(2, &[131072, 0, 0, 0]);
        let fb = GameView::new(4, 1).render(&state, Viewport::new(10, 4));
        // 131072 / 1024 = 128 -> "128k" fills the 4-wide tile.
        assert_eq!(fb.row_text(1), "│128k  · │");
    }

    #[test]
    fn highlighted_tiles_are_brighter() {
        let plain = Tile::new(1, 8, 0, 0);
        let mut merged = plain;
        merged.just_merged = true;

        let a = tile_style(&plain);
        let b = tile_style(&merged);
        assert_eq!(a.fg, b.fg);
        assert!(b.bold && !a.bold);
        assert!(b.bg.r >= a.bg.r && b.bg.g > a.bg.g && b.bg.b > a.bg.b);
    }

    #[test]
    fn status_labels() {
        let s = GameState::from_values(2, &[2, 0, 0, 0]);
        assert_eq!(status_label(&s), "PLAYING");
        assert_eq!(status_label(&s.clone().with_keep_playing(true)), "PLAYING ON");
        assert_eq!(status_label(&s.clone().with_status(GameStatus::Won)), "WON");
        assert_eq!(status_label(&s.with_status(GameStatus::Lost)), "LOST");
    }
}
