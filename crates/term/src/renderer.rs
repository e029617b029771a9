//! TerminalRenderer: puts frames on a real terminal, redrawing only what changed.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode on the alternate screen, with the mouse captured for swipes.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf
            .queue(terminal::EnterAlternateScreen)?
            .queue(terminal::DisableLineWrap)?
            .queue(cursor::Hide)?
            .queue(EnableMouseCapture)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf
            .queue(DisableMouseCapture)?
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(cursor::Show)?
            .queue(terminal::EnableLineWrap)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Next draw repaints the whole screen. Call after a resize.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Show `fb`, then hand back the previous frame in its place.
    ///
    /// A frame of the same size as the last one is diffed against it; anything
    /// else is a full repaint. The caller renders the next frame into the
    /// buffer it gets back, so no frame is ever cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let size = (fb.width(), fb.height());
        let spare = match self.last.take().filter(|prev| (prev.width(), prev.height()) == size) {
            Some(prev) => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            None => {
                encode_full_into(fb, &mut self.buf)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.flush_buf()?;
        self.last = Some(std::mem::replace(fb, spare));
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a clear-and-repaint of every row into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::new(out);
    for y in 0..fb.height() {
        pen.span(fb, Span::row(y, fb.width()))?;
    }
    pen.finish()
}

/// Encode only the cells of `next` that differ from `prev` into `out`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::new(out);
    for span in changed_spans(prev, next) {
        pen.span(next, span)?;
    }
    pen.finish()
}

/// Consecutive cells on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    x: u16,
    y: u16,
    len: u16,
}

impl Span {
    fn row(y: u16, width: u16) -> Self {
        Self { x: 0, y, len: width }
    }
}

/// Spans of `next` that differ from `prev`. Every row when the sizes differ.
fn changed_spans(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<Span> {
    let (w, h) = (next.width(), next.height());
    if prev.width() != w || prev.height() != h {
        return (0..h).map(|y| Span::row(y, w)).collect();
    }

    let mut spans = Vec::new();
    for y in 0..h {
        let mut start = None;
        for x in 0..=w {
            let dirty = x < w && prev.get(x, y) != next.get(x, y);
            match (start, dirty) {
                (None, true) => start = Some(x),
                (Some(s), false) => {
                    spans.push(Span { x: s, y, len: x - s });
                    start = None;
                }
                _ => {}
            }
        }
    }
    spans
}

/// Writes spans of cells, switching colours only when the style changes.
struct Pen<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Pen<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn span(&mut self, fb: &FrameBuffer, span: Span) -> Result<()> {
        self.out.queue(cursor::MoveTo(span.x, span.y))?;
        for x in span.x..span.x + span.len {
            let cell = fb.get(x, span.y).unwrap_or_default();
            if self.style != Some(cell.style) {
                self.set_style(cell.style)?;
            }
            self.out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn set_style(&mut self, style: CellStyle) -> Result<()> {
        self.out
            .queue(SetAttribute(Attribute::Reset))?
            .queue(SetForegroundColor(truecolor(style.fg)))?
            .queue(SetBackgroundColor(truecolor(style.bg)))?;
        if style.bold {
            self.out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            self.out.queue(SetAttribute(Attribute::Dim))?;
        }
        self.style = Some(style);
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn truecolor(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
