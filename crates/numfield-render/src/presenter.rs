#![forbid(unsafe_code)]

//! Terminal presenter.
//!
//! Writes a [`Frame`] to a terminal through crossterm, re-emitting only the
//! rows that changed since the previous presentation. One presenter instance
//! owns the "what is on screen" state; nothing else writes to the terminal
//! while a program runs.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{
    Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};

use crate::buffer::Buffer;
use crate::cell::{Cell, Color, StyleFlags};
use crate::frame::Frame;

/// Convert a [`Color`] to its crossterm equivalent.
#[must_use]
pub fn to_crossterm_color(color: Color) -> CtColor {
    match color {
        Color::Reset => CtColor::Reset,
        Color::Ansi(n) => CtColor::AnsiValue(n),
        Color::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
    }
}

/// Row-diffing frame presenter.
#[derive(Debug, Default)]
pub struct Presenter {
    last: Option<Buffer>,
}

impl Presenter {
    /// Create a presenter with no previous frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame, forcing a full redraw next present.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Write the frame to `out`, skipping rows unchanged since last time.
    pub fn present<W: Write>(&mut self, frame: &Frame, out: &mut W) -> io::Result<()> {
        let buffer = &frame.buffer;
        let stale = self
            .last
            .as_ref()
            .is_none_or(|l| l.width() != buffer.width() || l.height() != buffer.height());

        let mut wrote = false;
        for y in 0..buffer.height() {
            let row = buffer.row(y).unwrap_or(&[]);
            if !stale
                && let Some(last) = self.last.as_ref()
                && last.row(y) == Some(row)
            {
                continue;
            }
            if !wrote {
                queue!(out, Hide)?;
                wrote = true;
            }
            queue!(out, MoveTo(0, y))?;
            let mut pen = Pen::default();
            for cell in row {
                pen.apply(out, cell)?;
                queue!(out, Print(cell.ch))?;
            }
            queue!(out, SetAttribute(Attribute::Reset))?;
        }

        match frame.cursor_position {
            Some((x, y)) => queue!(out, MoveTo(x, y), Show)?,
            None if wrote => queue!(out, Hide)?,
            None => {}
        }

        out.flush()?;
        self.last = Some(buffer.clone());
        Ok(())
    }
}

/// Tracks the styling state already sent to the terminal within a row, so
/// escape sequences are only emitted on change.
#[derive(Debug, Default)]
struct Pen {
    current: Option<(Color, Color, StyleFlags)>,
}

impl Pen {
    fn apply<W: Write>(&mut self, out: &mut W, cell: &Cell) -> io::Result<()> {
        let wanted = (cell.fg, cell.bg, cell.attrs);
        if self.current == Some(wanted) {
            return Ok(());
        }
        // Attribute flags can only be reliably removed via a full reset.
        queue!(out, SetAttribute(Attribute::Reset))?;
        queue!(out, SetForegroundColor(to_crossterm_color(cell.fg)))?;
        queue!(out, SetBackgroundColor(to_crossterm_color(cell.bg)))?;
        for (flag, attr) in [
            (StyleFlags::BOLD, Attribute::Bold),
            (StyleFlags::DIM, Attribute::Dim),
            (StyleFlags::ITALIC, Attribute::Italic),
            (StyleFlags::UNDERLINE, Attribute::Underlined),
            (StyleFlags::REVERSE, Attribute::Reverse),
        ] {
            if cell.attrs.contains(flag) {
                queue!(out, SetAttribute(attr))?;
            }
        }
        self.current = Some(wanted);
        Ok(())
    }
}
