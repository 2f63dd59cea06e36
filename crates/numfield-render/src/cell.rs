#![forbid(unsafe_code)]

//! Cell types.
//!
//! The [`Cell`] is the unit of the terminal grid: one character plus its
//! colors and attribute flags. The stepper renders ASCII-scale content, so a
//! plain `char` per cell is sufficient; wide graphemes occupy their leading
//! cell and the widget layer spaces accordingly.

use bitflags::bitflags;

/// A terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// The terminal's default color.
    #[default]
    Reset,
    /// One of the 256 indexed colors (0–15 are the ANSI palette).
    Ansi(u8),
    /// 24-bit RGB color.
    Rgb(u8, u8, u8),
}

bitflags! {
    /// Text attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        /// Bold.
        const BOLD      = 0b0000_0001;
        /// Dim / faint.
        const DIM       = 0b0000_0010;
        /// Italic.
        const ITALIC    = 0b0000_0100;
        /// Underline.
        const UNDERLINE = 0b0000_1000;
        /// Reverse video.
        const REVERSE   = 0b0001_0000;
    }
}

/// A single cell of the terminal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The character shown in this cell.
    pub ch: char,
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Attribute flags.
    pub attrs: StyleFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self::from_char(' ')
    }
}

impl Cell {
    /// Create an unstyled cell from a character.
    #[inline]
    #[must_use]
    pub const fn from_char(ch: char) -> Self {
        Self {
            ch,
            fg: Color::Reset,
            bg: Color::Reset,
            attrs: StyleFlags::empty(),
        }
    }

    /// Toggle reverse video, preserving other flags.
    #[inline]
    pub fn toggle_reverse(&mut self) {
        self.attrs ^= StyleFlags::REVERSE;
    }
}
