#![forbid(unsafe_code)]

//! Widgets for numfield.
//!
//! The centerpiece is [`NumberInput`], a bounded numeric stepper with a
//! Percent/Pixel unit toggle. [`TextField`] and [`Tooltip`] are its
//! building blocks and usable on their own.

pub mod number_input;
pub mod numeric;
pub mod text_field;
pub mod tooltip;

pub use number_input::{HoverTarget, NumberInput, NumberInputLayout, TooltipTimer};
pub use numeric::Unit;
pub use text_field::TextField;
pub use tooltip::Tooltip;

use numfield_core::geometry::Rect;
use numfield_render::buffer::Buffer;
use numfield_render::cell::Cell;
use numfield_render::frame::Frame;
use numfield_style::Style;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A `Widget` is a renderable component.
///
/// Widgets render themselves into a [`Frame`] within a given [`Rect`] and
/// may claim hit regions in the frame's hit grid for mouse routing.
pub trait Widget {
    /// Render the widget into the frame at the given area.
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// Apply a style's set fields to a cell.
pub(crate) fn apply_style(cell: &mut Cell, style: Style) {
    if let Some(fg) = style.fg {
        cell.fg = fg;
    }
    if let Some(bg) = style.bg {
        cell.bg = bg;
    }
    if let Some(attrs) = style.attrs {
        cell.attrs = attrs;
    }
}

/// Apply a style to all cells in an area, preserving their content.
pub(crate) fn set_style_area(buf: &mut Buffer, area: Rect, style: Style) {
    if style.is_empty() {
        return;
    }
    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            if let Some(cell) = buf.get_mut(x, y) {
                apply_style(cell, style);
            }
        }
    }
}

/// Draw a text span at `(x, y)`, stopping at `max_x` (exclusive).
///
/// Returns the x position after the last drawn grapheme. Wide graphemes
/// advance by their display width; only the leading cell holds the char.
pub fn draw_text(
    buf: &mut Buffer,
    mut x: u16,
    y: u16,
    content: &str,
    style: Style,
    max_x: u16,
) -> u16 {
    for grapheme in content.graphemes(true) {
        let w = UnicodeWidthStr::width(grapheme) as u16;
        if w == 0 {
            continue;
        }
        if x >= max_x || x + w > max_x {
            break;
        }
        if let Some(c) = grapheme.chars().next() {
            let mut cell = Cell::from_char(c);
            apply_style(&mut cell, style);
            buf.set(x, y, cell);
        }
        x += w;
    }
    x
}
