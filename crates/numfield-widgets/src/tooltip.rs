#![forbid(unsafe_code)]

//! Tooltip bubble widget.
//!
//! Renders a one-line advisory message anchored above a target rectangle,
//! shifted to stay inside the frame. Purely presentational: lifetime and
//! dismissal bookkeeping belong to whoever raises the tooltip (see
//! `NumberInput`).

use numfield_core::geometry::Rect;
use numfield_render::frame::Frame;
use numfield_style::Style;
use unicode_width::UnicodeWidthStr;

use crate::draw_text;

/// Horizontal padding inside the bubble, per side.
const PADDING: u16 = 1;

/// A one-line tooltip bubble.
#[derive(Debug, Clone)]
pub struct Tooltip {
    message: String,
    style: Style,
}

impl Tooltip {
    /// Create a tooltip with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            style: Style::new().reverse(),
        }
    }

    /// Set the bubble style (builder).
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Bubble width in cells (message plus padding).
    #[must_use]
    pub fn width(&self) -> u16 {
        UnicodeWidthStr::width(self.message.as_str()) as u16 + 2 * PADDING
    }

    /// Compute the bubble rect for an anchor, clamped into the frame area.
    ///
    /// The bubble sits on the row above the anchor, horizontally centered on
    /// it; when the anchor is on the top row it drops below instead.
    #[must_use]
    pub fn placement(&self, anchor: Rect, frame_area: Rect) -> Rect {
        let width = self.width().min(frame_area.width);
        let anchor_center = anchor.x.saturating_add(anchor.width / 2);
        let half = width / 2;
        let max_x = frame_area.width.saturating_sub(width);
        let x = anchor_center.saturating_sub(half).min(max_x);
        let y = if anchor.y > frame_area.y {
            anchor.y - 1
        } else {
            anchor.bottom().min(frame_area.bottom().saturating_sub(1))
        };
        Rect::new(x, y, width, 1)
    }

    /// Render the bubble anchored to `anchor`.
    pub fn render_at(&self, anchor: Rect, frame: &mut Frame) {
        let area = self.placement(anchor, frame.area());
        if area.is_empty() {
            return;
        }
        for x in area.x..area.right() {
            if let Some(cell) = frame.buffer.get_mut(x, area.y) {
                cell.ch = ' ';
                crate::apply_style(cell, self.style);
            }
        }
        draw_text(
            &mut frame.buffer,
            area.x.saturating_add(PADDING),
            area.y,
            &self.message,
            self.style,
            area.right(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_includes_padding() {
        let tip = Tooltip::new("hi");
        assert_eq!(tip.width(), 4);
    }

    #[test]
    fn placed_above_anchor() {
        let tip = Tooltip::new("msg");
        let area = tip.placement(Rect::new(10, 5, 3, 1), Rect::from_size(40, 10));
        assert_eq!(area.y, 4);
        assert_eq!(area.height, 1);
    }

    #[test]
    fn drops_below_when_anchor_on_top_row() {
        let tip = Tooltip::new("msg");
        let area = tip.placement(Rect::new(10, 0, 3, 1), Rect::from_size(40, 10));
        assert_eq!(area.y, 1);
    }

    #[test]
    fn clamped_to_right_edge() {
        let tip = Tooltip::new("a long tooltip message");
        let area = tip.placement(Rect::new(38, 5, 2, 1), Rect::from_size(40, 10));
        assert!(area.right() <= 40);
    }

    #[test]
    fn placement_survives_extreme_anchor_coordinates() {
        let tip = Tooltip::new("msg");
        let area = tip.placement(
            Rect::new(u16::MAX, 5, u16::MAX, 1),
            Rect::from_size(40, 10),
        );
        assert!(area.right() <= 40);
        assert_eq!(area.y, 4);
    }

    #[test]
    fn clamped_to_left_edge() {
        let tip = Tooltip::new("wide message here");
        let area = tip.placement(Rect::new(0, 5, 2, 1), Rect::from_size(40, 10));
        assert_eq!(area.x, 0);
    }

    #[test]
    fn render_draws_message() {
        let tip = Tooltip::new("no");
        let mut frame = Frame::new(20, 5);
        tip.render_at(Rect::new(5, 3, 3, 1), &mut frame);
        // Padding cell, then the message on the row above the anchor.
        let row: String = (0..20)
            .map(|x| frame.buffer.get(x, 2).unwrap().ch)
            .collect();
        assert!(row.contains("no"));
    }
}
