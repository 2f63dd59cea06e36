#![forbid(unsafe_code)]

//! Single-line editable text field.
//!
//! Grapheme-cluster aware editor with cursor movement and horizontal
//! scrolling. Keystrokes land in the buffer verbatim; callers that need a
//! canonical form (like the number input) normalize at commit time, so
//! transient states such as "12." or the empty string stay representable
//! while editing.

use numfield_core::event::{Event, KeyCode, KeyEvent};
use numfield_core::geometry::Rect;
use numfield_render::frame::Frame;
use numfield_style::Style;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::{Widget, draw_text, set_style_area};

/// A single-line text field.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    /// Text value.
    value: String,
    /// Cursor position (grapheme index).
    cursor: usize,
    /// Horizontal scroll offset in visual cells.
    scroll_cells: usize,
    /// Placeholder shown while the value is empty.
    placeholder: String,
    /// Base style.
    style: Style,
    /// Placeholder style.
    placeholder_style: Style,
    /// Whether the field has input focus (shows the cursor).
    focused: bool,
}

impl TextField {
    /// Create a new empty text field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text value, cursor at the end (builder).
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    /// Set the placeholder text (builder).
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the base style (builder).
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the placeholder style (builder).
    #[must_use]
    pub fn with_placeholder_style(mut self, style: Style) -> Self {
        self.placeholder_style = style;
        self
    }

    /// Get the current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value and move the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.grapheme_count();
        self.scroll_cells = 0;
    }

    /// Clear all text.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
        self.scroll_cells = 0;
    }

    /// Cursor position (grapheme index).
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the field has focus.
    #[must_use]
    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Set focus state.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if focused {
            self.cursor = self.grapheme_count();
        }
    }

    /// Handle a terminal event. Returns `true` if the value or cursor moved.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if let Event::Key(key) = event
            && key.is_press()
        {
            return self.handle_key(key);
        }
        false
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.ctrl() => {
                self.insert_char(c);
                true
            }
            KeyCode::Backspace => {
                if key.ctrl() {
                    self.delete_word_back();
                } else {
                    self.delete_char_back();
                }
                true
            }
            KeyCode::Delete => {
                if key.ctrl() {
                    self.delete_word_forward();
                } else {
                    self.delete_char_forward();
                }
                true
            }
            KeyCode::Left => {
                if key.ctrl() {
                    self.cursor = self.word_boundary_left();
                } else if self.cursor > 0 {
                    self.cursor -= 1;
                }
                true
            }
            KeyCode::Right => {
                if key.ctrl() {
                    self.cursor = self.word_boundary_right();
                } else if self.cursor < self.grapheme_count() {
                    self.cursor += 1;
                }
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                self.scroll_cells = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.grapheme_count();
                true
            }
            _ => false,
        }
    }

    fn insert_char(&mut self, c: char) {
        let byte_offset = self.grapheme_byte_offset(self.cursor);
        self.value.insert(byte_offset, c);
        self.cursor += 1;
    }

    fn delete_char_back(&mut self) {
        if self.cursor > 0 {
            let start = self.grapheme_byte_offset(self.cursor - 1);
            let end = self.grapheme_byte_offset(self.cursor);
            self.value.drain(start..end);
            self.cursor -= 1;
        }
    }

    fn delete_char_forward(&mut self) {
        if self.cursor < self.grapheme_count() {
            let start = self.grapheme_byte_offset(self.cursor);
            let end = self.grapheme_byte_offset(self.cursor + 1);
            self.value.drain(start..end);
        }
    }

    fn delete_word_back(&mut self) {
        let start = self.word_boundary_left();
        if start < self.cursor {
            let byte_start = self.grapheme_byte_offset(start);
            let byte_end = self.grapheme_byte_offset(self.cursor);
            self.value.drain(byte_start..byte_end);
            self.cursor = start;
        }
    }

    fn delete_word_forward(&mut self) {
        let end = self.word_boundary_right();
        if end > self.cursor {
            let byte_start = self.grapheme_byte_offset(self.cursor);
            let byte_end = self.grapheme_byte_offset(end);
            self.value.drain(byte_start..byte_end);
        }
    }

    /// Class of a grapheme for word scanning: whitespace, alphanumeric, or
    /// punctuation. A word is a maximal run of one class.
    fn grapheme_class(g: &str) -> u8 {
        if g.chars().all(char::is_whitespace) {
            0
        } else if g.chars().any(char::is_alphanumeric) {
            1
        } else {
            2
        }
    }

    fn word_boundary_left(&self) -> usize {
        let graphemes: Vec<&str> = self.value.graphemes(true).collect();
        let mut pos = self.cursor;
        if pos == 0 {
            return 0;
        }
        let target = Self::grapheme_class(graphemes[pos - 1]);
        while pos > 0 && Self::grapheme_class(graphemes[pos - 1]) == target {
            pos -= 1;
        }
        pos
    }

    fn word_boundary_right(&self) -> usize {
        let graphemes: Vec<&str> = self.value.graphemes(true).collect();
        let max = graphemes.len();
        let mut pos = self.cursor;
        if pos >= max {
            return max;
        }
        let target = Self::grapheme_class(graphemes[pos]);
        while pos < max && Self::grapheme_class(graphemes[pos]) == target {
            pos += 1;
        }
        pos
    }

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    fn grapheme_byte_offset(&self, grapheme_idx: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn cursor_visual_pos(&self) -> usize {
        self.value
            .graphemes(true)
            .take(self.cursor)
            .map(UnicodeWidthStr::width)
            .sum()
    }

    fn effective_scroll(&self, viewport_width: usize) -> usize {
        let cursor_visual = self.cursor_visual_pos();
        let mut scroll = self.scroll_cells;
        if cursor_visual < scroll {
            scroll = cursor_visual;
        }
        if viewport_width > 0 && cursor_visual >= scroll + viewport_width {
            scroll = cursor_visual - viewport_width + 1;
        }
        scroll
    }
}

impl Widget for TextField {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }

        set_style_area(&mut frame.buffer, area, self.style);

        let viewport_width = area.width as usize;
        let effective_scroll = self.effective_scroll(viewport_width);
        let y = area.y;

        let (text, style) = if self.value.is_empty() && !self.placeholder.is_empty() {
            (self.placeholder.as_str(), self.placeholder_style)
        } else {
            (self.value.as_str(), self.style)
        };

        let mut visual_x = 0usize;
        for g in text.graphemes(true) {
            let w = UnicodeWidthStr::width(g);
            if w == 0 {
                continue;
            }
            if visual_x + w <= effective_scroll {
                visual_x += w;
                continue;
            }
            let rel_x = visual_x.saturating_sub(effective_scroll);
            if rel_x >= viewport_width {
                break;
            }
            draw_text(
                &mut frame.buffer,
                area.x + rel_x as u16,
                y,
                g,
                style,
                area.right(),
            );
            visual_x += w;
        }

        if self.focused {
            let cursor_rel = self.cursor_visual_pos().saturating_sub(effective_scroll);
            if cursor_rel < viewport_width {
                let cursor_x = area.x + cursor_rel as u16;
                if let Some(cell) = frame.buffer.get_mut(cursor_x, y) {
                    cell.toggle_reverse();
                }
                frame.set_cursor(Some((cursor_x, y)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numfield_core::event::{KeyEvent, Modifiers};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code))
    }

    #[test]
    fn typing_appends_at_cursor() {
        let mut field = TextField::new();
        for c in "12.".chars() {
            field.handle_event(&press(KeyCode::Char(c)));
        }
        assert_eq!(field.value(), "12.");
        assert_eq!(field.cursor(), 3);
    }

    #[test]
    fn insert_mid_value() {
        let mut field = TextField::new().with_value("13");
        field.handle_event(&press(KeyCode::Left));
        field.handle_event(&press(KeyCode::Char('2')));
        assert_eq!(field.value(), "123");
    }

    #[test]
    fn backspace_and_delete() {
        let mut field = TextField::new().with_value("abc");
        field.handle_event(&press(KeyCode::Backspace));
        assert_eq!(field.value(), "ab");
        field.handle_event(&press(KeyCode::Home));
        field.handle_event(&press(KeyCode::Delete));
        assert_eq!(field.value(), "b");
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut field = TextField::new().with_value("x");
        field.handle_event(&press(KeyCode::Home));
        field.handle_event(&press(KeyCode::Backspace));
        assert_eq!(field.value(), "x");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut field = TextField::new().with_value("hi");
        field.handle_event(&press(KeyCode::Right));
        assert_eq!(field.cursor(), 2);
        field.handle_event(&press(KeyCode::End));
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn ctrl_chars_are_ignored() {
        let mut field = TextField::new();
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL));
        assert!(!field.handle_event(&event));
        assert_eq!(field.value(), "");
    }

    fn ctrl_press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code).with_modifiers(Modifiers::CTRL))
    }

    #[test]
    fn ctrl_backspace_deletes_the_word_before_the_cursor() {
        let mut field = TextField::new().with_value("12.45");
        field.handle_event(&ctrl_press(KeyCode::Backspace));
        // The trailing digit run goes; the dot is its own word.
        assert_eq!(field.value(), "12.");
        field.handle_event(&ctrl_press(KeyCode::Backspace));
        assert_eq!(field.value(), "12");
    }

    #[test]
    fn ctrl_delete_deletes_the_word_after_the_cursor() {
        let mut field = TextField::new().with_value("abc def");
        field.handle_event(&press(KeyCode::Home));
        field.handle_event(&ctrl_press(KeyCode::Delete));
        assert_eq!(field.value(), " def");
        assert_eq!(field.cursor(), 0);
    }

    #[test]
    fn ctrl_arrows_jump_word_boundaries() {
        let mut field = TextField::new().with_value("12.45");
        field.handle_event(&ctrl_press(KeyCode::Left));
        assert_eq!(field.cursor(), 3);
        field.handle_event(&ctrl_press(KeyCode::Left));
        assert_eq!(field.cursor(), 2);
        field.handle_event(&ctrl_press(KeyCode::Right));
        assert_eq!(field.cursor(), 3);
    }

    #[test]
    fn word_delete_at_the_edges_is_a_noop() {
        let mut field = TextField::new().with_value("9");
        field.handle_event(&ctrl_press(KeyCode::Delete));
        assert_eq!(field.value(), "9");
        field.handle_event(&ctrl_press(KeyCode::Backspace));
        assert_eq!(field.value(), "");
        field.handle_event(&ctrl_press(KeyCode::Backspace));
        assert_eq!(field.value(), "");
    }

    #[test]
    fn set_value_moves_cursor_to_end() {
        let mut field = TextField::new().with_value("hello");
        field.handle_event(&press(KeyCode::Home));
        field.set_value("42");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn grapheme_aware_editing() {
        let mut field = TextField::new().with_value("café");
        field.handle_event(&press(KeyCode::Backspace));
        assert_eq!(field.value(), "caf");
    }

    #[test]
    fn render_shows_value_and_cursor() {
        let mut field = TextField::new().with_value("42");
        field.set_focused(true);
        let mut frame = Frame::new(10, 1);
        field.render(Rect::new(0, 0, 6, 1), &mut frame);
        assert_eq!(frame.buffer.get(0, 0).unwrap().ch, '4');
        assert_eq!(frame.buffer.get(1, 0).unwrap().ch, '2');
        // Cursor sits after the last character.
        assert_eq!(frame.cursor_position, Some((2, 0)));
    }

    #[test]
    fn render_scrolls_to_keep_cursor_visible() {
        let mut field = TextField::new().with_value("123456789");
        field.set_focused(true);
        let mut frame = Frame::new(10, 1);
        field.render(Rect::new(0, 0, 4, 1), &mut frame);
        // Cursor is at the end; the viewport shows the tail.
        assert_eq!(frame.cursor_position, Some((3, 0)));
        assert_eq!(frame.buffer.get(0, 0).unwrap().ch, '7');
    }

    #[test]
    fn placeholder_when_empty() {
        let field = TextField::new().with_placeholder("0");
        let mut frame = Frame::new(10, 1);
        field.render(Rect::new(0, 0, 4, 1), &mut frame);
        assert_eq!(frame.buffer.get(0, 0).unwrap().ch, '0');
    }
}
