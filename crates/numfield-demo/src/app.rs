#![forbid(unsafe_code)]

//! Application model wrapping a [`NumberInput`].
//!
//! Keyboard: Tab focuses the field, Enter/Escape commits, `+`/`-` or the
//! arrow keys step. Mouse: click the field to edit, the buttons to step,
//! the toggle to switch units. `q`, Escape (unfocused), or Ctrl+C quit.

use numfield_core::event::{Event, KeyCode};
use numfield_core::geometry::Rect;
use numfield_render::frame::Frame;
use numfield_runtime::{Cmd, Model};
use numfield_style::Style;
use numfield_widgets::{NumberInput, Widget, draw_text};

/// Messages driving the demo.
#[derive(Debug)]
pub enum Msg {
    /// A terminal event, routed through the stepper.
    Terminal(Event),
    /// A tooltip's dismissal timer fired.
    TooltipExpired(u64),
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        Msg::Terminal(event)
    }
}

/// The demo application: one stepper, centered.
#[derive(Debug, Default)]
pub struct App {
    input: NumberInput,
}

impl App {
    /// Create the app in the stepper's initial state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stepper widget, for inspection in tests.
    #[must_use]
    pub fn input(&self) -> &NumberInput {
        &self.input
    }

    fn wants_quit(&self, event: &Event) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        if !key.is_press() {
            return false;
        }
        if key.is_char('c') && key.ctrl() {
            return true;
        }
        if self.input.is_focused() {
            return false;
        }
        key.is_char('q') || key.code == KeyCode::Escape
    }

    fn widget_area(frame_area: Rect) -> Rect {
        let width = 36u16.min(frame_area.width);
        let height = 3u16.min(frame_area.height);
        Rect::new(
            frame_area.x + (frame_area.width - width) / 2,
            frame_area.y + (frame_area.height - height) / 2,
            width,
            height,
        )
    }
}

impl Model for App {
    type Message = Msg;

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Terminal(event) => {
                if self.wants_quit(&event) {
                    tracing::debug!(value = self.input.value(), "quit requested");
                    return Cmd::quit();
                }
                match self.input.handle_event(&event) {
                    Some(timer) => Cmd::defer(timer.ttl, Msg::TooltipExpired(timer.generation)),
                    None => Cmd::none(),
                }
            }
            Msg::TooltipExpired(generation) => {
                self.input.expire_tooltip(generation);
                Cmd::none()
            }
        }
    }

    fn view(&self, frame: &mut Frame) {
        let area = frame.area();
        self.input.render(Self::widget_area(area), frame);
        if area.height > 0 {
            let help = "q quit · tab edit · click/+/- step";
            let width = help.chars().count() as u16;
            let x = area.width.saturating_sub(width) / 2;
            draw_text(
                &mut frame.buffer,
                x,
                area.bottom() - 1,
                help,
                Style::new().dim(),
                area.right(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numfield_core::event::{KeyEvent, Modifiers};

    #[test]
    fn quit_keys_only_apply_when_unfocused() {
        let mut app = App::new();
        assert!(app.wants_quit(&Event::Key(KeyEvent::new(KeyCode::Char('q')))));
        assert!(app.wants_quit(&Event::Key(KeyEvent::new(KeyCode::Escape))));

        app.update(Msg::Terminal(Event::Key(KeyEvent::new(KeyCode::Tab))));
        assert!(app.input().is_focused());
        assert!(!app.wants_quit(&Event::Key(KeyEvent::new(KeyCode::Char('q')))));
        // Ctrl+C always quits.
        assert!(app.wants_quit(&Event::Key(
            KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL)
        )));
    }

    #[test]
    fn widget_area_is_centered_and_clamped() {
        let area = App::widget_area(Rect::from_size(80, 24));
        assert_eq!(area.width, 36);
        assert_eq!(area.height, 3);
        assert_eq!(area.x, 22);

        let tiny = App::widget_area(Rect::from_size(10, 2));
        assert_eq!(tiny.width, 10);
        assert_eq!(tiny.height, 2);
    }
}
