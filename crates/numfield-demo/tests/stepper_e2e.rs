#![forbid(unsafe_code)]

//! End-to-end gesture scripts driving the demo app through the simulator.

use std::time::Duration;

use numfield_core::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use numfield_demo::app::App;
use numfield_runtime::Simulator;
use numfield_widgets::Unit;
use numfield_widgets::number_input::{MSG_MAX, MSG_MIN, NumberInputLayout, TOOLTIP_TTL};

fn sim() -> Simulator<App> {
    Simulator::new(App::new(), 60, 9)
}

fn key(sim: &mut Simulator<App>, code: KeyCode) {
    sim.event(Event::Key(KeyEvent::new(code)));
}

fn type_text(sim: &mut Simulator<App>, text: &str) {
    for c in text.chars() {
        key(sim, KeyCode::Char(c));
    }
}

/// Focus (if needed), wipe the field, and type a fresh entry.
fn retype(sim: &mut Simulator<App>, text: &str) {
    if !sim.model().input().is_focused() {
        key(sim, KeyCode::Tab);
    }
    for _ in 0..12 {
        key(sim, KeyCode::Backspace);
    }
    type_text(sim, text);
}

fn commit(sim: &mut Simulator<App>, text: &str) {
    retype(sim, text);
    key(sim, KeyCode::Enter);
}

/// Render once and return the stepper's control rects.
fn layout(sim: &mut Simulator<App>) -> NumberInputLayout {
    sim.render();
    sim.model().input().layout()
}

fn click(sim: &mut Simulator<App>, x: u16, y: u16) {
    sim.event(Event::Mouse(MouseEvent::new(
        MouseEventKind::Down(MouseButton::Left),
        x,
        y,
    )));
}

fn hover(sim: &mut Simulator<App>, x: u16, y: u16) {
    sim.event(Event::Mouse(MouseEvent::new(MouseEventKind::Moved, x, y)));
}

#[test]
fn typed_over_limit_reverts_to_pre_edit_value() {
    let mut sim = sim();
    commit(&mut sim, "50");
    assert_eq!(sim.model().input().value(), 50.0);

    commit(&mut sim, "150");
    // Revert, not clamp: back to 50, not 100.
    assert_eq!(sim.model().input().value(), 50.0);
    assert_eq!(sim.model().input().display_text(), "50");
}

#[test]
fn unit_switch_clamps_an_over_limit_value() {
    let mut sim = sim();
    let rects = layout(&mut sim);
    click(&mut sim, rects.unit_pixel.x, rects.unit_pixel.y);
    assert_eq!(sim.model().input().unit(), Unit::Pixel);

    commit(&mut sim, "150");
    assert_eq!(sim.model().input().value(), 150.0);

    click(&mut sim, rects.unit_percent.x, rects.unit_percent.y);
    assert_eq!(sim.model().input().unit(), Unit::Percent);
    assert_eq!(sim.model().input().value(), 100.0);
}

#[test]
fn boundary_tooltip_expires_after_two_seconds() {
    let mut sim = sim();
    commit(&mut sim, "100");
    let rects = layout(&mut sim);

    click(&mut sim, rects.increment.x, rects.increment.y);
    assert_eq!(sim.model().input().value(), 100.0);
    assert_eq!(sim.model().input().tooltip().map(|t| t.text), Some(MSG_MAX));

    sim.advance(TOOLTIP_TTL - Duration::from_millis(1));
    assert!(sim.model().input().tooltip().is_some());
    sim.advance(Duration::from_millis(1));
    assert!(sim.model().input().tooltip().is_none());
}

#[test]
fn rapid_boundary_presses_keep_the_newest_tooltip_alive() {
    let mut sim = sim();
    commit(&mut sim, "0");
    let rects = layout(&mut sim);

    click(&mut sim, rects.decrement.x, rects.decrement.y);
    sim.advance(Duration::from_secs(1));
    click(&mut sim, rects.decrement.x, rects.decrement.y);

    // The first press's timer fires now; the second tooltip must survive.
    sim.advance(Duration::from_secs(1));
    assert_eq!(sim.model().input().tooltip().map(|t| t.text), Some(MSG_MIN));

    sim.advance(Duration::from_secs(1));
    assert!(sim.model().input().tooltip().is_none());
}

#[test]
fn comma_and_extra_dots_normalize_on_commit() {
    let mut sim = sim();
    commit(&mut sim, "12,3");
    assert_eq!(sim.model().input().value(), 12.3);

    commit(&mut sim, "12.4.5");
    assert_eq!(sim.model().input().value(), 12.45);
}

#[test]
fn sticky_tooltip_on_disabled_button_outlives_the_timer() {
    let mut sim = sim();
    commit(&mut sim, "100");
    let rects = layout(&mut sim);

    hover(&mut sim, rects.increment.x, rects.increment.y);
    assert_eq!(sim.model().input().tooltip().map(|t| t.text), Some(MSG_MAX));

    sim.advance(Duration::from_secs(10));
    assert!(sim.model().input().tooltip().is_some());

    hover(&mut sim, 0, 0);
    assert!(sim.model().input().tooltip().is_none());
}

#[test]
fn click_outside_the_field_commits_the_edit() {
    let mut sim = sim();
    let rects = layout(&mut sim);
    click(&mut sim, rects.field.x, rects.field.y);
    assert!(sim.model().input().is_focused());
    for _ in 0..4 {
        key(&mut sim, KeyCode::Backspace);
    }
    type_text(&mut sim, "33");
    click(&mut sim, 0, 0);
    assert!(!sim.model().input().is_focused());
    assert_eq!(sim.model().input().value(), 33.0);
}

#[test]
fn stepping_from_the_initial_state() {
    let mut sim = sim();
    let rects = layout(&mut sim);
    click(&mut sim, rects.increment.x, rects.increment.y);
    click(&mut sim, rects.increment.x, rects.increment.y);
    assert_eq!(sim.model().input().value(), 3.0);
    click(&mut sim, rects.decrement.x, rects.decrement.y);
    assert_eq!(sim.model().input().value(), 2.0);
    assert_eq!(sim.model().input().display_text(), "2");
}

#[test]
fn quit_key_ends_the_session_only_when_unfocused() {
    let mut sim = sim();
    key(&mut sim, KeyCode::Tab);
    key(&mut sim, KeyCode::Char('q'));
    assert!(!sim.has_quit());
    key(&mut sim, KeyCode::Enter);
    key(&mut sim, KeyCode::Char('q'));
    assert!(sim.has_quit());
}

#[test]
fn rendered_frame_shows_the_committed_value() {
    let mut sim = sim();
    commit(&mut sim, "42");
    let frame = sim.render();
    let mut text = String::new();
    for y in 0..9 {
        for x in 0..60 {
            text.push(frame.buffer.get(x, y).map_or(' ', |c| c.ch));
        }
        text.push('\n');
    }
    assert!(text.contains("42"));
    assert!(text.contains("Unit"));
    assert!(text.contains("Value"));
}
