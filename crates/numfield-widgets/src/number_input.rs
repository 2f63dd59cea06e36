#![forbid(unsafe_code)]

//! Bounded numeric stepper input with a unit toggle.
//!
//! One interactive component: a Percent/Pixel unit toggle, an editable
//! numeric field, and decrement/increment buttons with boundary tooltips.
//! The widget owns the interaction state machine; the host feeds it events
//! and schedules the one side effect it asks for (a deferred tooltip
//! dismissal, see [`TooltipTimer`]).
//!
//! # Commit vs. revert
//!
//! Typed edits are validated when the field loses focus. An unparseable
//! entry falls back to the committed value; an out-of-range entry is clamped
//! — except a typed value above 100 under Percent, which is *rejected*: the
//! field rolls back to the value it held when editing began. Switching units
//! clamps instead, because changing the unit is not a rejected edit.

use std::cell::Cell as StdCell;
use std::time::Duration;

use numfield_core::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use numfield_core::geometry::Rect;
use numfield_render::frame::{Frame, HitId, HitRegion};
use numfield_style::Style;
use tracing::debug;

use crate::numeric::{Unit, clamp, format_value, normalize, parse_number};
use crate::text_field::TextField;
use crate::tooltip::Tooltip;
use crate::{Widget, draw_text, set_style_area};

/// How long a boundary-violation tooltip stays up before auto-dismissal.
pub const TOOLTIP_TTL: Duration = Duration::from_secs(2);

/// Tooltip text for the upper boundary.
pub const MSG_MAX: &str = "Value must smaller than 100";

/// Tooltip text for the lower boundary.
pub const MSG_MIN: &str = "Value must greater than 0";

/// Hit IDs claimed by the widget, for mouse routing.
pub const HIT_DECREMENT: HitId = HitId::new(1);
pub const HIT_INCREMENT: HitId = HitId::new(2);
pub const HIT_FIELD: HitId = HitId::new(3);
pub const HIT_UNIT_PERCENT: HitId = HitId::new(4);
pub const HIT_UNIT_PIXEL: HitId = HitId::new(5);

/// Which control currently has pointer hover. At most one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverTarget {
    /// Nothing hovered.
    #[default]
    None,
    /// The decrement button.
    Decrement,
    /// The increment button.
    Increment,
    /// The editable field.
    Field,
}

/// The two stepper buttons; used to anchor tooltips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepButton {
    /// The "−" button.
    Decrement,
    /// The "+" button.
    Increment,
}

/// A raised tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipState {
    /// Advisory message.
    pub text: &'static str,
    /// Button the bubble is anchored to.
    pub anchor: StepButton,
    /// Sticky tooltips (hover over a disabled button) have no TTL; they
    /// clear when the hover leaves or a higher-priority transition fires.
    pub sticky: bool,
    generation: u64,
}

/// A request to schedule the deferred dismissal of a timed tooltip.
///
/// The host delivers `expire_tooltip(generation)` after `ttl`. Raising a
/// newer tooltip bumps the live generation, so a stale timer firing is a
/// no-op: the cancel-then-reschedule guard, expressed as generation
/// stamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipTimer {
    /// Generation stamp of the tooltip this timer belongs to.
    pub generation: u64,
    /// Delay before delivery.
    pub ttl: Duration,
}

/// Rectangles of the widget's controls from the last render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NumberInputLayout {
    /// The "%" toggle option.
    pub unit_percent: Rect,
    /// The "px" toggle option.
    pub unit_pixel: Rect,
    /// The "−" button.
    pub decrement: Rect,
    /// The editable field.
    pub field: Rect,
    /// The "+" button.
    pub increment: Rect,
}

/// Bounded numeric stepper input.
#[derive(Debug, Clone)]
pub struct NumberInput {
    unit: Unit,
    committed: f64,
    previous_valid: f64,
    field: TextField,
    focused: bool,
    hover: HoverTarget,
    tooltip: Option<TooltipState>,
    generation: u64,
    /// Control rects from the last render, for mouse hit testing.
    layout: StdCell<NumberInputLayout>,
    label_style: Style,
}

impl Default for NumberInput {
    fn default() -> Self {
        Self::new()
    }
}

impl NumberInput {
    /// Initial committed value.
    pub const INITIAL_VALUE: f64 = 1.0;

    /// Create the widget in its initial state: Percent, value 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            unit: Unit::Percent,
            committed: Self::INITIAL_VALUE,
            previous_valid: Self::INITIAL_VALUE,
            field: TextField::new().with_value(format_value(Self::INITIAL_VALUE)),
            focused: false,
            hover: HoverTarget::None,
            tooltip: None,
            generation: 0,
            layout: StdCell::new(NumberInputLayout::default()),
            label_style: Style::new().dim(),
        }
    }

    /// Set the label style (builder).
    #[must_use]
    pub fn with_label_style(mut self, style: Style) -> Self {
        self.label_style = style;
        self
    }

    // --- State accessors ---

    /// Current unit.
    #[must_use]
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Last committed value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.committed
    }

    /// The literal text currently shown in the field.
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.field.value()
    }

    /// Whether the field has input focus.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Current hover target.
    #[must_use]
    pub fn hover(&self) -> HoverTarget {
        self.hover
    }

    /// The raised tooltip, if any.
    #[must_use]
    pub fn tooltip(&self) -> Option<&TooltipState> {
        self.tooltip.as_ref()
    }

    /// Control rects from the last render pass.
    #[must_use]
    pub fn layout(&self) -> NumberInputLayout {
        self.layout.get()
    }

    /// Decrement is disabled at the Percent floor. Never disabled for Pixel.
    #[must_use]
    pub fn decrement_disabled(&self) -> bool {
        self.unit == Unit::Percent && self.committed == 0.0
    }

    /// Increment is disabled at the Percent ceiling. Never disabled for Pixel.
    #[must_use]
    pub fn increment_disabled(&self) -> bool {
        self.unit == Unit::Percent && self.committed == 100.0
    }

    // --- Transitions ---

    /// The field gains focus: snapshot the rollback value, clear the tooltip.
    pub fn focus(&mut self) {
        if self.focused {
            return;
        }
        self.focused = true;
        self.previous_valid = self.committed;
        self.tooltip = None;
        self.field.set_focused(true);
        debug!(value = self.committed, "field focused");
    }

    /// The field loses focus: validate the typed entry.
    ///
    /// A parsed value above 100 under Percent is rejected and the pre-edit
    /// value restored (revert). Anything else goes through the general
    /// clamp, with the committed value as fallback for unparseable text.
    pub fn commit(&mut self) {
        self.focused = false;
        self.field.set_focused(false);
        let parsed = parse_number(&normalize(self.field.value()));
        if self.unit == Unit::Percent && parsed.is_some_and(|p| p > 100.0) {
            debug!(
                rejected = parsed,
                restored = self.previous_valid,
                "over-limit edit reverted"
            );
            self.committed = self.previous_valid;
            self.field.set_value(format_value(self.committed));
        } else {
            let source = parsed.unwrap_or(self.committed);
            let validated = clamp(Some(source), self.unit);
            debug!(committed = validated, "edit committed");
            self.committed = validated;
            self.previous_valid = validated;
            self.field.set_value(format_value(validated));
        }
        self.tooltip = None;
    }

    /// Step the value up by 1, refusing at the Percent ceiling.
    pub fn increment(&mut self) -> Option<TooltipTimer> {
        let candidate = self.committed + 1.0;
        if self.unit == Unit::Percent && candidate > 100.0 {
            debug!(value = self.committed, "increment refused at ceiling");
            return Some(self.raise_timed(MSG_MAX, StepButton::Increment));
        }
        self.apply(candidate);
        None
    }

    /// Step the value down by 1, refusing at the floor.
    pub fn decrement(&mut self) -> Option<TooltipTimer> {
        let candidate = self.committed - 1.0;
        if candidate < 0.0 {
            debug!(value = self.committed, "decrement refused at floor");
            return Some(self.raise_timed(MSG_MIN, StepButton::Decrement));
        }
        self.apply(candidate);
        None
    }

    /// Switch the unit. Entering Percent clamps an over-limit value to 100
    /// (clamp, not revert: a unit switch is not a rejected edit).
    pub fn set_unit(&mut self, unit: Unit) {
        if unit == self.unit {
            return;
        }
        debug!(from = self.unit.label(), to = unit.label(), "unit switched");
        self.unit = unit;
        if self.unit == Unit::Percent && self.committed > 100.0 {
            self.apply(100.0);
        }
    }

    /// Record a pointer hover change.
    ///
    /// Entering a disabled button raises its boundary tooltip with no TTL.
    /// Leaving a button clears the tooltip unless the field is focused.
    pub fn set_hover(&mut self, target: HoverTarget) {
        if target == self.hover {
            return;
        }
        let left_button = matches!(
            self.hover,
            HoverTarget::Decrement | HoverTarget::Increment
        );
        self.hover = target;
        // Focus-only clearing: a focused field keeps the tooltip alive.
        if left_button && !self.focused {
            self.tooltip = None;
        }
        match target {
            HoverTarget::Decrement if self.decrement_disabled() => {
                self.raise_sticky(MSG_MIN, StepButton::Decrement);
            }
            HoverTarget::Increment if self.increment_disabled() => {
                self.raise_sticky(MSG_MAX, StepButton::Increment);
            }
            _ => {}
        }
    }

    /// Deferred tooltip dismissal.
    ///
    /// Only clears the tooltip that scheduled this timer: sticky tooltips
    /// and newer generations are left alone.
    pub fn expire_tooltip(&mut self, generation: u64) {
        if let Some(tip) = &self.tooltip
            && !tip.sticky
            && tip.generation == generation
        {
            self.tooltip = None;
        }
    }

    fn apply(&mut self, value: f64) {
        self.committed = value;
        self.previous_valid = value;
        self.field.set_value(format_value(value));
    }

    fn raise_timed(&mut self, text: &'static str, anchor: StepButton) -> TooltipTimer {
        self.generation += 1;
        self.tooltip = Some(TooltipState {
            text,
            anchor,
            sticky: false,
            generation: self.generation,
        });
        TooltipTimer {
            generation: self.generation,
            ttl: TOOLTIP_TTL,
        }
    }

    fn raise_sticky(&mut self, text: &'static str, anchor: StepButton) {
        self.generation += 1;
        self.tooltip = Some(TooltipState {
            text,
            anchor,
            sticky: true,
            generation: self.generation,
        });
    }

    // --- Event routing ---

    /// Route a raw event through the state machine.
    ///
    /// Returns a [`TooltipTimer`] when a transition raised a timed tooltip;
    /// the host schedules it as a deferred `expire_tooltip` call.
    pub fn handle_event(&mut self, event: &Event) -> Option<TooltipTimer> {
        match event {
            Event::Key(key) if key.is_press() => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => None,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Option<TooltipTimer> {
        if self.focused {
            match key.code {
                KeyCode::Enter | KeyCode::Escape | KeyCode::Tab => self.commit(),
                _ => {
                    self.field.handle_event(&Event::Key(*key));
                }
            }
            None
        } else {
            match key.code {
                KeyCode::Tab => {
                    self.focus();
                    None
                }
                KeyCode::Char('+') | KeyCode::Up => self.increment(),
                KeyCode::Char('-') | KeyCode::Down => self.decrement(),
                _ => None,
            }
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> Option<TooltipTimer> {
        let layout = self.layout.get();
        let (x, y) = mouse.position();
        match mouse.kind {
            MouseEventKind::Moved => {
                self.set_hover(Self::target_at(&layout, x, y));
                None
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if layout.field.contains(x, y) {
                    self.focus();
                    return None;
                }
                // Clicking anywhere else ends an active edit first.
                if self.focused {
                    self.commit();
                }
                if layout.decrement.contains(x, y) {
                    self.decrement()
                } else if layout.increment.contains(x, y) {
                    self.increment()
                } else if layout.unit_percent.contains(x, y) {
                    self.set_unit(Unit::Percent);
                    None
                } else if layout.unit_pixel.contains(x, y) {
                    self.set_unit(Unit::Pixel);
                    None
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn target_at(layout: &NumberInputLayout, x: u16, y: u16) -> HoverTarget {
        if layout.decrement.contains(x, y) {
            HoverTarget::Decrement
        } else if layout.increment.contains(x, y) {
            HoverTarget::Increment
        } else if layout.field.contains(x, y) {
            HoverTarget::Field
        } else {
            HoverTarget::None
        }
    }

    // --- Rendering ---

    fn compute_layout(area: Rect) -> NumberInputLayout {
        // Rows: unit toggle / tooltip lane / stepper cluster.
        let label_width = 6u16;
        let unit_y = area.y;
        let stepper_y = area.y.saturating_add(2);
        let x0 = area.x.saturating_add(label_width);
        NumberInputLayout {
            unit_percent: Rect::new(x0, unit_y, 3, 1),
            unit_pixel: Rect::new(x0.saturating_add(4), unit_y, 4, 1),
            decrement: Rect::new(x0, stepper_y, 3, 1),
            field: Rect::new(x0.saturating_add(4), stepper_y, 8, 1),
            increment: Rect::new(x0.saturating_add(13), stepper_y, 3, 1),
        }
    }

    fn toggle_style(&self, option: Unit) -> Style {
        if self.unit == option {
            Style::new().reverse().bold()
        } else {
            Style::new().dim()
        }
    }

    fn button_style(&self, button: StepButton, disabled: bool) -> Style {
        let hovered = matches!(
            (button, self.hover),
            (StepButton::Decrement, HoverTarget::Decrement)
                | (StepButton::Increment, HoverTarget::Increment)
        );
        if disabled {
            Style::new().dim()
        } else if hovered {
            Style::new().reverse()
        } else {
            Style::new().bold()
        }
    }
}

impl Widget for NumberInput {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.width < 22 || area.height < 3 {
            return;
        }
        let layout = Self::compute_layout(area);
        self.layout.set(layout);

        // Labels.
        draw_text(
            &mut frame.buffer,
            area.x,
            layout.unit_percent.y,
            "Unit",
            self.label_style,
            area.right(),
        );
        draw_text(
            &mut frame.buffer,
            area.x,
            layout.field.y,
            "Value",
            self.label_style,
            area.right(),
        );

        // Unit toggle.
        draw_text(
            &mut frame.buffer,
            layout.unit_percent.x,
            layout.unit_percent.y,
            " % ",
            self.toggle_style(Unit::Percent),
            area.right(),
        );
        draw_text(
            &mut frame.buffer,
            layout.unit_pixel.x,
            layout.unit_pixel.y,
            " px ",
            self.toggle_style(Unit::Pixel),
            area.right(),
        );

        // Stepper buttons.
        draw_text(
            &mut frame.buffer,
            layout.decrement.x,
            layout.decrement.y,
            " - ",
            self.button_style(StepButton::Decrement, self.decrement_disabled()),
            area.right(),
        );
        draw_text(
            &mut frame.buffer,
            layout.increment.x,
            layout.increment.y,
            " + ",
            self.button_style(StepButton::Increment, self.increment_disabled()),
            area.right(),
        );

        // Field, with focus/hover indication.
        self.field.render(layout.field, frame);
        if self.focused || self.hover == HoverTarget::Field {
            set_style_area(
                &mut frame.buffer,
                layout.field,
                Style::new().attrs(numfield_render::cell::StyleFlags::UNDERLINE),
            );
        }

        // Hit regions for mouse routing.
        let hits = &mut frame.hit_grid;
        hits.claim(layout.unit_percent, HIT_UNIT_PERCENT, HitRegion::Toggle);
        hits.claim(layout.unit_pixel, HIT_UNIT_PIXEL, HitRegion::Toggle);
        hits.claim(layout.decrement, HIT_DECREMENT, HitRegion::Button);
        hits.claim(layout.field, HIT_FIELD, HitRegion::Field);
        hits.claim(layout.increment, HIT_INCREMENT, HitRegion::Button);

        // Tooltip bubble, anchored to the button that raised it.
        if let Some(tip) = &self.tooltip {
            let anchor = match tip.anchor {
                StepButton::Decrement => layout.decrement,
                StepButton::Increment => layout.increment,
            };
            Tooltip::new(tip.text).render_at(anchor, frame);
        }
    }
}
