#![forbid(unsafe_code)]

//! Core input and geometry types for numfield.
//!
//! This crate has no rendering or runtime concerns: it defines the canonical
//! event vocabulary the rest of the workspace speaks, plus the rectangle
//! type used for layout and mouse hit testing.

pub mod event;
pub mod geometry;

pub use event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use event::{MouseButton, MouseEvent, MouseEventKind};
pub use geometry::Rect;
