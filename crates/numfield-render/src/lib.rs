#![forbid(unsafe_code)]

//! Cell grid, frame, and terminal presenter.
//!
//! The render crate owns the offscreen representation of a UI: a [`Buffer`]
//! of styled cells, wrapped by a [`Frame`] that adds cursor placement and a
//! mouse hit-test grid, and a [`Presenter`] that writes frames to a terminal
//! with row-level diffing.

pub mod buffer;
pub mod cell;
pub mod frame;
pub mod presenter;

pub use buffer::Buffer;
pub use cell::{Cell, Color, StyleFlags};
pub use frame::{Frame, HitCell, HitGrid, HitId, HitRegion};
pub use presenter::Presenter;
