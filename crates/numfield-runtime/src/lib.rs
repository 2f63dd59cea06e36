#![forbid(unsafe_code)]

//! Elm-style runtime for numfield applications.
//!
//! [`program::Program`] owns the terminal session and drives the
//! update/view loop; [`simulator::Simulator`] runs the same loop headless
//! with a virtual clock, for tests.

pub mod program;
pub mod simulator;

pub use program::{Cmd, Model, Program};
pub use simulator::Simulator;
