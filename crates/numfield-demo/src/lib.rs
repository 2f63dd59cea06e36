#![forbid(unsafe_code)]

//! Demo application for the bounded numeric stepper.

pub mod app;
