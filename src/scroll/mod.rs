//! Scroll physics: eased offset, drag gesture tracking, drift direction.

/// Scroll controller consuming input and advancing once per frame.
pub mod controller;
/// Plain scroll/touch state and the direction enum.
pub mod state;

pub use controller::ScrollController;
pub use state::{ScrollDirection, ScrollState, TouchState};
