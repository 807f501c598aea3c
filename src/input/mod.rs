//! Input handling: platform-agnostic gallery events.

/// Platform-agnostic input events.
pub mod event;

pub use event::InputEvent;
