//! Perspective camera looking down -Z at the gallery plane.

/// Camera struct and projection helpers.
pub mod core;

pub use self::core::Camera;
