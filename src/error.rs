//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the vitrine crate.
#[derive(Debug)]
pub enum VitrineError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// The rendering engine could not be brought up.
    EngineLoad(String),
    /// A frame could not be drawn.
    Render(String),
    /// An image could not be decoded or uploaded.
    Image(String),
    /// TOML options parsing/serialization or validation failure.
    Options(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// An operation was called in a phase that does not allow it.
    Lifecycle(&'static str),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for VitrineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::EngineLoad(msg) => {
                write!(f, "engine load error: {msg}")
            }
            Self::Render(msg) => write!(f, "render error: {msg}"),
            Self::Image(msg) => write!(f, "image error: {msg}"),
            Self::Options(msg) => {
                write!(f, "options error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Lifecycle(msg) => write!(f, "lifecycle error: {msg}"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for VitrineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for VitrineError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for VitrineError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
