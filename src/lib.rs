// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Infinitely looping, distortion-shaded image gallery.
//!
//! Vitrine keeps a set of textured quads in lockstep with externally laid
//! out image slots (DOM elements in the browser, a grid preset natively),
//! scrolls them with eased wheel/drag input plus a constant drift, and
//! recycles each quad by one gallery height once it leaves the viewport so
//! a finite strip reads as endless.
//!
//! # Key entry points
//!
//! - [`gallery::Gallery`] - the controller: lifecycle phases and `tick()`
//! - [`backend::RenderBackend`] - injected rendering capability;
//!   [`gpu::WgpuBackend`] draws, [`backend::headless::HeadlessBackend`]
//!   only records
//! - [`layout::LayoutHost`] - where slot rectangles come from
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Hosts
//!
//! The `web` feature exposes `mount_gallery` to JavaScript and drives
//! `tick()` from `requestAnimationFrame`. The `viewer` feature opens a
//! native window ([`Viewer`]) that lays the slots out from a grid preset.

pub mod backend;
pub mod camera;
pub mod error;
pub mod gallery;
pub mod gpu;
pub mod input;
pub mod layout;
pub mod media;
pub mod options;
pub mod scroll;
pub mod viewport;

#[cfg(feature = "viewer")]
mod viewer;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use error::VitrineError;
pub use gallery::{FrameOutcome, Gallery, GalleryStatus, Phase};
pub use input::InputEvent;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
