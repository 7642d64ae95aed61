//! A vi-style modal editing engine for terminal text inputs.
//!
//! [`ViEngine`] turns raw key events into Normal, Insert and Command-line
//! mode editing on any [`TextSurface`]; [`RopeSurface`] is the bundled
//! surface over a rope buffer.

pub mod app;
pub mod buffer;
pub mod engine;
pub mod error;
pub mod mode;
pub mod surface;
pub mod ui;

pub use engine::ViEngine;
pub use error::VichatError;
pub use mode::Mode;
pub use surface::{RopeSurface, SurfaceError, TextSurface};
