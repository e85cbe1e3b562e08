//! Geometry primitives and coordinate conversion
//!
//! Everything downstream of this module works in scroll-relative space.

pub mod convert;
pub mod types;

pub use convert::{to_scroll_relative, Positioning, ScrollContainer, StickyAnchor};
pub use types::*;
