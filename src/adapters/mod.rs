//! Adapter implementations for port traits.
//!
//! - `outline` — TrueType/OpenType fonts loaded from disk
//! - `bitmap` — built-in 8x8 bitmap glyphs, always available

pub mod bitmap;
pub mod outline;
