//! Colors and styling shared by every screen.

pub mod colors;
pub mod styles;

pub use styles::*;
