//! # Rendering Module
//!
//! Text rendering of levels and messages for the console.

pub mod display;

pub use display::*;
