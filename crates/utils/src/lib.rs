//! Shared utilities for intentgen

pub mod text;
pub mod io;

pub use text::*;
pub use io::*;
