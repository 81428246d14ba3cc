//! intentgen core library
//!
//! Expands human-authored utterance templates into a labeled dataset for
//! intent classification and slot filling: placeholders are substituted with
//! every value of the referenced entity group, multi-word values are split
//! into per-word labels, and a fixed quota of utterances is sampled per
//! intent.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;

pub mod dataset;

pub use dataset::*;
pub use error::{Error, Result};
