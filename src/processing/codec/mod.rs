// src/processing/codec/mod.rs

//! Per-file image transformation via the `image` and `webp` crates.
//!
//! # Architecture
//!
//! - [`process`]: Runs one job end to end and captures its outcome.
//! - [`resize`]: Color normalisation and width-driven Lanczos resizing.
//! - [`formats`]: Maps `OutputFormat` + quality to the matching encoder.

mod executor;
mod formats;
mod resize;

pub use executor::process;
pub use formats::encode;
pub use resize::{normalize_color, resize_to_width, target_dimensions};
