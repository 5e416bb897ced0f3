//! Gabor patch stimuli for a find-the-duplicate matching game.
//!
//! `core` turns numeric parameters into grayscale patches, `round` draws the
//! sixteen parameter sets of one game round, `export` writes them to disk.

pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod round;

pub use error::{Error, Result};
