use std::io;
use thiserror::Error;

/// Errors raised at the crate's edges (input parsing and file export).
///
/// Rendering and round generation are total on valid parameters and never fail.
#[derive(Error, Debug)]
pub enum Error {
    /// Carrier mode other than `cos` or `sin`.
    #[error("mode must be 'cos' or 'sin', got '{0}'")]
    InvalidMode(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("metadata serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
