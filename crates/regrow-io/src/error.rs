//! Errors raised while reading or writing images

use thiserror::Error;

/// Failure while loading or saving a [`regrow_core::PixelGrid`].
///
/// Codec failures from the `png` crate and malformed PNM headers are
/// carried as strings so callers match on a single enum.
#[derive(Error, Debug)]
pub enum IoError {
    /// Underlying file or stream failure
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),

    /// Extension or magic bytes name a format this crate cannot handle
    #[error("format not handled: {0}")]
    UnsupportedFormat(String),

    /// Header or sample data does not describe a valid image
    #[error("malformed image: {0}")]
    InvalidData(String),

    /// The codec failed while decoding
    #[error("cannot decode image: {0}")]
    DecodeError(String),

    /// The codec failed while encoding
    #[error("cannot encode image: {0}")]
    EncodeError(String),

    /// Decoded dimensions were rejected by the pixel grid
    #[error(transparent)]
    Core(#[from] regrow_core::Error),
}

pub type IoResult<T> = Result<T, IoError>;
