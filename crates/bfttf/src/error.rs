//! Error types for BFTTF transforms

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("buffer too small for BFTTF: {len} bytes, need more than {min}")]
    TooSmall { len: usize, min: usize },

    #[error("buffer length {len} is not a multiple of 4")]
    Misaligned { len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
