//! Error types for NACP parsing

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("NACP must be exactly {expected:#x} bytes, got {actual:#x}")]
    InvalidSize { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
