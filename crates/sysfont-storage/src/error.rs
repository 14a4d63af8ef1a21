//! Error types for system-font storage operations

use crate::types::TitleId;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("container {0} not found")]
    ContainerNotFound(TitleId),

    #[error("entry {path} not found in container {title_id}")]
    EntryNotFound { title_id: TitleId, path: String },

    #[error("entry {path} in container {title_id} is empty")]
    EmptyEntry { title_id: TitleId, path: String },

    #[error("read beyond entry bounds: offset={offset}, length={length}, size={size}")]
    ReadOutOfBounds {
        offset: u64,
        length: usize,
        size: u64,
    },

    #[error("font transform failed: {0}")]
    Transform(#[from] bfttf::Error),

    #[error("no system fonts could be loaded")]
    NoFontsLoaded,
}

pub type Result<T> = std::result::Result<T, Error>;
