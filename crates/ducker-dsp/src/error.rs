//! Error types for ducker-dsp

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Audio configuration rejected: {0}")]
    AudioConfig(#[from] ducker_core::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
