//! Centralized error type for the ducker umbrella crate.
//!
//! Wraps all subsystem errors so `?` propagates naturally across crate boundaries.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] ducker_core::Error),

    #[error("DSP: {0}")]
    Dsp(#[from] ducker_dsp::Error),

    #[error("Filter registry: {0}")]
    Registry(#[from] ducker_core::FilterRegistryError),

    #[error("No audio host configured")]
    NoHost,
}

pub type Result<T> = std::result::Result<T, Error>;
