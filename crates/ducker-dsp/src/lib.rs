//! Real-time sidechain ducker: lowers a primary audio stream while a named
//! sidechain source is active.
//!
//! - [`SidechainBuffer`]: per-channel FIFO between the capture callback and the audio thread
//! - [`SidechainBinding`]: resolves the sidechain by name, retrying every 3 s
//! - [`DuckGate`]: hysteresis gate with hold, attack and release
//! - [`compute_gain`]: ratio compression plus limiting, scaled by the gate
//! - [`Ducker`]: the engine driver; [`DuckerHandle`] controls it from other threads

mod error;
pub use error::{Error, Result};

pub mod dynamics;
pub use dynamics::{compute_gain, gain_reduction_db, DuckGate, GainParams, GateParams};

pub mod sidechain;
pub use sidechain::{
    is_sidechain_name, BindingState, SidechainBinding, SidechainBuffer, NO_SIDECHAIN,
    RETRY_INTERVAL_SECONDS,
};

pub mod settings;
pub use settings::DuckerSettings;

mod ducker;
pub use ducker::{Ducker, DuckerBuilder, DuckerHandle, DuckerParams, FILTER_ID};

mod handles;
pub use handles::FilterHandle;
