//! # Ducker - Real-time Sidechain Ducking
//!
//! Lowers the volume of a primary audio stream while a chosen sidechain
//! source (a microphone, a voice channel) is producing sound.
//!
//! ## Architecture
//!
//! Ducker is an umbrella crate that coordinates:
//! - **ducker-core** - Host traits, capture callbacks, filter registry, lock-free meters
//! - **ducker-dsp** - Sidechain buffer and binding, duck gate, gain computer, engine driver
//!
//! ## Quick Start
//!
//! ```ignore
//! use ducker::prelude::*;
//!
//! let host = Arc::new(MemoryHost::new(AudioConfig::new(48000, 2)));
//! let mic = host.add_source("Mic");
//!
//! let engine = DuckerEngine::builder().host(host).build()?;
//! let mut filter = engine.instance("ducker_filter", &params! {
//!     "ducking_source" => "Mic",
//!     "ratio" => 4.0,
//! })?;
//!
//! filter.tick(1.0 / 60.0);
//! mic.emit(&[&voice_l, &voice_r], false);
//! filter.process(&mut [&mut music_l, &mut music_r]);
//! ```

/// Re-export of ducker-core for direct access
pub use ducker_core as core;

/// Re-export of ducker-dsp for direct access
pub use ducker_dsp as dsp;

pub use ducker_core::{
    params, Arc, AtomicFlag, AtomicFloat, AudioConfig, AudioFilter, AudioHost, AudioSource,
    CaptureCallback, CaptureId, CapturedAudio, FilterParamValue, FilterParams, FilterRegistry,
    MemoryHost, MemorySource, ParameterRange,
};

pub use ducker_dsp::{
    BindingState, DuckGate, Ducker, DuckerBuilder, DuckerHandle, DuckerParams, DuckerSettings,
    FilterHandle, FILTER_ID, NO_SIDECHAIN, RETRY_INTERVAL_SECONDS,
};

mod error;
pub use error::{Error, Result};

mod builder;
pub use builder::DuckerEngineBuilder;

mod engine;
pub use engine::DuckerEngine;

/// Commonly used types
pub mod prelude {
    pub use crate::{
        params, Arc, AudioConfig, AudioFilter, AudioHost, BindingState, Ducker, DuckerEngine,
        DuckerHandle, DuckerSettings, MemoryHost, MemorySource, FILTER_ID,
    };
}
