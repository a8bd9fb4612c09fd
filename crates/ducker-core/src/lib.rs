//! Host-facing abstractions for the sidechain ducker.
//!
//! # Primary API
//!
//! - [`AudioHost`] / [`AudioSource`]: what the surrounding audio framework provides
//! - [`CaptureCallback`] / [`CapturedAudio`]: asynchronous sidechain delivery
//! - [`FilterRegistry`] / [`AudioFilter`]: caller-owned registry of filter types
//! - [`AtomicFloat`] / [`AtomicFlag`]: lock-free meter values
//! - [`MemoryHost`] / [`MemorySource`]: in-process host for offline rendering and tests
//!
//! # Example
//!
//! ```ignore
//! use ducker_core::{AudioConfig, MemoryHost};
//!
//! let host = MemoryHost::new(AudioConfig::new(48000, 2));
//! let mic = host.add_source("Mic");
//! mic.emit(&[&left, &right], false);
//! ```

pub mod compat;
pub use compat::{Arc, AtomicBool, AtomicU64, Mutex, Ordering, RwLock, Weak};

pub mod error;
pub use error::{Error, FilterRegistryError, Result};

pub(crate) mod lockfree;
pub use lockfree::{AtomicFlag, AtomicFloat};

mod config;
pub use config::{AudioConfig, MAX_AUDIO_CHANNELS};

mod host;
pub use host::{AudioHost, AudioSource, CaptureCallback, CaptureId, CapturedAudio};

mod memory;
pub use memory::{MemoryHost, MemorySource};

pub mod parameter;
pub use parameter::{ParameterRange, ParameterScale};

pub mod registry;
pub use registry::{AudioFilter, FilterConstructor, FilterParamValue, FilterParams, FilterRegistry};
