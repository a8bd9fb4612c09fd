//! Sidechain plumbing: where the sidechain comes from and how its audio
//! crosses from the capture thread to the audio thread.
//!
//! - [`SidechainBinding`] - resolves a configured source name, owns the
//!   capture-callback registration
//! - [`SidechainBuffer`] - lockstep per-channel FIFO between the two threads

mod binding;
mod buffer;

pub use binding::{
    is_sidechain_name, BindingState, SidechainBinding, NO_SIDECHAIN, RETRY_INTERVAL_SECONDS,
};
pub use buffer::SidechainBuffer;
