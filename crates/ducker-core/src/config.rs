//! Global audio pipeline configuration as reported by the host.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Upper bound on channels carried through the sidechain path.
pub const MAX_AUDIO_CHANNELS: usize = 8;

/// Sample rate and channel layout shared by every stream in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioConfig {
    pub sample_rate: u32,
    pub channels: usize,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            channels: 2,
        }
    }
}

impl AudioConfig {
    pub fn new(sample_rate: u32, channels: usize) -> Self {
        Self {
            sample_rate,
            channels,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(8000..=384_000).contains(&self.sample_rate) {
            return Err(Error::InvalidConfig(format!(
                "sample_rate {} out of range (8000-384000 Hz)",
                self.sample_rate
            )));
        }
        if self.channels == 0 || self.channels > MAX_AUDIO_CHANNELS {
            return Err(Error::UnsupportedChannelCount(self.channels));
        }
        Ok(())
    }

    /// Number of frames covering `ms` milliseconds.
    pub fn frames_for_ms(&self, ms: u32) -> usize {
        (self.sample_rate as u64 * ms as u64 / 1000) as usize
    }
}
