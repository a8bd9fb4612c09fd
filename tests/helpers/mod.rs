//! Test helpers and fixtures for ducker integration tests
//!
//! ## Tolerance Levels
//!
//! Use the appropriate tolerance from [`tolerances`] module:
//! - `FLOAT_EPSILON` (1e-6): Exact operations (passthrough, unity gain)
//! - `DSP_EPSILON` (1e-4): Gains computed through dB conversions
//! - `PERCEPTUAL_EPSILON` (0.001): Perceptual equivalence (-60dB)

#![allow(dead_code)]

pub mod tolerances;

use ducker::prelude::*;

/// Default test sample rate (matches common hardware)
pub const TEST_SAMPLE_RATE: u32 = 48000;

/// 10 ms at the test rate.
pub const TEST_BLOCK: usize = 480;

/// One video frame, the usual tick period.
pub const FRAME_SECONDS: f32 = 1.0 / 60.0;

/// In-memory host with a single "Mic" source.
pub fn test_host(channels: usize) -> (Arc<MemoryHost>, Arc<MemorySource>) {
    let host = Arc::new(MemoryHost::new(AudioConfig::new(TEST_SAMPLE_RATE, channels)));
    let mic = host.add_source("Mic");
    (host, mic)
}

pub fn test_engine(host: Arc<MemoryHost>) -> DuckerEngine {
    DuckerEngine::builder()
        .host(host)
        .build()
        .expect("Failed to create test engine")
}

/// Generate a test signal: sine wave at given frequency for specified samples.
pub fn generate_sine(frequency: f32, amplitude: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / TEST_SAMPLE_RATE as f32;
            amplitude * (std::f32::consts::TAU * frequency * t).sin()
        })
        .collect()
}

/// Calculate peak amplitude of a signal.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max)
}

/// Emit `frames` of constant `value` on every channel of `source`.
pub fn emit_constant(source: &MemorySource, channels: usize, value: f32, frames: usize) {
    let block = vec![value; frames];
    let data: Vec<&[f32]> = (0..channels).map(|_| block.as_slice()).collect();
    source.emit(&data, false);
}

/// Process one mono block of constant `value` and return it.
pub fn process_constant(ducker: &mut Ducker, value: f32, frames: usize) -> Vec<f32> {
    let mut block = vec![value; frames];
    ducker.process(&mut [&mut block]);
    block
}
