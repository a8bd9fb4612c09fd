//! Meter cells written by the audio thread once per block and read by any
//! number of UI threads. Each cell sits on its own cache line.

use crate::compat::{AtomicBool, Ordering};
use atomic_float::AtomicF32;

#[derive(Debug, Default)]
#[repr(align(64))]
struct Padded<T>(T);

/// Lock-free f32 meter value.
#[derive(Debug, Default)]
pub struct AtomicFloat(Padded<AtomicF32>);

impl AtomicFloat {
    pub fn new(value: f32) -> Self {
        Self(Padded(AtomicF32::new(value)))
    }

    #[inline]
    pub fn get(&self) -> f32 {
        self.0 .0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn set(&self, value: f32) {
        self.0 .0.store(value, Ordering::Relaxed);
    }
}

/// Lock-free boolean meter value.
#[derive(Debug, Default)]
pub struct AtomicFlag(Padded<AtomicBool>);

impl AtomicFlag {
    pub fn new(value: bool) -> Self {
        Self(Padded(AtomicBool::new(value)))
    }

    #[inline]
    pub fn get(&self) -> bool {
        self.0 .0.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn set(&self, value: bool) {
        self.0 .0.store(value, Ordering::Relaxed);
    }
}
