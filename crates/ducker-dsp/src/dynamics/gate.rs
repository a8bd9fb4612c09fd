//! Open/close gate with hold, driving the 0..1 duck amount.

use super::utils::time_to_rate;

/// Per-sample constants for [`DuckGate::process`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateParams {
    /// Linear sidechain level above which the gate opens.
    pub open_threshold: f32,
    /// Linear sidechain level below which the gate closes.
    pub close_threshold: f32,
    /// Per-sample rise of the duck amount.
    pub attack_rate: f32,
    /// Per-sample fall of the duck amount.
    pub release_rate: f32,
    /// Samples the duck keeps rising after the gate closes.
    pub hold_samples: u64,
}

impl GateParams {
    pub fn new(
        open_threshold: f32,
        close_threshold: f32,
        attack_ms: f32,
        release_ms: f32,
        hold_ms: f32,
        sample_rate: u32,
    ) -> Self {
        let hold_seconds = hold_ms.max(0.0) / 1000.0;
        Self {
            open_threshold,
            close_threshold,
            attack_rate: time_to_rate(attack_ms, sample_rate),
            release_rate: time_to_rate(release_ms, sample_rate),
            hold_samples: (hold_seconds as f64 * sample_rate as f64).round() as u64,
        }
    }
}

/// Comparator state plus the smoothed gate value.
///
/// `is_open` follows the sidechain with hysteresis; `level` is the smoothed
/// 0..1 amount of ducking that rises while open (or while holding) and falls
/// once the hold window has elapsed.
#[derive(Debug, Clone, Default)]
pub struct DuckGate {
    level: f32,
    is_open: bool,
    held_samples: u64,
}

impl DuckGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Smoothed duck amount, always within `0.0..=1.0`.
    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Samples spent in the hold window since the gate last opened.
    pub fn held_samples(&self) -> u64 {
        self.held_samples
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance one sample with the sidechain peak `sc_level`; returns the new level.
    #[inline]
    pub fn process(&mut self, sc_level: f32, params: &GateParams) -> f32 {
        if sc_level > params.open_threshold {
            self.is_open = true;
            self.held_samples = 0;
        } else if sc_level < params.close_threshold {
            self.is_open = false;
        }

        if self.is_open {
            self.level = (self.level + params.attack_rate).min(1.0);
        } else if self.held_samples < params.hold_samples {
            self.held_samples += 1;
            self.level = (self.level + params.attack_rate).min(1.0);
        } else {
            self.level = (self.level - params.release_rate).max(0.0);
        }

        self.level
    }
}
