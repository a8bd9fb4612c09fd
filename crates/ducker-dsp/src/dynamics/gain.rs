//! Per-sample gain computer: ratio compression and limiting, scaled by the gate.

use super::utils::{amplitude_to_db, db_to_amplitude};

/// Threshold constants for [`compute_gain`], pre-converted to dB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainParams {
    pub ratio: f32,
    pub threshold_db: f32,
    pub limiter_threshold_db: f32,
}

impl GainParams {
    /// Thresholds are linear amplitudes. Ratios below 1:1 are raised to 1:1.
    pub fn new(ratio: f32, threshold: f32, limiter_threshold: f32) -> Self {
        Self {
            ratio: ratio.max(1.0),
            threshold_db: amplitude_to_db(threshold),
            limiter_threshold_db: amplitude_to_db(limiter_threshold),
        }
    }
}

/// Gain reduction in dB for a primary peak `cur_level` at duck amount `gate`.
///
/// The stricter of the compressor and limiter terms wins, then the result is
/// scaled by `gate`. Never negative.
#[inline]
pub fn gain_reduction_db(cur_level: f32, gate: f32, params: &GainParams) -> f32 {
    let level_db = amplitude_to_db(cur_level);
    let excess_db = (level_db - params.threshold_db).max(0.0);
    let compressed_db = excess_db - excess_db / params.ratio;
    let limiter_db = level_db - params.limiter_threshold_db;

    (compressed_db.max(limiter_db) * gate).max(0.0)
}

/// Linear multiplier in `(0, 1]` for a primary peak `cur_level` at duck amount `gate`.
#[inline]
pub fn compute_gain(cur_level: f32, gate: f32, params: &GainParams) -> f32 {
    if cur_level <= 0.0 || gate <= 0.0 {
        return 1.0;
    }

    let reduction_db = gain_reduction_db(cur_level, gate, params);
    if reduction_db > 0.0 {
        1.0 / db_to_amplitude(reduction_db)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn params(ratio: f32, threshold_db: f32, limiter_db: f32) -> GainParams {
        GainParams::new(
            ratio,
            db_to_amplitude(threshold_db),
            db_to_amplitude(limiter_db),
        )
    }

    #[test]
    fn test_ratio_compression_fully_ducked() {
        let p = params(2.0, -18.0, 0.0);
        let level = db_to_amplitude(-6.0);

        assert_relative_eq!(gain_reduction_db(level, 1.0, &p), 6.0, epsilon = 1e-3);
        assert_relative_eq!(compute_gain(level, 1.0, &p), 0.501, epsilon = 1e-3);
    }

    #[test]
    fn test_gate_scales_reduction() {
        let p = params(2.0, -18.0, 0.0);
        let level = db_to_amplitude(-6.0);

        assert_relative_eq!(gain_reduction_db(level, 0.5, &p), 3.0, epsilon = 1e-3);
        assert_eq!(compute_gain(level, 0.0, &p), 1.0);
    }

    #[test]
    fn test_limiter_wins_when_stricter() {
        // 1:1 ratio disables compression; limiter at -12 dB catches a -3 dB peak.
        let p = params(1.0, -18.0, -12.0);
        let level = db_to_amplitude(-3.0);

        assert_relative_eq!(gain_reduction_db(level, 1.0, &p), 9.0, epsilon = 1e-3);
    }

    #[test]
    fn test_unity_ratio_below_limiter_is_transparent() {
        let p = params(1.0, -40.0, 0.0);
        assert_eq!(compute_gain(db_to_amplitude(-6.0), 1.0, &p), 1.0);
    }

    #[test]
    fn test_silence_is_never_attenuated() {
        let p = params(32.0, -60.0, -60.0);
        assert_eq!(compute_gain(0.0, 1.0, &p), 1.0);
        assert_eq!(gain_reduction_db(0.0, 1.0, &p), 0.0);
    }

    #[test]
    fn test_below_threshold_untouched() {
        let p = params(4.0, -18.0, 0.0);
        assert_eq!(compute_gain(db_to_amplitude(-24.0), 1.0, &p), 1.0);
    }

    #[test]
    fn test_ratio_clamps_to_minimum() {
        assert_eq!(params(0.5, -18.0, 0.0).ratio, 1.0);
    }

    proptest! {
        #[test]
        fn gain_never_amplifies(
            level in 0.0f32..4.0,
            gate in 0.0f32..=1.0,
            ratio in 1.0f32..=32.0,
            threshold_db in -60.0f32..=0.0,
            limiter_db in -60.0f32..=0.0,
        ) {
            let g = compute_gain(level, gate, &params(ratio, threshold_db, limiter_db));
            prop_assert!(g > 0.0 && g <= 1.0, "gain {}", g);
        }
    }
}
