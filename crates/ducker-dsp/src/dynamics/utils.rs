//! Shared utilities for dynamics processors

/// Level reported for silence. Below every reachable threshold, so silence
/// never produces gain reduction.
pub const DB_FLOOR: f32 = -96.0;

/// Shortest attack/hold/release time the rate derivation accepts.
pub const MIN_TIME_MS: f32 = 1.0;

/// Convert linear amplitude to decibels
#[inline]
pub fn amplitude_to_db(amp: f32) -> f32 {
    if amp <= 0.0 {
        DB_FLOOR
    } else {
        (20.0 * amp.log10()).max(DB_FLOOR)
    }
}

/// Convert decibels to linear amplitude
#[inline]
pub fn db_to_amplitude(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

#[inline]
pub(crate) fn ms_to_seconds(ms: f32) -> f32 {
    ms / 1000.0
}

/// Per-sample step that moves a 0..1 value across its full range in `time_ms`.
#[inline]
pub(crate) fn time_to_rate(time_ms: f32, sample_rate: u32) -> f32 {
    1.0 / (ms_to_seconds(time_ms.max(MIN_TIME_MS)) * sample_rate as f32)
}

/// Peak absolute value across channels at frame `index`.
#[inline]
pub(crate) fn peak_at<S: AsRef<[f32]>>(channels: &[S], index: usize) -> f32 {
    channels
        .iter()
        .filter_map(|ch| ch.as_ref().get(index))
        .fold(0.0f32, |peak, sample| peak.max(sample.abs()))
}
