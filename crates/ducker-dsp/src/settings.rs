//! User-facing ducker settings, as stored by the host.

use ducker_core::registry::get_param_or;
use ducker_core::{FilterParams, ParameterRange, ParameterScale};
use serde::{Deserialize, Serialize};

use crate::sidechain::NO_SIDECHAIN;

/// Setting keys, shared by [`FilterParams`] maps and the serde representation.
pub mod keys {
    pub const RATIO: &str = "ratio";
    pub const THRESHOLD: &str = "threshold";
    pub const OPEN_THRESHOLD: &str = "open_threshold";
    pub const CLOSE_THRESHOLD: &str = "close_threshold";
    pub const LIMITER_THRESHOLD: &str = "limiter_threshold";
    pub const ATTACK_TIME: &str = "attack_time";
    pub const RELEASE_TIME: &str = "release_time";
    pub const HOLD_TIME: &str = "hold_time";
    pub const DUCKING_SOURCE: &str = "ducking_source";
}

pub const RATIO_RANGE: ParameterRange = ParameterRange {
    min: 1.0,
    max: 32.0,
    default: 2.0,
    scale: ParameterScale::Linear,
};

pub const THRESHOLD_RANGE: ParameterRange = ParameterRange {
    min: -60.0,
    max: 0.0,
    default: -18.0,
    scale: ParameterScale::Linear,
};

pub const OPEN_THRESHOLD_RANGE: ParameterRange = ParameterRange {
    default: -30.0,
    ..THRESHOLD_RANGE
};

pub const CLOSE_THRESHOLD_RANGE: ParameterRange = ParameterRange {
    default: -30.0,
    ..THRESHOLD_RANGE
};

pub const LIMITER_THRESHOLD_RANGE: ParameterRange = ParameterRange {
    default: 0.0,
    ..THRESHOLD_RANGE
};

pub const ATTACK_RANGE_MS: ParameterRange = ParameterRange {
    min: 1.0,
    max: 500.0,
    default: 6.0,
    scale: ParameterScale::Integer,
};

pub const RELEASE_RANGE_MS: ParameterRange = ParameterRange {
    min: 1.0,
    max: 10000.0,
    default: 60.0,
    scale: ParameterScale::Integer,
};

pub const HOLD_RANGE_MS: ParameterRange = ParameterRange {
    default: 200.0,
    ..RELEASE_RANGE_MS
};

/// Raw settings of one ducker instance. Thresholds in dBFS, times in ms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuckerSettings {
    pub ratio: f32,
    #[serde(rename = "threshold")]
    pub threshold_db: f32,
    #[serde(rename = "open_threshold")]
    pub open_threshold_db: f32,
    #[serde(rename = "close_threshold")]
    pub close_threshold_db: f32,
    #[serde(rename = "limiter_threshold")]
    pub limiter_threshold_db: f32,
    #[serde(rename = "attack_time")]
    pub attack_ms: u32,
    #[serde(rename = "release_time")]
    pub release_ms: u32,
    #[serde(rename = "hold_time")]
    pub hold_ms: u32,
    /// Source name, or `"none"` / empty for no sidechain.
    #[serde(rename = "ducking_source")]
    pub sidechain: String,
}

impl Default for DuckerSettings {
    fn default() -> Self {
        Self {
            ratio: RATIO_RANGE.default,
            threshold_db: THRESHOLD_RANGE.default,
            open_threshold_db: OPEN_THRESHOLD_RANGE.default,
            close_threshold_db: CLOSE_THRESHOLD_RANGE.default,
            limiter_threshold_db: LIMITER_THRESHOLD_RANGE.default,
            attack_ms: ATTACK_RANGE_MS.default as u32,
            release_ms: RELEASE_RANGE_MS.default as u32,
            hold_ms: HOLD_RANGE_MS.default as u32,
            sidechain: NO_SIDECHAIN.to_string(),
        }
    }
}

impl DuckerSettings {
    /// Read settings from a host key/value map; missing keys take their defaults.
    pub fn from_params(params: &FilterParams) -> Self {
        let defaults = Self::default();
        let ms = |key: &str, default: u32| {
            get_param_or(params, key, default as i64, |v| v.as_i64()).clamp(0, u32::MAX as i64)
                as u32
        };

        Self {
            ratio: get_param_or(params, keys::RATIO, defaults.ratio, |v| v.as_f32()),
            threshold_db: get_param_or(params, keys::THRESHOLD, defaults.threshold_db, |v| {
                v.as_f32()
            }),
            open_threshold_db: get_param_or(
                params,
                keys::OPEN_THRESHOLD,
                defaults.open_threshold_db,
                |v| v.as_f32(),
            ),
            close_threshold_db: get_param_or(
                params,
                keys::CLOSE_THRESHOLD,
                defaults.close_threshold_db,
                |v| v.as_f32(),
            ),
            limiter_threshold_db: get_param_or(
                params,
                keys::LIMITER_THRESHOLD,
                defaults.limiter_threshold_db,
                |v| v.as_f32(),
            ),
            attack_ms: ms(keys::ATTACK_TIME, defaults.attack_ms),
            release_ms: ms(keys::RELEASE_TIME, defaults.release_ms),
            hold_ms: ms(keys::HOLD_TIME, defaults.hold_ms),
            sidechain: params
                .get(keys::DUCKING_SOURCE)
                .and_then(|v| v.as_str())
                .map_or(defaults.sidechain, str::to_string),
        }
    }

    pub fn to_params(&self) -> FilterParams {
        ducker_core::params! {
            keys::RATIO => self.ratio,
            keys::THRESHOLD => self.threshold_db,
            keys::OPEN_THRESHOLD => self.open_threshold_db,
            keys::CLOSE_THRESHOLD => self.close_threshold_db,
            keys::LIMITER_THRESHOLD => self.limiter_threshold_db,
            keys::ATTACK_TIME => self.attack_ms,
            keys::RELEASE_TIME => self.release_ms,
            keys::HOLD_TIME => self.hold_ms,
            keys::DUCKING_SOURCE => self.sidechain.as_str(),
        }
    }

    /// Apply the settings UI's ranges to every value.
    pub fn clamped(&self) -> Self {
        let ms = |range: &ParameterRange, value: u32| range.clamp(value as f32) as u32;

        Self {
            ratio: RATIO_RANGE.clamp(self.ratio),
            threshold_db: THRESHOLD_RANGE.clamp(self.threshold_db),
            open_threshold_db: OPEN_THRESHOLD_RANGE.clamp(self.open_threshold_db),
            close_threshold_db: CLOSE_THRESHOLD_RANGE.clamp(self.close_threshold_db),
            limiter_threshold_db: LIMITER_THRESHOLD_RANGE.clamp(self.limiter_threshold_db),
            attack_ms: ms(&ATTACK_RANGE_MS, self.attack_ms),
            release_ms: ms(&RELEASE_RANGE_MS, self.release_ms),
            hold_ms: ms(&HOLD_RANGE_MS, self.hold_ms),
            sidechain: self.sidechain.clone(),
        }
    }

    /// Open threshold below close threshold: signals between the two close the
    /// gate on the way up and never let it settle open.
    pub fn hysteresis_inverted(&self) -> bool {
        self.open_threshold_db < self.close_threshold_db
    }
}
