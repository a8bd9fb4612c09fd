//! Value ranges for user-facing ducker settings.
//!
//! Hosts clamp every control to its range before the settings reach a filter;
//! the processing core itself only guards the cases it would divide by.
//!
//! # Example
//!
//! ```
//! use ducker_core::{ParameterRange, ParameterScale};
//!
//! let attack_ms = ParameterRange {
//!     min: 1.0,
//!     max: 500.0,
//!     default: 6.0,
//!     scale: ParameterScale::Integer,
//! };
//! assert_eq!(attack_ms.clamp(0.0), 1.0);
//! assert_eq!(attack_ms.clamp(12.6), 13.0);
//! ```

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParameterScale {
    #[default]
    Linear,

    /// Whole numbers only (millisecond controls).
    Integer,
}

/// Valid range and default of one setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    pub min: f32,
    pub max: f32,
    pub default: f32,
    pub scale: ParameterScale,
}

impl ParameterRange {
    /// Clamp into `[min, max]`, rounding integer settings. NaN becomes the default.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        let value = if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        };

        match self.scale {
            ParameterScale::Linear => value,
            ParameterScale::Integer => value.round(),
        }
    }
}
