//! Sample-level dynamics for the ducker.
//!
//! - [`DuckGate`] - Open/close comparator with hysteresis and hold, smoothing
//!   a 0..1 duck amount with linear attack and release ramps
//! - [`compute_gain`] - Ratio compression and limiting of the primary signal,
//!   scaled by the duck amount
//!
//! ## Example
//!
//! ```ignore
//! let gate_params = GateParams::new(open, close, 6.0, 60.0, 200.0, 48000);
//! let gain_params = GainParams::new(2.0, threshold, limiter_threshold);
//!
//! let duck = gate.process(sidechain_peak, &gate_params);
//! let gain = compute_gain(primary_peak, duck, &gain_params);
//! ```

pub mod utils;

mod gain;
mod gate;

pub use gain::{compute_gain, gain_reduction_db, GainParams};
pub use gate::{DuckGate, GateParams};
