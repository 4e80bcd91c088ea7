/// Filter stages for the weight pipeline
///
/// Stages run in order median -> spike clamp -> exponential smoothing, all on
/// scaled f32 readings.
mod ema;
mod median;
mod spike;

pub use ema::EmaFilter;
pub use median::{MAX_MEDIAN_WINDOW, MedianFilter};
pub use spike::SpikeClamp;

/// Elapsed time below this (seconds) is treated as unusable for smoothing
const MIN_DT_SEC: f32 = 0.0001;

/// Floor for time-constant alpha so the output never freezes completely
const MIN_ALPHA: f32 = 0.0001;

/// Exponential smoothing strategy
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Smoothing {
    /// No smoothing, output follows the clamped candidate
    Passthrough,

    /// Fixed alpha every update. Requires: 0.0 < alpha < 1.0
    Manual { alpha: f32 },

    /// Alpha derived from elapsed time: dt / (tau + dt)
    /// Requires: tau_sec > 0.0
    TimeConstant { tau_sec: f32 },
}

impl Smoothing {
    /// Pick the active strategy. A positive time constant wins over manual EMA,
    /// and manual EMA only applies for alpha strictly inside (0.0, 1.0).
    pub fn resolve(time_constant_sec: f32, use_manual_ema: bool, manual_alpha: f32) -> Self {
        if time_constant_sec > 0.0 {
            Smoothing::TimeConstant {
                tau_sec: time_constant_sec,
            }
        } else if use_manual_ema && manual_alpha > 0.0 && manual_alpha < 1.0 {
            Smoothing::Manual {
                alpha: manual_alpha,
            }
        } else {
            Smoothing::Passthrough
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Smoothing::Passthrough)
    }

    /// Alpha for the next update, `None` when smoothing is off.
    ///
    /// `elapsed_ms` is the time since the last accepted sample (`None` before
    /// the first one). Time-constant mode falls back to `interval_ms` when
    /// there is no usable elapsed time.
    pub fn alpha(&self, elapsed_ms: Option<u32>, interval_ms: u16) -> Option<f32> {
        match *self {
            Smoothing::Passthrough => None,

            Smoothing::Manual { alpha } => Some(alpha),

            Smoothing::TimeConstant { tau_sec } => {
                let fallback = interval_ms as f32 / 1000.0;
                let dt = match elapsed_ms {
                    Some(ms) => ms as f32 / 1000.0,
                    None => fallback,
                };
                let dt = if dt < MIN_DT_SEC { fallback } else { dt };

                Some((dt / (tau_sec + dt)).clamp(MIN_ALPHA, 1.0))
            }
        }
    }
}
