use crate::filters::{EmaFilter, MedianFilter};
use crate::throttle::ThrottleGate;

/// Mutable pipeline state, touched only by polling and reconfiguration
#[derive(Debug, Clone)]
pub(crate) struct State {
    pub throttle: ThrottleGate,
    pub median: MedianFilter,
    /// Holds the last filtered value
    pub ema: EmaFilter,
    pub last_raw: f32,
    /// `None` until the first accepted sample
    pub last_update_ms: Option<u32>,
}

impl State {
    pub fn new(median_window: usize) -> Self {
        Self {
            throttle: ThrottleGate::new(),
            median: MedianFilter::new(median_window),
            ema: EmaFilter::new(),
            last_raw: 0.0,
            last_update_ms: None,
        }
    }
}
