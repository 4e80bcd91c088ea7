//! Signal conditioning for polled load-cell readings.
//!
//! A [`WeightSensor`] owns a [`RawSource`] driver and a [`Clock`], and on each
//! [`poll`](WeightSensor::poll) runs throttle -> averaged read -> median ->
//! spike clamp -> exponential smoothing. No allocation, no statics.
#![no_std]

#[macro_use]
mod logging;

mod config;
mod source;
mod state;
mod throttle;
mod weight_sensor;
pub mod filters;

pub use config::{Config, ConfigError, MAX_AVERAGE_SAMPLES, MIN_SAMPLE_INTERVAL_MS};
pub use filters::Smoothing;
pub use source::{Clock, RawSource};
pub use throttle::ThrottleGate;
pub use weight_sensor::{PollError, WeightSensor};
