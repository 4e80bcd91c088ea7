#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;

use loadcell_filter::{Clock, Config, RawSource};

/// Scripted load cell. Readings are consumed front to back; an empty queue
/// reads as NaN, like a driver that timed out.
#[derive(Debug, Default)]
pub struct MockSource {
    pub ready: bool,
    pub readings: VecDeque<f32>,
    pub reads: usize,
    pub last_average_count: Option<u8>,
    pub tares: Vec<u16>,
    pub scale: Option<f32>,
}

impl MockSource {
    pub fn new(readings: &[f32]) -> Self {
        Self {
            ready: true,
            readings: readings.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl RawSource for MockSource {
    type Sample = f32;

    fn is_ready(&mut self) -> bool {
        self.ready
    }

    fn read_averaged(&mut self, samples: u8) -> f32 {
        self.reads += 1;
        self.last_average_count = Some(samples);
        self.readings.pop_front().unwrap_or(f32::NAN)
    }

    fn tare(&mut self, samples: u16) {
        self.tares.push(samples);
    }

    fn set_scale(&mut self, scale: f32) {
        self.scale = Some(scale);
    }
}

#[derive(Debug, Default)]
pub struct MockClock {
    now: Cell<u32>,
}

impl MockClock {
    pub fn new(start_ms: u32) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

/// No median, no clamp, no smoothing
pub fn raw_config() -> Config {
    Config {
        sample_interval_ms: 100,
        use_manual_ema: false,
        startup_tare: None,
        ..Config::default()
    }
}
