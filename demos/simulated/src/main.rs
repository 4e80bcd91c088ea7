//! Drives the weight pipeline with a simulated noisy load cell
//!
//! A 500 g load is placed on the cell halfway through. The raw signal has
//! gaussian-ish noise plus an occasional glitch, and the sensor misses a
//! conversion now and then.

use std::cell::Cell;

use loadcell_filter::{Clock, Config, PollError, RawSource, WeightSensor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

struct SimClock {
    now: Cell<u32>,
}

impl Clock for SimClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

struct SimLoadCell<'a> {
    rng: StdRng,
    clock: &'a SimClock,
}

impl RawSource for SimLoadCell<'_> {
    type Sample = f32;

    fn is_ready(&mut self) -> bool {
        self.rng.gen_bool(0.9)
    }

    fn read_averaged(&mut self, samples: u8) -> f32 {
        let load = if self.clock.now_ms() < 3000 { 0.0 } else { 500.0 };
        let mut sum = 0.0;
        for _ in 0..samples {
            sum += load + self.rng.gen_range(-4.0..4.0);
        }
        let reading = sum / samples as f32;

        if self.rng.gen_bool(0.05) {
            reading + 300.0
        } else {
            reading
        }
    }

    fn tare(&mut self, _samples: u16) {}

    fn set_scale(&mut self, _scale: f32) {}
}

fn run(label: &str, config: Config) {
    println!("{}", label);

    let clock = SimClock { now: Cell::new(0) };
    let cell = SimLoadCell {
        rng: StdRng::seed_from_u64(7),
        clock: &clock,
    };
    let mut sensor = WeightSensor::with_config(cell, &clock, config).expect("Valid config");

    for _ in 0..60 {
        match sensor.try_poll() {
            Ok(value) => println!(
                "   {:5} ms  raw {:8.2}  filtered {:8.2}",
                clock.now_ms(),
                sensor.last_raw(),
                value
            ),
            Err(PollError::Throttled) => {}
            Err(e) => println!("   {:5} ms  skipped: {}", clock.now_ms(), e),
        }
        clock.now.set(clock.now.get() + 100);
    }
    println!();
}

fn main() {
    println!("=== loadcell-filter simulation ===\n");

    run(
        "1. No filtering",
        Config {
            sample_interval_ms: 100,
            use_manual_ema: false,
            ..Config::default()
        },
    );

    run(
        "2. Median 5 + manual EMA (alpha=0.3)",
        Config {
            sample_interval_ms: 100,
            median_window: 5,
            manual_alpha: 0.3,
            ..Config::default()
        },
    );

    run(
        "3. Median 5 + spike limit 50 g + tau 0.5 s",
        Config {
            sample_interval_ms: 100,
            median_window: 5,
            spike_limit: 50.0,
            time_constant_sec: 0.5,
            ..Config::default()
        },
    );
}
