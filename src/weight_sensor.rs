use num_traits::AsPrimitive;

use crate::config::{self, Config, ConfigError};
use crate::filters::{MAX_MEDIAN_WINDOW, SpikeClamp, Smoothing};
use crate::source::{Clock, RawSource};
use crate::state::State;

/// Reason a poll produced no new value. None of these are fatal; the last
/// published value stays available.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollError {
    /// Called again before the sample interval elapsed
    Throttled,
    /// Raw source not ready, retry next cycle
    NotReady,
    /// Raw source returned NaN or infinity
    InvalidSample,
}

impl core::fmt::Display for PollError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PollError::Throttled => write!(f, "sample interval not elapsed"),
            PollError::NotReady => write!(f, "load cell not ready"),
            PollError::InvalidSample => write!(f, "non-finite reading discarded"),
        }
    }
}

/// Polled load-cell reader with a median -> spike clamp -> EMA filter chain.
pub struct WeightSensor<S, C> {
    source: S,
    clock: C,
    config: Config,
    smoothing: Smoothing,
    spike: SpikeClamp,
    state: State,
}

impl<S, C> WeightSensor<S, C>
where
    S: RawSource,
    C: Clock,
{
    /// Bind to a source with the default configuration.
    ///
    /// Applies the default scale and tares the source.
    pub fn new(source: S, clock: C) -> Self {
        Self::build(source, clock, Config::default())
    }

    pub fn with_config(source: S, clock: C, config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(source, clock, config))
    }

    fn build(mut source: S, clock: C, config: Config) -> Self {
        source.set_scale(config.scale);
        if let Some(samples) = config.startup_tare {
            source.tare(samples);
        }

        log_info!(
            "weight sensor started: interval {} ms, median {}",
            config.sample_interval_ms,
            config.median_window
        );

        Self {
            source,
            clock,
            smoothing: config.smoothing(),
            spike: SpikeClamp::new(config.spike_limit),
            state: State::new(usize::from(config.median_window)),
            config,
        }
    }

    /// Run one pipeline cycle. Returns the new filtered value, or `None` if
    /// this cycle produced nothing.
    pub fn poll(&mut self) -> Option<f32> {
        self.try_poll().ok()
    }

    /// Like [`poll`](Self::poll) but reports why no value was produced.
    pub fn try_poll(&mut self) -> Result<f32, PollError> {
        let now = self.clock.now_ms();

        if !self
            .state
            .throttle
            .try_acquire(now, self.config.sample_interval_ms)
        {
            return Err(PollError::Throttled);
        }

        if !self.source.is_ready() {
            log_debug!("load cell not ready at {} ms", now);
            return Err(PollError::NotReady);
        }

        let raw: f32 = self
            .source
            .read_averaged(self.config.average_samples)
            .as_();
        if !raw.is_finite() {
            log_warn!("discarding non-finite load cell reading");
            return Err(PollError::InvalidSample);
        }
        self.state.last_raw = raw;

        let median = self.state.median.apply(raw);
        let limited = self.spike.apply(median, self.state.ema.previous());

        let elapsed = self.state.last_update_ms.map(|last| now.wrapping_sub(last));
        let alpha = self.smoothing.alpha(elapsed, self.config.sample_interval_ms);
        let filtered = self.state.ema.apply(limited, alpha);

        self.state.last_update_ms = Some(now);
        Ok(filtered)
    }

    /// Zero the source. Filter state is left alone.
    pub fn tare(&mut self, samples: u16) {
        self.source.tare(samples);
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.config.scale = scale;
        self.source.set_scale(scale);
    }

    /// Minimum spacing between reads, floored at 10 ms
    pub fn set_sample_interval(&mut self, ms: u16) {
        self.config.sample_interval_ms = config::clamp_sample_interval(ms);
    }

    /// Conversions averaged per read, clamped to 1..=16
    pub fn set_average_samples(&mut self, n: u8) {
        self.config.average_samples = config::clamp_average_samples(n);
    }

    /// Manual EMA alpha. Anything outside (0.0, 1.0) turns manual EMA off.
    pub fn set_smoothing(&mut self, alpha: f32) {
        if alpha > 0.0 && alpha < 1.0 {
            self.config.use_manual_ema = true;
            self.config.manual_alpha = alpha;
        } else {
            self.config.use_manual_ema = false;
            self.config.manual_alpha = 0.0;
        }
        self.update_smoothing();
    }

    /// Time constant in seconds. Zero, negative or NaN turns it off.
    pub fn set_time_constant(&mut self, tau_sec: f32) {
        self.config.time_constant_sec = if tau_sec > 0.0 { tau_sec } else { 0.0 };
        self.update_smoothing();
    }

    /// Median window, forced odd and into 1..=9. Always clears the buffer.
    pub fn set_median_window(&mut self, n: u8) {
        let window = config::odd_in_range(n, 1, MAX_MEDIAN_WINDOW as u8);
        self.config.median_window = window;
        self.state.median.set_window(usize::from(window));
        log_info!("median window set to {}", window);
    }

    /// Maximum step per update, negative values disable
    pub fn set_spike_limit(&mut self, limit: f32) {
        self.spike = SpikeClamp::new(limit);
        self.config.spike_limit = self.spike.limit();
    }

    fn update_smoothing(&mut self) {
        self.smoothing = self.config.smoothing();
        log_info!(
            "smoothing: tau {} s, manual alpha {}",
            self.config.time_constant_sec,
            self.config.manual_alpha
        );
    }

    /// Last filtered value, 0.0 until the first accepted sample
    pub fn last_filtered(&self) -> f32 {
        self.state.ema.value()
    }

    /// Last accepted raw reading, before any filtering
    pub fn last_raw(&self) -> f32 {
        self.state.last_raw
    }

    /// Clock time of the last accepted sample
    pub fn last_update_ms(&self) -> Option<u32> {
        self.state.last_update_ms
    }

    pub fn scale(&self) -> f32 {
        self.config.scale
    }

    pub fn is_ready(&mut self) -> bool {
        self.source.is_ready()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Currently active smoothing strategy
    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Give back the source and clock
    pub fn release(self) -> (S, C) {
        (self.source, self.clock)
    }
}
