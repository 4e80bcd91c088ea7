use crate::filters::{MAX_MEDIAN_WINDOW, Smoothing};

/// Shortest allowed spacing between raw-source reads.
pub const MIN_SAMPLE_INTERVAL_MS: u16 = 10;

/// Upper bound on conversions averaged by the raw source per read.
pub const MAX_AVERAGE_SAMPLES: u8 = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    SampleIntervalTooShort,
    InvalidAverageSamples,
    InvalidMedianWindow,
    InvalidSpikeLimit,
    InvalidTimeConstant,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::SampleIntervalTooShort => {
                write!(f, "sample_interval_ms must be at least {}", MIN_SAMPLE_INTERVAL_MS)
            }
            ConfigError::InvalidAverageSamples => {
                write!(f, "average_samples must be in 1..={}", MAX_AVERAGE_SAMPLES)
            }
            ConfigError::InvalidMedianWindow => {
                write!(f, "median_window must be odd and in 1..={}", MAX_MEDIAN_WINDOW)
            }
            ConfigError::InvalidSpikeLimit => write!(f, "spike_limit must be >= 0"),
            ConfigError::InvalidTimeConstant => write!(f, "time_constant_sec must be >= 0"),
        }
    }
}

/// Weight pipeline configuration.
///
/// Fields can be filled in directly and checked with [`Config::validate`], or
/// adjusted later through the clamping setters on
/// [`WeightSensor`](crate::WeightSensor).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Minimum spacing between raw-source reads
    pub sample_interval_ms: u16,

    /// Conversions averaged by the raw source per read
    pub average_samples: u8,

    /// Legacy EMA alpha, only used when inside (0.0, 1.0)
    pub manual_alpha: f32,
    pub use_manual_ema: bool,

    /// Time-constant smoothing in seconds, 0.0 = off. Overrides manual EMA.
    pub time_constant_sec: f32,

    /// Odd median window in 1..=9, 1 = off
    pub median_window: u8,

    /// Maximum step per update in output units, 0.0 = off
    pub spike_limit: f32,

    /// Calibration factor handed to the raw source
    pub scale: f32,

    /// Tare with this many samples when the sensor is constructed
    pub startup_tare: Option<u16>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_interval_ms: 120,
            average_samples: 2,
            manual_alpha: 0.20,
            use_manual_ema: true,
            time_constant_sec: 0.0,
            median_window: 1,
            spike_limit: 0.0,
            // ~grams with a typical 5 kg cell
            scale: 2280.0,
            startup_tare: Some(15),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_interval_ms < MIN_SAMPLE_INTERVAL_MS {
            return Err(ConfigError::SampleIntervalTooShort);
        }

        if self.average_samples == 0 || self.average_samples > MAX_AVERAGE_SAMPLES {
            return Err(ConfigError::InvalidAverageSamples);
        }

        if self.median_window == 0
            || self.median_window > MAX_MEDIAN_WINDOW as u8
            || self.median_window % 2 == 0
        {
            return Err(ConfigError::InvalidMedianWindow);
        }

        // Negated comparisons so NaN is rejected too
        if !(self.spike_limit >= 0.0) {
            return Err(ConfigError::InvalidSpikeLimit);
        }

        if !(self.time_constant_sec >= 0.0) {
            return Err(ConfigError::InvalidTimeConstant);
        }

        Ok(())
    }

    /// Smoothing strategy selected by the current fields.
    pub fn smoothing(&self) -> Smoothing {
        Smoothing::resolve(self.time_constant_sec, self.use_manual_ema, self.manual_alpha)
    }
}

pub(crate) fn clamp_sample_interval(ms: u16) -> u16 {
    ms.max(MIN_SAMPLE_INTERVAL_MS)
}

pub(crate) fn clamp_average_samples(n: u8) -> u8 {
    n.clamp(1, MAX_AVERAGE_SAMPLES)
}

/// Clamp into `lo..=hi`, then bump even values to the next odd one
/// (or step back down if that would leave the range).
pub(crate) fn odd_in_range(n: u8, lo: u8, hi: u8) -> u8 {
    let mut n = n.clamp(lo, hi);
    if n % 2 == 0 {
        n += 1;
    }
    if n > hi {
        n -= 2;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn odd_in_range_forces_odd() {
        assert_eq!(odd_in_range(0, 1, 9), 1);
        assert_eq!(odd_in_range(1, 1, 9), 1);
        assert_eq!(odd_in_range(4, 1, 9), 5);
        assert_eq!(odd_in_range(8, 1, 9), 9);
        assert_eq!(odd_in_range(10, 1, 9), 9);
        assert_eq!(odd_in_range(255, 1, 9), 9);
    }

    #[test]
    fn odd_in_range_steps_down_at_even_upper_bound() {
        assert_eq!(odd_in_range(8, 1, 8), 7);
    }

    #[test]
    fn clamps_sample_interval_and_average() {
        assert_eq!(clamp_sample_interval(0), 10);
        assert_eq!(clamp_sample_interval(250), 250);
        assert_eq!(clamp_average_samples(0), 1);
        assert_eq!(clamp_average_samples(40), 16);
    }

    #[test]
    fn nan_spike_limit_rejected() {
        let config = Config {
            spike_limit: f32::NAN,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidSpikeLimit));
    }
}
