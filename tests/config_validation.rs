mod common;

use common::{MockClock, MockSource};
use loadcell_filter::{Config, ConfigError, WeightSensor};

fn try_build(config: Config) -> Result<(), ConfigError> {
    let clock = MockClock::new(0);
    WeightSensor::with_config(MockSource::new(&[]), &clock, config).map(|_| ())
}

#[test]
fn test_sample_interval_too_short() {
    let config = Config {
        sample_interval_ms: 9,
        ..Config::default()
    };
    assert!(matches!(try_build(config), Err(ConfigError::SampleIntervalTooShort)));
}

#[test]
fn test_average_samples_out_of_range() {
    for n in [0_u8, 17, 255] {
        let config = Config {
            average_samples: n,
            ..Config::default()
        };
        assert!(matches!(try_build(config), Err(ConfigError::InvalidAverageSamples)));
    }
}

#[test]
fn test_even_median_window() {
    let config = Config {
        median_window: 4,
        ..Config::default()
    };
    assert!(matches!(try_build(config), Err(ConfigError::InvalidMedianWindow)));
}

#[test]
fn test_median_window_too_large() {
    let config = Config {
        median_window: 11,
        ..Config::default()
    };
    assert!(matches!(try_build(config), Err(ConfigError::InvalidMedianWindow)));
}

#[test]
fn test_negative_spike_limit() {
    let config = Config {
        spike_limit: -1.0,
        ..Config::default()
    };
    assert!(matches!(try_build(config), Err(ConfigError::InvalidSpikeLimit)));
}

#[test]
fn test_negative_time_constant() {
    let config = Config {
        time_constant_sec: -0.5,
        ..Config::default()
    };
    assert!(matches!(try_build(config), Err(ConfigError::InvalidTimeConstant)));
}

#[test]
fn test_out_of_range_manual_alpha_is_not_an_error() {
    // Manual EMA just stays inactive
    let config = Config {
        manual_alpha: 1.5,
        ..Config::default()
    };
    assert!(try_build(config).is_ok());
}

#[test]
fn test_error_messages() {
    assert_eq!(
        ConfigError::SampleIntervalTooShort.to_string(),
        "sample_interval_ms must be at least 10"
    );
    assert_eq!(
        ConfigError::InvalidMedianWindow.to_string(),
        "median_window must be odd and in 1..=9"
    );
}
