// Optional logging. Each macro forwards to `log` and/or `defmt` depending on
// enabled features and expands to nothing when both are off.

macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        log::debug!($($arg)*);
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)*);
    }};
}

macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        log::info!($($arg)*);
        #[cfg(feature = "defmt")]
        defmt::info!($($arg)*);
    }};
}

macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "log")]
        log::warn!($($arg)*);
        #[cfg(feature = "defmt")]
        defmt::warn!($($arg)*);
    }};
}
