//! Hardware seams: the raw load-cell driver and the millisecond clock.

use num_traits::AsPrimitive;

/// Raw load-cell transducer driver (e.g. an HX711 front end).
///
/// Implementations own pin/bus access. Averaging happens inside the driver
/// before any filtering in this crate.
pub trait RawSource {
    /// Reading type produced by the driver. Integer counts and floats both work.
    type Sample: Copy + AsPrimitive<f32>;

    /// Non-blocking readiness probe.
    fn is_ready(&mut self) -> bool;

    /// Read and average `samples` conversions, already scaled.
    ///
    /// May block for the duration of the conversions. Returns a non-finite
    /// value on failure.
    fn read_averaged(&mut self, samples: u8) -> Self::Sample;

    /// Zero the offset by averaging `samples` conversions.
    fn tare(&mut self, samples: u16);

    /// Set the calibration factor between raw counts and output units.
    fn set_scale(&mut self, scale: f32);
}

impl<S> RawSource for &mut S
where
    S: RawSource + ?Sized,
{
    type Sample = S::Sample;

    fn is_ready(&mut self) -> bool {
        (**self).is_ready()
    }

    fn read_averaged(&mut self, samples: u8) -> Self::Sample {
        (**self).read_averaged(samples)
    }

    fn tare(&mut self, samples: u16) {
        (**self).tare(samples)
    }

    fn set_scale(&mut self, scale: f32) {
        (**self).set_scale(scale)
    }
}

/// Monotonic millisecond counter. Allowed to wrap at `u32::MAX`.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

impl<C> Clock for &C
where
    C: Clock + ?Sized,
{
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}
