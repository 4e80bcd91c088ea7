//! Rate limiting for raw-source reads.

/// Gate that admits at most one attempt per interval.
///
/// The attempt time is recorded whenever the gate opens, whether or not the
/// read that follows succeeds, so a source that stays not-ready is still only
/// probed once per interval.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ThrottleGate {
    last_attempt_ms: Option<u32>,
}

impl ThrottleGate {
    pub const fn new() -> Self {
        Self {
            last_attempt_ms: None,
        }
    }

    pub fn last_attempt_ms(&self) -> Option<u32> {
        self.last_attempt_ms
    }

    /// Returns true and records `now_ms` if at least `interval_ms` passed
    /// since the previous attempt. The first attempt always passes.
    pub fn try_acquire(&mut self, now_ms: u32, interval_ms: u16) -> bool {
        if let Some(last) = self.last_attempt_ms {
            // Wrapping so a rolled-over millisecond counter keeps working
            if now_ms.wrapping_sub(last) < u32::from(interval_ms) {
                return false;
            }
        }

        self.last_attempt_ms = Some(now_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_attempt_passes() {
        let mut gate = ThrottleGate::new();
        assert!(gate.try_acquire(0, 120));
        assert_eq!(gate.last_attempt_ms(), Some(0));
    }

    #[test]
    fn blocks_within_interval() {
        let mut gate = ThrottleGate::new();
        assert!(gate.try_acquire(1000, 120));
        assert!(!gate.try_acquire(1119, 120));
        assert_eq!(gate.last_attempt_ms(), Some(1000));
        assert!(gate.try_acquire(1120, 120));
    }

    #[test]
    fn survives_counter_wrap() {
        let mut gate = ThrottleGate::new();
        assert!(gate.try_acquire(u32::MAX - 50, 100));
        assert!(!gate.try_acquire(20, 100));
        assert!(gate.try_acquire(49, 100));
    }
}
