/// Step limiter relative to the last published value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpikeClamp {
    limit: f32,
}

impl SpikeClamp {
    /// Negative or NaN limits disable the clamp
    pub fn new(limit: f32) -> Self {
        Self {
            limit: if limit > 0.0 { limit } else { 0.0 },
        }
    }

    pub fn limit(&self) -> f32 {
        self.limit
    }

    pub fn is_enabled(&self) -> bool {
        self.limit > 0.0
    }

    /// Bound `candidate` to `previous ± limit`.
    ///
    /// Without a previous value there is no reference point and the candidate
    /// is returned unchanged.
    pub fn apply(&self, candidate: f32, previous: Option<f32>) -> f32 {
        match previous {
            Some(previous) if self.is_enabled() => {
                candidate.clamp(previous - self.limit, previous + self.limit)
            }
            _ => candidate,
        }
    }
}

impl Default for SpikeClamp {
    fn default() -> Self {
        Self::new(0.0)
    }
}
