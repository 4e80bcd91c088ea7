/// Exponential Moving Average stage
///
/// Holds the last published value. The first sample is taken as-is so the
/// output never ramps in from zero.
#[derive(Debug, Clone, Copy)]
pub struct EmaFilter {
    value: f32,
    initialized: bool,
}

impl EmaFilter {
    /// Create new EMA filter with uninitialized state
    pub const fn new() -> Self {
        Self {
            value: 0.0,
            initialized: false,
        }
    }

    /// Apply EMA: output = alpha * input + (1 - alpha) * previous
    ///
    /// `None` alpha publishes the input directly. First call initializes the
    /// filter to the input value whatever the alpha.
    pub fn apply(&mut self, input: f32, alpha: Option<f32>) -> f32 {
        if !self.initialized {
            self.value = input;
            self.initialized = true;
            return input;
        }

        self.value = match alpha {
            Some(alpha) => {
                debug_assert!(
                    alpha > 0.0 && alpha <= 1.0,
                    "EMA alpha must be in range (0.0, 1.0], got {}",
                    alpha
                );
                alpha * input + (1.0 - alpha) * self.value
            }
            None => input,
        };
        self.value
    }

    /// Last published value, 0.0 before the first sample
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Last published value, if any
    pub fn previous(&self) -> Option<f32> {
        self.initialized.then_some(self.value)
    }

    /// Reset filter state
    pub fn reset(&mut self) {
        self.initialized = false;
        self.value = 0.0;
    }
}

impl Default for EmaFilter {
    fn default() -> Self {
        Self::new()
    }
}
