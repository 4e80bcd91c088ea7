use heapless::Vec;

/// Largest supported median window
pub const MAX_MEDIAN_WINDOW: usize = 9;

/// Sliding median filter state
///
/// Maintains a circular buffer of the last `window` samples. The window is
/// odd and in 1..=9; a window of 1 passes samples straight through.
#[derive(Debug, Clone)]
pub struct MedianFilter {
    buffer: Vec<f32, MAX_MEDIAN_WINDOW>,
    window: usize,
    index: usize,
}

impl MedianFilter {
    /// Create new median filter
    ///
    /// window must be odd and <= 9
    pub fn new(window: usize) -> Self {
        debug_assert!(window % 2 == 1 && window <= MAX_MEDIAN_WINDOW);

        Self {
            buffer: Vec::new(),
            window: window.clamp(1, MAX_MEDIAN_WINDOW),
            index: 0,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Change the window size. History is dropped so samples gathered under
    /// a different window never mix with new ones.
    pub fn set_window(&mut self, window: usize) {
        debug_assert!(window % 2 == 1 && window <= MAX_MEDIAN_WINDOW);

        self.window = window.clamp(1, MAX_MEDIAN_WINDOW);
        self.reset();
    }

    /// Number of samples currently held
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Store a sample, overwriting the oldest once the window is full
    pub fn push(&mut self, sample: f32) {
        if self.buffer.len() < self.window {
            // Cannot fail: window <= capacity
            let _ = self.buffer.push(sample);
        } else {
            self.buffer[self.index] = sample;
            self.index = (self.index + 1) % self.window;
        }
    }

    /// Median of the held samples.
    ///
    /// While the buffer is still filling the count can be even; the upper of
    /// the two middle values is returned then.
    pub fn median(&self) -> Option<f32> {
        let n = self.buffer.len();
        if n == 0 {
            return None;
        }

        let mut sorted = [0.0_f32; MAX_MEDIAN_WINDOW];
        sorted[..n].copy_from_slice(&self.buffer);
        insertion_sort(&mut sorted[..n]);

        Some(sorted[n / 2])
    }

    /// Push a sample and return the current median
    pub fn apply(&mut self, sample: f32) -> f32 {
        if self.window == 1 {
            return sample;
        }

        self.push(sample);
        self.median().unwrap_or(sample)
    }

    /// Reset filter state
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.index = 0;
    }
}

// Window is at most 9, insertion sort is plenty
fn insertion_sort(values: &mut [f32]) {
    for i in 1..values.len() {
        let key = values[i];
        let mut j = i;
        while j > 0 && values[j - 1] > key {
            values[j] = values[j - 1];
            j -= 1;
        }
        values[j] = key;
    }
}
