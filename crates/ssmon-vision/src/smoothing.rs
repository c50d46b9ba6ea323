//! Majority-vote smoothing of per-frame model predictions.

use std::collections::VecDeque;

/// Bounded ring buffer of recent binary predictions.
///
/// The majority threshold is computed over the current length, not the
/// nominal capacity, since the buffer starts empty and fills gradually.
#[derive(Debug, Clone)]
pub struct PredictionBuffer {
    buffer: VecDeque<bool>,
    capacity: usize,
}

impl PredictionBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a prediction, evicting the oldest beyond capacity.
    pub fn push(&mut self, prediction: bool) {
        if self.buffer.len() == self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(prediction);
    }

    /// Strict majority over the current contents: count >= floor(len/2) + 1.
    pub fn majority(&self) -> bool {
        let positives = self.buffer.iter().filter(|&&p| p).count();
        positives >= self.buffer.len() / 2 + 1
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
