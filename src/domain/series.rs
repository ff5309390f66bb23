// Sliding-window history buffers behind the scrolling line charts
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// The maximum number of data points displayed on a history chart.
pub const DEFAULT_WINDOW_CAPACITY: usize = 12;

/// Process-wide x-axis index source. Every buffer draws from the same
/// counter so chart positions never collide or reset across metrics.
#[derive(Debug, Clone, Default)]
pub struct SampleCounter(Arc<AtomicU64>);

impl SampleCounter {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

/// The windowed sequences of one series after a push, in push order.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub xs: Vec<u64>,
    pub ys: Vec<f64>,
}

/// Fixed-capacity FIFO window of (index, value) pairs for one metric.
/// The oldest pair is evicted before an append that would overflow.
#[derive(Debug)]
pub struct SeriesBuffer {
    xs: VecDeque<u64>,
    ys: VecDeque<f64>,
    capacity: usize,
    counter: SampleCounter,
}

impl SeriesBuffer {
    pub fn new(capacity: usize, counter: SampleCounter) -> Self {
        Self {
            xs: VecDeque::with_capacity(capacity),
            ys: VecDeque::with_capacity(capacity),
            capacity,
            counter,
        }
    }

    /// Append a reading, evicting the oldest pair at capacity, and return
    /// the post-push window. Any finite value is accepted; rejecting
    /// non-numeric input is the decoder's job.
    pub fn push(&mut self, value: f64) -> Window {
        if self.xs.len() >= self.capacity {
            self.xs.pop_front();
        }
        if self.ys.len() >= self.capacity {
            self.ys.pop_front();
        }
        self.xs.push_back(self.counter.next());
        self.ys.push_back(value);
        self.window()
    }

    pub fn window(&self) -> Window {
        Window {
            xs: self.xs.iter().copied().collect(),
            ys: self.ys.iter().copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}
