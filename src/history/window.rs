//! Fixed-capacity latency window.

/// Ring buffer of the most recent latency samples for one target.
///
/// The window always holds exactly `capacity` samples; it starts filled with
/// zeros and every push evicts the oldest sample. A sample of `0` means the
/// target was down (or not yet measured) at that point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatencyWindow {
    samples: Box<[u64]>,
    /// Index of the oldest sample, which is also the next slot to overwrite
    head: usize,
}

impl LatencyWindow {
    /// Create a zero-filled window of `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: vec![0; capacity].into_boxed_slice(),
            head: 0,
        }
    }

    /// Number of samples held, always equal to the capacity.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Append a sample, evicting the oldest one.
    pub fn push(&mut self, sample: u64) {
        if self.samples.is_empty() {
            return;
        }
        self.samples[self.head] = sample;
        self.head = (self.head + 1) % self.samples.len();
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        let (newer, older) = self.samples.split_at(self.head);
        older.iter().chain(newer.iter()).copied()
    }

    /// Samples that represent a successful response.
    pub fn up_samples(&self) -> impl Iterator<Item = u64> + '_ {
        self.iter().filter(|&sample| sample > 0)
    }

    /// Most recently pushed sample.
    pub fn latest(&self) -> Option<u64> {
        if self.samples.is_empty() {
            return None;
        }
        let idx = (self.head + self.samples.len() - 1) % self.samples.len();
        Some(self.samples[idx])
    }

    /// Copy of the samples from oldest to newest.
    pub fn to_vec(&self) -> Vec<u64> {
        self.iter().collect()
    }
}
