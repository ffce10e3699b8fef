//! Fixed-capacity ring buffer of timestamped samples with ordered lookup.

use contracts::Timestamped;

/// Bounded FIFO ordered by the embedded `time_us` field.
///
/// The buffer starts unallocated; `allocate` reserves the backing store and
/// reports failure instead of aborting, so a constrained target can disable
/// one sensor without bringing down the estimator. Capacities are small
/// (≤ ~50), so lookup is a linear scan.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    items: Vec<T>,
    /// Next write slot
    head: usize,
    /// Occupancy
    used: usize,
}

impl<T: Timestamped + Clone + Default> RingBuffer<T> {
    /// Create an unallocated buffer.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            head: 0,
            used: 0,
        }
    }

    /// Reserve capacity for `length` samples and clear the contents.
    ///
    /// Returns false when the backing store cannot be obtained or `length`
    /// is zero. Allocating the already-reserved length cannot fail and only
    /// clears.
    #[must_use]
    pub fn allocate(&mut self, length: usize) -> bool {
        if length == 0 {
            return false;
        }
        if self.items.len() != length {
            let mut items = Vec::new();
            if items.try_reserve_exact(length).is_err() {
                return false;
            }
            items.resize_with(length, T::default);
            self.items = items;
        }
        self.head = 0;
        self.used = 0;
        true
    }

    /// Release the backing store; capacity becomes zero.
    pub fn unallocate(&mut self) {
        self.items = Vec::new();
        self.head = 0;
        self.used = 0;
    }

    /// Allocated length in samples, not occupancy.
    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Currently retained samples.
    pub fn occupied(&self) -> usize {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Store a sample, overwriting the oldest when full.
    ///
    /// No-op while unallocated. Samples must be pushed in non-decreasing
    /// `time_us` order; the lookup routines rely on it.
    pub fn push(&mut self, sample: T) {
        let capacity = self.items.len();
        if capacity == 0 {
            return;
        }
        self.items[self.head] = sample;
        self.head = (self.head + 1) % capacity;
        if self.used < capacity {
            self.used += 1;
        }
    }

    /// Oldest retained sample.
    pub fn oldest(&self) -> Option<&T> {
        (self.used > 0).then(|| &self.items[self.index_of(0)])
    }

    /// Most recently pushed sample.
    pub fn newest(&self) -> Option<&T> {
        (self.used > 0).then(|| &self.items[self.index_of(self.used - 1)])
    }

    /// Sample with the greatest `time_us` not exceeding `time_us`.
    ///
    /// Scans newest to oldest, so with monotonic insertion the first match
    /// is the answer.
    pub fn read_first_older_than(&self, time_us: u64) -> Option<T> {
        (0..self.used)
            .rev()
            .map(|slot| &self.items[self.index_of(slot)])
            .find(|item| item.time_us() <= time_us)
            .cloned()
    }

    /// Retained samples, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        (0..self.used).map(move |slot| &self.items[self.index_of(slot)])
    }

    fn index_of(&self, slot: usize) -> usize {
        let capacity = self.items.len();
        (self.head + capacity - self.used + slot) % capacity
    }
}

impl<T: Timestamped + Clone + Default> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::BaroSample;

    fn sample(time_us: u64) -> BaroSample {
        BaroSample { time_us, hgt: time_us as f32 }
    }

    #[test]
    fn test_unallocated_push_is_noop() {
        let mut buffer = RingBuffer::new();
        buffer.push(sample(100));
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 0);
    }

    #[test]
    fn test_allocate_same_length_clears() {
        let mut buffer: RingBuffer<BaroSample> = RingBuffer::new();
        assert!(buffer.allocate(4));
        buffer.push(sample(1));
        assert!(buffer.allocate(4));
        assert_eq!(buffer.capacity(), 4);
        assert!(buffer.is_empty());
        assert!(!buffer.allocate(0));
    }

    #[test]
    fn test_push_and_ordering() {
        let mut buffer = RingBuffer::new();
        assert!(buffer.allocate(3));

        buffer.push(sample(10));
        buffer.push(sample(20));
        buffer.push(sample(30));

        assert_eq!(buffer.oldest().unwrap().time_us, 10);
        assert_eq!(buffer.newest().unwrap().time_us, 30);
        assert_eq!(buffer.occupied(), 3);
    }

    #[test]
    fn test_push_overwrites_oldest_when_full() {
        let mut buffer = RingBuffer::new();
        assert!(buffer.allocate(3));

        for t in [10, 20, 30, 40, 50] {
            buffer.push(sample(t));
        }

        assert_eq!(buffer.occupied(), 3);
        assert_eq!(buffer.oldest().unwrap().time_us, 30);
        assert_eq!(buffer.newest().unwrap().time_us, 50);
    }

    #[test]
    fn test_read_first_older_than() {
        let mut buffer = RingBuffer::new();
        assert!(buffer.allocate(4));

        for t in [10, 20, 30, 40] {
            buffer.push(sample(t));
        }

        assert_eq!(buffer.read_first_older_than(25).unwrap().time_us, 20);
        assert_eq!(buffer.read_first_older_than(30).unwrap().time_us, 30);
        assert_eq!(buffer.read_first_older_than(1000).unwrap().time_us, 40);
        assert!(buffer.read_first_older_than(5).is_none());
    }

    #[test]
    fn test_unallocate_clears() {
        let mut buffer = RingBuffer::new();
        assert!(buffer.allocate(2));
        buffer.push(sample(10));
        buffer.unallocate();
        assert_eq!(buffer.capacity(), 0);
        assert!(buffer.is_empty());
        assert!(buffer.read_first_older_than(100).is_none());
    }

    #[test]
    fn test_iter_oldest_first_after_wrap() {
        let mut buffer = RingBuffer::new();
        assert!(buffer.allocate(3));
        for t in [1, 2, 3, 4] {
            buffer.push(sample(t));
        }
        let times: Vec<u64> = buffer.iter().map(|s| s.time_us).collect();
        assert_eq!(times, vec![2, 3, 4]);
    }
}
