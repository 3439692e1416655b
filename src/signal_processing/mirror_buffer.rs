use crate::error::{FilterError, Result};

/// Mirrored ring buffer holding the last `capacity` samples.
///
/// Each push writes the sample twice, `capacity` slots apart, into a
/// contiguous region of `2 * capacity` slots. Any window of the most recent
/// `capacity` samples is therefore a single contiguous slice no matter where
/// the cursor sits, so the convolution loop walks plain memory with no
/// modular arithmetic per tap.
///
/// `window()[0]` is the newest sample, `window()[capacity - 1]` the oldest
/// still held. Slots start zeroed, which makes a freshly built filter behave
/// as if it had consumed an all-zero prehistory.
#[derive(Debug, Clone)]
pub struct MirrorBuffer {
    buff: Box<[f64]>,
    cursor: usize,
    capacity: usize,
}

impl MirrorBuffer {
    /// Allocate a zeroed buffer for `capacity` samples.
    ///
    /// # Errors
    /// `FilterError::EmptyTaps` for a zero capacity,
    /// `FilterError::Allocation` if the backing storage cannot be reserved.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(FilterError::EmptyTaps);
        }
        let mut storage: Vec<f64> = Vec::new();
        storage
            .try_reserve_exact(2 * capacity)
            .map_err(|e| FilterError::Allocation(e.to_string()))?;
        storage.resize(2 * capacity, 0.0);
        Ok(Self {
            buff: storage.into_boxed_slice(),
            cursor: 0,
            capacity,
        })
    }

    /// Push one sample, displacing the oldest.
    pub fn push(&mut self, sample: f64) {
        self.cursor = if self.cursor == 0 {
            self.capacity - 1
        } else {
            self.cursor - 1
        };
        self.buff[self.cursor] = sample;
        self.buff[self.cursor + self.capacity] = sample;
    }

    /// Contiguous view of the last `capacity` samples, newest first.
    #[inline]
    pub fn window(&self) -> &[f64] {
        &self.buff[self.cursor..self.cursor + self.capacity]
    }

    /// The oldest sample still inside the window.
    #[inline]
    pub fn oldest(&self) -> f64 {
        self.buff[self.cursor + self.capacity - 1]
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Zero-fill and rewind, as if freshly allocated.
    pub fn reset(&mut self) {
        self.buff.fill(0.0);
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_is_newest_first() {
        let mut buff = MirrorBuffer::new(4).unwrap();
        for x in [1.0, 2.0, 3.0] {
            buff.push(x);
        }
        assert_eq!(&buff.window()[..3], &[3.0, 2.0, 1.0]);
        assert_eq!(buff.window()[3], 0.0);
    }

    #[test]
    fn test_mirror_invariant_across_wraparound() {
        let capacity = 5;
        let mut buff = MirrorBuffer::new(capacity).unwrap();
        let total = 3 * capacity + 2;
        for k in 0..total {
            buff.push(k as f64);
            let window = buff.window();
            assert_eq!(window.len(), capacity);
            for (i, &value) in window.iter().enumerate() {
                let expected = if i <= k { (k - i) as f64 } else { 0.0 };
                assert_eq!(value, expected, "push {} offset {}", k, i);
            }
        }
    }

    #[test]
    fn test_oldest_tracks_leaving_sample() {
        let mut buff = MirrorBuffer::new(3).unwrap();
        for x in [10.0, 20.0, 30.0, 40.0] {
            buff.push(x);
        }
        assert_eq!(buff.oldest(), 20.0);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut buff = MirrorBuffer::new(3).unwrap();
        buff.push(7.0);
        buff.reset();
        assert_eq!(buff.window(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(MirrorBuffer::new(0).is_err());
    }
}
