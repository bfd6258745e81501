use std::collections::VecDeque;

/// Fixed-length sliding window of the most recent `len` values.
///
/// The window is pre-filled with `T::default()` so its length is always
/// exactly `len`: every [`push`](Self::push) evicts the oldest value.
/// Index 0 is the oldest sample, index `len - 1` the newest.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingBuffer<T> {
    samples: VecDeque<T>,
}

impl<T: Clone + Default> RollingBuffer<T> {
    /// A window of `len` default values.  `len` is clamped to at least 1.
    pub fn new(len: usize) -> Self {
        let len = len.max(1);
        Self {
            samples: std::iter::repeat(T::default()).take(len).collect(),
        }
    }

    /// Drop the oldest value and append `value` as the newest.
    pub fn push(&mut self, value: T) {
        self.samples.pop_front();
        self.samples.push_back(value);
    }

    /// Refill the window with default values, keeping its length.
    pub fn clear(&mut self) {
        let len = self.len();
        *self = Self::new(len);
    }

    /// Change the window length.  Growing pads with defaults on the old
    /// side; shrinking keeps the newest values.
    pub fn resize(&mut self, len: usize) {
        let len = len.max(1);
        while self.samples.len() > len {
            self.samples.pop_front();
        }
        while self.samples.len() < len {
            self.samples.push_front(T::default());
        }
    }
}

impl<T> RollingBuffer<T> {
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`: the window is never shorter than one slot.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The newest value.
    pub fn latest(&self) -> Option<&T> {
        self.samples.back()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.samples.get(index)
    }

    /// Iterate oldest → newest.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_full_of_zeroes() {
        let buf: RollingBuffer<f64> = RollingBuffer::new(300);
        assert_eq!(buf.len(), 300);
        assert!(buf.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn zero_length_is_clamped() {
        let buf: RollingBuffer<f64> = RollingBuffer::new(0);
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn length_never_changes_on_push() {
        for len in [1, 2, 7, 300] {
            let mut buf = RollingBuffer::new(len);
            for i in 0..(len * 3) {
                buf.push(i as f64);
                assert_eq!(buf.len(), len);
            }
        }
    }

    #[test]
    fn push_shifts_by_one() {
        let mut buf = RollingBuffer::new(4);
        for v in [1.0, 2.0, 3.0, 4.0] {
            buf.push(v);
        }
        let before: Vec<f64> = buf.iter().copied().collect();

        buf.push(5.0);

        assert_eq!(buf.get(0), Some(&before[1]));
        assert_eq!(buf.latest(), Some(&5.0));
        assert_eq!(buf.iter().copied().collect::<Vec<_>>(), vec![2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn single_slot_window_holds_latest() {
        let mut buf = RollingBuffer::new(1);
        buf.push(10.0);
        buf.push(20.0);
        assert_eq!(buf.iter().copied().collect::<Vec<_>>(), vec![20.0]);
    }

    #[test]
    fn resize_keeps_newest() {
        let mut buf = RollingBuffer::new(3);
        for v in [1.0, 2.0, 3.0] {
            buf.push(v);
        }
        buf.resize(2);
        assert_eq!(buf.iter().copied().collect::<Vec<_>>(), vec![2.0, 3.0]);

        buf.resize(4);
        assert_eq!(buf.iter().copied().collect::<Vec<_>>(), vec![0.0, 0.0, 2.0, 3.0]);
    }

    #[test]
    fn clear_resets_values_not_length() {
        let mut buf = RollingBuffer::new(3);
        buf.push(9.0);
        buf.clear();
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.latest(), Some(&0.0));
    }
}
