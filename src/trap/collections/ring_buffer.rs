// rv32_rte/src/trap/collections/ring_buffer.rs

//! # Fixed-Capacity Ring Buffer
//!
//! An array-backed ring buffer (or circular queue). It needs no allocator,
//! so it can live in a `static`, and it overwrites the oldest elements
//! when full.

use core::fmt;

/// A circular buffer holding up to `N` elements.
pub struct RingBuffer<T: Copy, const N: usize> {
    buffer: [Option<T>; N],
    head: usize,
    tail: usize,
    count: usize,
}

impl<T: Copy, const N: usize> RingBuffer<T, N> {
    /// Creates an empty `RingBuffer`.
    ///
    /// # Panics
    /// Panics (at compile time in const contexts) if `N` is 0.
    pub const fn new() -> Self {
        assert!(N > 0, "RingBuffer capacity cannot be zero");
        Self {
            buffer: [None; N],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Pushes an element into the buffer.
    /// If the buffer is full, the oldest element is overwritten.
    pub fn push(&mut self, item: T) {
        self.buffer[self.head] = Some(item);
        self.head = (self.head + 1) % N;

        if self.is_full() {
            // full: the tail moves too, dropping the oldest item
            self.tail = (self.tail + 1) % N;
        } else {
            self.count += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == N
    }

    /// Clears the buffer, removing all elements.
    pub fn clear(&mut self) {
        self.buffer = [None; N];
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }

    /// Copies the elements, oldest first, into `out`. Returns how many were copied.
    pub fn copy_to(&self, out: &mut [T]) -> usize {
        let mut copied = 0;
        for (dst, src) in out.iter_mut().zip(self.iter()) {
            *dst = src;
            copied += 1;
        }
        copied
    }

    /// Returns an iterator over the elements from oldest to newest.
    pub fn iter(&self) -> Iter<'_, T, N> {
        Iter {
            buffer: self,
            index: self.tail,
            remaining: self.count,
        }
    }
}

impl<T: Copy, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// An iterator over the elements of a `RingBuffer`.
pub struct Iter<'a, T: Copy, const N: usize> {
    buffer: &'a RingBuffer<T, N>,
    index: usize,
    remaining: usize,
}

impl<T: Copy, const N: usize> Iterator for Iter<'_, T, N> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let item = self.buffer.buffer[self.index];
        self.index = (self.index + 1) % N;
        self.remaining -= 1;
        item
    }
}

impl<T: Copy + fmt::Debug, const N: usize> fmt::Debug for RingBuffer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let mut ring = RingBuffer::<u8, 4>::new();
        ring.push(1);
        ring.push(2);
        ring.push(3);
        assert_eq!(ring.len(), 3);
        assert!(!ring.is_full());
        assert_eq!(ring.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn overwrites_oldest_when_full() {
        let mut ring = RingBuffer::<u8, 3>::new();
        for b in 1..=5 {
            ring.push(b);
        }
        assert!(ring.is_full());
        assert_eq!(ring.iter().collect::<Vec<_>>(), vec![3, 4, 5]);

        let mut out = [0u8; 8];
        assert_eq!(ring.copy_to(&mut out), 3);
        assert_eq!(&out[..3], &[3, 4, 5]);
    }

    #[test]
    fn clear_empties() {
        let mut ring = RingBuffer::<u32, 2>::new();
        ring.push(7);
        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(ring.iter().next(), None);
        ring.push(9);
        assert_eq!(ring.iter().collect::<Vec<_>>(), vec![9]);
    }
}
