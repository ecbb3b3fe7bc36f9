//! Binary min-heap with a fixed tie-break order
//!
//! Decoders rebuild the tree from the stored histogram, so the order in
//! which equal-weight nodes leave the queue is part of the container
//! format. `std::collections::BinaryHeap` makes no promise about that order;
//! this heap pins it down:
//!
//! - `build` heapifies bottom-up, positions `n/2 - 1` down to `0`.
//! - sifting toward the leaves always follows the smaller child, taking the
//!   right child unless the left one is strictly smaller, all the way to a
//!   leaf, then sifts the displaced item back toward the root.
//! - sifting toward the root moves an item only while it is strictly smaller
//!   than its parent.

#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    elements: Vec<T>,
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        MinHeap { elements: vec![] }
    }

    pub fn heap_size(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn parent(i: usize) -> usize {
        (i - 1) / 2
    }

    fn left(i: usize) -> usize {
        2 * i + 1
    }
}

impl<T: Ord> MinHeap<T> {
    pub fn build(source: Vec<T>) -> Self {
        let mut heap = MinHeap { elements: source };
        let n = heap.heap_size();
        for i in (0..n / 2).rev() {
            heap.sift_to_leaf(i);
        }
        heap
    }

    pub fn insert(&mut self, value: T) {
        self.elements.push(value);
        let last = self.heap_size() - 1;
        self.sift_to_root(0, last);
    }

    pub fn extract_min(&mut self) -> Option<T> {
        let last = self.elements.pop()?;
        if self.elements.is_empty() {
            return Some(last);
        }
        let min = std::mem::replace(&mut self.elements[0], last);
        self.sift_to_leaf(0);
        Some(min)
    }

    /// Move the item at `pos` up while it is strictly smaller than its
    /// parent, never past `start`.
    fn sift_to_root(&mut self, start: usize, mut pos: usize) {
        while pos > start {
            let parent = Self::parent(pos);
            if self.elements[pos] < self.elements[parent] {
                self.elements.swap(pos, parent);
                pos = parent;
            } else {
                break;
            }
        }
    }

    fn sift_to_leaf(&mut self, mut pos: usize) {
        let end = self.heap_size();
        let start = pos;
        let mut child = Self::left(pos);
        while child < end {
            let right = child + 1;
            if right < end && !(self.elements[child] < self.elements[right]) {
                child = right;
            }
            self.elements.swap(pos, child);
            pos = child;
            child = Self::left(pos);
        }
        self.sift_to_root(start, pos);
    }

    #[cfg(test)]
    fn valid_min_heap(&self) -> bool {
        (1..self.heap_size()).all(|i| self.elements[Self::parent(i)] <= self.elements[i])
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    /// Ordered by `key` only, so `tag` shows how ties were broken.
    #[derive(Debug)]
    struct Keyed {
        key: u32,
        tag: usize,
    }

    impl PartialEq for Keyed {
        fn eq(&self, other: &Self) -> bool {
            self.key == other.key
        }
    }
    impl Eq for Keyed {}
    impl PartialOrd for Keyed {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }
    impl Ord for Keyed {
        fn cmp(&self, other: &Self) -> Ordering {
            self.key.cmp(&other.key)
        }
    }

    fn keyed(keys: &[u32]) -> Vec<Keyed> {
        keys.iter()
            .enumerate()
            .map(|(tag, &key)| Keyed { key, tag })
            .collect()
    }

    #[test]
    fn test_extracts_in_order() {
        let mut heap = MinHeap::build(vec![7, 3, 9, 1, 4, 4, 0]);
        assert!(heap.valid_min_heap());
        let mut out = Vec::new();
        while let Some(v) = heap.extract_min() {
            out.push(v);
        }
        assert_eq!(out, vec![0, 1, 3, 4, 4, 7, 9]);
    }

    #[test]
    fn test_build_layout() {
        let heap = MinHeap::build(keyed(&[5, 2, 2, 1, 1]));
        let tags: Vec<_> = heap.elements.iter().map(|k| k.tag).collect();
        assert_eq!(tags, vec![4, 3, 2, 0, 1]);
    }

    #[test]
    fn test_equal_keys_tie_break() {
        let mut heap = MinHeap::build(keyed(&[1, 1, 1]));
        let tags: Vec<_> = std::iter::from_fn(|| heap.extract_min())
            .map(|k| k.tag)
            .collect();
        assert_eq!(tags, vec![2, 1, 0]);
    }

    #[test]
    fn test_insert_keeps_heap() {
        let mut heap = MinHeap::new();
        for v in [5, 8, 1, 1, 3, 2, 9] {
            heap.insert(v);
            assert!(heap.valid_min_heap());
        }
        assert_eq!(heap.heap_size(), 7);
        assert_eq!(heap.extract_min(), Some(1));
        assert_eq!(heap.extract_min(), Some(1));
        assert_eq!(heap.extract_min(), Some(2));
    }

    #[test]
    fn test_empty() {
        let mut heap: MinHeap<u8> = MinHeap::default();
        assert!(heap.is_empty());
        assert_eq!(heap.extract_min(), None);
    }
}
