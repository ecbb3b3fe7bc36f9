//! Byte frequency histogram
//!
//! A fixed table of 256 counters indexed by byte value. The index order is
//! the insertion order used when building the tree, so it must never be
//! reshuffled.

use crate::error::{CompressError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u32; 256],
}

impl Histogram {
    /// Count every byte of `data` in one pass.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut wide = [0u64; 256];
        for &b in data {
            wide[b as usize] += 1;
        }

        let mut counts = [0u32; 256];
        for (i, &f) in wide.iter().enumerate() {
            counts[i] = u32::try_from(f).map_err(|_| CompressError::CounterOverflow { byte: i as u8 })?;
        }
        Ok(Self { counts })
    }

    pub fn from_counts(counts: [u32; 256]) -> Self {
        Self { counts }
    }

    pub fn counts(&self) -> &[u32; 256] {
        &self.counts
    }

    pub fn get(&self, byte: u8) -> u32 {
        self.counts[byte as usize]
    }

    /// Sum of all counters, i.e. the length of the counted payload.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&f| f as u64).sum()
    }

    /// Number of byte values that occur at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&f| f > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&f| f == 0)
    }

    /// `(byte, count)` for every nonzero counter, ascending by byte value.
    pub fn nonzero(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &f)| f > 0)
            .map(|(i, &f)| (i as u8, f))
    }

    /// The byte value, if exactly one byte value occurs.
    pub fn single_symbol(&self) -> Option<u8> {
        let mut it = self.nonzero();
        match (it.next(), it.next()) {
            (Some((b, _)), None) => Some(b),
            _ => None,
        }
    }

    /// Shannon entropy in bits per byte.
    pub fn entropy_bits(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let len = total as f64;
        let mut entropy = 0.0;
        for (_, f) in self.nonzero() {
            let p = f as f64 / len;
            entropy -= p * p.log2();
        }
        entropy
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self { counts: [0; 256] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_abracadabra() {
        let hist = Histogram::from_bytes(b"abracadabra").unwrap();
        assert_eq!(hist.get(b'a'), 5);
        assert_eq!(hist.get(b'b'), 2);
        assert_eq!(hist.get(b'r'), 2);
        assert_eq!(hist.get(b'c'), 1);
        assert_eq!(hist.get(b'd'), 1);
        assert_eq!(hist.total(), 11);
        assert_eq!(hist.distinct(), 5);
    }

    #[test]
    fn test_empty_input() {
        let hist = Histogram::from_bytes(b"").unwrap();
        assert!(hist.is_empty());
        assert_eq!(hist.total(), 0);
        assert_eq!(hist.single_symbol(), None);
        assert_eq!(hist.entropy_bits(), 0.0);
    }

    #[test]
    fn test_nonzero_ascending() {
        let hist = Histogram::from_bytes(&[9, 3, 200, 3]).unwrap();
        let pairs: Vec<_> = hist.nonzero().collect();
        assert_eq!(pairs, vec![(3, 2), (9, 1), (200, 1)]);
    }

    #[test]
    fn test_single_symbol() {
        let hist = Histogram::from_bytes(b"aaaa").unwrap();
        assert_eq!(hist.single_symbol(), Some(b'a'));
        assert!(hist.entropy_bits() < 1e-9);
    }

    #[test]
    fn test_uniform_entropy() {
        let data: Vec<u8> = (0..=255).collect();
        let hist = Histogram::from_bytes(&data).unwrap();
        assert!((hist.entropy_bits() - 8.0).abs() < 1e-9);
    }
}
