//! Container framing
//!
//! # Layout
//!
//! ```text
//! +-----------------------+
//! | histogram (1024)      |  256 x u32 little-endian, index = byte value
//! +-----------------------+
//! | payload (N)           |  packed code bits, MSB-first
//! +-----------------------+
//! | padding (1)           |  zero bits at the end of the payload (0-7)
//! +-----------------------+
//! ```
//!
//! Nothing outside the blob is needed to decode it.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CompressError, Result};
use crate::histogram::Histogram;

pub const HISTOGRAM_SIZE: usize = 256 * 4;

/// Smallest valid container: histogram plus padding byte.
pub const MIN_CONTAINER_SIZE: usize = HISTOGRAM_SIZE + 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub histogram: Histogram,
    pub payload: Vec<u8>,
    pub padding: u8,
}

impl Container {
    pub fn serialize(&self) -> Vec<u8> {
        let mut output = Vec::with_capacity(MIN_CONTAINER_SIZE + self.payload.len());
        for &f in self.histogram.counts() {
            output.extend_from_slice(&f.to_le_bytes());
        }
        output.extend_from_slice(&self.payload);
        output.push(self.padding);
        output
    }

    pub fn parse(data: &[u8]) -> Result<Self> {
        let (histogram, payload, padding) = split(data)?;
        Ok(Container {
            histogram,
            payload: payload.to_vec(),
            padding,
        })
    }

    pub fn len(&self) -> usize {
        MIN_CONTAINER_SIZE + self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histogram.is_empty() && self.payload.is_empty()
    }
}

/// Borrowing parse: histogram, payload slice, padding byte.
pub(crate) fn split(data: &[u8]) -> Result<(Histogram, &[u8], u8)> {
    if data.len() < MIN_CONTAINER_SIZE {
        warn!(len = data.len(), "container too short");
        return Err(CompressError::malformed(format!(
            "container is {} bytes, need at least {}",
            data.len(),
            MIN_CONTAINER_SIZE
        )));
    }

    let (header, rest) = data.split_at(HISTOGRAM_SIZE);
    let mut counts = [0u32; 256];
    for (slot, chunk) in counts.iter_mut().zip(header.chunks_exact(4)) {
        *slot = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }

    let (payload, trailer) = rest.split_at(rest.len() - 1);
    let padding = trailer[0];
    if padding > 7 {
        warn!(padding, "padding byte out of range");
        return Err(CompressError::malformed(format!(
            "padding bit count {} out of range",
            padding
        )));
    }

    Ok((Histogram::from_counts(counts), payload, padding))
}

/// Summary of a container, read without decoding the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerInfo {
    pub original_size: u64,
    pub distinct_symbols: usize,
    pub payload_size: usize,
    pub padding_bits: u8,
    pub container_size: usize,
    /// `container_size / original_size`, 1.0 for empty input.
    pub ratio: f64,
    pub entropy_bits: f64,
}

pub fn inspect(data: &[u8]) -> Result<ContainerInfo> {
    let (histogram, payload, padding) = split(data)?;
    let original_size = histogram.total();
    let ratio = if original_size == 0 {
        1.0
    } else {
        data.len() as f64 / original_size as f64
    };

    Ok(ContainerInfo {
        original_size,
        distinct_symbols: histogram.distinct(),
        payload_size: payload.len(),
        padding_bits: padding,
        container_size: data.len(),
        ratio,
        entropy_bits: histogram.entropy_bits(),
    })
}
