//! huffpack: static Huffman compression for whole byte buffers.
//!
//! Pipeline:
//! - count byte frequencies into a 256-entry histogram
//! - build a Huffman tree from the histogram with a fixed tie-break order
//! - derive one code per byte value and pack the codes MSB-first
//! - frame histogram, packed bits and pad count into one container
//!
//! Decoding rebuilds the same tree from the stored histogram, so the
//! container needs no code table.

pub mod bitpack;
pub mod codes;
pub mod config;
pub mod container;
pub mod error;
pub mod heap;
pub mod histogram;
pub mod tree;

use tracing::{debug, warn};

use crate::codes::CodeTable;
use crate::config::{CompressionConfig, SingleSymbolPolicy};
use crate::container::{Container, ContainerInfo};
use crate::error::{CompressError, Result};
use crate::histogram::Histogram;
use crate::tree::HuffmanTree;

/// The main compressor engine
///
/// Holds only configuration; every call works on its own buffers, so one
/// instance can serve many threads.
#[derive(Debug, Clone, Default)]
pub struct Compressor {
    config: CompressionConfig,
}

impl Compressor {
    pub fn new(config: CompressionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompressionConfig {
        &self.config
    }

    /// Compress `data` into a container.
    pub fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.len() > self.config.max_input_size {
            warn!(len = data.len(), max = self.config.max_input_size, "input rejected");
            return Err(CompressError::InputTooLarge {
                len: data.len(),
                max: self.config.max_input_size,
            });
        }

        let histogram = Histogram::from_bytes(data)?;
        if let Some(byte) = histogram.single_symbol() {
            if self.config.single_symbol == SingleSymbolPolicy::Reject {
                warn!(byte, "single-symbol input rejected");
                return Err(CompressError::DegenerateSingleSymbol { byte });
            }
        }

        let packed = match HuffmanTree::build(&histogram) {
            Some(tree) => bitpack::pack(data, &CodeTable::generate(&tree))?,
            None => bitpack::PackedBits {
                bytes: Vec::new(),
                padding: 0,
                bit_len: 0,
            },
        };

        debug!(
            original = data.len(),
            distinct = histogram.distinct(),
            payload_bits = packed.bit_len,
            padding = packed.padding,
            "compressed"
        );

        let container = Container {
            histogram,
            payload: packed.bytes,
            padding: packed.padding,
        };
        Ok(container.serialize())
    }

    /// Restore the original bytes from a container.
    pub fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let (histogram, payload, padding) = container::split(data)?;
        let tree = HuffmanTree::build(&histogram);
        let output = bitpack::unpack(payload, padding, tree.as_ref(), histogram.total())
            .map_err(|e| {
                warn!(error = %e, "decompress failed");
                e
            })?;

        debug!(
            container = data.len(),
            restored = output.len(),
            "decompressed"
        );
        Ok(output)
    }

    pub fn inspect(&self, data: &[u8]) -> Result<ContainerInfo> {
        container::inspect(data)
    }
}

/// Compress with the default configuration.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    Compressor::default().compress(data)
}

/// Decompress with the default configuration.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    Compressor::default().decompress(data)
}
