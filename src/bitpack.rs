//! Bit packing and unpacking
//!
//! Codes are written MSB-first. The final byte is padded with zero bits and
//! the number of pad bits (0-7) travels separately, so the unpacker knows
//! exactly how many bits are meaningful.

use std::io::{self, Cursor};

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};
use tracing::debug;

use crate::codes::CodeTable;
use crate::error::{CompressError, Result};
use crate::tree::{HuffNode, HuffmanTree};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBits {
    pub bytes: Vec<u8>,
    /// Zero bits appended after the last code.
    pub padding: u8,
    /// Meaningful bits, excluding padding.
    pub bit_len: u64,
}

/// Concatenate the code of every byte of `data`.
pub fn pack(data: &[u8], table: &CodeTable) -> Result<PackedBits> {
    let mut bytes = Vec::new();
    let mut bit_len: u64 = 0;
    {
        let mut w = BitWriter::endian(&mut bytes, BigEndian);
        for &byte in data {
            let code = table.get(byte).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("byte {} not in code table", byte),
                )
            })?;
            w.write(code.len(), code.bits())?;
            bit_len += code.len() as u64;
        }
        w.byte_align()?;
    }

    let padding = ((8 - bit_len % 8) % 8) as u8;
    debug!(bit_len, padding, bytes = bytes.len(), "packed");
    Ok(PackedBits {
        bytes,
        padding,
        bit_len,
    })
}

/// Decode `payload` by walking `tree`, expecting exactly `expected_len`
/// symbols.
///
/// `tree` is `None` for an all-zero histogram; only an empty payload is
/// consistent with that.
pub fn unpack(
    payload: &[u8],
    padding: u8,
    tree: Option<&HuffmanTree>,
    expected_len: u64,
) -> Result<Vec<u8>> {
    if padding > 7 {
        return Err(CompressError::malformed(format!(
            "padding bit count {} out of range",
            padding
        )));
    }
    let bit_len = (payload.len() as u64 * 8)
        .checked_sub(padding as u64)
        .ok_or_else(|| CompressError::malformed("padding without payload"))?;

    let tree = match tree {
        Some(tree) => tree,
        None if payload.is_empty() => return Ok(Vec::new()),
        None => {
            return Err(CompressError::EmptyTree {
                payload_len: payload.len(),
            })
        }
    };

    if let HuffNode::Leaf { byte, .. } = &tree.root {
        // one symbol, one bit per occurrence
        if bit_len != expected_len {
            return Err(length_mismatch(expected_len, bit_len));
        }
        let len = usize::try_from(bit_len).map_err(|_| CompressError::malformed("payload too large"))?;
        return Ok(vec![*byte; len]);
    }

    let capacity = usize::try_from(expected_len.min(bit_len)).unwrap_or(0);
    let mut out = Vec::with_capacity(capacity);
    let mut reader = BitReader::endian(Cursor::new(payload), BigEndian);
    let mut node = &tree.root;
    let mut in_code = false;

    for _ in 0..bit_len {
        if let HuffNode::Internal { left, right, .. } = node {
            node = if reader.read_bit()? { right } else { left };
            in_code = true;
        }
        if let HuffNode::Leaf { byte, .. } = node {
            if out.len() as u64 == expected_len {
                return Err(CompressError::malformed(format!(
                    "payload holds more than {} symbols",
                    expected_len
                )));
            }
            out.push(*byte);
            node = &tree.root;
            in_code = false;
        }
    }

    if in_code {
        return Err(CompressError::malformed("payload ends inside a code"));
    }
    if out.len() as u64 != expected_len {
        return Err(length_mismatch(expected_len, out.len() as u64));
    }
    Ok(out)
}

fn length_mismatch(expected: u64, actual: u64) -> CompressError {
    CompressError::malformed(format!(
        "histogram expects {} symbols, payload holds {}",
        expected, actual
    ))
}
