//! Code table generation
//!
//! Codes are root-to-leaf paths, `0` for left and `1` for right, stored
//! MSB-first in a `u64`. Counters are 32-bit, so the total weight stays
//! below 2^40 and no Huffman path can reach 64 levels.

use std::fmt;

use crate::tree::{HuffNode, HuffmanTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    bits: u64,
    len: u32,
}

impl Code {
    pub fn new(bits: u64, len: u32) -> Self {
        debug_assert!(len <= 64);
        Self { bits, len }
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && other.bits.checked_shr(other.len - self.len).unwrap_or(0) == self.bits
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pos in (0..self.len).rev() {
            let bit = (self.bits >> pos) & 1;
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: [Option<Code>; 256],
}

impl CodeTable {
    /// Walk `tree` depth-first and record each leaf's path.
    ///
    /// A tree whose root is a leaf has no path to walk; that byte gets the
    /// 1-bit code `0` so every occurrence still costs one bit.
    pub fn generate(tree: &HuffmanTree) -> Self {
        let mut codes = [None; 256];
        match &tree.root {
            HuffNode::Leaf { byte, .. } => codes[*byte as usize] = Some(Code::new(0, 1)),
            node @ HuffNode::Internal { .. } => walk(node, 0, 0, &mut codes),
        }
        CodeTable { codes }
    }

    pub fn get(&self, byte: u8) -> Option<Code> {
        self.codes[byte as usize]
    }

    /// `(byte, code)` for every assigned code, ascending by byte value.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|c| (i as u8, c)))
    }

    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<Code> = self.iter().map(|(_, c)| c).collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_prefix_of(b))
        })
    }
}

fn walk(node: &HuffNode, code: u64, depth: u32, codes: &mut [Option<Code>; 256]) {
    match node {
        HuffNode::Leaf { byte, .. } => {
            codes[*byte as usize] = Some(Code::new(code, depth));
        }
        HuffNode::Internal { left, right, .. } => {
            walk(left, code << 1, depth + 1, codes);
            walk(right, (code << 1) | 1, depth + 1, codes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::histogram::Histogram;

    fn table_for(data: &[u8]) -> CodeTable {
        let tree = HuffmanTree::build(&Histogram::from_bytes(data).unwrap()).unwrap();
        CodeTable::generate(&tree)
    }

    fn code_string(table: &CodeTable, byte: u8) -> String {
        table.get(byte).map(|c| c.to_string()).unwrap_or_default()
    }

    #[test]
    fn test_abracadabra_codes() {
        let table = table_for(b"abracadabra");
        assert_eq!(code_string(&table, b'a'), "0");
        assert_eq!(code_string(&table, b'c'), "100");
        assert_eq!(code_string(&table, b'd'), "101");
        assert_eq!(code_string(&table, b'b'), "110");
        assert_eq!(code_string(&table, b'r'), "111");
        assert!(table.get(b'z').is_none());
    }

    #[test]
    fn test_hello_world_codes() {
        let table = table_for(b"hello world");
        let expected = [
            (b' ', "000"),
            (b'd', "001"),
            (b'w', "010"),
            (b'h', "011"),
            (b'l', "10"),
            (b'o', "110"),
            (b'r', "1110"),
            (b'e', "1111"),
        ];
        for (byte, code) in expected {
            assert_eq!(code_string(&table, byte), code, "byte {:?}", byte as char);
        }
    }

    #[test]
    fn test_single_symbol_forced_one_bit() {
        let table = table_for(b"aaaa");
        let code = table.get(b'a').unwrap();
        assert_eq!(code.len(), 1);
        assert_eq!(code.bits(), 0);
        assert_eq!(table.iter().count(), 1);
    }

    #[test]
    fn test_prefix_free_all_bytes() {
        let data: Vec<u8> = (0..=255u8).flat_map(|b| std::iter::repeat(b).take(b as usize % 7 + 1)).collect();
        let table = table_for(&data);
        assert_eq!(table.iter().count(), 256);
        assert!(table.is_prefix_free());
    }

    #[test]
    fn test_is_prefix_of() {
        let a = Code::new(0b10, 2);
        let b = Code::new(0b101, 3);
        let c = Code::new(0b111, 3);
        assert!(a.is_prefix_of(&b));
        assert!(!a.is_prefix_of(&c));
        assert!(!b.is_prefix_of(&a));
    }
}
