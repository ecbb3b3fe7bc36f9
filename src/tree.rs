//! Huffman tree construction
//!
//! The tree is rebuilt from the stored histogram on decode, so `build` must
//! be a pure function of the histogram: leaves enter the queue in ascending
//! byte order and ties are resolved by [`MinHeap`].

use std::cmp::Ordering;

use tracing::trace;

use crate::heap::MinHeap;
use crate::histogram::Histogram;

#[derive(Debug, Clone)]
pub enum HuffNode {
    Leaf {
        weight: u64,
        byte: u8,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    /// Join two nodes; `a` becomes the left (`0`) child.
    pub fn merge(a: Self, b: Self) -> Self {
        HuffNode::Internal {
            weight: a.weight() + b.weight(),
            left: Box::new(a),
            right: Box::new(b),
        }
    }

    fn depth(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 0,
            HuffNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

// Queue order compares weight only. Anything finer would change which of
// two equal-weight nodes is merged first and break decoding of existing
// containers.
impl PartialEq for HuffNode {
    fn eq(&self, other: &Self) -> bool {
        self.weight() == other.weight()
    }
}

impl Eq for HuffNode {}

impl PartialOrd for HuffNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HuffNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight().cmp(&other.weight())
    }
}

#[derive(Debug, Clone)]
pub struct HuffmanTree {
    pub root: HuffNode,
}

impl HuffmanTree {
    /// Build the tree for `hist`, or `None` when every counter is zero.
    ///
    /// With one nonzero counter the root is that leaf and no merge happens.
    pub fn build(hist: &Histogram) -> Option<Self> {
        let leaves: Vec<HuffNode> = hist
            .nonzero()
            .map(|(byte, f)| HuffNode::Leaf {
                weight: f as u64,
                byte,
            })
            .collect();

        let mut heap = MinHeap::build(leaves);
        while heap.heap_size() > 1 {
            let left = heap.extract_min()?;
            let right = heap.extract_min()?;
            trace!(left = left.weight(), right = right.weight(), "merge");
            heap.insert(HuffNode::merge(left, right));
        }

        heap.extract_min().map(|root| HuffmanTree { root })
    }

    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    pub fn is_single_leaf(&self) -> bool {
        matches!(self.root, HuffNode::Leaf { .. })
    }
}
