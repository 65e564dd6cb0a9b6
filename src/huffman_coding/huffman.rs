use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::trace;

use crate::tools::freq_count::{FrequencyTable, SYMBOLS};

/// Index of a node in the tree arena.
pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeData {
    /// Left and right children.
    Kids(NodeId, NodeId),
    Leaf(u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Sum of the counts of every leaf below this node.
    pub weight: u64,
    pub node_data: NodeData,
}

/// Entry in the merge queue.
#[derive(Debug, PartialEq, Eq)]
struct QueueEntry {
    weight: u64,
    id: NodeId,
}

impl Ord for QueueEntry {
    /// Sort entries by decreasing weight and decreasing id, so the max-heap
    /// pops the lightest node first and the oldest of equally light nodes.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of walking the tree over a run of bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Reached a leaf. `rest` low bits of the input were not consumed.
    Symbol { symbol: u8, rest: u32 },
    /// Bits ran out at an internal node. Resume from `node` with more bits.
    Pending { node: NodeId },
}

/// A Huffman tree over all 256 byte values, stored as a flat arena.
///
/// Leaves occupy ids 0-255 (the id is the symbol), internal nodes follow in
/// the order they were merged, and the root is always the last node. The
/// merge order is fully determined by `(weight, id)`, so building twice from
/// the same counts yields the same tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
}

impl HuffmanTree {
    /// Build the tree from a frequency table. Zero counts still get a leaf.
    pub fn new(freqs: &FrequencyTable) -> Self {
        let mut nodes: Vec<Node> = Vec::with_capacity(2 * SYMBOLS - 1);
        let mut queue = BinaryHeap::with_capacity(SYMBOLS);

        for (symbol, &count) in freqs.counts().iter().enumerate() {
            queue.push(QueueEntry {
                weight: count as u64,
                id: nodes.len(),
            });
            nodes.push(Node {
                weight: count as u64,
                node_data: NodeData::Leaf(symbol as u8),
            });
        }

        // Pull off the two lightest nodes and join them until one is left.
        while queue.len() > 1 {
            if let (Some(left), Some(right)) = (queue.pop(), queue.pop()) {
                let weight = left.weight + right.weight;
                queue.push(QueueEntry {
                    weight,
                    id: nodes.len(),
                });
                nodes.push(Node {
                    weight,
                    node_data: NodeData::Kids(left.id, right.id),
                });
            }
        }
        trace!("Built tree of {} nodes, weight {}", nodes.len(), weight_of(&nodes));

        Self { nodes }
    }

    pub fn root(&self) -> NodeId {
        self.nodes.len() - 1
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Total weight of the tree, equal to the number of symbols it encodes.
    pub fn weight(&self) -> u64 {
        weight_of(&self.nodes)
    }

    /// Depth of the deepest leaf.
    pub fn depth(&self) -> u32 {
        let mut deepest = 0;
        let mut stack = vec![(self.root(), 0_u32)];
        while let Some((id, depth)) = stack.pop() {
            match self.nodes[id].node_data {
                NodeData::Kids(left, right) => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
                NodeData::Leaf(_) => deepest = deepest.max(depth),
            }
        }
        deepest
    }

    /// Walk down from `from`, consuming the `bit_count` low bits of `bits`
    /// most significant first. A 1 bit goes right, a 0 bit goes left.
    pub fn walk(&self, from: NodeId, bits: u64, mut bit_count: u32) -> Walk {
        let mut node = from;
        loop {
            match self.nodes[node].node_data {
                NodeData::Leaf(symbol) => {
                    return Walk::Symbol {
                        symbol,
                        rest: bit_count,
                    }
                }
                NodeData::Kids(left, right) => {
                    if bit_count == 0 {
                        return Walk::Pending { node };
                    }
                    bit_count -= 1;
                    node = if (bits >> bit_count) & 1 == 1 {
                        right
                    } else {
                        left
                    };
                }
            }
        }
    }
}

fn weight_of(nodes: &[Node]) -> u64 {
    nodes.last().map_or(0, |root| root.weight)
}

#[cfg(test)]
mod test {
    use super::*;

    fn leaf_count(tree: &HuffmanTree) -> usize {
        (0..tree.nodes.len())
            .filter(|&id| matches!(tree.node(id).node_data, NodeData::Leaf(_)))
            .count()
    }

    #[test]
    fn all_zero_test() {
        let tree = HuffmanTree::new(&FrequencyTable::new());
        assert_eq!(leaf_count(&tree), 256);
        assert_eq!(tree.root(), 510);
        assert_eq!(tree.weight(), 0);
        // Equal weights pair up oldest first, giving a balanced tree.
        assert_eq!(tree.depth(), 8);
    }

    #[test]
    fn single_symbol_test() {
        let freqs = FrequencyTable::from_bytes(b"a").unwrap();
        let tree = HuffmanTree::new(&freqs);
        assert_eq!(leaf_count(&tree), 256);
        assert_eq!(tree.weight(), 1);
        // The zero subtree is lighter, so 'a' sits to the right of the root.
        match tree.node(tree.root()).node_data {
            NodeData::Kids(left, right) => {
                assert_eq!(tree.node(left).weight, 0);
                assert_eq!(tree.node(right).node_data, NodeData::Leaf(b'a'));
            }
            NodeData::Leaf(_) => panic!("root must not be a leaf"),
        }
    }

    #[test]
    fn deterministic_test() {
        let freqs = FrequencyTable::from_bytes(b"aaaabbbbccccddddeeee  ..!!").unwrap();
        assert_eq!(HuffmanTree::new(&freqs), HuffmanTree::new(&freqs.clone()));
    }

    #[test]
    fn tie_break_test() {
        // Equal weights: the two lowest ids join first, older nodes before newer.
        let mut counts = [5_u32; SYMBOLS];
        counts[7] = 1;
        let tree = HuffmanTree::new(&FrequencyTable::from(counts));
        assert_eq!(tree.node(256).node_data, NodeData::Kids(7, 0));
        assert_eq!(tree.node(257).node_data, NodeData::Kids(1, 2));
        assert_eq!(tree.node(256).weight, 6);
        assert_eq!(tree.node(257).weight, 10);
    }

    #[test]
    fn walk_test() {
        let freqs = FrequencyTable::from_bytes(b"a").unwrap();
        let tree = HuffmanTree::new(&freqs);
        assert_eq!(
            tree.walk(tree.root(), 0b1011, 4),
            Walk::Symbol {
                symbol: b'a',
                rest: 3
            }
        );
        // All-zero codes lead to symbol 0 after eight left turns.
        let tree = HuffmanTree::new(&FrequencyTable::new());
        assert_eq!(
            tree.walk(tree.root(), 0, 8),
            Walk::Symbol { symbol: 0, rest: 0 }
        );
        assert_eq!(
            tree.walk(tree.root(), 0b1111_1111_1, 9),
            Walk::Symbol {
                symbol: 255,
                rest: 1
            }
        );
    }

    #[test]
    fn walk_resume_test() {
        let tree = HuffmanTree::new(&FrequencyTable::new());
        // Symbol 0xA5 split over two refills.
        let node = match tree.walk(tree.root(), 0b1010, 4) {
            Walk::Pending { node } => node,
            other => panic!("expected a pending walk, got {:?}", other),
        };
        assert_eq!(
            tree.walk(node, 0b0101, 4),
            Walk::Symbol {
                symbol: 0xa5,
                rest: 0
            }
        );
    }
}
