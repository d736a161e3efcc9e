//! Tree nodes and structural queries.

use std::fmt;

/// Represents a node in the Huffman tree.
///
/// Internal nodes carry no symbol, only the combined count of their
/// subtree and exactly two owned children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode<S> {
    /// A leaf node contains a symbol and its frequency.
    Leaf { symbol: S, count: usize },
    /// An internal node with left and right children and combined frequency.
    Internal {
        count: usize,
        left: Box<HuffmanNode<S>>,
        right: Box<HuffmanNode<S>>,
    },
}

impl<S> HuffmanNode<S> {
    pub fn leaf(symbol: S, count: usize) -> Self {
        HuffmanNode::Leaf { symbol, count }
    }

    /// Joins two subtrees under a new internal node whose count is the sum
    /// of theirs. `left` ends up on the `0` branch.
    pub fn merge(left: Self, right: Self) -> Self {
        HuffmanNode::Internal {
            count: left.count() + right.count(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Returns the frequency of the node.
    pub fn count(&self) -> usize {
        match self {
            HuffmanNode::Leaf { count, .. } => *count,
            HuffmanNode::Internal { count, .. } => *count,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    /// The stored symbol of a leaf, `None` for internal nodes.
    pub fn symbol(&self) -> Option<&S> {
        match self {
            HuffmanNode::Leaf { symbol, .. } => Some(symbol),
            HuffmanNode::Internal { .. } => None,
        }
    }

    /// Left and right children of an internal node.
    pub fn children(&self) -> Option<(&HuffmanNode<S>, &HuffmanNode<S>)> {
        match self {
            HuffmanNode::Leaf { .. } => None,
            HuffmanNode::Internal { left, right, .. } => Some((&**left, &**right)),
        }
    }

    /// Number of nodes in this subtree, this node included.
    pub fn size(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 1,
            HuffmanNode::Internal { left, right, .. } => 1 + left.size() + right.size(),
        }
    }

    /// Number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 1,
            HuffmanNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Longest root-to-leaf path counted in nodes; a lone leaf has height 1.
    pub fn height(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 1,
            HuffmanNode::Internal { left, right, .. } => 1 + left.height().max(right.height()),
        }
    }

    /// True when every internal node has exactly two children.
    ///
    /// The enum cannot express anything else, so this holds for every
    /// value; it is kept as an explicit structural check for tests.
    pub fn is_full(&self) -> bool {
        match self {
            HuffmanNode::Leaf { .. } => true,
            HuffmanNode::Internal { left, right, .. } => left.is_full() && right.is_full(),
        }
    }

    /// True when all leaves sit on the same level, so adding any node
    /// would increase the height.
    pub fn is_perfect(&self) -> bool {
        self.perfect_height().is_some()
    }

    fn perfect_height(&self) -> Option<usize> {
        match self {
            HuffmanNode::Leaf { .. } => Some(1),
            HuffmanNode::Internal { left, right, .. } => {
                let lh = left.perfect_height()?;
                let rh = right.perfect_height()?;
                (lh == rh).then_some(lh + 1)
            }
        }
    }

    /// True when the tree has minimal height and any holes are in the last
    /// level, to the right.
    pub fn is_complete(&self) -> bool {
        match self {
            HuffmanNode::Leaf { .. } => true,
            HuffmanNode::Internal { left, right, .. } => {
                let (lh, rh) = (left.height(), right.height());
                (lh == rh && left.is_perfect() && right.is_complete())
                    || (lh == rh + 1 && left.is_complete() && right.is_perfect())
            }
        }
    }

    /// True when the heights of the two subtrees differ by at most one at
    /// every node.
    pub fn is_balanced(&self) -> bool {
        self.balanced_height().is_some()
    }

    fn balanced_height(&self) -> Option<usize> {
        match self {
            HuffmanNode::Leaf { .. } => Some(1),
            HuffmanNode::Internal { left, right, .. } => {
                let lh = left.balanced_height()?;
                let rh = right.balanced_height()?;
                (lh.abs_diff(rh) <= 1).then_some(1 + lh.max(rh))
            }
        }
    }

    /// Checks that every internal count equals the sum of the leaf counts
    /// beneath it.
    pub fn has_consistent_counts(&self) -> bool {
        self.consistent_sum().is_some()
    }

    fn consistent_sum(&self) -> Option<usize> {
        match self {
            HuffmanNode::Leaf { count, .. } => Some(*count),
            HuffmanNode::Internal { count, left, right } => {
                let sum = left.consistent_sum()? + right.consistent_sum()?;
                (sum == *count).then_some(sum)
            }
        }
    }
}

/// Leaves print their symbol; internal nodes print `count(left, right)`.
impl<S: fmt::Display> fmt::Display for HuffmanNode<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HuffmanNode::Leaf { symbol, .. } => write!(f, "{}", symbol),
            HuffmanNode::Internal { count, left, right } => {
                write!(f, "{}({}, {})", count, left, right)
            }
        }
    }
}
