//! Huffman tree construction, encoding and decoding.

use bitvec::prelude::*;
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::hash::Hash;

use crate::error::{Error, Result};
use crate::huffman::code::{parse_bit, push_bits, CodeTable};
use crate::huffman::frequency::FrequencyTable;
use crate::huffman::node::HuffmanNode;

/// A priority queue entry. The node with the smallest count has the
/// highest priority; among equal counts the one inserted first wins.
struct QueueEntry<S> {
    count: usize,
    seq: usize,
    node: HuffmanNode<S>,
}

impl<S> PartialEq for QueueEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.seq == other.seq
    }
}

impl<S> Eq for QueueEntry<S> {}

impl<S> Ord for QueueEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys: BinaryHeap is a max-heap.
        other
            .count
            .cmp(&self.count)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<S> PartialOrd for QueueEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// An immutable Huffman tree together with the code table derived from it.
///
/// The same tree must be used to encode and to decode. It is never mutated
/// after [`HuffmanTree::build`], so it can be shared across threads for
/// concurrent encode/decode calls.
#[derive(Debug, Clone)]
pub struct HuffmanTree<S> {
    root: HuffmanNode<S>,
    codes: CodeTable<S>,
}

impl<S: Eq + Hash + Clone> HuffmanTree<S> {
    /// Builds the tree by repeatedly merging the two lowest-count nodes.
    ///
    /// Leaves are queued by ascending count. Equal counts are resolved by
    /// insertion order: leaves enter in the table's first-occurrence order,
    /// merged nodes enter after everything already queued, and the earliest
    /// entry is removed first. The first node removed in each step becomes
    /// the left (`0`) child.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] if `table` has no entries.
    ///
    /// # Example
    ///
    /// ```
    /// use huffman::{FrequencyTable, HuffmanTree};
    ///
    /// let tree = HuffmanTree::build(FrequencyTable::from_text("aabbc")).unwrap();
    /// assert_eq!(tree.code_for(&'b').as_deref(), Some("0"));
    /// assert_eq!(tree.code_for(&'c').as_deref(), Some("10"));
    /// assert_eq!(tree.code_for(&'a').as_deref(), Some("11"));
    /// ```
    pub fn build(table: FrequencyTable<S>) -> Result<Self> {
        let distinct = table.len();
        let total = table.total();

        let mut leaves = table.into_entries();
        leaves.sort_by_key(|&(_, count)| count);

        let mut heap = BinaryHeap::with_capacity(leaves.len());
        let mut seq = 0;
        for (symbol, count) in leaves {
            heap.push(QueueEntry {
                count,
                seq,
                node: HuffmanNode::leaf(symbol, count),
            });
            seq += 1;
        }

        let root = loop {
            let Some(a) = heap.pop() else {
                return Err(Error::EmptyInput);
            };
            let Some(b) = heap.pop() else {
                break a.node;
            };
            let merged = HuffmanNode::merge(a.node, b.node);
            trace!(
                "merged counts {} + {} -> {} ({} nodes queued)",
                a.count,
                b.count,
                merged.count(),
                heap.len() + 1
            );
            heap.push(QueueEntry {
                count: merged.count(),
                seq,
                node: merged,
            });
            seq += 1;
        };

        let tree = Self::from_root(root);
        debug!(
            "built Huffman tree: {} symbols, {} occurrences, height {}",
            distinct,
            total,
            tree.height()
        );
        Ok(tree)
    }

    /// Tallies `symbols` and builds a tree from the counts.
    pub fn from_symbols(symbols: &[S]) -> Result<Self> {
        Self::build(FrequencyTable::tally(symbols.iter().cloned()))
    }

    /// Wraps an already built root node.
    pub fn from_root(root: HuffmanNode<S>) -> Self {
        let codes = CodeTable::from_root(&root, false);
        Self { root, codes }
    }

    /// Chooses the bit written per occurrence when the tree is a single
    /// leaf. Has no effect on trees with two or more symbols.
    pub fn with_single_symbol_marker(mut self, marker: bool) -> Self {
        if self.root.is_leaf() {
            self.codes = CodeTable::from_root(&self.root, marker);
        }
        self
    }

    /// The code of `symbol` as `'0'`/`'1'` characters.
    pub fn code_for(&self, symbol: &S) -> Option<String> {
        self.codes.code_string(symbol)
    }

    /// Leaf symbols and their counts, left to right.
    pub fn frequencies(&self) -> Vec<(S, usize)> {
        let mut out = Vec::with_capacity(self.codes.len());
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, count } => out.push((symbol.clone(), *count)),
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        out
    }

    /// Total encoded length of the input the tree was built from, i.e. the
    /// sum of count times code length over all leaves.
    pub fn weighted_path_length(&self) -> usize {
        self.frequencies()
            .iter()
            .map(|(symbol, count)| count * self.codes.get(symbol).map_or(0, |c| c.len()))
            .sum()
    }
}

impl<S: Eq + Hash + Clone + fmt::Debug> HuffmanTree<S> {
    fn lookup(&self, symbol: &S) -> Result<&BitSlice<u8, Msb0>> {
        self.codes
            .get(symbol)
            .ok_or_else(|| Error::unknown_symbol(symbol))
    }

    /// Encodes `symbols` as a string of `'0'` and `'1'`, concatenating each
    /// symbol's code without separators.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSymbol`] for a symbol that is not a leaf of
    /// this tree.
    pub fn encode(&self, symbols: &[S]) -> Result<String> {
        let mut out = String::new();
        for symbol in symbols {
            push_bits(&mut out, self.lookup(symbol)?);
        }
        Ok(out)
    }

    /// Encodes `symbols` into packed bits, first code bit in the most
    /// significant position of the first byte.
    pub fn encode_packed(&self, symbols: &[S]) -> Result<BitVec<u8, Msb0>> {
        let mut out = BitVec::new();
        for symbol in symbols {
            out.extend_from_bitslice(self.lookup(symbol)?);
        }
        Ok(out)
    }

    /// Number of bits `encode` would produce for `symbols`.
    pub fn encoded_len(&self, symbols: &[S]) -> Result<usize> {
        symbols
            .iter()
            .map(|symbol| self.lookup(symbol).map(|code| code.len()))
            .sum()
    }

    /// Decodes a string of `'0'`/`'1'` back into symbols.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedCode`] if a character other than `'0'` or
    /// `'1'` appears, or if the string ends partway down the tree.
    pub fn decode(&self, bits: &str) -> Result<Vec<S>> {
        self.decode_iter(bits.chars().enumerate().map(|(i, c)| parse_bit(c, i)))
    }

    /// Decodes packed bits produced by [`HuffmanTree::encode_packed`].
    pub fn decode_packed(&self, bits: &BitSlice<u8, Msb0>) -> Result<Vec<S>> {
        self.decode_iter(bits.iter().by_vals().map(Ok))
    }

    fn decode_iter<I>(&self, bits: I) -> Result<Vec<S>>
    where
        I: Iterator<Item = Result<bool>>,
    {
        let mut out = Vec::new();

        // A lone leaf consumes one bit per symbol, whatever its value.
        if let HuffmanNode::Leaf { symbol, .. } = &self.root {
            for bit in bits {
                bit?;
                out.push(symbol.clone());
            }
            return Ok(out);
        }

        let mut current = &self.root;
        let mut consumed = 0;
        for bit in bits {
            let bit = bit?;
            consumed += 1;
            if let HuffmanNode::Internal { left, right, .. } = current {
                current = if bit { &**right } else { &**left };
            }
            if let HuffmanNode::Leaf { symbol, .. } = current {
                out.push(symbol.clone());
                current = &self.root;
            }
        }

        if !std::ptr::eq(current, &self.root) {
            return Err(Error::truncated(consumed));
        }
        Ok(out)
    }
}

impl HuffmanTree<char> {
    /// Builds a tree over the characters of `text`.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::build(FrequencyTable::from_text(text))
    }

    /// Encodes the characters of `text`.
    pub fn encode_str(&self, text: &str) -> Result<String> {
        let mut out = String::new();
        for ch in text.chars() {
            push_bits(&mut out, self.lookup(&ch)?);
        }
        Ok(out)
    }

    /// Decodes a bit-string into text.
    pub fn decode_to_string(&self, bits: &str) -> Result<String> {
        Ok(self.decode(bits)?.into_iter().collect())
    }
}

impl<S> HuffmanTree<S> {
    pub fn root(&self) -> &HuffmanNode<S> {
        &self.root
    }

    pub fn into_root(self) -> HuffmanNode<S> {
        self.root
    }

    pub fn code_table(&self) -> &CodeTable<S> {
        &self.codes
    }

    /// Number of distinct symbols.
    pub fn symbol_count(&self) -> usize {
        self.codes.len()
    }

    /// Sum of all leaf counts.
    pub fn total_count(&self) -> usize {
        self.root.count()
    }

    pub fn size(&self) -> usize {
        self.root.size()
    }

    pub fn height(&self) -> usize {
        self.root.height()
    }

    pub fn is_full(&self) -> bool {
        self.root.is_full()
    }

    pub fn is_complete(&self) -> bool {
        self.root.is_complete()
    }

    pub fn is_balanced(&self) -> bool {
        self.root.is_balanced()
    }
}

impl<S: fmt::Display> fmt::Display for HuffmanTree<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MalformedKind;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn random_text(rng: &mut StdRng, alphabet: &[char], len: usize) -> String {
        (0..len)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
            .collect()
    }

    #[test]
    fn test_build_aabbc() {
        let tree = HuffmanTree::from_text("aabbc").unwrap();
        assert_eq!(tree.total_count(), 5);
        assert_eq!(tree.symbol_count(), 3);
        assert_eq!(tree.size(), 5);
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.to_string(), "5(b, 3(c, a))");

        let encoded = tree.encode_str("aabbc").unwrap();
        assert_eq!(encoded, "11110010");
        assert_eq!(tree.decode_to_string(&encoded).unwrap(), "aabbc");
        assert_eq!(tree.weighted_path_length(), encoded.len());
    }

    #[test]
    fn test_tie_break_uses_insertion_order() {
        // All counts equal: a and b merge first, then c and d, then the two pairs.
        let tree = HuffmanTree::from_text("abcd").unwrap();
        assert_eq!(tree.to_string(), "4(2(a, b), 2(c, d))");
        assert_eq!(tree.code_for(&'a').as_deref(), Some("00"));
        assert_eq!(tree.code_for(&'d').as_deref(), Some("11"));

        // Order of first occurrence decides, not symbol value.
        let tree = HuffmanTree::from_text("dcba").unwrap();
        assert_eq!(tree.to_string(), "4(2(d, c), 2(b, a))");
    }

    #[test]
    fn test_merged_node_queued_after_equal_leaves() {
        // a:1 b:1 merge to 2, which ties with c:2 and d:2 but was inserted last.
        let tree = HuffmanTree::from_text("abccdd").unwrap();
        assert_eq!(tree.to_string(), "6(2(a, b), 4(c, d))");
    }

    #[test]
    fn test_empty_input() {
        let result = HuffmanTree::from_text("");
        assert_eq!(result.unwrap_err(), Error::EmptyInput);
        let result = HuffmanTree::<u8>::build(FrequencyTable::new());
        assert!(matches!(result, Err(Error::EmptyInput)));
    }

    #[test]
    fn test_single_symbol() {
        let tree = HuffmanTree::from_text("aaaa").unwrap();
        assert!(tree.root().is_leaf());
        assert_eq!(tree.size(), 1);
        assert_eq!(tree.height(), 1);

        let encoded = tree.encode_str("aaaa").unwrap();
        assert_eq!(encoded, "0000");
        assert_eq!(tree.decode_to_string(&encoded).unwrap(), "aaaa");
        // Any bit value stands for the lone symbol.
        assert_eq!(tree.decode_to_string("0110").unwrap(), "aaaa");
        assert!(tree.decode("01b").is_err());
        assert_eq!(tree.weighted_path_length(), 4);
    }

    #[test]
    fn test_single_symbol_marker() {
        let tree = HuffmanTree::from_text("zz").unwrap().with_single_symbol_marker(true);
        assert_eq!(tree.encode_str("zzz").unwrap(), "111");

        // Ignored once the tree has real branches.
        let tree = HuffmanTree::from_text("ab").unwrap().with_single_symbol_marker(true);
        assert_eq!(tree.encode_str("ab").unwrap(), "01");
    }

    #[test]
    fn test_unknown_symbol() {
        let tree = HuffmanTree::from_text("aabbc").unwrap();
        let err = tree.encode_str("abz").unwrap_err();
        assert_eq!(
            err,
            Error::UnknownSymbol {
                symbol: "'z'".to_string()
            }
        );
        assert!(tree.encoded_len(&['a', 'q']).is_err());
        assert!(tree.encode_packed(&['q']).is_err());
    }

    #[test]
    fn test_decode_invalid_character() {
        let tree = HuffmanTree::from_text("aabbc").unwrap();
        let err = tree.decode("0120").unwrap_err();
        assert_eq!(
            err,
            Error::MalformedCode {
                position: 2,
                kind: MalformedKind::InvalidBit('2'),
            }
        );
    }

    #[test]
    fn test_decode_truncated() {
        let tree = HuffmanTree::from_text("aabbc").unwrap();
        // "0" = b, then "1" starts a code that never finishes.
        let err = tree.decode("01").unwrap_err();
        assert_eq!(
            err,
            Error::MalformedCode {
                position: 2,
                kind: MalformedKind::Truncated,
            }
        );
        assert_eq!(tree.decode("").unwrap(), Vec::<char>::new());
    }

    #[test]
    fn test_packed_matches_string() {
        let text = "Maya Huffman huffs at Huffman trees.";
        let tree = HuffmanTree::from_text(text).unwrap();
        let symbols: Vec<char> = text.chars().collect();

        let encoded = tree.encode(&symbols).unwrap();
        let packed = tree.encode_packed(&symbols).unwrap();
        assert_eq!(packed.len(), encoded.len());
        assert_eq!(crate::huffman::code::bits_to_string(&packed), encoded);
        assert_eq!(tree.encoded_len(&symbols).unwrap(), encoded.len());
        assert_eq!(tree.decode_packed(&packed).unwrap(), symbols);
    }

    #[test]
    fn test_generic_symbols() {
        let words = ["the", "cat", "the", "hat", "the", "bat"];
        let tree = HuffmanTree::from_symbols(&words).unwrap();
        let encoded = tree.encode(&words).unwrap();
        assert_eq!(tree.decode(&encoded).unwrap(), words.to_vec());
        // The most frequent word gets the shortest code.
        assert_eq!(tree.code_for(&"the").map(|c| c.len()), Some(1));
    }

    #[test]
    fn test_no_substring_confusion() {
        // "a" is a substring of "ab"; membership must be exact.
        let symbols: Vec<String> = ["ab", "a", "b", "a"].iter().map(|s| s.to_string()).collect();
        let tree = HuffmanTree::from_symbols(&symbols).unwrap();
        let encoded = tree.encode(&symbols).unwrap();
        assert_eq!(tree.decode(&encoded).unwrap(), symbols);
    }

    #[test]
    fn test_frequencies_recovered() {
        let tree = HuffmanTree::from_text("aabbc").unwrap();
        assert_eq!(tree.frequencies(), vec![('b', 2), ('c', 1), ('a', 2)]);
    }

    #[test]
    fn test_skewed_tree() {
        // Fibonacci-like counts produce a maximally tall tree.
        let mut symbols = Vec::new();
        let (mut x, mut y) = (1usize, 1usize);
        for s in 0u8..20 {
            symbols.extend(std::iter::repeat(s).take(x));
            let next = x + y;
            x = y;
            y = next;
        }
        let tree = HuffmanTree::from_symbols(&symbols).unwrap();
        assert_eq!(tree.height(), 20);
        assert!(!tree.is_balanced());
        let encoded = tree.encode_packed(&symbols).unwrap();
        assert_eq!(tree.decode_packed(&encoded).unwrap(), symbols);
    }

    #[test]
    fn test_random_round_trip_and_invariants() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        let alphabet: Vec<char> = "abcdefghijklmnopqrstuvwxyz .,!".chars().collect();
        for _ in 0..200 {
            let len = rng.gen_range(2..300);
            let size = rng.gen_range(2..=alphabet.len());
            let text = random_text(&mut rng, &alphabet[..size], len);

            let tree = HuffmanTree::from_text(&text).unwrap();
            let encoded = tree.encode_str(&text).unwrap();
            assert!(encoded.chars().all(|c| c == '0' || c == '1'));
            assert_eq!(tree.decode_to_string(&encoded).unwrap(), text);

            assert!(tree.root().has_consistent_counts());
            assert!(tree.is_full());
            assert!(tree.code_table().is_prefix_free());
            assert_eq!(tree.size(), 2 * tree.symbol_count() - 1);
            assert_eq!(tree.total_count(), text.chars().count());

            let again = HuffmanTree::from_text(&text).unwrap();
            assert_eq!(again.encode_str(&text).unwrap(), encoded);
            assert_eq!(again.root(), tree.root());
        }
    }

    #[test]
    fn test_tree_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HuffmanTree<char>>();

        let tree = std::sync::Arc::new(HuffmanTree::from_text("shared tree").unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let tree = std::sync::Arc::clone(&tree);
                std::thread::spawn(move || {
                    let encoded = tree.encode_str("shared tree").unwrap();
                    tree.decode_to_string(&encoded).unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "shared tree");
        }
    }
}
