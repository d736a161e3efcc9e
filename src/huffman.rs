//! Huffman coding.
//!
//! Builds an optimal prefix code from symbol frequencies and uses it to
//! turn a symbol sequence into a bit-string and back:
//! - [`FrequencyTable`] counts occurrences in first-occurrence order
//! - [`HuffmanTree`] merges the two lowest counts until one root remains
//! - [`CodeTable`] maps each symbol to its root-to-leaf path
//! - [`Codec`] runs the whole pipeline with a [`CodecConfig`]
//!
//! Symbols may be any `Eq + Hash + Clone` type, not just characters.
//!
//! # Examples
//!
//! ```rust
//! use huffman::{huffman_decode, huffman_encode};
//!
//! let input: Vec<char> = "abracadabra".chars().collect();
//! let (encoded, tree) = huffman_encode(&input).unwrap();
//! assert!(encoded.chars().all(|c| c == '0' || c == '1'));
//! assert_eq!(huffman_decode(&encoded, &tree).unwrap(), input);
//! ```

use std::fmt::Debug;
use std::hash::Hash;

use crate::error::Result;

pub mod code;
pub mod codec;
pub mod frequency;
pub mod node;
pub mod tree;

pub use code::{bits_to_string, parse_bits, Code, CodeTable};
pub use codec::{Codec, CodecConfig, Encoded};
pub use frequency::FrequencyTable;
pub use node::HuffmanNode;
pub use tree::HuffmanTree;

/// Build a frequency table mapping each symbol in `input` to its frequency.
pub fn build_frequency_table<S: Eq + Hash + Clone>(input: &[S]) -> FrequencyTable<S> {
    FrequencyTable::tally(input.iter().cloned())
}

/// Build the Huffman tree given a frequency table.
/// Fails with `Error::EmptyInput` if the table is empty.
pub fn build_huffman_tree<S>(table: FrequencyTable<S>) -> Result<HuffmanTree<S>>
where
    S: Eq + Hash + Clone,
{
    HuffmanTree::build(table)
}

/// Build the code table mapping symbols to their Huffman codes.
///
/// If the tree consists of a single leaf, the code "0" is assigned.
pub fn build_code_table<S: Eq + Hash + Clone>(node: &HuffmanNode<S>) -> CodeTable<S> {
    CodeTable::from_root(node, false)
}

/// Convenience function: builds the Huffman tree from input, encodes the input,
/// and returns (encoded bit string, Huffman tree).
pub fn huffman_encode<S>(input: &[S]) -> Result<(String, HuffmanTree<S>)>
where
    S: Eq + Hash + Clone + Debug,
{
    let encoded = Codec::default().encode(input)?;
    Ok((encoded.bits, encoded.tree))
}

/// Convenience function: decodes an encoded bit string using the provided Huffman tree.
pub fn huffman_decode<S>(encoded: &str, tree: &HuffmanTree<S>) -> Result<Vec<S>>
where
    S: Eq + Hash + Clone + Debug,
{
    Codec::default().decode(encoded, tree)
}
