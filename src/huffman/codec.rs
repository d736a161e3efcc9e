//! End-to-end driver: tally, build, encode, and decode against the same tree.

use log::debug;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{Error, MalformedKind, Result};
use crate::huffman::frequency::FrequencyTable;
use crate::huffman::tree::HuffmanTree;

/// Configuration for [`Codec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecConfig {
    /// Bit written per occurrence when the input has a single distinct
    /// symbol (`false` writes `'0'`)
    pub single_symbol_marker: bool,
    /// Decode every encoded result before returning it and fail if it
    /// does not reproduce the input
    pub verify_round_trip: bool,
}

/// Output of [`Codec::encode`]: the bit-string and the tree needed to
/// decode it.
#[derive(Debug, Clone)]
pub struct Encoded<S> {
    pub bits: String,
    pub tree: HuffmanTree<S>,
}

/// Runs the full Huffman pipeline over a symbol sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Tallies `symbols` and builds the tree used to encode them.
    pub fn build_tree<S>(&self, symbols: &[S]) -> Result<HuffmanTree<S>>
    where
        S: Eq + Hash + Clone,
    {
        let table = FrequencyTable::tally(symbols.iter().cloned());
        let tree = HuffmanTree::build(table)?;
        Ok(tree.with_single_symbol_marker(self.config.single_symbol_marker))
    }

    /// Builds a tree from `symbols` and encodes them with it.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`] for an empty sequence. With
    /// `verify_round_trip` set, [`Error::MalformedCode`] if the output does
    /// not decode back to `symbols`.
    pub fn encode<S>(&self, symbols: &[S]) -> Result<Encoded<S>>
    where
        S: Eq + Hash + Clone + Debug,
    {
        let tree = self.build_tree(symbols)?;
        let bits = tree.encode(symbols)?;
        debug!(
            "encoded {} symbols into {} bits ({} distinct)",
            symbols.len(),
            bits.len(),
            tree.symbol_count()
        );

        if self.config.verify_round_trip && tree.decode(&bits)? != symbols {
            return Err(Error::MalformedCode {
                position: bits.len(),
                kind: MalformedKind::RoundTripMismatch,
            });
        }

        Ok(Encoded { bits, tree })
    }

    /// Decodes `bits` with the tree that produced them.
    pub fn decode<S>(&self, bits: &str, tree: &HuffmanTree<S>) -> Result<Vec<S>>
    where
        S: Eq + Hash + Clone + Debug,
    {
        let symbols = tree.decode(bits)?;
        debug!("decoded {} bits into {} symbols", bits.len(), symbols.len());
        Ok(symbols)
    }

    /// Encodes the characters of `text`.
    pub fn encode_text(&self, text: &str) -> Result<Encoded<char>> {
        let symbols: Vec<char> = text.chars().collect();
        self.encode(&symbols)
    }

    /// Decodes `bits` into text.
    pub fn decode_text(&self, bits: &str, tree: &HuffmanTree<char>) -> Result<String> {
        Ok(self.decode(bits, tree)?.into_iter().collect())
    }
}
