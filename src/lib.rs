//! Huffman prefix coding over arbitrary symbol alphabets.
//!
//! See [`huffman`] for the algorithm and [`error`] for failure modes.

pub mod error;
pub mod huffman;

pub use error::{Error, MalformedKind, Result};
pub use huffman::{
    build_code_table, build_frequency_table, build_huffman_tree, huffman_decode, huffman_encode,
    Code, CodeTable, Codec, CodecConfig, Encoded, FrequencyTable, HuffmanNode, HuffmanTree,
};
