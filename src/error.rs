//! Error types shared by the Huffman coding modules.

use std::fmt;

/// Result type for Huffman operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a tree, encoding or decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The frequency table had no entries, so there is nothing to build a tree from.
    #[error("cannot build a Huffman tree from empty input")]
    EmptyInput,

    /// A symbol passed to an encoder is not one of the tree's leaves.
    #[error("symbol {symbol} is not in the tree's alphabet")]
    UnknownSymbol { symbol: String },

    /// A bit-string did not resolve cleanly to a sequence of leaves.
    #[error("malformed code at bit {position}: {kind}")]
    MalformedCode { position: usize, kind: MalformedKind },
}

/// Why a bit-string failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedKind {
    /// A character other than '0' or '1'
    InvalidBit(char),
    /// Input ran out partway down the tree
    Truncated,
    /// Decoding the encoder's own output did not reproduce the input
    RoundTripMismatch,
}

impl fmt::Display for MalformedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedKind::InvalidBit(c) => write!(f, "invalid bit {:?}", c),
            MalformedKind::Truncated => write!(f, "bit-string ends inside a code"),
            MalformedKind::RoundTripMismatch => write!(f, "decoded output differs from input"),
        }
    }
}

impl Error {
    pub(crate) fn unknown_symbol<S: fmt::Debug>(symbol: &S) -> Self {
        Error::UnknownSymbol {
            symbol: format!("{:?}", symbol),
        }
    }

    pub(crate) fn invalid_bit(position: usize, c: char) -> Self {
        Error::MalformedCode {
            position,
            kind: MalformedKind::InvalidBit(c),
        }
    }

    pub(crate) fn truncated(position: usize) -> Self {
        Error::MalformedCode {
            position,
            kind: MalformedKind::Truncated,
        }
    }
}
