//! Symbol-to-code lookup built from a finished tree.

use bitvec::prelude::*;
use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{Error, Result};
use crate::huffman::node::HuffmanNode;

/// The code of one symbol, most significant (root-side) bit first.
pub type Code = BitVec<u8, Msb0>;

/// Maps each leaf symbol to the path from the root to that leaf,
/// `0` for a left step and `1` for a right step.
#[derive(Debug, Clone)]
pub struct CodeTable<S> {
    codes: HashMap<S, Code>,
}

impl<S: Eq + Hash + Clone> CodeTable<S> {
    /// Walks the tree once and records every leaf's path.
    ///
    /// A tree that is a single leaf has no edges to walk; that symbol gets
    /// the one-bit code `single_symbol_marker` instead.
    pub fn from_root(root: &HuffmanNode<S>, single_symbol_marker: bool) -> Self {
        let mut codes = HashMap::new();

        if let HuffmanNode::Leaf { symbol, .. } = root {
            let mut code = Code::new();
            code.push(single_symbol_marker);
            codes.insert(symbol.clone(), code);
            return Self { codes };
        }

        // Explicit stack so skewed trees cannot overflow the call stack.
        let mut stack: Vec<(&HuffmanNode<S>, Code)> = vec![(root, Code::new())];
        while let Some((node, prefix)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, .. } => {
                    codes.insert(symbol.clone(), prefix);
                }
                HuffmanNode::Internal { left, right, .. } => {
                    let mut right_prefix = prefix.clone();
                    right_prefix.push(true);
                    stack.push((&**right, right_prefix));
                    let mut left_prefix = prefix;
                    left_prefix.push(false);
                    stack.push((&**left, left_prefix));
                }
            }
        }

        Self { codes }
    }

    pub fn get(&self, symbol: &S) -> Option<&BitSlice<u8, Msb0>> {
        self.codes.get(symbol).map(|code| code.as_bitslice())
    }

    /// The code of `symbol` as a string of `'0'` and `'1'`.
    pub fn code_string(&self, symbol: &S) -> Option<String> {
        self.get(symbol).map(bits_to_string)
    }

    pub fn contains(&self, symbol: &S) -> bool {
        self.codes.contains_key(symbol)
    }

    /// True when no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&Code> = self.codes.values().collect();
        // After sorting, any prefix sits immediately before some code it prefixes.
        codes.sort();
        codes
            .windows(2)
            .all(|pair| !pair[1].starts_with(pair[0].as_bitslice()))
    }
}

impl<S> CodeTable<S> {
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterates (symbol, code) pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &BitSlice<u8, Msb0>)> + '_ {
        self.codes.iter().map(|(s, c)| (s, c.as_bitslice()))
    }

    /// Length of the longest code.
    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(|c| c.len()).max().unwrap_or(0)
    }
}

/// Renders bits as `'0'`/`'1'` characters.
pub fn bits_to_string(bits: &BitSlice<u8, Msb0>) -> String {
    let mut out = String::with_capacity(bits.len());
    push_bits(&mut out, bits);
    out
}

pub(crate) fn push_bits(out: &mut String, bits: &BitSlice<u8, Msb0>) {
    out.extend(bits.iter().by_vals().map(|bit| if bit { '1' } else { '0' }));
}

/// Parses one character of a bit-string found at `position`.
pub fn parse_bit(c: char, position: usize) -> Result<bool> {
    match c {
        '0' => Ok(false),
        '1' => Ok(true),
        other => Err(Error::invalid_bit(position, other)),
    }
}

/// Parses a whole bit-string into packed bits.
pub fn parse_bits(text: &str) -> Result<Code> {
    text.chars()
        .enumerate()
        .map(|(i, c)| parse_bit(c, i))
        .collect()
}
