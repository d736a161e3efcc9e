//! Symbol frequency counting.

use std::collections::HashMap;
use std::hash::Hash;

/// Occurrence counts for each distinct symbol of an input sequence.
///
/// Entries keep the order in which their symbol first appeared. Tree
/// construction relies on that order to break ties between equal counts,
/// so the same input always produces the same tree.
#[derive(Debug, Clone)]
pub struct FrequencyTable<S> {
    /// Position of each symbol within `entries`
    index: HashMap<S, usize>,
    /// (symbol, count) pairs in first-occurrence order
    entries: Vec<(S, usize)>,
}

impl<S> Default for FrequencyTable<S> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<S: Eq + Hash + Clone> FrequencyTable<S> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every symbol of `sequence` in a single pass.
    ///
    /// An empty sequence yields an empty table; rejecting that is left to
    /// the tree builder.
    ///
    /// # Example
    ///
    /// ```
    /// use huffman::FrequencyTable;
    ///
    /// let table = FrequencyTable::tally("aabbc".chars());
    /// assert_eq!(table.get(&'a'), 2);
    /// assert_eq!(table.get(&'c'), 1);
    /// assert_eq!(table.len(), 3);
    /// ```
    pub fn tally<I>(sequence: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        let mut table = Self::new();
        for symbol in sequence {
            table.record(symbol);
        }
        table
    }

    /// Adds one occurrence of `symbol`.
    pub fn record(&mut self, symbol: S) {
        match self.index.get(&symbol) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(symbol.clone(), self.entries.len());
                self.entries.push((symbol, 1));
            }
        }
    }

    /// Count for `symbol`, zero if it never occurred.
    pub fn get(&self, symbol: &S) -> usize {
        self.index
            .get(symbol)
            .map(|&i| self.entries[i].1)
            .unwrap_or(0)
    }

    pub fn contains(&self, symbol: &S) -> bool {
        self.index.contains_key(symbol)
    }
}

impl<S> FrequencyTable<S> {
    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the length of the tallied sequence.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Iterates (symbol, count) pairs in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, usize)> + '_ {
        self.entries.iter().map(|(symbol, count)| (symbol, *count))
    }

    /// Consumes the table, yielding its entries in first-occurrence order.
    pub fn into_entries(self) -> Vec<(S, usize)> {
        self.entries
    }
}

impl FrequencyTable<char> {
    /// Tallies the characters of `text`.
    pub fn from_text(text: &str) -> Self {
        Self::tally(text.chars())
    }
}

impl<S: Eq + Hash + Clone> FromIterator<S> for FrequencyTable<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::tally(iter)
    }
}

impl<S: Eq + Hash + Clone> Extend<S> for FrequencyTable<S> {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for symbol in iter {
            self.record(symbol);
        }
    }
}
