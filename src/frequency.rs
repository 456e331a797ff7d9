//! Symbol frequency tables.
//!
//! A [`FrequencyTable`] keeps its entries in a fixed order: the order of first
//! appearance when counted from a message, or the caller's order when supplied
//! directly. Huffman coding ignores that order apart from tie-breaking, but the
//! arithmetic [`IntervalModel`](crate::IntervalModel) derives its cumulative
//! ranges from it, so encoder and decoder must see the same table.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{Error, Result};

/// Occurrence counts per symbol, in a stable iteration order.
#[derive(Debug, Clone)]
pub struct FrequencyTable<S> {
    entries: Vec<(S, u64)>,
    index: HashMap<S, usize>,
    total: u64,
}

impl<S: Clone + Eq + Hash + Debug> FrequencyTable<S> {
    /// Count symbol occurrences in a message.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if the message is empty.
    pub fn from_symbols(symbols: &[S]) -> Result<Self> {
        if symbols.is_empty() {
            return Err(Error::InvalidInput("empty message".into()));
        }

        let mut entries: Vec<(S, u64)> = Vec::new();
        let mut index: HashMap<S, usize> = HashMap::new();
        for s in symbols {
            match index.get(s).copied() {
                Some(i) => entries[i].1 += 1,
                None => {
                    index.insert(s.clone(), entries.len());
                    entries.push((s.clone(), 1));
                }
            }
        }

        Ok(Self {
            entries,
            index,
            total: symbols.len() as u64,
        })
    }

    /// Build a table from externally supplied `(symbol, count)` pairs, keeping
    /// their order.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if the table is empty, a count is zero, a
    /// symbol repeats, or the total overflows.
    pub fn from_counts<I>(counts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
    {
        let mut entries = Vec::new();
        let mut index = HashMap::new();
        let mut total = 0u64;

        for (s, count) in counts {
            if count == 0 {
                return Err(Error::InvalidInput(format!("zero count for {s:?}")));
            }
            if index.contains_key(&s) {
                return Err(Error::InvalidInput(format!("duplicate symbol {s:?}")));
            }
            total = total
                .checked_add(count)
                .ok_or_else(|| Error::InvalidInput("total frequency overflows u64".into()))?;
            index.insert(s.clone(), entries.len());
            entries.push((s, count));
        }

        if entries.is_empty() {
            return Err(Error::InvalidInput("empty frequency table".into()));
        }

        Ok(Self {
            entries,
            index,
            total,
        })
    }

    /// Count for `symbol`, if present.
    pub fn get(&self, symbol: &S) -> Option<u64> {
        self.index.get(symbol).map(|&i| self.entries[i].1)
    }

    /// Check the table against the symbol multiset of `symbols`.
    ///
    /// # Errors
    /// Returns `Error::FrequencyMismatch` for the first symbol (in table order,
    /// then message order) whose counts disagree.
    pub fn verify(&self, symbols: &[S]) -> Result<()> {
        let actual = Self::from_symbols(symbols).ok();
        let actual_count = |s: &S| actual.as_ref().and_then(|t| t.get(s)).unwrap_or(0);

        for (s, expected) in &self.entries {
            let got = actual_count(s);
            if got != *expected {
                return Err(Error::FrequencyMismatch {
                    symbol: format!("{s:?}"),
                    expected: *expected,
                    actual: got,
                });
            }
        }

        if let Some(actual) = &actual {
            for (s, got) in actual.iter() {
                if !self.index.contains_key(s) {
                    return Err(Error::FrequencyMismatch {
                        symbol: format!("{s:?}"),
                        expected: 0,
                        actual: got,
                    });
                }
            }
        }
        Ok(())
    }
}

impl<S> FrequencyTable<S> {
    /// Sum of all counts (`T`).
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a successfully built table.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(symbol, count)` in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, u64)> + '_ {
        self.entries.iter().map(|(s, c)| (s, *c))
    }

    /// Relative frequency of each symbol, in table order.
    pub fn probabilities(&self) -> Vec<(&S, f64)> {
        let total = self.total as f64;
        self.iter().map(|(s, c)| (s, c as f64 / total)).collect()
    }

    /// Shannon entropy of the distribution in bits per symbol.
    pub fn entropy(&self) -> f64 {
        self.probabilities()
            .into_iter()
            .map(|(_, p)| -p * p.log2())
            .sum()
    }
}
