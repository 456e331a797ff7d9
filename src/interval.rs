//! Cumulative-frequency interval model for arithmetic coding.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

/// Half-open cumulative ranges `[low, high)` partitioning `[0, T)`.
///
/// Ranges are assigned in frequency-table order. Two models built from the
/// same counts in a different order are not interchangeable.
#[derive(Debug, Clone)]
pub struct IntervalModel<S> {
    ranges: Vec<(S, u64, u64)>,
    index: HashMap<S, usize>,
    total: u64,
}

impl<S: Clone + Eq + Hash + Debug> IntervalModel<S> {
    /// Build the model from a frequency table.
    pub fn from_frequencies(table: &FrequencyTable<S>) -> Self {
        let mut ranges = Vec::with_capacity(table.len());
        let mut index = HashMap::with_capacity(table.len());
        let mut cum = 0u64;

        for (symbol, freq) in table.iter() {
            index.insert(symbol.clone(), ranges.len());
            ranges.push((symbol.clone(), cum, cum + freq));
            cum += freq;
        }

        log::debug!("interval model: {} symbols, total {}", ranges.len(), cum);
        Self {
            ranges,
            index,
            total: cum,
        }
    }

    /// The `[low, high)` range of `symbol`.
    ///
    /// # Errors
    /// Returns `Error::UnknownSymbol` if the symbol is not in the model.
    pub fn range(&self, symbol: &S) -> Result<(u64, u64)> {
        self.index
            .get(symbol)
            .map(|&i| (self.ranges[i].1, self.ranges[i].2))
            .ok_or_else(|| Error::UnknownSymbol(format!("{symbol:?}")))
    }
}

impl<S> IntervalModel<S> {
    /// Sum of all frequencies (`T`).
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// True if the model has no symbols.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Iterate `(symbol, low, high)` in model order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, u64, u64)> + '_ {
        self.ranges.iter().map(|(s, lo, hi)| (s, *lo, *hi))
    }

    /// The symbol whose range contains `value`, with its bounds.
    pub fn symbol_at(&self, value: u64) -> Option<(&S, u64, u64)> {
        self.iter().find(|&(_, lo, hi)| lo <= value && value < hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ranges_follow_table_order() {
        let table = FrequencyTable::from_counts(vec![('a', 2), ('b', 1), ('c', 1)]).unwrap();
        let model = IntervalModel::from_frequencies(&table);
        assert_eq!(model.total(), 4);
        assert_eq!(model.range(&'a').unwrap(), (0, 2));
        assert_eq!(model.range(&'b').unwrap(), (2, 3));
        assert_eq!(model.range(&'c').unwrap(), (3, 4));
        assert_eq!(model.symbol_at(1).map(|(s, _, _)| *s), Some('a'));
        assert_eq!(model.symbol_at(3).map(|(s, _, _)| *s), Some('c'));
        assert!(model.symbol_at(4).is_none());
        assert_eq!(model.range(&'x'), Err(Error::UnknownSymbol("'x'".into())));
    }

    #[test]
    fn test_order_changes_ranges() {
        let ab = FrequencyTable::from_counts(vec![('a', 3), ('b', 1)]).unwrap();
        let ba = FrequencyTable::from_counts(vec![('b', 1), ('a', 3)]).unwrap();
        let m1 = IntervalModel::from_frequencies(&ab);
        let m2 = IntervalModel::from_frequencies(&ba);
        assert_ne!(m1.range(&'a').unwrap(), m2.range(&'a').unwrap());
    }

    proptest! {
        #[test]
        fn prop_ranges_partition_total(counts in prop::collection::vec(1u64..1000, 1..50)) {
            let table = FrequencyTable::from_counts(counts.iter().copied().enumerate()).unwrap();
            let model = IntervalModel::from_frequencies(&table);

            let mut expected_low = 0;
            for (_, lo, hi) in model.iter() {
                prop_assert_eq!(lo, expected_low);
                prop_assert!(lo < hi);
                expected_low = hi;
            }
            prop_assert_eq!(expected_low, model.total());
            prop_assert_eq!(model.total(), counts.iter().sum::<u64>());
        }
    }
}
