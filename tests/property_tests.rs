use std::collections::VecDeque;

use huffarith::{arithmetic, bits, Error, FrequencyTable, HuffmanTree, IntervalModel, Precision};
use proptest::prelude::*;

fn take_min(leaves: &mut VecDeque<u64>, merged: &mut VecDeque<u64>) -> Option<u64> {
    match (leaves.front(), merged.front()) {
        (Some(&a), Some(&b)) if b < a => merged.pop_front(),
        (Some(_), _) => leaves.pop_front(),
        (None, _) => merged.pop_front(),
    }
}

/// Minimal weighted path length via the two-queue merge over sorted weights.
fn optimal_cost(freqs: &[u64]) -> u64 {
    if freqs.len() < 2 {
        return freqs.iter().sum();
    }
    let mut leaves: VecDeque<u64> = {
        let mut v = freqs.to_vec();
        v.sort_unstable();
        v.into()
    };
    let mut merged: VecDeque<u64> = VecDeque::new();
    let mut cost = 0;
    while leaves.len() + merged.len() > 1 {
        let a = take_min(&mut leaves, &mut merged).unwrap_or(0);
        let b = take_min(&mut leaves, &mut merged).unwrap_or(0);
        cost += a + b;
        merged.push_back(a + b);
    }
    cost
}

#[test]
fn test_aabc_both_coders() {
    let msg: Vec<char> = "aabc".chars().collect();
    let table = FrequencyTable::from_symbols(&msg).unwrap();

    let tree = HuffmanTree::from_frequencies(&table).unwrap();
    let encoded = tree.code_table().encode(&msg).unwrap();
    assert_eq!(bits::to_bit_string(&encoded).unwrap(), "001011");
    assert_eq!(tree.decode(&encoded).unwrap(), msg);
    assert_eq!(bits::compression_ratio(encoded.len(), msg.len()), Some(0.1875));

    let model = IntervalModel::from_frequencies(&table);
    let k = Precision::new(8).unwrap();
    let encoded = arithmetic::encode(&msg, &model, k).unwrap();
    assert_eq!(arithmetic::decode(&encoded, k, msg.len(), &model).unwrap(), msg);
}

#[test]
fn test_transcript_text_roundtrip() {
    let msg: Vec<char> = "a persisted transcript stores bits as text".chars().collect();
    let table = FrequencyTable::from_symbols(&msg).unwrap();
    let model = IntervalModel::from_frequencies(&table);
    let k = Precision::default();

    let text = bits::to_bit_string(&arithmetic::encode(&msg, &model, k).unwrap()).unwrap();
    let parsed = bits::parse_bit_string(&text).unwrap();
    assert_eq!(arithmetic::decode(&parsed, k, msg.len(), &model).unwrap(), msg);
}

#[test]
fn test_manual_table_checked_before_use() {
    let msg: Vec<char> = "hello".chars().collect();
    let manual = FrequencyTable::from_counts(vec![('h', 1), ('e', 1), ('l', 1), ('o', 1)]).unwrap();
    assert!(matches!(manual.verify(&msg), Err(Error::FrequencyMismatch { .. })));

    // Any consistent table works, even one listing symbols the message lacks.
    let wider =
        FrequencyTable::from_counts(vec![('o', 1), ('l', 2), ('e', 1), ('h', 1), ('z', 3)])
            .unwrap();
    let model = IntervalModel::from_frequencies(&wider);
    let k = Precision::minimum_for(model.total()).unwrap();
    let encoded = arithmetic::encode(&msg, &model, k).unwrap();
    assert_eq!(arithmetic::decode(&encoded, k, msg.len(), &model).unwrap(), msg);
}

proptest! {
    #[test]
    fn test_huffman_roundtrip(input in prop::collection::vec(any::<char>(), 1..200)) {
        let table = FrequencyTable::from_symbols(&input).unwrap();
        let tree = HuffmanTree::from_frequencies(&table).unwrap();
        let encoded = tree.code_table().encode(&input).unwrap();
        prop_assert_eq!(tree.decode(&encoded).unwrap(), input);
    }

    #[test]
    fn test_huffman_length_is_optimal(input in prop::collection::vec(0u8..20, 1..400)) {
        let table = FrequencyTable::from_symbols(&input).unwrap();
        let codes = HuffmanTree::from_frequencies(&table).unwrap().code_table();
        let encoded = codes.encode(&input).unwrap();
        let freqs: Vec<u64> = table.iter().map(|(_, f)| f).collect();

        prop_assert_eq!(encoded.len() as u64, codes.encoded_len(&table).unwrap());
        if table.len() > 1 {
            prop_assert_eq!(encoded.len() as u64, optimal_cost(&freqs));
        } else {
            prop_assert_eq!(encoded.len(), input.len());
        }
    }

    #[test]
    fn test_arith_roundtrip(
        input in prop::collection::vec(0u16..300, 1..200),
        total_bits in 12u32..=62,
    ) {
        let table = FrequencyTable::from_symbols(&input).unwrap();
        let model = IntervalModel::from_frequencies(&table);
        let k = Precision::new(total_bits).unwrap();
        prop_assume!(k.check(model.total()).is_ok());

        let encoded = arithmetic::encode(&input, &model, k).unwrap();
        prop_assert_eq!(arithmetic::decode(&encoded, k, input.len(), &model).unwrap(), input);
    }

    #[test]
    fn test_arith_supplied_table_roundtrip(
        counts in prop::collection::vec(1u64..50, 1..10),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..100),
    ) {
        let table = FrequencyTable::from_counts(counts.iter().copied().enumerate()).unwrap();
        let model = IntervalModel::from_frequencies(&table);
        let input: Vec<usize> = picks.iter().map(|i| i.index(counts.len())).collect();
        let k = Precision::minimum_for(model.total()).unwrap();

        let encoded = arithmetic::encode(&input, &model, k).unwrap();
        prop_assert_eq!(arithmetic::decode(&encoded, k, input.len(), &model).unwrap(), input);
    }

    #[test]
    fn test_encoding_is_deterministic(input in prop::collection::vec(0u8..6, 1..120)) {
        let table = FrequencyTable::from_symbols(&input).unwrap();
        let again = FrequencyTable::from_symbols(&input).unwrap();

        let first = HuffmanTree::from_frequencies(&table).unwrap().code_table();
        let second = HuffmanTree::from_frequencies(&again).unwrap().code_table();
        prop_assert_eq!(first.encode(&input).unwrap(), second.encode(&input).unwrap());

        let k = Precision::default();
        let a = arithmetic::encode(&input, &IntervalModel::from_frequencies(&table), k).unwrap();
        let b = arithmetic::encode(&input, &IntervalModel::from_frequencies(&again), k).unwrap();
        prop_assert_eq!(a, b);
    }
}
