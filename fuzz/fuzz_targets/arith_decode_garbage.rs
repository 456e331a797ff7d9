#![no_main]
use huffarith::{arithmetic, FrequencyTable, HuffmanTree, IntervalModel, Precision};
use libfuzzer_sys::fuzz_target;

// Arbitrary bytes as a bit stream must never panic either decoder.
fuzz_target!(|data: (Vec<u8>, u8)| {
    let (bytes, len) = data;
    let table = FrequencyTable::from_counts(vec![(b'a', 7), (b'b', 2), (b'c', 1)]).unwrap();

    let bits: Vec<u8> = bytes.iter().map(|b| b & 1).collect();
    let model = IntervalModel::from_frequencies(&table);
    let precision = Precision::new(12).unwrap();
    let _ = arithmetic::decode(&bits, precision, usize::from(len), &model);

    let tree = HuffmanTree::from_frequencies(&table).unwrap();
    let _ = tree.decode(&bytes);
});
