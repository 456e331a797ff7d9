#![no_main]
use huffarith::{FrequencyTable, HuffmanTree};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: Vec<u8>| {
    if input.is_empty() {
        return;
    }

    let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_symbols(&input).unwrap()).unwrap();
    let bits = tree.code_table().encode(&input).unwrap();
    assert_eq!(tree.decode(&bits).unwrap(), input);
});
