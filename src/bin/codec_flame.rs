use huffarith::{arithmetic, FrequencyTable, HuffmanTree, IntervalModel, Precision};

fn main() -> huffarith::Result<()> {
    let input = (0..10000u32)
        .map(|i| b"the rain in spain"[(i % 17) as usize])
        .collect::<Vec<_>>();
    let table = FrequencyTable::from_symbols(&input)?;
    let model = IntervalModel::from_frequencies(&table);
    let precision = Precision::default();

    for _ in 0..200 {
        let tree = HuffmanTree::from_frequencies(&table)?;
        let bits = tree.code_table().encode(&input)?;
        tree.decode(&bits)?;

        let bits = arithmetic::encode(&input, &model, precision)?;
        arithmetic::decode(&bits, precision, input.len(), &model)?;
    }
    Ok(())
}
