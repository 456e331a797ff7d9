#![no_main]
use huffarith::{arithmetic, FrequencyTable, IntervalModel, Precision};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<u8>, u8)| {
    let (input, extra) = data;
    if input.is_empty() {
        return;
    }

    let model = IntervalModel::from_frequencies(&FrequencyTable::from_symbols(&input).unwrap());
    let min = Precision::minimum_for(model.total()).unwrap().bits();
    let bits = (min + u32::from(extra % 16)).min(huffarith::arithmetic::MAX_PRECISION);
    let precision = Precision::new(bits).unwrap();

    let encoded = arithmetic::encode(&input, &model, precision).unwrap();
    let output = arithmetic::decode(&encoded, precision, input.len(), &model).unwrap();
    assert_eq!(input, output);
});
