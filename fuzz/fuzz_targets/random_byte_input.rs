#![no_main]

use carbon_savings::{run_calculation, EmissionFactor, EngineSettings, NeutralRegionalYield};
use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;
use std::io::{BufReader, Cursor};

fuzz_target!(|data: &[u8]| {
    let factor = EmissionFactor::new("Grid electricity", Decimal::new(25, 2), "kWh").unwrap();
    let _ = run_calculation(
        BufReader::new(Cursor::new(data)),
        &factor,
        NeutralRegionalYield,
        EngineSettings::default(),
    );
});
