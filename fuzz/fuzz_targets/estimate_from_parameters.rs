#![no_main]

use arbitrary::Arbitrary;
use carbon_savings::{
    CalculationPeriod, CarbonSavingsEngine, EmissionFactor, InstallationProfile, RegionRef,
    RegionalYieldTable,
};
use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;

#[derive(Arbitrary, Debug)]
struct FuzzParameters {
    power_kw: (i64, u8),
    period: CalculationPeriod,
    efficiency_ratio: (i64, u8),
    loss_factor: (i64, u8),
    province_multiplier: (i64, u8),
    province_id: Option<u64>,
    municipality_id: Option<u64>,
    explicit_production_kwh: Option<(i64, u8)>,
    factor_kg_co2e_per_unit: (i64, u8),
}

fn to_decimal((mantissa, scale): (i64, u8)) -> Decimal {
    Decimal::new(mantissa, u32::from(scale % 29))
}

fuzz_target!(|parameters: FuzzParameters| {
    let regional_yield = match RegionalYieldTable::new()
        .with_province(1, to_decimal(parameters.province_multiplier))
    {
        Ok(table) => table,
        Err(_) => RegionalYieldTable::new(),
    };
    let engine = CarbonSavingsEngine::with_regional_yield(regional_yield);

    let mut profile = InstallationProfile::new(
        to_decimal(parameters.power_kw),
        parameters.period,
        to_decimal(parameters.efficiency_ratio),
        to_decimal(parameters.loss_factor),
    )
    .with_region(RegionRef {
        province_id: parameters.province_id,
        municipality_id: parameters.municipality_id,
    });
    profile.explicit_production_kwh = parameters.explicit_production_kwh.map(to_decimal);

    if let Ok(factor) = EmissionFactor::new(
        "fuzzed activity",
        to_decimal(parameters.factor_kg_co2e_per_unit),
        "kWh",
    ) {
        let _ = engine.calculate(&profile, &factor);
    }
});
