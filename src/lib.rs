pub mod core;
pub mod engine;
pub mod errors;
pub mod input;

#[cfg(test)]
mod tests;

pub use crate::core::emissions::{estimate_carbon_savings, EmissionFactor};
pub use crate::core::format::{format_carbon_savings, format_production};
pub use crate::core::production::estimate_production;
pub use crate::core::regional::{
    NeutralRegionalYield, RegionRef, RegionalYieldLookup, RegionalYieldTable,
};
pub use crate::core::units::CalculationPeriod;
pub use crate::engine::{recalculate, CalculationResult, CarbonSavingsEngine};
pub use crate::errors::{CarbonSavingsError, CarbonSavingsResult, InvalidParameter};
pub use crate::input::{EngineSettings, InstallationProfile};

use crate::input::ingest_profile;
use std::io::Read;
use tracing::debug;

/// Read an installation profile as JSON and work out its production and carbon savings.
pub fn run_calculation(
    input: impl Read,
    emission_factor: &EmissionFactor,
    regional_yield: impl RegionalYieldLookup,
    settings: EngineSettings,
) -> CarbonSavingsResult<CalculationResult> {
    let profile = ingest_profile(input)?;
    debug!(period = %profile.period, "ingested installation profile");

    let engine = CarbonSavingsEngine::with_settings(regional_yield, settings)?;

    engine.calculate(&profile, emission_factor)
}
