use crate::core::emissions::{self, EmissionFactor};
use crate::core::format::{format_carbon_savings, format_production};
use crate::core::production::ProductionParameters;
use crate::core::regional::{check_multiplier, NeutralRegionalYield, RegionRef, RegionalYieldLookup};
use crate::core::units::round_to_places;
use crate::errors::CarbonSavingsResult;
use crate::input::{EngineSettings, InstallationProfile};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Production and carbon savings worked out for an installation. Nothing here is stored;
/// results are recomputed each time they are asked for.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct CalculationResult {
    pub production_kwh: Decimal,
    pub carbon_savings_kg: Decimal,
}

impl CalculationResult {
    pub fn summary(&self) -> String {
        format!(
            "{} / {}",
            format_production(self.production_kwh),
            format_carbon_savings(self.carbon_savings_kg)
        )
    }
}

/// Works out the production of installations and the CO2 they avoid, scaling estimates by
/// the yield of the region each installation is in.
#[derive(Clone, Debug)]
pub struct CarbonSavingsEngine<L = NeutralRegionalYield> {
    regional_yield: L,
    settings: EngineSettings,
}

impl CarbonSavingsEngine {
    pub fn new() -> Self {
        Self::with_regional_yield(NeutralRegionalYield)
    }
}

impl Default for CarbonSavingsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: RegionalYieldLookup> CarbonSavingsEngine<L> {
    pub fn with_regional_yield(regional_yield: L) -> Self {
        Self {
            regional_yield,
            settings: Default::default(),
        }
    }

    pub fn with_settings(regional_yield: L, settings: EngineSettings) -> CarbonSavingsResult<Self> {
        settings.validate()?;

        Ok(Self {
            regional_yield,
            settings,
        })
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// The yield multiplier for a region, falling back to the configured default when
    /// there is no region or the lookup has nothing for it.
    pub fn regional_multiplier(&self, region: Option<&RegionRef>) -> CarbonSavingsResult<Decimal> {
        let Some(region) = region else {
            return Ok(self.settings.default_regional_multiplier);
        };

        match self.regional_yield.regional_multiplier(region) {
            Some(multiplier) => Ok(check_multiplier(multiplier)?),
            None => {
                debug!(
                    ?region,
                    default = %self.settings.default_regional_multiplier,
                    "regional lookup missed, using default multiplier"
                );
                Ok(self.settings.default_regional_multiplier)
            }
        }
    }

    /// Production in kWh for the installation: the explicit value when there is one,
    /// otherwise an estimate rounded to the configured number of decimal places.
    pub fn estimate_production(&self, profile: &InstallationProfile) -> CarbonSavingsResult<Decimal> {
        if let Some(explicit_production_kwh) = profile.explicit_production_kwh {
            debug!(%explicit_production_kwh, "using explicit production value");
            return Ok(explicit_production_kwh);
        }

        let parameters = ProductionParameters::new(
            profile.power_kw,
            profile.period,
            profile.efficiency_ratio,
            profile.loss_factor,
        )?;
        profile.check_date_range()?;

        if parameters.efficiency_ratio().value().is_zero() {
            warn!("efficiency ratio of zero, installation will be estimated to produce nothing");
        }
        if parameters.loss_factor().complement().value().is_zero() {
            warn!("loss factor of one, installation will be estimated to produce nothing");
        }

        let regional_multiplier = self.regional_multiplier(profile.region.as_ref())?;
        let production_kwh = round_to_places(
            parameters.adjusted_kwh(regional_multiplier)?,
            self.settings.production_decimal_places,
        );
        debug!(
            period = %parameters.period(),
            efficiency_ratio = %parameters.efficiency_ratio(),
            loss_factor = %parameters.loss_factor(),
            %regional_multiplier,
            %production_kwh,
            "estimated production"
        );

        Ok(production_kwh)
    }

    /// CO2 in kg avoided by the installation's production, given a factor in kg CO2e per kWh.
    pub fn estimate_carbon_savings(
        &self,
        profile: &InstallationProfile,
        emission_factor: &EmissionFactor,
    ) -> CarbonSavingsResult<Decimal> {
        let production_kwh = self.estimate_production(profile)?;

        Ok(emissions::estimate_carbon_savings(
            production_kwh,
            emission_factor.factor_kg_co2e_per_unit(),
        )?)
    }

    pub fn calculate(
        &self,
        profile: &InstallationProfile,
        emission_factor: &EmissionFactor,
    ) -> CarbonSavingsResult<CalculationResult> {
        let production_kwh = self.estimate_production(profile)?;
        let carbon_savings_kg = emissions::estimate_carbon_savings(
            production_kwh,
            emission_factor.factor_kg_co2e_per_unit(),
        )?;

        Ok(CalculationResult {
            production_kwh,
            carbon_savings_kg,
        })
    }
}

/// Return the profile with its explicit production value cleared, so the next estimate for
/// it is computed from its parameters.
pub fn recalculate(mut profile: InstallationProfile) -> InstallationProfile {
    if profile.has_explicit_production() {
        debug!("clearing explicit production value");
    }
    profile.recalculate();
    profile
}
