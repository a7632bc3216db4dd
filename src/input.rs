use crate::core::regional::{check_multiplier, RegionRef};
use crate::core::units::{CalculationPeriod, PERSISTENCE_DECIMAL_PLACES};
use crate::errors::{CarbonSavingsResult, InvalidParameter};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Read};

pub fn ingest_profile(json: impl Read) -> anyhow::Result<InstallationProfile> {
    Ok(serde_json::from_reader(BufReader::new(json))?)
}

pub fn ingest_profiles(json: impl Read) -> anyhow::Result<Vec<InstallationProfile>> {
    Ok(serde_json::from_reader(BufReader::new(json))?)
}

/// An installation whose production and carbon savings are to be estimated.
///
/// Fields are kept as given so that a profile can be stored and displayed even when it
/// holds values a calculation would reject.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InstallationProfile {
    /// Nameplate power, in kW
    pub power_kw: Decimal,
    pub period: CalculationPeriod,
    pub efficiency_ratio: Decimal,
    pub loss_factor: Decimal,
    pub region: Option<RegionRef>,
    /// Known production for the period, in kWh, which takes the place of any estimate
    pub explicit_production_kwh: Option<Decimal>,
    // dates are informational only and do not prorate the estimate
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl InstallationProfile {
    pub fn new(
        power_kw: Decimal,
        period: CalculationPeriod,
        efficiency_ratio: Decimal,
        loss_factor: Decimal,
    ) -> Self {
        Self {
            power_kw,
            period,
            efficiency_ratio,
            loss_factor,
            region: None,
            explicit_production_kwh: None,
            start_date: None,
            end_date: None,
        }
    }

    pub fn with_region(mut self, region: RegionRef) -> Self {
        self.region = Some(region);
        self
    }

    pub fn with_explicit_production(mut self, production_kwh: Decimal) -> Self {
        self.explicit_production_kwh = Some(production_kwh);
        self
    }

    pub fn with_dates(mut self, start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    /// Drop any explicit production value so the next estimate is worked out afresh.
    pub fn recalculate(&mut self) {
        self.explicit_production_kwh = None;
    }

    pub fn has_explicit_production(&self) -> bool {
        self.explicit_production_kwh.is_some()
    }

    pub(crate) fn check_date_range(&self) -> Result<(), InvalidParameter> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if end < start => {
                Err(InvalidParameter::EndBeforeStart { start, end })
            }
            _ => Ok(()),
        }
    }
}

/// Settings an engine runs with. Omitted fields take their defaults.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct EngineSettings {
    /// Decimal places estimated production is rounded to
    pub production_decimal_places: u32,
    /// Multiplier used when an installation has no region or its region is not known
    pub default_regional_multiplier: Decimal,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            production_decimal_places: PERSISTENCE_DECIMAL_PLACES,
            default_regional_multiplier: Decimal::ONE,
        }
    }
}

// the largest scale a Decimal can hold
const MAX_DECIMAL_PLACES: u32 = 28;

impl EngineSettings {
    pub fn from_json(json: impl Read) -> anyhow::Result<Self> {
        let settings: Self = serde_json::from_reader(BufReader::new(json))?;
        settings.validate()?;

        Ok(settings)
    }

    pub fn validate(&self) -> CarbonSavingsResult<()> {
        check_multiplier(self.default_regional_multiplier)?;
        if self.production_decimal_places > MAX_DECIMAL_PLACES {
            return Err(InvalidParameter::DecimalPlacesOutOfRange {
                value: self.production_decimal_places,
                max: MAX_DECIMAL_PLACES,
            }
            .into());
        }

        Ok(())
    }
}
