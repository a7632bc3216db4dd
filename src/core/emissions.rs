use crate::core::units::kilograms_to_tonnes;
use crate::errors::InvalidParameter;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An emission factor for an activity, i.e. how much CO2-equivalent one unit of that
/// activity emits (or, for generation that displaces it, avoids).
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "EmissionFactorFields")]
pub struct EmissionFactor {
    activity: String,
    factor_kg_co2e_per_unit: Decimal,
    unit: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct EmissionFactorFields {
    activity: String,
    factor_kg_co2e_per_unit: Decimal,
    unit: String,
}

impl TryFrom<EmissionFactorFields> for EmissionFactor {
    type Error = InvalidParameter;

    fn try_from(fields: EmissionFactorFields) -> Result<Self, Self::Error> {
        Self::new(fields.activity, fields.factor_kg_co2e_per_unit, fields.unit)
    }
}

impl EmissionFactor {
    /// Arguments:
    /// * `activity` - description of the activity the factor applies to
    /// * `factor_kg_co2e_per_unit` - kg of CO2-equivalent per unit of activity; zero is
    ///                               valid for zero-emission activities
    /// * `unit` - the unit activity quantities are expressed in, e.g. "kWh"
    pub fn new(
        activity: impl Into<String>,
        factor_kg_co2e_per_unit: Decimal,
        unit: impl Into<String>,
    ) -> Result<Self, InvalidParameter> {
        check_factor(factor_kg_co2e_per_unit)?;

        Ok(Self {
            activity: activity.into(),
            factor_kg_co2e_per_unit,
            unit: unit.into(),
        })
    }

    pub fn activity(&self) -> &str {
        &self.activity
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn factor_kg_co2e_per_unit(&self) -> Decimal {
        self.factor_kg_co2e_per_unit
    }

    pub fn factor_tonnes_co2e_per_unit(&self) -> Decimal {
        kilograms_to_tonnes(self.factor_kg_co2e_per_unit)
    }

    /// Emissions in kg CO2e for a quantity of this activity, given in the factor's unit.
    pub fn calculate_emissions(&self, quantity: Decimal) -> Result<Decimal, InvalidParameter> {
        if quantity < Decimal::ZERO {
            return Err(InvalidParameter::NegativeQuantity(quantity));
        }

        quantity
            .checked_mul(self.factor_kg_co2e_per_unit)
            .ok_or(InvalidParameter::Overflow("emissions calculation"))
    }

    pub fn calculate_emissions_tonnes(
        &self,
        quantity: Decimal,
    ) -> Result<Decimal, InvalidParameter> {
        Ok(kilograms_to_tonnes(self.calculate_emissions(quantity)?))
    }
}

/// Convert produced energy into avoided CO2 (in kg) using a factor in kg CO2e per kWh.
///
/// Units are not converted, so the factor is expected to be per kWh.
pub fn estimate_carbon_savings(
    production_kwh: Decimal,
    factor_kg_co2e_per_unit: Decimal,
) -> Result<Decimal, InvalidParameter> {
    if production_kwh < Decimal::ZERO {
        return Err(InvalidParameter::NegativeProduction(production_kwh));
    }
    check_factor(factor_kg_co2e_per_unit)?;

    production_kwh
        .checked_mul(factor_kg_co2e_per_unit)
        .ok_or(InvalidParameter::Overflow("carbon savings estimate"))
}

fn check_factor(factor_kg_co2e_per_unit: Decimal) -> Result<(), InvalidParameter> {
    if factor_kg_co2e_per_unit < Decimal::ZERO {
        return Err(InvalidParameter::NegativeEmissionFactor(
            factor_kg_co2e_per_unit,
        ));
    }

    Ok(())
}
