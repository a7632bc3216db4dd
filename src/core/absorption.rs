use crate::errors::InvalidParameter;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A plant species and how much CO2 a single specimen absorbs in a year.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "PlantSpeciesFields")]
pub struct PlantSpecies {
    name: String,
    co2_absorption_kg_per_year: Decimal,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PlantSpeciesFields {
    name: String,
    co2_absorption_kg_per_year: Decimal,
}

impl TryFrom<PlantSpeciesFields> for PlantSpecies {
    type Error = InvalidParameter;

    fn try_from(fields: PlantSpeciesFields) -> Result<Self, Self::Error> {
        Self::new(fields.name, fields.co2_absorption_kg_per_year)
    }
}

impl PlantSpecies {
    pub fn new(
        name: impl Into<String>,
        co2_absorption_kg_per_year: Decimal,
    ) -> Result<Self, InvalidParameter> {
        if co2_absorption_kg_per_year < Decimal::ZERO {
            return Err(InvalidParameter::NegativeAbsorptionRate(
                co2_absorption_kg_per_year,
            ));
        }

        Ok(Self {
            name: name.into(),
            co2_absorption_kg_per_year,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn co2_absorption_kg_per_year(&self) -> Decimal {
        self.co2_absorption_kg_per_year
    }

    /// CO2 (in kg) absorbed by `quantity` specimens over `years` years, assuming a constant
    /// absorption rate.
    pub fn projected_absorption_kg(
        &self,
        quantity: u32,
        years: u32,
    ) -> Result<Decimal, InvalidParameter> {
        self.co2_absorption_kg_per_year
            .checked_mul(Decimal::from(quantity) * Decimal::from(years))
            .ok_or(InvalidParameter::Overflow("CO2 absorption projection"))
    }
}
