use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CarbonSavingsError {
    #[error("Calculation rejected due to invalid parameter: {0}")]
    InvalidParameter(#[from] InvalidParameter),
    #[error("Input was considered invalid due to error: {0}")]
    InvalidInput(#[from] anyhow::Error),
}

/// A value outside of the domain a calculation accepts.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum InvalidParameter {
    #[error("Installation power must be greater than zero, got {0} kW")]
    NonPositivePower(Decimal),
    #[error("{name} must be between 0 and 1 inclusive, got {value}")]
    RatioOutOfRange { name: &'static str, value: Decimal },
    #[error("Emission factor must not be negative, got {0} kg CO2e per unit")]
    NegativeEmissionFactor(Decimal),
    #[error("Regional multiplier must be greater than zero, got {0}")]
    NonPositiveRegionalMultiplier(Decimal),
    #[error("End date {end} is before start date {start}")]
    EndBeforeStart {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
    #[error("Energy production must not be negative, got {0} kWh")]
    NegativeProduction(Decimal),
    #[error("Regional yield multiplier for {scope} {id} is already defined")]
    DuplicateRegion { scope: &'static str, id: u64 },
    #[error("Decimal places must be at most {max}, got {value}")]
    DecimalPlacesOutOfRange { value: u32, max: u32 },
    #[error("Activity quantity must not be negative, got {0}")]
    NegativeQuantity(Decimal),
    #[error("CO2 absorption rate must not be negative, got {0} kg per year")]
    NegativeAbsorptionRate(Decimal),
    #[error("Result of {0} is too large to represent")]
    Overflow(&'static str),
}

pub type CarbonSavingsResult<T> = Result<T, CarbonSavingsError>;
