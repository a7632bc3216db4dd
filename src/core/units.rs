use crate::errors::InvalidParameter;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use strum_macros::{EnumIter, EnumString};

pub const HOURS_PER_DAY: u32 = 24;
pub const DAYS_PER_YEAR: u32 = 365;
pub const MONTHS_PER_YEAR: u32 = 12;
pub const HOURS_PER_YEAR: u32 = HOURS_PER_DAY * DAYS_PER_YEAR;
// averaged month, so twelve of them make up a non-leap year
pub const HOURS_PER_MONTH: u32 = HOURS_PER_YEAR / MONTHS_PER_YEAR;
pub const KILOGRAMS_PER_TONNE: u32 = 1_000;

/// Number of decimal places production values are stored with.
pub const PERSISTENCE_DECIMAL_PLACES: u32 = 2;

/// Round half away from zero to the given number of decimal places, the way stored
/// production values are rounded.
pub fn round_to_places(value: Decimal, decimal_places: u32) -> Decimal {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero)
}

/// The horizon a production estimate covers.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    strum_macros::Display,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CalculationPeriod {
    Annual,
    Monthly,
    Daily,
}

impl CalculationPeriod {
    pub fn hours(&self) -> u32 {
        match self {
            CalculationPeriod::Annual => HOURS_PER_YEAR,
            CalculationPeriod::Monthly => HOURS_PER_MONTH,
            CalculationPeriod::Daily => HOURS_PER_DAY,
        }
    }
}

/// A dimensionless fraction within [0, 1], such as an efficiency or a loss factor.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
#[repr(transparent)]
pub struct Ratio(Decimal);

impl Ratio {
    pub const ZERO: Ratio = Ratio(Decimal::ZERO);
    pub const ONE: Ratio = Ratio(Decimal::ONE);

    pub fn new(value: Decimal) -> Result<Self, RatioError> {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(RatioError(value));
        }

        Ok(Self(value))
    }

    /// As `new`, but reporting the field the value was given for.
    pub fn named(name: &'static str, value: Decimal) -> Result<Self, InvalidParameter> {
        Self::new(value).map_err(|_| InvalidParameter::RatioOutOfRange { name, value })
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// The remaining fraction, i.e. 1 - self.
    pub fn complement(&self) -> Ratio {
        Ratio(Decimal::ONE - self.0)
    }
}

impl Display for Ratio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Ratio {
    type Error = RatioError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Ratio> for Decimal {
    fn from(ratio: Ratio) -> Self {
        ratio.0
    }
}

#[derive(Clone, Debug, thiserror::Error, PartialEq)]
#[error("Ratio must be a number between 0 and 1 inclusive, got {0}")]
pub struct RatioError(Decimal);

pub fn kilograms_to_tonnes(kilograms: Decimal) -> Decimal {
    kilograms / Decimal::from(KILOGRAMS_PER_TONNE)
}
