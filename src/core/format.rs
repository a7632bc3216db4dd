use crate::core::units::round_to_places;
use rust_decimal::Decimal;

const DISPLAY_DECIMAL_PLACES: u32 = 2;

pub const PRODUCTION_UNIT: &str = "kWh";
pub const CARBON_UNIT: &str = "kg CO2";

/// Render a value with exactly two decimal places (always with `.` as the decimal point
/// and no grouping) followed by a unit suffix.
pub fn format_with_unit(value: Decimal, unit: &str) -> String {
    let rounded = round_to_places(value, DISPLAY_DECIMAL_PLACES);
    format!("{rounded:.2} {unit}")
}

pub fn format_production(value: Decimal) -> String {
    format_with_unit(value, PRODUCTION_UNIT)
}

pub fn format_carbon_savings(value: Decimal) -> String {
    format_with_unit(value, CARBON_UNIT)
}

pub fn format_absorption(value: Decimal) -> String {
    format_with_unit(value, CARBON_UNIT)
}
