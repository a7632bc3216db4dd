//! Estimation of the energy an installation produces over a period.

use crate::core::regional::check_multiplier;
use crate::core::units::{round_to_places, CalculationPeriod, Ratio, PERSISTENCE_DECIMAL_PLACES};
use crate::errors::InvalidParameter;
use rust_decimal::Decimal;

/// Validated inputs to a production estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProductionParameters {
    power_kw: Decimal,
    period: CalculationPeriod,
    efficiency_ratio: Ratio,
    loss_factor: Ratio,
}

impl ProductionParameters {
    /// Arguments:
    /// * `power_kw` - nameplate power of the installation, in kW
    /// * `period` - horizon the estimate covers
    /// * `efficiency_ratio` - fraction of the theoretical output actually captured
    /// * `loss_factor` - fraction of the captured output lost to the rest of the system
    ///                   (wiring, inverter etc.)
    pub fn new(
        power_kw: Decimal,
        period: CalculationPeriod,
        efficiency_ratio: Decimal,
        loss_factor: Decimal,
    ) -> Result<Self, InvalidParameter> {
        if power_kw <= Decimal::ZERO {
            return Err(InvalidParameter::NonPositivePower(power_kw));
        }

        Ok(Self {
            power_kw,
            period,
            efficiency_ratio: Ratio::named("efficiency_ratio", efficiency_ratio)?,
            loss_factor: Ratio::named("loss_factor", loss_factor)?,
        })
    }

    pub fn power_kw(&self) -> Decimal {
        self.power_kw
    }

    pub fn period(&self) -> CalculationPeriod {
        self.period
    }

    pub fn efficiency_ratio(&self) -> Ratio {
        self.efficiency_ratio
    }

    pub fn loss_factor(&self) -> Ratio {
        self.loss_factor
    }

    /// Output in kWh if the installation ran at nameplate power for the whole period.
    pub fn theoretical_kwh(&self) -> Result<Decimal, InvalidParameter> {
        self.power_kw
            .checked_mul(Decimal::from(self.period.hours()))
            .ok_or(InvalidParameter::Overflow("theoretical production"))
    }

    /// Output in kWh after the regional yield, efficiency and losses are applied, at full
    /// precision.
    pub fn adjusted_kwh(&self, regional_multiplier: Decimal) -> Result<Decimal, InvalidParameter> {
        // E = P * h * f_region * eta * (1 - loss)
        [
            regional_multiplier,
            self.efficiency_ratio.value(),
            self.loss_factor.complement().value(),
        ]
        .into_iter()
        .try_fold(self.theoretical_kwh()?, |kwh, factor| kwh.checked_mul(factor))
        .ok_or(InvalidParameter::Overflow("adjusted production"))
    }
}

/// Estimate production in kWh, rounded to the precision production values are stored with.
///
/// An explicit production value is returned unchanged without looking at any of the other
/// arguments.
pub fn estimate_production(
    power_kw: Decimal,
    period: CalculationPeriod,
    efficiency_ratio: Decimal,
    loss_factor: Decimal,
    regional_multiplier: Decimal,
    explicit_production_kwh: Option<Decimal>,
) -> Result<Decimal, InvalidParameter> {
    if let Some(explicit_production_kwh) = explicit_production_kwh {
        return Ok(explicit_production_kwh);
    }

    let parameters = ProductionParameters::new(power_kw, period, efficiency_ratio, loss_factor)?;
    let regional_multiplier = check_multiplier(regional_multiplier)?;

    Ok(round_to_places(
        parameters.adjusted_kwh(regional_multiplier)?,
        PERSISTENCE_DECIMAL_PLACES,
    ))
}
