//! Regional yield lookups a production estimate is scaled by.

use crate::errors::InvalidParameter;
use anyhow::Context;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::sync::Arc;
use tracing::debug;

/// Where an installation is located, by the identifiers of its province and municipality.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RegionRef {
    pub province_id: Option<u64>,
    pub municipality_id: Option<u64>,
}

impl RegionRef {
    pub fn province(province_id: u64) -> Self {
        Self {
            province_id: Some(province_id),
            municipality_id: None,
        }
    }

    pub fn municipality(province_id: Option<u64>, municipality_id: u64) -> Self {
        Self {
            province_id,
            municipality_id: Some(municipality_id),
        }
    }
}

/// Resolves the yield multiplier for a region. Returning `None` is a lookup miss, which
/// callers treat as a neutral multiplier rather than an error.
pub trait RegionalYieldLookup {
    fn regional_multiplier(&self, region: &RegionRef) -> Option<Decimal>;
}

impl<T: RegionalYieldLookup + ?Sized> RegionalYieldLookup for &T {
    fn regional_multiplier(&self, region: &RegionRef) -> Option<Decimal> {
        (**self).regional_multiplier(region)
    }
}

impl<T: RegionalYieldLookup + ?Sized> RegionalYieldLookup for Box<T> {
    fn regional_multiplier(&self, region: &RegionRef) -> Option<Decimal> {
        (**self).regional_multiplier(region)
    }
}

impl<T: RegionalYieldLookup + ?Sized> RegionalYieldLookup for Arc<T> {
    fn regional_multiplier(&self, region: &RegionRef) -> Option<Decimal> {
        (**self).regional_multiplier(region)
    }
}

/// A lookup with no regional data, so every region resolves to the default multiplier.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeutralRegionalYield;

impl RegionalYieldLookup for NeutralRegionalYield {
    fn regional_multiplier(&self, _region: &RegionRef) -> Option<Decimal> {
        None
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, strum_macros::IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
enum RegionScope {
    Province,
    Municipality,
}

#[derive(Clone, Debug, Deserialize)]
struct RegionalYieldRow {
    scope: RegionScope,
    id: u64,
    multiplier: Decimal,
}

/// Regional yield multipliers held in memory, keyed by province and municipality.
#[derive(Clone, Debug, Default)]
pub struct RegionalYieldTable {
    provinces: IndexMap<u64, Decimal>,
    municipalities: IndexMap<u64, Decimal>,
}

impl RegionalYieldTable {
    pub fn new() -> Self {
        Default::default()
    }

    /// Build a table from CSV with a header row of `scope,id,multiplier`, where scope is
    /// either `province` or `municipality`.
    pub fn from_csv(csv: impl Read) -> anyhow::Result<Self> {
        let mut table = Self::new();
        for (row_index, row) in csv::Reader::from_reader(csv)
            .deserialize::<RegionalYieldRow>()
            .enumerate()
        {
            let row = row?;
            table
                .insert(row.scope, row.id, row.multiplier)
                .with_context(|| format!("Invalid regional yield on data row {}", row_index + 1))?;
        }

        Ok(table)
    }

    /// Arguments:
    /// * `province_id` - must not already be in the table
    /// * `multiplier` - must be greater than zero
    pub fn with_province(
        mut self,
        province_id: u64,
        multiplier: Decimal,
    ) -> Result<Self, InvalidParameter> {
        self.insert(RegionScope::Province, province_id, multiplier)?;
        Ok(self)
    }

    pub fn with_municipality(
        mut self,
        municipality_id: u64,
        multiplier: Decimal,
    ) -> Result<Self, InvalidParameter> {
        self.insert(RegionScope::Municipality, municipality_id, multiplier)?;
        Ok(self)
    }

    fn insert(
        &mut self,
        scope: RegionScope,
        id: u64,
        multiplier: Decimal,
    ) -> Result<(), InvalidParameter> {
        check_multiplier(multiplier)?;
        let entries = match scope {
            RegionScope::Province => &mut self.provinces,
            RegionScope::Municipality => &mut self.municipalities,
        };
        if entries.contains_key(&id) {
            return Err(InvalidParameter::DuplicateRegion {
                scope: scope.into(),
                id,
            });
        }
        entries.insert(id, multiplier);

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.provinces.is_empty() && self.municipalities.is_empty()
    }
}

impl RegionalYieldLookup for RegionalYieldTable {
    fn regional_multiplier(&self, region: &RegionRef) -> Option<Decimal> {
        // a municipality's own factor wins over the province it sits in
        let municipality_multiplier = region
            .municipality_id
            .and_then(|id| self.municipalities.get(&id).copied());
        if municipality_multiplier.is_some() {
            return municipality_multiplier;
        }

        let province_multiplier = region
            .province_id
            .and_then(|id| self.provinces.get(&id).copied());
        if province_multiplier.is_none() {
            debug!(?region, "no regional yield multiplier found for region");
        }

        province_multiplier
    }
}

pub(crate) fn check_multiplier(multiplier: Decimal) -> Result<Decimal, InvalidParameter> {
    if multiplier <= Decimal::ZERO {
        return Err(InvalidParameter::NonPositiveRegionalMultiplier(multiplier));
    }

    Ok(multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use rust_decimal_macros::dec;

    #[fixture]
    fn table() -> RegionalYieldTable {
        RegionalYieldTable::new()
            .with_province(28, dec!(1.10))
            .unwrap()
            .with_municipality(28079, dec!(1.25))
            .unwrap()
    }

    #[rstest]
    fn should_prefer_municipality_over_province(table: RegionalYieldTable) {
        assert_eq!(
            table.regional_multiplier(&RegionRef::municipality(Some(28), 28079)),
            Some(dec!(1.25))
        );
    }

    #[rstest]
    fn should_fall_back_to_province_when_municipality_unknown(table: RegionalYieldTable) {
        assert_eq!(
            table.regional_multiplier(&RegionRef::municipality(Some(28), 1)),
            Some(dec!(1.10))
        );
        assert_eq!(
            table.regional_multiplier(&RegionRef::province(28)),
            Some(dec!(1.10))
        );
    }

    #[rstest]
    fn should_miss_for_unknown_or_empty_region(table: RegionalYieldTable) {
        assert_eq!(table.regional_multiplier(&RegionRef::province(8)), None);
        assert_eq!(table.regional_multiplier(&RegionRef::default()), None);
        assert_eq!(
            table.regional_multiplier(&RegionRef::municipality(None, 1)),
            None
        );
    }

    #[rstest]
    fn should_always_miss_with_neutral_lookup() {
        assert_eq!(
            NeutralRegionalYield.regional_multiplier(&RegionRef::province(28)),
            None
        );
    }

    #[rstest]
    fn should_reject_non_positive_multipliers() {
        assert_eq!(
            RegionalYieldTable::new()
                .with_province(1, Decimal::ZERO)
                .unwrap_err(),
            InvalidParameter::NonPositiveRegionalMultiplier(Decimal::ZERO)
        );
        assert!(RegionalYieldTable::new()
            .with_municipality(1, dec!(-0.5))
            .is_err());
    }

    #[rstest]
    fn should_reject_repeated_ids(table: RegionalYieldTable) {
        assert_eq!(
            table.clone().with_province(28, dec!(0.9)).unwrap_err(),
            InvalidParameter::DuplicateRegion {
                scope: "province",
                id: 28
            }
        );
        assert_eq!(
            table.clone().with_municipality(28079, dec!(0.9)).unwrap_err(),
            InvalidParameter::DuplicateRegion {
                scope: "municipality",
                id: 28079
            }
        );
        // the same id may appear once as a province and once as a municipality
        let table = table.with_municipality(28, dec!(0.9)).unwrap();
        assert_eq!(
            table.regional_multiplier(&RegionRef::municipality(Some(28), 28)),
            Some(dec!(0.9))
        );
    }

    #[rstest]
    fn should_report_data_row_of_duplicate_in_csv() {
        let csv = "scope,id,multiplier\nprovince,28,1.1\nprovince,28,1.2\n";
        let error = RegionalYieldTable::from_csv(csv.as_bytes()).unwrap_err();
        assert_eq!(error.to_string(), "Invalid regional yield on data row 2");
        assert_eq!(
            error.downcast_ref::<InvalidParameter>(),
            Some(&InvalidParameter::DuplicateRegion {
                scope: "province",
                id: 28
            })
        );
    }

    #[rstest]
    fn should_load_table_from_csv() {
        let csv = "scope,id,multiplier\nprovince,28,1.10\nmunicipality,28079,1.25\n";
        let table = RegionalYieldTable::from_csv(csv.as_bytes()).unwrap();
        assert!(!table.is_empty());
        assert_eq!(
            table.regional_multiplier(&RegionRef::municipality(Some(28), 28079)),
            Some(dec!(1.25))
        );
        assert_eq!(
            table.regional_multiplier(&RegionRef::province(28)),
            Some(dec!(1.10))
        );
    }

    #[rstest]
    #[case("scope,id,multiplier\nprovince,28,0\n")]
    #[case("scope,id,multiplier\nprovince,28,1.1\nprovince,28,1.2\n")]
    #[case("scope,id,multiplier\ncountry,1,1.1\n")]
    #[case("scope,id,multiplier\nprovince,abc,1.1\n")]
    fn should_reject_invalid_csv(#[case] csv: &str) {
        assert!(RegionalYieldTable::from_csv(csv.as_bytes()).is_err());
    }

    #[rstest]
    fn should_resolve_through_shared_pointers(table: RegionalYieldTable) {
        let shared: Arc<dyn RegionalYieldLookup + Send + Sync> = Arc::new(table);
        assert_eq!(
            shared.regional_multiplier(&RegionRef::province(28)),
            Some(dec!(1.10))
        );
    }
}
