use crate::core::regional::*;
use crate::engine::CarbonSavingsEngine;
use crate::input::{ingest_profiles, InstallationProfile};
use pretty_assertions::assert_eq;
use rstest::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::{BufReader, Cursor};
use std::sync::Arc;
use std::thread;

#[fixture]
fn regional_yield() -> RegionalYieldTable {
    let data = BufReader::new(Cursor::new(include_str!("fixtures/regional_yield.csv")));
    RegionalYieldTable::from_csv(data).unwrap()
}

#[fixture]
fn profiles() -> Vec<InstallationProfile> {
    ingest_profiles(include_str!("fixtures/profiles.json").as_bytes()).unwrap()
}

#[rstest]
fn test_parse_fixture_file(regional_yield: RegionalYieldTable) {
    assert_eq!(
        regional_yield.regional_multiplier(&RegionRef::municipality(Some(4), 4013)),
        Some(dec!(1.22))
    );
    assert_eq!(
        regional_yield.regional_multiplier(&RegionRef::municipality(Some(4), 4001)),
        Some(dec!(1.18))
    );
    assert_eq!(
        regional_yield.regional_multiplier(&RegionRef::province(46)),
        None
    );
}

#[rstest]
fn test_estimate_fixture_profiles(
    regional_yield: RegionalYieldTable,
    profiles: Vec<InstallationProfile>,
) {
    let engine = CarbonSavingsEngine::with_regional_yield(regional_yield);
    let production = profiles
        .iter()
        .map(|profile| engine.estimate_production(profile).unwrap())
        .collect::<Vec<_>>();

    assert_eq!(
        production,
        vec![dec!(37136.93), dec!(1551.57), dec!(240), dec!(4200)]
    );
}

#[rstest]
fn test_independent_profiles_can_be_estimated_concurrently(
    regional_yield: RegionalYieldTable,
    profiles: Vec<InstallationProfile>,
) {
    let engine = Arc::new(CarbonSavingsEngine::with_regional_yield(regional_yield));

    let handles = profiles
        .into_iter()
        .map(|profile| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || engine.estimate_production(&profile).unwrap())
        })
        .collect::<Vec<_>>();
    let total: Decimal = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .sum();

    assert_eq!(total, dec!(43128.50));
}
