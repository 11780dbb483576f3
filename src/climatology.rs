//! Precipitation statistics over an observation set
//!
//! Two stateless reductions sit on top of the loaded data: the average
//! number of wet days per year for a station, and a maximum-likelihood
//! estimate of the precipitation probability on one calendar day. Both
//! return `None` when the query matches no observations; "no data" is an
//! ordinary outcome, not an error and never a numeric zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::binomial::{BinomialEstimate, BinomialMle};
use crate::data::csv_loader::ObservationSet;
use crate::stations::STATION_REGISTRY;

/// Wet-day count for a single year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlyCount {
    pub year: i32,
    pub wet_days: u32,
}

/// Annual precipitation-day average for one station
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualPrecipDays {
    pub station: String,
    /// Per-year wet-day counts, ascending by year
    pub years: Vec<YearlyCount>,
    /// Arithmetic mean of the per-year counts
    pub mean_days: f64,
}

/// Data coverage summary for one registered station
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationCoverage {
    pub station: String,
    pub name: String,
    pub rows: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub wet_days: usize,
    pub rain_days: usize,
    pub snow_days: usize,
}

/// Average number of precipitation days per year for a station.
///
/// Partitions the station's observations by year, counts wet days within
/// each year, and averages the counts over every year that has at least one
/// observation. A year on record with no wet days still contributes a zero
/// to the mean. Returns `None` when the station has no observations at all.
pub fn average_annual_precip_days(set: &ObservationSet, station: &str) -> Option<AnnualPrecipDays> {
    let observations = set.station(station);
    if observations.is_empty() {
        return None;
    }

    let mut per_year: BTreeMap<i32, u32> = BTreeMap::new();
    for obs in observations {
        let count = per_year.entry(obs.year).or_insert(0);
        if obs.precip_occurred {
            *count += 1;
        }
    }

    let years: Vec<YearlyCount> = per_year
        .into_iter()
        .map(|(year, wet_days)| YearlyCount { year, wet_days })
        .collect();
    let mean_days = years.iter().map(|y| f64::from(y.wet_days)).sum::<f64>() / years.len() as f64;

    Some(AnnualPrecipDays {
        station: station.to_string(),
        years,
        mean_days,
    })
}

/// Maximum-likelihood precipitation probability for one calendar day.
///
/// Collects the station's observations at (month, day) across all years,
/// counts how many were wet, and runs the default grid search over those
/// binomial counts. Returns `None` when no year has an observation at that
/// calendar day. Dates that cannot exist, such as month 13, simply match
/// nothing and take the same path.
pub fn estimate_precip_probability(
    set: &ObservationSet,
    station: &str,
    month: u32,
    day: u32,
) -> Option<BinomialEstimate> {
    estimate_precip_probability_with(set, station, month, day, &BinomialMle::with_defaults())
}

/// As [`estimate_precip_probability`], with a caller-supplied estimator.
pub fn estimate_precip_probability_with(
    set: &ObservationSet,
    station: &str,
    month: u32,
    day: u32,
    mle: &BinomialMle,
) -> Option<BinomialEstimate> {
    let matched = set.calendar_day(station, month, day);
    let trials = matched.len() as u64;
    let successes = matched.iter().filter(|obs| obs.precip_occurred).count() as u64;
    mle.estimate(successes, trials)
}

/// Coverage summary for every registered station, in registry order.
///
/// Stations the data does not cover appear with zero rows and no year
/// span, so the listing always shows the full registry.
pub fn station_coverage(set: &ObservationSet) -> Vec<StationCoverage> {
    STATION_REGISTRY
        .iter()
        .map(|station| {
            let observations = set.station(station.code);
            StationCoverage {
                station: station.code.to_string(),
                name: station.name.to_string(),
                rows: observations.len(),
                first_year: observations.iter().map(|o| o.year).min(),
                last_year: observations.iter().map(|o| o.year).max(),
                wet_days: observations.iter().filter(|o| o.precip_occurred).count(),
                rain_days: observations.iter().filter(|o| o.precipitation > 0.0).count(),
                snow_days: observations.iter().filter(|o| o.snowfall > 0.0).count(),
            }
        })
        .collect()
}
