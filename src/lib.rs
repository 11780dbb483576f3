//! Precip - Historical precipitation statistics
//!
//! This library provides:
//! - Loading of NOAA daily-summaries CSV exports into an indexed observation set
//! - Average precipitation days per year for a station
//! - Maximum-likelihood estimation of the precipitation probability on a
//!   calendar day, by grid search over a binomial likelihood
//! - A registry of the supported weather stations
//!
//! # Example
//!
//! ```no_run
//! use precip::climatology;
//! use precip::data::ObservationSet;
//!
//! # fn main() -> Result<(), precip::error::DataError> {
//! let set = ObservationSet::load("noaa_historical_weather_10yr.csv")?;
//!
//! if let Some(result) = climatology::average_annual_precip_days(&set, "bos") {
//!     println!("Boston averages {:.1} wet days per year", result.mean_days);
//! }
//!
//! if let Some(est) = climatology::estimate_precip_probability(&set, "jnu", 3, 7) {
//!     println!("Chance of precipitation: {:.0}%", est.probability * 100.0);
//! }
//! # Ok(())
//! # }
//! ```

pub mod climatology;
pub mod core;
pub mod data;
pub mod error;
pub mod stations;

// Re-export commonly used types
pub use climatology::{
    average_annual_precip_days, estimate_precip_probability, estimate_precip_probability_with,
    station_coverage, AnnualPrecipDays, StationCoverage, YearlyCount,
};
pub use crate::core::binomial::{BinomialEstimate, BinomialMle};
pub use data::{DailyObservation, ObservationSet};
pub use error::DataError;
pub use stations::{station_by_code, Station, STATION_REGISTRY};
