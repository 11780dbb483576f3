//! CSV data loading for NOAA daily weather summaries
//!
//! The source file is a NOAA daily-summaries export: one row per station per
//! day, stations identified by display name in `NAME`, the date as text in
//! `DATE`, rain and snow amounts in `PRCP` and `SNOW`. Loading normalizes
//! names to registry codes, derives the wet-day flag, and indexes rows by
//! station code for repeated queries.

use polars::prelude::*;
use std::collections::HashMap;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

use crate::error::DataError;
use crate::stations::code_for_name;

/// Accepted DATE formats: ISO first, then the US-style export variant.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// One daily summary row at a registered station
#[derive(Debug, Clone)]
pub struct DailyObservation {
    /// Station code from the registry (`mia`, `jnu`, `bos`)
    pub station: &'static str,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Rain amount for the day; missing cells load as 0.0
    pub precipitation: f64,
    /// Snowfall amount for the day; missing cells load as 0.0
    pub snowfall: f64,
    /// True if any rain or snow was recorded
    pub precip_occurred: bool,
}

impl DailyObservation {
    /// Build an observation for a calendar date, deriving the wet-day flag
    /// from the measured amounts. A day with both rain and snow is one wet
    /// day, not two.
    pub fn new(station: &'static str, date: NaiveDate, precipitation: f64, snowfall: f64) -> Self {
        Self {
            station,
            year: date.year(),
            month: date.month(),
            day: date.day(),
            precipitation,
            snowfall,
            precip_occurred: precipitation > 0.0 || snowfall > 0.0,
        }
    }
}

/// Daily observations indexed by station code
///
/// Pre-loads the entire CSV into memory and groups rows by station. Rows
/// whose station name is not in the registry can never match a query and
/// are dropped at load time.
#[derive(Debug)]
pub struct ObservationSet {
    /// station code -> observations in file order
    observations: HashMap<&'static str, Vec<DailyObservation>>,
}

impl ObservationSet {
    /// Load and index all observations from a NOAA daily-summaries CSV
    pub fn load<P: AsRef<Path>>(csv_path: P) -> Result<Self, DataError> {
        let df = CsvReadOptions::default()
            .try_into_reader_with_file_path(Some(csv_path.as_ref().to_path_buf()))?
            .finish()?;

        let name_col = required(&df, "NAME")?.str()?;
        let date_col = required(&df, "DATE")?.str()?;
        let prcp_col = required(&df, "PRCP")?.f64()?;
        let snow_col = required(&df, "SNOW")?.f64()?;

        let mut observations: HashMap<&'static str, Vec<DailyObservation>> = HashMap::new();
        let mut skipped = 0usize;

        for i in 0..df.height() {
            let (name, date_str) = match (name_col.get(i), date_col.get(i)) {
                (Some(name), Some(date_str)) => (name, date_str),
                _ => {
                    skipped += 1;
                    continue;
                }
            };

            let Some(code) = code_for_name(name) else {
                debug!("skipping row for unregistered station {:?}", name);
                skipped += 1;
                continue;
            };

            let date = parse_date(date_str).ok_or_else(|| DataError::BadDate {
                // File line number, header row included
                row: i + 2,
                value: date_str.to_string(),
            })?;

            let precipitation = prcp_col.get(i).unwrap_or(0.0);
            let snowfall = snow_col.get(i).unwrap_or(0.0);

            observations
                .entry(code)
                .or_default()
                .push(DailyObservation::new(code, date, precipitation, snowfall));
        }

        let kept: usize = observations.values().map(Vec::len).sum();
        info!(
            "loaded {} observations across {} stations ({} rows skipped)",
            kept,
            observations.len(),
            skipped
        );

        Ok(Self { observations })
    }

    /// Build a set directly from observations (synthetic data, tests)
    pub fn from_observations(rows: Vec<DailyObservation>) -> Self {
        let mut observations: HashMap<&'static str, Vec<DailyObservation>> = HashMap::new();
        for row in rows {
            observations.entry(row.station).or_default().push(row);
        }
        Self { observations }
    }

    /// All observations for a station, in file order. Empty for codes the
    /// data does not cover.
    pub fn station(&self, code: &str) -> &[DailyObservation] {
        self.observations
            .get(code)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Observations at one calendar day (month, day) across all years
    pub fn calendar_day(&self, code: &str, month: u32, day: u32) -> Vec<&DailyObservation> {
        self.station(code)
            .iter()
            .filter(|obs| obs.month == month && obs.day == day)
            .collect()
    }

    /// Station codes present in the data, sorted
    pub fn station_codes(&self) -> Vec<&'static str> {
        let mut codes: Vec<_> = self.observations.keys().copied().collect();
        codes.sort_unstable();
        codes
    }

    /// Total number of retained observations
    pub fn len(&self) -> usize {
        self.observations.values().map(Vec::len).sum()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Look up a required column, naming it in the error when absent
fn required<'a>(df: &'a DataFrame, name: &'static str) -> Result<&'a Series, DataError> {
    df.column(name)
        .map_err(|_| DataError::MissingColumn { name })
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn write_csv(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("weather.csv");
        std::fs::write(&path, contents).expect("should write test csv");
        (dir, path)
    }

    #[test]
    fn test_wet_day_flag_derivation() {
        let rain = DailyObservation::new("bos", date(2015, 3, 7), 0.42, 0.0);
        let snow = DailyObservation::new("bos", date(2015, 1, 27), 0.0, 6.3);
        let both = DailyObservation::new("bos", date(2015, 2, 2), 0.15, 1.1);
        let dry = DailyObservation::new("bos", date(2015, 7, 4), 0.0, 0.0);

        assert!(rain.precip_occurred);
        assert!(snow.precip_occurred);
        // Rain and snow together still count as a single wet day
        assert!(both.precip_occurred);
        assert!(!dry.precip_occurred);
    }

    #[test]
    fn test_load_normalizes_names_and_drops_unregistered() {
        let (_dir, path) = write_csv(
            "NAME,DATE,PRCP,SNOW\n\
             \"BOSTON, MA US\",2015-03-07,0.42,0.0\n\
             \"BOSTON, MA US\",2015-03-08,0.0,0.0\n\
             \"MIAMI INTERNATIONAL AIRPORT, FL US\",2015-03-07,1.20,0.0\n\
             \"PORTLAND INTERNATIONAL AIRPORT, OR US\",2015-03-07,0.33,0.0\n",
        );

        let set = ObservationSet::load(&path).unwrap();

        assert_eq!(set.len(), 3);
        assert_eq!(set.station_codes(), vec!["bos", "mia"]);
        assert_eq!(set.station("bos").len(), 2);
        assert_eq!(set.station("mia").len(), 1);

        let first = &set.station("bos")[0];
        assert_eq!(first.station, "bos");
        assert_eq!((first.year, first.month, first.day), (2015, 3, 7));
        assert!(first.precip_occurred);
    }

    #[test]
    fn test_load_accepts_both_date_formats() {
        let (_dir, path) = write_csv(
            "NAME,DATE,PRCP,SNOW\n\
             \"BOSTON, MA US\",2015-03-07,0.1,0.0\n\
             \"BOSTON, MA US\",3/8/2015,0.2,0.0\n",
        );

        let set = ObservationSet::load(&path).unwrap();
        let days: Vec<_> = set
            .station("bos")
            .iter()
            .map(|obs| (obs.year, obs.month, obs.day))
            .collect();

        assert_eq!(days, vec![(2015, 3, 7), (2015, 3, 8)]);
    }

    #[test]
    fn test_load_rejects_garbage_dates_with_row_context() {
        let (_dir, path) = write_csv(
            "NAME,DATE,PRCP,SNOW\n\
             \"BOSTON, MA US\",2015-03-07,0.1,0.0\n\
             \"BOSTON, MA US\",not-a-date,0.2,0.0\n",
        );

        let err = ObservationSet::load(&path).unwrap_err();
        match err {
            DataError::BadDate { row, value } => {
                assert_eq!(row, 3);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("expected BadDate, got {other:?}"),
        }
    }

    #[test]
    fn test_load_requires_named_columns() {
        let (_dir, path) = write_csv(
            "NAME,DATE,PRCP\n\
             \"BOSTON, MA US\",2015-03-07,0.1\n",
        );

        let err = ObservationSet::load(&path).unwrap_err();
        assert!(err.to_string().contains("SNOW"));
    }

    #[test]
    fn test_load_treats_missing_amounts_as_dry() {
        let (_dir, path) = write_csv(
            "NAME,DATE,PRCP,SNOW\n\
             \"JUNEAU AIRPORT, AK US\",2015-01-05,,0.0\n\
             \"JUNEAU AIRPORT, AK US\",2015-01-06,0.3,\n",
        );

        let set = ObservationSet::load(&path).unwrap();
        let jnu = set.station("jnu");

        assert_eq!(jnu[0].precipitation, 0.0);
        assert!(!jnu[0].precip_occurred);
        assert_eq!(jnu[1].snowfall, 0.0);
        assert!(jnu[1].precip_occurred);
    }

    #[test]
    fn test_calendar_day_filters_month_and_day() {
        let set = ObservationSet::from_observations(vec![
            DailyObservation::new("mia", date(2013, 6, 15), 0.5, 0.0),
            DailyObservation::new("mia", date(2014, 6, 15), 0.0, 0.0),
            DailyObservation::new("mia", date(2014, 6, 16), 0.2, 0.0),
            DailyObservation::new("bos", date(2014, 6, 15), 0.9, 0.0),
        ]);

        let matched = set.calendar_day("mia", 6, 15);
        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|obs| obs.month == 6 && obs.day == 15));

        // Nothing recorded on Feb 30; the query is well formed but empty
        assert!(set.calendar_day("mia", 2, 30).is_empty());
    }

    #[test]
    fn test_unknown_station_yields_empty_slice() {
        let set = ObservationSet::from_observations(vec![DailyObservation::new(
            "bos",
            date(2015, 3, 7),
            0.1,
            0.0,
        )]);

        assert!(set.station("atl").is_empty());
        assert!(set.calendar_day("atl", 3, 7).is_empty());
    }
}
