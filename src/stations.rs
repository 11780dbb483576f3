//! Station registry for the NOAA daily-summaries dataset.
//!
//! Defines the fixed set of stations this tool knows about, along with the
//! NOAA display names they appear under in the CSV. This is the single
//! source of truth for station codes; the loader and the CLI both resolve
//! names and codes through here rather than hardcoding them.

/// Metadata for a single NOAA station.
#[derive(Debug, Clone)]
pub struct Station {
    /// Short station code used on the command line.
    pub code: &'static str,
    /// Official NOAA display name, exactly as it appears in the `NAME`
    /// column of the daily-summaries export.
    pub name: &'static str,
    /// Human-readable note on the station's climate.
    pub description: &'static str,
}

/// All stations covered by the historical dataset.
pub static STATION_REGISTRY: &[Station] = &[
    Station {
        code: "mia",
        name: "MIAMI INTERNATIONAL AIRPORT, FL US",
        description: "Subtropical Atlantic coast; rain concentrated in the \
                      May-October wet season, snowfall effectively absent.",
    },
    Station {
        code: "jnu",
        name: "JUNEAU AIRPORT, AK US",
        description: "Maritime subarctic panhandle; measurable precipitation \
                      on well over half the days of a typical year.",
    },
    Station {
        code: "bos",
        name: "BOSTON, MA US",
        description: "Humid continental New England coast; mixed rain and \
                      winter snow.",
    },
];

/// Look up a station by its short code.
pub fn station_by_code(code: &str) -> Option<&'static Station> {
    STATION_REGISTRY.iter().find(|s| s.code == code)
}

/// Resolve a NOAA display name to its short code.
///
/// The match is exact; names not in the registry return `None` and their
/// rows are dropped by the loader.
pub fn code_for_name(name: &str) -> Option<&'static str> {
    STATION_REGISTRY.iter().find(|s| s.name == name).map(|s| s.code)
}
