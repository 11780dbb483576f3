use polars::error::PolarsError;
use thiserror::Error;

/// Errors raised while loading the observation table.
///
/// "No data" outcomes (a query matching zero observations) are not errors
/// and are represented as `None` by the statistics functions; this type
/// covers genuine load failures only.
#[derive(Debug, Error)]
pub enum DataError {
    /// The CSV could not be read or had an unexpected shape.
    #[error("failed to read weather data: {0}")]
    Csv(#[from] PolarsError),

    /// A column the loader depends on is absent from the CSV.
    #[error("weather data is missing required column {name:?}")]
    MissingColumn { name: &'static str },

    /// A DATE cell did not match any accepted format.
    #[error("row {row}: unparseable date {value:?}")]
    BadDate { row: usize, value: String },
}
