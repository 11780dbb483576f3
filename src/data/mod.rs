//! Weather observation loading and indexing

pub mod csv_loader;

// Re-export commonly used types
pub use csv_loader::{DailyObservation, ObservationSet};
