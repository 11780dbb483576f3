//! Core numerical routines

pub mod binomial;

// Re-export commonly used types
pub use binomial::{ln_choose, log_likelihood, BinomialEstimate, BinomialMle};
