//! Binomial Maximum-Likelihood Estimation
//!
//! Point estimation of a success probability from k successes in n trials,
//! located by grid search over a fixed set of candidate probabilities.
//!
//! The likelihood of k successes in n trials under success probability p:
//!     L(p) = C(n, k) * p^k * (1-p)^(n-k)
//!
//! All evaluation happens in the log domain. The binomial coefficient is a
//! constant factor and does not move the maximum, but it is included so the
//! reported likelihood values are the literal ones; it is computed through
//! the log-gamma function, which stays finite for sample counts where exact
//! integer factorials would overflow.

use serde::{Deserialize, Serialize};
use statrs::function::gamma::ln_gamma;

/// Number of candidate probabilities in the default grid.
pub const DEFAULT_GRID_POINTS: usize = 100;
/// Lowest candidate probability. Zero is excluded by construction, so a
/// sample with no successes estimates to this point rather than 0.
pub const DEFAULT_GRID_MIN: f64 = 0.01;
/// Highest candidate probability.
pub const DEFAULT_GRID_MAX: f64 = 1.0;

/// Natural log of the binomial coefficient C(trials, successes).
///
/// Computed as ln_gamma(n+1) - ln_gamma(k+1) - ln_gamma(n-k+1); exact
/// factorials of even modest n overflow every integer width, while this
/// form is finite for any sample size.
///
/// `successes` must not exceed `trials`.
///
/// # Examples
/// ```
/// use precip::core::binomial::ln_choose;
/// let ln_c = ln_choose(10, 3); // C(10, 3) = 120
/// assert!((ln_c - 120f64.ln()).abs() < 1e-9);
/// ```
pub fn ln_choose(trials: u64, successes: u64) -> f64 {
    debug_assert!(successes <= trials);
    ln_gamma(trials as f64 + 1.0)
        - ln_gamma(successes as f64 + 1.0)
        - ln_gamma((trials - successes) as f64 + 1.0)
}

/// Log-likelihood of `successes` in `trials` at success probability `p`,
/// binomial coefficient included.
///
/// The p^k and (1-p)^(n-k) factors are skipped when their exponent is zero
/// (0^0 = 1 in the likelihood), so the endpoints p = 1 with k = n and any p
/// with k = 0 evaluate without producing NaN. A candidate that assigns the
/// data zero likelihood (p = 1 with k < n) comes out as negative infinity
/// and loses every comparison.
pub fn log_likelihood(p: f64, successes: u64, trials: u64) -> f64 {
    debug_assert!(successes <= trials);
    let mut data = 0.0;
    if successes > 0 {
        data += successes as f64 * p.ln();
    }
    if trials > successes {
        data += (trials - successes) as f64 * (1.0 - p).ln();
    }
    ln_choose(trials, successes) + data
}

/// Result of a grid-search estimate.
///
/// Carries both the grid-quantized estimate (the documented result) and the
/// exact analytic maximum k/n, so callers can choose either without
/// re-deriving the counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinomialEstimate {
    /// Number of observations the estimate is based on.
    pub trials: u64,
    /// Observations where the event occurred.
    pub successes: u64,
    /// Grid point with maximum likelihood (the primary estimate).
    pub probability: f64,
    /// Exact analytic maximum-likelihood estimate, successes / trials.
    pub analytic: f64,
    /// Log-likelihood at the winning grid point, coefficient included.
    pub log_likelihood: f64,
}

/// Grid-search maximum-likelihood estimator for a binomial probability.
///
/// The default grid reproduces 100 evenly spaced candidates over the closed
/// interval [0.01, 1.0]; the true maximum k/n is therefore approximated to
/// roughly 0.01. Custom grids are supported for callers that want a
/// different resolution or range.
#[derive(Debug, Clone)]
pub struct BinomialMle {
    grid: Vec<f64>,
}

impl BinomialMle {
    /// Create an estimator over `points` candidates evenly spaced across
    /// the closed interval [`lo`, `hi`]. The final candidate is set to `hi`
    /// exactly rather than accumulated, so the endpoint never drifts above
    /// the interval.
    pub fn new(points: usize, lo: f64, hi: f64) -> Self {
        let grid = if points == 0 {
            Vec::new()
        } else if points == 1 {
            vec![lo]
        } else {
            let step = (hi - lo) / (points - 1) as f64;
            (0..points)
                .map(|i| if i == points - 1 { hi } else { lo + step * i as f64 })
                .collect()
        };
        Self { grid }
    }

    /// Create an estimator with the default grid (100 points over
    /// [0.01, 1.0]).
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_GRID_POINTS, DEFAULT_GRID_MIN, DEFAULT_GRID_MAX)
    }

    /// The candidate probabilities, in ascending order.
    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    /// Estimate the success probability from `successes` out of `trials`.
    ///
    /// Returns `None` when `trials` is zero: there is nothing to estimate
    /// from, and "no data" must stay distinguishable from an estimate of
    /// zero. Ties between grid points go to the first (lowest) candidate;
    /// the scan only replaces the incumbent on a strictly greater
    /// likelihood.
    ///
    /// `successes` must not exceed `trials`.
    ///
    /// # Examples
    /// ```
    /// use precip::core::binomial::BinomialMle;
    /// let mle = BinomialMle::with_defaults();
    /// let est = mle.estimate(3, 10).unwrap();
    /// assert!((est.probability - 0.30).abs() < 0.005);
    /// assert!((est.analytic - 0.3).abs() < 1e-12);
    /// ```
    pub fn estimate(&self, successes: u64, trials: u64) -> Option<BinomialEstimate> {
        debug_assert!(successes <= trials);
        if trials == 0 || self.grid.is_empty() {
            return None;
        }

        let mut best_p = self.grid[0];
        let mut best_ll = log_likelihood(best_p, successes, trials);
        for &p in &self.grid[1..] {
            let ll = log_likelihood(p, successes, trials);
            if ll > best_ll {
                best_ll = ll;
                best_p = p;
            }
        }

        Some(BinomialEstimate {
            trials,
            successes,
            probability: best_p,
            analytic: successes as f64 / trials as f64,
            log_likelihood: best_ll,
        })
    }
}

impl Default for BinomialMle {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_shape() {
        let mle = BinomialMle::with_defaults();
        let grid = mle.grid();

        assert_eq!(grid.len(), 100);
        assert_eq!(grid[0], 0.01);
        assert_eq!(grid[99], 1.0);
        // Step is 0.99 / 99
        assert!((grid[1] - grid[0] - 0.01).abs() < 1e-12);
        assert!((grid[29] - 0.30).abs() < 1e-12);
    }

    #[test]
    fn test_ln_choose_small_values() {
        // C(10, 3) = 120, C(5, 0) = 1, C(6, 6) = 1
        assert!((ln_choose(10, 3) - 120f64.ln()).abs() < 1e-9);
        assert!(ln_choose(5, 0).abs() < 1e-9);
        assert!(ln_choose(6, 6).abs() < 1e-9);
    }

    #[test]
    fn test_ln_choose_large_sample_stays_finite() {
        // 10_000! overflows every integer width; the log form must not.
        let ln_c = ln_choose(10_000, 5_000);
        assert!(ln_c.is_finite());
        assert!(ln_c > 0.0);
    }

    #[test]
    fn test_log_likelihood_endpoints_never_nan() {
        // k = n at p = 1: certain data, likelihood exactly 1
        let ll = log_likelihood(1.0, 5, 5);
        assert!(ll.abs() < 1e-9);

        // k < n at p = 1: impossible data, likelihood 0
        let ll = log_likelihood(1.0, 3, 5);
        assert!(ll.is_infinite() && ll < 0.0);
        assert!(!ll.is_nan());
    }

    #[test]
    fn test_estimate_tracks_analytic_mle() {
        let mle = BinomialMle::with_defaults();

        // Grid resolution is 0.01, so the winning point is within one step
        // of k/n.
        for (successes, trials) in [(3u64, 10u64), (1, 3), (7, 10), (45, 90)] {
            let est = mle.estimate(successes, trials).unwrap();
            let analytic = successes as f64 / trials as f64;
            assert!(
                (est.probability - analytic).abs() <= 0.01,
                "k={} n={}: grid {} vs analytic {}",
                successes,
                trials,
                est.probability,
                analytic
            );
            assert!((est.analytic - analytic).abs() < 1e-12);
        }
    }

    #[test]
    fn test_estimate_no_successes_hits_grid_floor() {
        // p = 0 is not on the grid; a dry record estimates to 0.01, not 0.
        let mle = BinomialMle::with_defaults();
        let est = mle.estimate(0, 8).unwrap();
        assert!((est.probability - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_estimate_all_successes_hits_grid_ceiling() {
        let mle = BinomialMle::with_defaults();
        let est = mle.estimate(8, 8).unwrap();
        assert_eq!(est.probability, 1.0);
        // Likelihood of certain data at p = 1 is exactly 1
        assert!(est.log_likelihood.abs() < 1e-9);
    }

    #[test]
    fn test_estimate_zero_trials_is_no_data() {
        let mle = BinomialMle::with_defaults();
        assert!(mle.estimate(0, 0).is_none());
    }

    #[test]
    fn test_tie_breaks_to_lower_probability() {
        // With k = 1, n = 2 the likelihood 2p(1-p) is symmetric around
        // 0.5, so the candidates 0.4 and 0.6 score identically (the same
        // two log terms, summed in either order). The first must win.
        let mle = BinomialMle::new(2, 0.4, 0.6);
        let ll_low = log_likelihood(0.4, 1, 2);
        let ll_high = log_likelihood(0.6, 1, 2);
        assert_eq!(ll_low, ll_high);

        let est = mle.estimate(1, 2).unwrap();
        assert_eq!(est.probability, 0.4);
    }

    #[test]
    fn test_custom_grid_single_point() {
        let mle = BinomialMle::new(1, 0.5, 1.0);
        assert_eq!(mle.grid(), &[0.5]);

        let est = mle.estimate(2, 4).unwrap();
        assert_eq!(est.probability, 0.5);
    }

    #[test]
    fn test_symmetric_peak_lands_on_half() {
        // k/n = 0.5 sits exactly on the default grid.
        let mle = BinomialMle::with_defaults();
        let est = mle.estimate(1, 2).unwrap();
        assert!((est.probability - 0.50).abs() < 1e-12);
    }
}
