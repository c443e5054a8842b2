//! # mmd
//!
//! Maximum Mean Discrepancy between two empirical samples, estimated with a
//! Gaussian (RBF) kernel.
//!
//! ## Intuition
//!
//! MMD (Maximum Mean Discrepancy) tests whether two samples come from the
//! same distribution. Each distribution is embedded into a reproducing
//! kernel Hilbert space via its kernel mean embedding, and MMD is the
//! distance between the two mean embeddings. With a characteristic kernel
//! such as the Gaussian, MMD is zero exactly when the distributions agree.
//!
//! This crate implements the *biased* estimator: the within-sample averages
//! include the self-pairs (i = j), which keeps the squared statistic a
//! doubly-centered positive-semidefinite quadratic form. The payoff is that
//! MMD² stays non-negative up to floating-point noise and single-point
//! samples remain well-defined, at the cost of a small upward bias.
//!
//! ## Key Functions
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`rbf`] | Radial Basis Function (Gaussian) kernel |
//! | [`mmd`] | Biased MMD estimate, √MMD², over `Vec<f64>` rows |
//! | [`mmd_checked`] | Same, with bandwidth and dimensionality validation |
//! | [`mmd_ndarray`] | Same statistic over `ndarray` row views |
//!
//! ## Quick Start
//!
//! ```rust
//! use mmd::mmd;
//!
//! let x = vec![vec![0.0, 0.0], vec![0.1, 0.1], vec![0.2, 0.0]];
//! let y = vec![vec![5.0, 5.0], vec![5.1, 5.1], vec![5.2, 5.0]];
//!
//! // Different distributions → large MMD
//! let d = mmd(1.0, &x, &y);
//! assert!(d > 0.5);
//!
//! // A sample against itself → zero (up to rounding)
//! assert!(mmd(1.0, &x, &x) < 1e-7);
//! ```
//!
//! ## Bandwidth
//!
//! `sigma` controls kernel sensitivity:
//! - Small σ: highly peaked, only near-identical points look similar
//! - Large σ: broad similarity, the statistic loses discrimination
//!
//! Bandwidth selection (median heuristic, multi-scale kernels) is out of
//! scope; the caller supplies σ. Non-positive σ is a caller error for
//! [`rbf`] and [`mmd`] (the division produces `inf`/`NaN` that propagates
//! to the output); [`mmd_checked`] rejects it instead.
//!
//! ## What Can Go Wrong
//!
//! 1. **Bandwidth too small**: every cross-pair underflows to 0, MMD
//!    saturates and stops separating distributions.
//! 2. **Bandwidth too large**: every kernel value approaches 1, MMD
//!    collapses toward 0.
//! 3. **Small samples**: the estimate is noisy; the statistic itself stays
//!    well-defined down to one point per sample.
//!
//! ## References
//!
//! - Gretton et al. (2012). "A Kernel Two-Sample Test" (JMLR)
//! - Muandet et al. (2017). "Kernel Mean Embedding of Distributions" (Found. & Trends)

use ndarray::ArrayView2;
use thiserror::Error;

/// Errors reported by the validating entry point.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid bandwidth: {0}")]
    InvalidBandwidth(f64),

    #[error("dimension mismatch: {0} vs {1}")]
    DimensionMismatch(usize, usize),
}

pub type Result<T> = std::result::Result<T, Error>;

// =============================================================================
// Kernel
// =============================================================================

/// Radial Basis Function (Gaussian) kernel: k(x, y) = exp(-||x-y||² / (2σ²))
///
/// Pure function, no validation: σ ≤ 0 is a caller error and yields the
/// natural floating-point result. Rows of unequal length are compared over
/// the shorter prefix (the zip stops early); [`mmd_checked`] guards against
/// that at the sample level.
///
/// # Example
///
/// ```rust
/// use mmd::rbf;
///
/// let x = vec![0.0, 0.0];
/// let y = vec![1.0, 0.0];
///
/// let k = rbf(1.0, &x, &y);
/// // exp(-1/(2*1)) = exp(-0.5) ≈ 0.606
/// assert!((k - 0.606).abs() < 0.01);
///
/// // k(x, x) = 1 always
/// assert!((rbf(1.0, &x, &x) - 1.0).abs() < 1e-12);
/// ```
pub fn rbf(sigma: f64, x: &[f64], y: &[f64]) -> f64 {
    let sq_dist: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(xi, yi)| (xi - yi).powi(2))
        .sum();
    (-sq_dist / (2.0 * sigma * sigma)).exp()
}

// =============================================================================
// Maximum Mean Discrepancy (MMD)
// =============================================================================

/// Biased MMD estimate between samples `x` and `y` with RBF bandwidth `sigma`.
///
/// Computes √(E[k(X,X')] + E[k(Y,Y')] − 2·E[k(X,Y)]) where each expectation
/// is the plain average over all ordered pairs, self-pairs included. The
/// squared statistic is clamped at zero before the square root: it is
/// mathematically non-negative, but cancellation can push it a hair below
/// zero when the samples are (near-)identical.
///
/// Either sample being empty is not an error; the result is defined to be
/// `0.0` and no kernel evaluations are performed.
///
/// Cost is O(n² + m² + n·m) kernel evaluations for sample sizes n and m.
///
/// # Example
///
/// ```rust
/// use mmd::mmd;
///
/// // Same distribution, small MMD
/// let x = vec![vec![0.0], vec![0.1], vec![0.2]];
/// let y = vec![vec![0.05], vec![0.15], vec![0.25]];
/// let d_same = mmd(1.0, &x, &y);
///
/// // Shifted distribution, large MMD
/// let z = vec![vec![10.0], vec![10.1], vec![10.2]];
/// let d_diff = mmd(1.0, &x, &z);
///
/// assert!(d_diff > d_same);
/// ```
pub fn mmd(sigma: f64, x: &[Vec<f64>], y: &[Vec<f64>]) -> f64 {
    let n = x.len();
    let m = y.len();

    if n == 0 || m == 0 {
        return 0.0;
    }

    // E[k(X, X')] - biased, diagonal included
    let mut kxx = 0.0;
    for xi in x {
        for xj in x {
            kxx += rbf(sigma, xi, xj);
        }
    }
    kxx /= (n * n) as f64;

    // E[k(Y, Y')]
    let mut kyy = 0.0;
    for yi in y {
        for yj in y {
            kyy += rbf(sigma, yi, yj);
        }
    }
    kyy /= (m * m) as f64;

    // E[k(X, Y)]
    let mut kxy = 0.0;
    for xi in x {
        for yj in y {
            kxy += rbf(sigma, xi, yj);
        }
    }
    kxy /= (n * m) as f64;

    // MMD² = E[k(X,X')] + E[k(Y,Y')] - 2E[k(X,Y)]
    let squared = kxx + kyy - 2.0 * kxy;
    squared.max(0.0).sqrt()
}

/// Validating variant of [`mmd`].
///
/// Rejects non-positive (or NaN) bandwidths and ragged input: every row in
/// both samples must have the length of the first row seen. Valid input
/// produces exactly the same value as [`mmd`].
///
/// # Example
///
/// ```rust
/// use mmd::{mmd_checked, Error};
///
/// let x = vec![vec![0.0, 0.0]];
/// let y = vec![vec![1.0, 1.0]];
///
/// assert!(mmd_checked(1.0, &x, &y).is_ok());
/// assert!(matches!(
///     mmd_checked(0.0, &x, &y),
///     Err(Error::InvalidBandwidth(_))
/// ));
/// ```
pub fn mmd_checked(sigma: f64, x: &[Vec<f64>], y: &[Vec<f64>]) -> Result<f64> {
    if !(sigma > 0.0) {
        return Err(Error::InvalidBandwidth(sigma));
    }

    let mut rows = x.iter().chain(y.iter());
    if let Some(first) = rows.next() {
        let dim = first.len();
        for row in rows {
            if row.len() != dim {
                return Err(Error::DimensionMismatch(dim, row.len()));
            }
        }
    }

    Ok(mmd(sigma, x, y))
}

/// Biased MMD estimate over the rows of two `ndarray` views.
///
/// Same statistic as [`mmd`] with the kernel inlined and 2σ² hoisted out of
/// the pair loops. Row length within each sample is enforced by the 2-D
/// shape; matching the column counts of `x` and `y` is the caller's
/// responsibility.
///
/// # Example
///
/// ```rust
/// use mmd::mmd_ndarray;
/// use ndarray::array;
///
/// let x = array![[0.0, 0.0]];
/// let y = array![[1.0, 1.0]];
///
/// let d = mmd_ndarray(1.0, x.view(), y.view());
/// assert!(d > 0.0);
/// ```
pub fn mmd_ndarray(sigma: f64, x: ArrayView2<f64>, y: ArrayView2<f64>) -> f64 {
    let n = x.nrows();
    let m = y.nrows();

    if n == 0 || m == 0 {
        return 0.0;
    }

    let sigma_sq_2 = 2.0 * sigma * sigma;
    let k = |a: ndarray::ArrayView1<f64>, b: ndarray::ArrayView1<f64>| -> f64 {
        let sq_dist: f64 = a
            .iter()
            .zip(b.iter())
            .map(|(ai, bi)| (ai - bi).powi(2))
            .sum();
        (-sq_dist / sigma_sq_2).exp()
    };

    let mut kxx = 0.0;
    for i in 0..n {
        for j in 0..n {
            kxx += k(x.row(i), x.row(j));
        }
    }
    kxx /= (n * n) as f64;

    let mut kyy = 0.0;
    for i in 0..m {
        for j in 0..m {
            kyy += k(y.row(i), y.row(j));
        }
    }
    kyy /= (m * m) as f64;

    let mut kxy = 0.0;
    for i in 0..n {
        for j in 0..m {
            kxy += k(x.row(i), y.row(j));
        }
    }
    kxy /= (n * m) as f64;

    let squared = kxx + kyy - 2.0 * kxy;
    squared.max(0.0).sqrt()
}

// =============================================================================
// Tests
// =============================================================================
