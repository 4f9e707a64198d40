//! Pearson correlation with a defined result for degenerate input

use log::debug;

use super::stats::{demean, std_dev};

/// Pearson correlation coefficient of two series.
///
/// Both series are truncated to the shorter length and de-meaned first.
/// If either has zero variance (including the empty case) the result is
/// 0.0 rather than NaN.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let len = a.len().min(b.len());
    let a = demean(&a[..len]);
    let b = demean(&b[..len]);

    if std_dev(&a) == 0.0 || std_dev(&b) == 0.0 {
        debug!("zero-variance input to correlation ({} points)", len);
        return 0.0;
    }

    let covariance: f64 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
    let energy_a: f64 = a.iter().map(|x| x * x).sum();
    let energy_b: f64 = b.iter().map(|y| y * y).sum();

    (covariance / (energy_a * energy_b).sqrt()).clamp(-1.0, 1.0)
}
