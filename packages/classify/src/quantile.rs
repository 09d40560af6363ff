//! Quantile computation over sorted samples.

/// The `p`-quantile of ascending `sorted` values, linearly interpolating
/// between the two nearest order statistics (the R-7 / spreadsheet
/// definition). Returns `None` for an empty slice.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let (&first, &last) = (sorted.first()?, sorted.last()?);
    if p <= 0.0 || sorted.len() == 1 {
        return Some(first);
    }
    if p >= 1.0 {
        return Some(last);
    }

    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let lower = sorted[lo];
    let upper = sorted[lo + 1];
    Some(lower + (upper - lower) * (h - lo as f64))
}

/// `classes - 1` thresholds splitting `sorted` into `classes` groups of
/// roughly equal population.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn quantile_breakpoints(sorted: &[f64], classes: usize) -> Vec<f64> {
    (1..classes)
        .filter_map(|i| quantile_sorted(sorted, i as f64 / classes as f64))
        .collect()
}
