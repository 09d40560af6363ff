//! Equal-width histogram bins with their member regions.

use serde::{Deserialize, Serialize};

/// One bin: `[lower_bound, upper_bound)`, closed on the right for the
/// last bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBin {
    /// Position of the bin, ascending from zero.
    pub index: usize,
    /// Inclusive lower bound.
    pub lower_bound: f64,
    /// Exclusive upper bound (inclusive for the last bin).
    pub upper_bound: f64,
    /// Tract ids whose value falls in this bin, in input order.
    pub members: Vec<String>,
}

impl HistogramBin {
    /// Creates an empty bin.
    #[must_use]
    pub const fn new(index: usize, lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            index,
            lower_bound,
            upper_bound,
            members: Vec::new(),
        }
    }

    /// Number of member regions.
    #[must_use]
    pub fn count(&self) -> usize {
        self.members.len()
    }

    /// Center of the bin's interval.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        self.lower_bound + (self.upper_bound - self.lower_bound) / 2.0
    }

    /// Whether `tract_id` is a member.
    #[must_use]
    pub fn has_member(&self, tract_id: &str) -> bool {
        self.members.iter().any(|m| m == tract_id)
    }
}

/// Ordered bins partitioning `[min, max]` of the present values.
///
/// Empty when there were no present values. A single zero-width bin when
/// all present values are equal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBinning {
    bins: Vec<HistogramBin>,
}

impl HistogramBinning {
    /// Wraps contiguous, ascending bins.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the bins are out of order or not
    /// contiguous.
    #[must_use]
    pub fn new(bins: Vec<HistogramBin>) -> Self {
        debug_assert!(bins.iter().enumerate().all(|(i, bin)| bin.index == i));
        debug_assert!(
            bins.windows(2)
                .all(|w| w[0].upper_bound.to_bits() == w[1].lower_bound.to_bits())
        );
        Self { bins }
    }

    /// A binning with no bins.
    #[must_use]
    pub const fn empty() -> Self {
        Self { bins: Vec::new() }
    }

    /// All bins, ascending.
    #[must_use]
    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }

    /// The bin at `index`.
    #[must_use]
    pub fn bin(&self, index: usize) -> Option<&HistogramBin> {
        self.bins.get(index)
    }

    /// Number of bins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Whether there are no bins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// `(min, max)` of the binned values.
    #[must_use]
    pub fn domain(&self) -> Option<(f64, f64)> {
        let first = self.bins.first()?;
        let last = self.bins.last()?;
        Some((first.lower_bound, last.upper_bound))
    }

    /// Largest member count over all bins.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(HistogramBin::count).max().unwrap_or(0)
    }

    /// Sum of member counts over all bins.
    #[must_use]
    pub fn total_members(&self) -> usize {
        self.bins.iter().map(HistogramBin::count).sum()
    }

    /// Index of the bin whose interval contains `value`.
    ///
    /// Computes the equal-width index directly, then nudges it by one bin
    /// at a time until the stored bounds agree, so floating-point error in
    /// the division can never disagree with [`HistogramBin`]'s interval.
    /// Missing values and values outside the domain have no bin.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn bin_index_for(&self, value: Option<f64>) -> Option<usize> {
        let value = value.filter(|v| v.is_finite())?;
        let (min, max) = self.domain()?;
        if value < min || value > max {
            return None;
        }

        let last = self.bins.len() - 1;
        let width = (max - min) / self.bins.len() as f64;
        let mut index = if width > 0.0 {
            (((value - min) / width).floor() as usize).min(last)
        } else {
            0
        };

        while index > 0 && value < self.bins[index].lower_bound {
            index -= 1;
        }
        while index < last && value >= self.bins[index].upper_bound {
            index += 1;
        }

        Some(index)
    }

    /// Index of the bin listing `tract_id` as a member.
    #[must_use]
    pub fn bin_index_of_member(&self, tract_id: &str) -> Option<usize> {
        self.bins.iter().position(|bin| bin.has_member(tract_id))
    }

    /// Appends a member to the bin at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn push_member(&mut self, index: usize, tract_id: impl Into<String>) {
        self.bins[index].members.push(tract_id.into());
    }
}
