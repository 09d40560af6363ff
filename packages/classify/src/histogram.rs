//! Equal-width histogram binning.

use tract_map_classify_models::{HistogramBin, HistogramBinning};

/// Bins `(tract_id, value)` pairs into `bin_count` equal-width bins over
/// `[min, max]` of the present values.
///
/// Missing values belong to no bin. With no present values the binning is
/// empty; when every present value is equal there is a single zero-width
/// bin holding all of them. A `bin_count` of zero is treated as one.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn build_histogram<'a>(
    values: impl IntoIterator<Item = (&'a str, Option<f64>)>,
    bin_count: usize,
) -> HistogramBinning {
    let present: Vec<(&str, f64)> = values
        .into_iter()
        .filter_map(|(id, value)| value.filter(|v| v.is_finite()).map(|v| (id, v)))
        .collect();

    let Some((min, max)) = present.iter().fold(None, |acc: Option<(f64, f64)>, &(_, v)| {
        Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
    }) else {
        return HistogramBinning::empty();
    };

    let bin_count = if min.total_cmp(&max).is_eq() {
        1
    } else {
        bin_count.max(1)
    };

    // Interpolated so bounds stay finite when `max - min` overflows.
    let bound = |i: usize| {
        if i == 0 {
            min
        } else if i == bin_count {
            max
        } else {
            let t = i as f64 / bin_count as f64;
            t.mul_add(max, (1.0 - t) * min)
        }
    };
    let bins = (0..bin_count)
        .map(|i| HistogramBin::new(i, bound(i), bound(i + 1)))
        .collect();

    let mut binning = HistogramBinning::new(bins);
    for (id, value) in present {
        if let Some(index) = binning.bin_index_for(Some(value)) {
            binning.push_member(index, id);
        }
    }

    log::debug!(
        "Binned {} values into {} bins over [{min}, {max}]",
        binning.total_members(),
        binning.len()
    );

    binning
}
