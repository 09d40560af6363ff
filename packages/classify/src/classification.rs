//! Quantile color classification.

use tract_map_classify_models::{ColorClassification, Palette};

use crate::quantile::quantile_breakpoints;

/// Builds a quantile classification of `values` into `class_count` classes
/// colored low-to-high from `palette`.
///
/// Missing and non-finite values are ignored. With no present values the
/// result maps everything to the palette's no-data color. When every
/// present value is equal the result has a single class. `class_count` is
/// capped at the palette size so every class has a color.
#[must_use]
pub fn build_color_classification(
    values: impl IntoIterator<Item = Option<f64>>,
    class_count: usize,
    palette: &Palette,
) -> ColorClassification {
    let mut sorted: Vec<f64> = values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect();
    sorted.sort_by(f64::total_cmp);

    let classes = if class_count > palette.colors.len() {
        log::warn!(
            "Requested {class_count} classes but the palette has {} colors",
            palette.colors.len()
        );
        palette.colors.len()
    } else {
        class_count
    };

    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return ColorClassification::no_data_only(palette.no_data);
    };
    if classes == 0 {
        return ColorClassification::no_data_only(palette.no_data);
    }

    if classes == 1 || min.total_cmp(&max).is_eq() {
        return ColorClassification::new(Vec::new(), vec![palette.colors[0]], palette.no_data);
    }

    let breakpoints = quantile_breakpoints(&sorted, classes);
    log::debug!(
        "Quantile breakpoints over {} values: {breakpoints:?}",
        sorted.len()
    );

    ColorClassification::new(
        breakpoints,
        palette.colors[..classes].to_vec(),
        palette.no_data,
    )
}
