#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Graticule lines drawn behind the tract polygons.
//!
//! Produces meridians and parallels at a fixed degree step across an
//! extent, plus the extent outline used as the map background. Lines are in
//! longitude/latitude; projecting them is the drawing layer's job.

use geo::{BoundingRect, LineString, Polygon, Rect, coord};

/// Default spacing between sampled points along a line, in degrees.
pub const DEFAULT_PRECISION: f64 = 2.5;

/// Meridians, parallels, and outline over an extent.
#[derive(Debug, Clone, PartialEq)]
pub struct Graticule {
    /// Lines of constant longitude, west to east.
    pub meridians: Vec<LineString<f64>>,
    /// Lines of constant latitude, south to north.
    pub parallels: Vec<LineString<f64>>,
    /// The extent as a closed polygon.
    pub outline: Polygon<f64>,
}

impl Graticule {
    /// Builds a graticule over `extent` with lines every `step` degrees
    /// (`(longitude step, latitude step)`), sampling each line at
    /// [`DEFAULT_PRECISION`].
    #[must_use]
    pub fn new(extent: Rect<f64>, step: (f64, f64)) -> Self {
        Self::with_precision(extent, step, DEFAULT_PRECISION)
    }

    /// Builds a graticule, sampling each line every `precision` degrees.
    /// Non-positive steps produce no lines in that direction.
    #[must_use]
    pub fn with_precision(extent: Rect<f64>, step: (f64, f64), precision: f64) -> Self {
        let (min, max) = (extent.min(), extent.max());

        let meridians = grid_values(min.x, max.x, step.0)
            .into_iter()
            .map(|x| {
                sample(min.y, max.y, precision)
                    .into_iter()
                    .map(|y| coord! { x: x, y: y })
                    .collect()
            })
            .collect();

        let parallels = grid_values(min.y, max.y, step.1)
            .into_iter()
            .map(|y| {
                sample(min.x, max.x, precision)
                    .into_iter()
                    .map(|x| coord! { x: x, y: y })
                    .collect()
            })
            .collect();

        Self {
            meridians,
            parallels,
            outline: extent.to_polygon(),
        }
    }

    /// All lines, meridians first.
    pub fn lines(&self) -> impl Iterator<Item = &LineString<f64>> {
        self.meridians.iter().chain(&self.parallels)
    }
}

/// Multiples of `step` within `[lo, hi]`, computed from integer indices so
/// they do not accumulate rounding error.
#[allow(clippy::cast_possible_truncation)]
fn grid_values(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || !step.is_finite() || hi < lo {
        return Vec::new();
    }
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

/// Evenly spaced samples from `lo` to `hi` inclusive, no further apart
/// than `precision`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn sample(lo: f64, hi: f64, precision: f64) -> Vec<f64> {
    let span = hi - lo;
    let segments = if precision > 0.0 && span > 0.0 {
        (span / precision).ceil().max(1.0) as usize
    } else {
        1
    };
    (0..=segments)
        .map(|i| {
            if i == segments {
                hi
            } else {
                lo + span * i as f64 / segments as f64
            }
        })
        .collect()
}

/// Bounding box of all convertible geometries, or `None` if there are none.
pub fn extent_of<'a>(
    geometries: impl IntoIterator<Item = &'a geojson::Geometry>,
) -> Option<Rect<f64>> {
    geometries
        .into_iter()
        .filter_map(|geometry| {
            let geometry: geo::Geometry<f64> = match geometry.clone().try_into() {
                Ok(g) => g,
                Err(e) => {
                    log::warn!("Ignoring unconvertible geometry in extent: {e}");
                    return None;
                }
            };
            geometry.bounding_rect()
        })
        .reduce(|a, b| {
            Rect::new(
                coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
            )
        })
}

/// Expands `extent` outward to the `step` grid, then by `padding` more
/// steps on every side.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn snap_extent(extent: Rect<f64>, step: (f64, f64), padding: u32) -> Rect<f64> {
    let snap_down = |v: f64, s: f64| {
        if s > 0.0 {
            (v / s).floor().mul_add(s, -(f64::from(padding) * s))
        } else {
            v
        }
    };
    let snap_up = |v: f64, s: f64| {
        if s > 0.0 {
            (v / s).ceil().mul_add(s, f64::from(padding) * s)
        } else {
            v
        }
    };
    Rect::new(
        coord! { x: snap_down(extent.min().x, step.0), y: snap_down(extent.min().y, step.1) },
        coord! { x: snap_up(extent.max().x, step.0), y: snap_up(extent.max().y, step.1) },
    )
}
