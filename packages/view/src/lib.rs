#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Linked choropleth map and histogram over joined census tracts.
//!
//! A [`Session`] loads the tabular and geometry datasets, joins them, and
//! renders a [`MapView`] and [`ChartView`] for the active attribute through
//! a [`DrawingSurface`]. Hover events highlight a region together with its
//! histogram bar, or a bar together with its member regions. Selecting
//! another attribute rebuilds the classification and binning from the
//! already joined regions and re-renders both views.

pub mod chart_view;
pub mod config;
pub mod highlight;
pub mod label;
pub mod map_view;
pub mod scene;
pub mod selection;
pub mod session;
pub mod style;
pub mod surface;

pub use chart_view::ChartView;
pub use config::{ConfigError, MapConfig};
pub use highlight::{HighlightResolution, HoverTarget, LinkedHighlightController, LinkedViews};
pub use label::{HoverLabel, LabelPlacement};
pub use map_view::MapView;
pub use scene::{RecordedBar, RecordedRegion, SceneRecorder};
pub use selection::{SelectionError, SelectionState};
pub use session::{EventOutcome, InteractionEvent, Session, SessionError};
pub use style::{ElementStyle, ScreenPoint, StrokeStyle};
pub use surface::{ChartAxes, DrawingSurface};
