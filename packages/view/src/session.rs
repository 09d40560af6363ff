//! One map session: load, join, classify, render, then react to events.

use thiserror::Error;
use tokio::sync::mpsc;
use tract_map_attributes::AttributeCatalog;
use tract_map_classify::ClassificationEngine;
use tract_map_graticule::{Graticule, extent_of, snap_extent};
use tract_map_join::{JoinSummary, LoadError, LoadedInputs, join_with_summary, load_inputs};

use crate::chart_view::ChartView;
use crate::config::{ConfigError, MapConfig};
use crate::highlight::{HighlightResolution, LinkedHighlightController, LinkedViews};
use crate::map_view::MapView;
use crate::selection::{SelectionError, SelectionState};
use crate::style::ScreenPoint;
use crate::surface::DrawingSurface;

/// Errors that stop a session from starting or reject an event.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A dataset could not be loaded. Nothing was drawn.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An attribute selection named an unknown attribute.
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// A user interaction, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    /// The pointer entered a region.
    RegionHover {
        /// Hovered tract.
        tract_id: String,
        /// Pointer position.
        pointer: ScreenPoint,
    },
    /// The pointer left a region.
    RegionUnhover {
        /// Tract left.
        tract_id: String,
    },
    /// The pointer entered a bar.
    BarHover {
        /// Hovered bin.
        index: usize,
        /// Pointer position.
        pointer: ScreenPoint,
    },
    /// The pointer left a bar.
    BarUnhover {
        /// Bin left.
        index: usize,
    },
    /// The pointer moved.
    PointerMove {
        /// New pointer position.
        pointer: ScreenPoint,
    },
    /// An attribute was picked in the selection control.
    SelectAttribute {
        /// Catalog name of the attribute.
        name: String,
    },
}

/// The visible effect of one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// A highlight was applied.
    Highlighted(HighlightResolution),
    /// A highlight was removed.
    Cleared(HighlightResolution),
    /// The label followed the pointer.
    LabelMoved,
    /// The active attribute changed and both views were re-rendered.
    AttributeSelected(String),
    /// Nothing changed.
    Ignored,
}

/// Owns all session state and the surface it renders to.
///
/// Every mutation goes through `&mut self`, so an attribute switch and its
/// re-render complete before the next hover is looked at.
#[derive(Debug)]
pub struct Session<S> {
    catalog: AttributeCatalog,
    engine: ClassificationEngine,
    selection: SelectionState,
    map: MapView,
    chart: ChartView,
    highlight: LinkedHighlightController,
    join_summary: JoinSummary,
    surface: S,
}

impl<S: DrawingSurface> Session<S> {
    /// Loads both datasets concurrently, then builds and renders the
    /// session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if either dataset fails to load or the
    /// configuration is invalid. The error is also shown on `surface`, and
    /// nothing else is drawn.
    pub async fn bootstrap(
        config: &MapConfig,
        catalog: AttributeCatalog,
        mut surface: S,
    ) -> Result<Self, SessionError> {
        let inputs = match load_inputs(&config.data.tabular, &config.data.geometry).await {
            Ok(inputs) => inputs,
            Err(e) => {
                log::error!("Failed to load map data: {e}");
                surface.show_error(&format!("Could not load map data: {e}"));
                return Err(e.into());
            }
        };
        Self::from_inputs(config, catalog, inputs, surface)
    }

    /// Joins already loaded inputs, classifies the first catalog attribute,
    /// and draws the graticule, map, and chart.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] if the classification parameters
    /// are invalid. The error is also shown on `surface`.
    pub fn from_inputs(
        config: &MapConfig,
        catalog: AttributeCatalog,
        inputs: LoadedInputs,
        mut surface: S,
    ) -> Result<Self, SessionError> {
        let engine = match config.engine() {
            Ok(engine) => engine,
            Err(e) => {
                surface.show_error(&format!("Invalid map configuration: {e}"));
                return Err(e.into());
            }
        };

        let (regions, join_summary) =
            join_with_summary(&inputs.records, &inputs.features, &catalog);
        let selection = SelectionState::new(&catalog, &regions, &engine);

        if config.graticule.enabled {
            match extent_of(regions.iter().filter_map(|r| r.geometry.as_ref())) {
                Some(extent) => {
                    let extent =
                        snap_extent(extent, config.graticule.step, config.graticule.padding);
                    surface.draw_graticule(&Graticule::new(extent, config.graticule.step));
                }
                None => log::debug!("No geometry to draw a graticule around"),
            }
        }

        let mut map = MapView::new(regions, config.style.region);
        let mut chart = ChartView::new(config.style.bar);
        map.render(&selection, &mut surface);
        chart.render(&selection, &mut surface);

        log::info!(
            "Session ready: {} regions, showing {}",
            map.regions().len(),
            selection.active_attribute().title
        );

        Ok(Self {
            catalog,
            engine,
            selection,
            map,
            chart,
            highlight: LinkedHighlightController::new(
                config.style.highlight,
                config.frame.label_placement(),
            ),
            join_summary,
            surface,
        })
    }

    /// Processes one event to completion.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] for a selection of an unknown attribute.
    /// The session is unchanged in that case.
    pub fn handle(&mut self, event: InteractionEvent) -> Result<EventOutcome, SelectionError> {
        let views = LinkedViews {
            selection: &self.selection,
            map: &self.map,
            chart: &self.chart,
        };
        let surface = &mut self.surface;

        let outcome = match event {
            InteractionEvent::RegionHover { tract_id, pointer } => self
                .highlight
                .on_region_hover(&tract_id, pointer, views, surface)
                .map(EventOutcome::Highlighted),
            InteractionEvent::RegionUnhover { tract_id } => self
                .highlight
                .on_region_unhover(&tract_id, views, surface)
                .map(EventOutcome::Cleared),
            InteractionEvent::BarHover { index, pointer } => self
                .highlight
                .on_bar_hover(index, pointer, views, surface)
                .map(EventOutcome::Highlighted),
            InteractionEvent::BarUnhover { index } => self
                .highlight
                .on_bar_unhover(index, views, surface)
                .map(EventOutcome::Cleared),
            InteractionEvent::PointerMove { pointer } => self
                .highlight
                .on_pointer_move(pointer, surface)
                .then_some(EventOutcome::LabelMoved),
            InteractionEvent::SelectAttribute { name } => {
                self.select_attribute(&name)?;
                Some(EventOutcome::AttributeSelected(name))
            }
        };

        Ok(outcome.unwrap_or(EventOutcome::Ignored))
    }

    /// Switches the active attribute: clears any highlight, rebuilds the
    /// classification and binning, and re-renders both views.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownAttribute`] without touching the
    /// views if `name` is not in the catalog.
    pub fn select_attribute(&mut self, name: &str) -> Result<(), SelectionError> {
        if !self.catalog.contains(name) {
            log::warn!("Rejected selection of unknown attribute '{name}'");
            return Err(SelectionError::UnknownAttribute {
                name: name.to_string(),
            });
        }

        self.highlight.clear(
            LinkedViews {
                selection: &self.selection,
                map: &self.map,
                chart: &self.chart,
            },
            &mut self.surface,
        );
        self.selection
            .switch_attribute(name, &self.catalog, self.map.regions(), &self.engine)?;
        self.map.render(&self.selection, &mut self.surface);
        self.chart.render(&self.selection, &mut self.surface);

        log::info!("Showing {}", self.selection.active_attribute().title);
        Ok(())
    }

    /// Handles events from `events` strictly in arrival order until every
    /// sender is dropped, then returns the session.
    pub async fn run(mut self, mut events: mpsc::Receiver<InteractionEvent>) -> Self {
        while let Some(event) = events.recv().await {
            log::trace!("Handling {event:?}");
            if let Err(e) = self.handle(event) {
                log::warn!("Ignoring event: {e}");
            }
        }
        log::debug!("Event channel closed");
        self
    }

    /// The attribute catalog.
    #[must_use]
    pub const fn catalog(&self) -> &AttributeCatalog {
        &self.catalog
    }

    /// Active attribute state.
    #[must_use]
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// The map view.
    #[must_use]
    pub const fn map(&self) -> &MapView {
        &self.map
    }

    /// The chart view.
    #[must_use]
    pub const fn chart(&self) -> &ChartView {
        &self.chart
    }

    /// The highlight currently shown.
    #[must_use]
    pub const fn active_highlight(&self) -> Option<&HighlightResolution> {
        self.highlight.active()
    }

    /// Coverage of the initial join.
    #[must_use]
    pub const fn join_summary(&self) -> &JoinSummary {
        &self.join_summary
    }

    /// The surface being rendered to.
    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Ends the session, returning its surface.
    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::scene::SceneRecorder;
    use tract_map_join::load::{read_features, read_records};

    const CSV: &str = "\
tract_id,median_rent,median_value,median_income,median_year_built,avg_household_size
1,900,350000,41000,1939,2.1
2,1450,610000,,1952,2.4
3,,720000,88000,1961,
4,2300,,120500,2004,1.9
5,1100,410000,52000,1950,3.0
";

    fn square(id: &str, x: f64, y: f64) -> String {
        format!(
            r#"{{"type":"Feature","properties":{{"tract_id":"{id}"}},"geometry":{{"type":"Polygon","coordinates":[[[{x},{y}],[{x1},{y}],[{x1},{y1}],[{x},{y1}],[{x},{y}]]]}}}}"#,
            x1 = x + 0.01,
            y1 = y + 0.01,
        )
    }

    fn geojson() -> String {
        let features: Vec<String> = (1..=5)
            .map(|i| square(&i.to_string(), f64::from(i).mul_add(0.02, -74.0), 40.7))
            .chain(std::iter::once(square("6", -73.9, 40.8)))
            .collect();
        format!(r#"{{"type":"FeatureCollection","features":[{}]}}"#, features.join(","))
    }

    fn inputs() -> LoadedInputs {
        LoadedInputs {
            records: read_records(CSV.as_bytes()).unwrap(),
            features: read_features(geojson().as_bytes()).unwrap(),
        }
    }

    fn session(scene: &mut SceneRecorder) -> Session<&mut SceneRecorder> {
        Session::from_inputs(&MapConfig::default(), AttributeCatalog::builtin(), inputs(), scene)
            .unwrap()
    }

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "tract_map_view_{}_{name}",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn hover(tract_id: &str) -> InteractionEvent {
        InteractionEvent::RegionHover {
            tract_id: tract_id.to_string(),
            pointer: ScreenPoint::new(100.0, 200.0),
        }
    }

    #[test]
    fn renders_every_feature_and_the_chart() {
        let mut scene = SceneRecorder::default();
        let session = session(&mut scene);

        assert_eq!(session.selection().active_attribute().name, "median_rent");
        assert_eq!(session.join_summary().unmatched_features, 1);
        drop(session);

        assert_eq!(scene.regions().len(), 6);
        assert_eq!(scene.bars().len(), 20);
        assert_eq!(scene.axes().unwrap().title, "Median Rent");
        assert!(scene.graticule().is_some());
        assert!(scene.error().is_none());
    }

    #[test]
    fn missing_values_render_no_data_fill() {
        let mut scene = SceneRecorder::default();
        drop(session(&mut scene));

        let no_data = MapConfig::default().classification.no_data;
        assert_eq!(scene.region_style("3").unwrap().fill, no_data);
        assert_eq!(scene.region_style("6").unwrap().fill, no_data);
        assert_ne!(scene.region_style("1").unwrap().fill, no_data);
    }

    #[test]
    fn switching_back_reproduces_direct_classification() {
        let mut direct_scene = SceneRecorder::default();
        let mut direct = session(&mut direct_scene);
        direct.select_attribute("median_value").unwrap();
        let expected = direct.selection().clone();
        drop(direct);

        let mut scene = SceneRecorder::default();
        let mut session = session(&mut scene);
        session.select_attribute("median_value").unwrap();
        session.select_attribute("median_year_built").unwrap();
        session.select_attribute("median_value").unwrap();

        assert_eq!(session.selection(), &expected);
        drop(session);
        assert_eq!(scene.regions(), direct_scene.regions());
        assert_eq!(scene.bars(), direct_scene.bars());
        assert_eq!(scene.axes().unwrap().title, "Median Home Value");
    }

    #[test]
    fn unknown_attribute_changes_nothing() {
        let mut scene = SceneRecorder::default();
        let mut session = session(&mut scene);
        session.handle(hover("1")).unwrap();
        let before = session.selection().clone();
        let highlight = session.active_highlight().cloned();

        let result = session.handle(InteractionEvent::SelectAttribute {
            name: "median_commute".to_string(),
        });

        assert!(matches!(result, Err(SelectionError::UnknownAttribute { .. })));
        assert_eq!(session.selection(), &before);
        assert_eq!(session.active_highlight().cloned(), highlight);
        assert!(session.surface().label().is_some());
    }

    #[test]
    fn attribute_switch_clears_highlight_first() {
        let mut scene = SceneRecorder::default();
        let mut session = session(&mut scene);
        session.handle(hover("2")).unwrap();
        assert!(session.surface().label().is_some());

        let outcome = session
            .handle(InteractionEvent::SelectAttribute {
                name: "median_income".to_string(),
            })
            .unwrap();

        assert_eq!(outcome, EventOutcome::AttributeSelected("median_income".to_string()));
        assert!(session.active_highlight().is_none());
        let stroke = MapConfig::default().style.region;
        drop(session);
        assert!(scene.label().is_none());
        assert!(scene.regions().values().all(|r| r.style.stroke == stroke));
    }

    #[test]
    fn region_hover_links_to_its_bar() {
        let mut scene = SceneRecorder::default();
        let mut session = session(&mut scene);

        let EventOutcome::Highlighted(resolution) = session.handle(hover("4")).unwrap() else {
            panic!("hover did not highlight");
        };

        let bar = resolution.bar.unwrap();
        assert_eq!(bar, 19, "the maximum value belongs in the last bar");
        let EventOutcome::Highlighted(from_bar) = session
            .handle(InteractionEvent::BarHover {
                index: bar,
                pointer: ScreenPoint::default(),
            })
            .unwrap()
        else {
            panic!("bar hover did not highlight");
        };
        assert!(from_bar.regions.contains(&"4".to_string()));
    }

    #[test]
    fn all_equal_values_render_one_class_and_one_bar() {
        let csv = "tract_id,median_rent\n1,1000\n2,1000\n3,1000\n";
        let inputs = LoadedInputs {
            records: read_records(csv.as_bytes()).unwrap(),
            features: read_features(geojson().as_bytes()).unwrap(),
        };
        let config = MapConfig::default();
        let mut scene = SceneRecorder::default();

        drop(Session::from_inputs(&config, AttributeCatalog::builtin(), inputs, &mut scene).unwrap());

        assert_eq!(scene.bars().len(), 1);
        assert_eq!(scene.bars()[0].bin.count(), 3);
        for id in ["1", "2", "3"] {
            assert_eq!(
                scene.region_style(id).unwrap().fill,
                config.classification.palette[0]
            );
        }
    }

    #[test]
    fn invalid_classification_config_is_shown() {
        let mut config = MapConfig::default();
        config.classification.bin_count = 0;
        let mut scene = SceneRecorder::default();

        let result = Session::from_inputs(&config, AttributeCatalog::builtin(), inputs(), &mut scene);

        assert!(matches!(result, Err(SessionError::Config(_))));
        assert!(scene.error().is_some());
        assert!(scene.regions().is_empty());
    }

    #[tokio::test]
    async fn bootstrap_loads_both_files() {
        let mut config = MapConfig::default();
        config.data.tabular = temp_file("ok.csv", CSV);
        config.data.geometry = temp_file("ok.geojson", &geojson());
        let mut scene = SceneRecorder::default();

        let session = Session::bootstrap(&config, AttributeCatalog::builtin(), &mut scene)
            .await
            .unwrap();
        drop(session);

        assert_eq!(scene.regions().len(), 6);
    }

    #[tokio::test]
    async fn geometry_load_failure_draws_nothing_and_shows_error() {
        let mut config = MapConfig::default();
        config.data.tabular = temp_file("fail.csv", CSV);
        config.data.geometry = std::env::temp_dir().join("tract_map_view_missing.geojson");
        let mut scene = SceneRecorder::default();

        let result = Session::bootstrap(&config, AttributeCatalog::builtin(), &mut scene).await;

        assert!(matches!(result, Err(SessionError::Load(_))));
        assert!(scene.error().unwrap().starts_with("Could not load map data"));
        assert!(scene.regions().is_empty());
        assert!(scene.bars().is_empty());
        assert!(scene.graticule().is_none());
    }

    #[tokio::test]
    async fn run_applies_events_in_arrival_order() {
        let scene = SceneRecorder::default();
        let session =
            Session::from_inputs(&MapConfig::default(), AttributeCatalog::builtin(), inputs(), scene)
                .unwrap();
        let (tx, rx) = mpsc::channel(16);

        for event in [
            hover("1"),
            hover("5"),
            InteractionEvent::RegionUnhover {
                tract_id: "1".to_string(),
            },
            InteractionEvent::SelectAttribute {
                name: "not_an_attribute".to_string(),
            },
            InteractionEvent::PointerMove {
                pointer: ScreenPoint::new(950.0, 300.0),
            },
        ] {
            tx.send(event).await.unwrap();
        }
        drop(tx);

        let session = session.run(rx).await;

        let active = session.active_highlight().unwrap();
        assert_eq!(active.regions, vec!["5".to_string()]);
        let scene = session.into_surface();
        assert_eq!(scene.labels_shown(), 2);
        assert_eq!(scene.label().unwrap().position, ScreenPoint::new(740.0, 225.0));
        assert_eq!(scene.region_style("1").unwrap().stroke, MapConfig::default().style.region);
    }
}
