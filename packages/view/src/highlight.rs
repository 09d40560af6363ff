//! Linked highlighting between map regions and histogram bars.
//!
//! Hovering a region emphasizes it and the bar holding its value. Hovering
//! a bar emphasizes it and every region it holds. At most one highlight is
//! active: a new hover first clears the old one, and an unhover only
//! clears the highlight if it names the currently hovered element.
//! Clearing always restores the styles the views captured at render time.

use crate::chart_view::ChartView;
use crate::label::{HoverLabel, LabelPlacement};
use crate::map_view::MapView;
use crate::selection::SelectionState;
use crate::style::{ScreenPoint, StrokeStyle};
use crate::surface::DrawingSurface;

/// The element under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverTarget {
    /// A map region, by tract id.
    Region(String),
    /// A histogram bar, by bin index.
    Bar(usize),
}

/// What one hover resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightResolution {
    /// The hovered element.
    pub target: HoverTarget,
    /// Highlighted regions.
    pub regions: Vec<String>,
    /// Highlighted bar, if any.
    pub bar: Option<usize>,
}

/// The views a highlight is applied across.
#[derive(Debug, Clone, Copy)]
pub struct LinkedViews<'a> {
    /// Active attribute with its classification and binning.
    pub selection: &'a SelectionState,
    /// The map.
    pub map: &'a MapView,
    /// The chart.
    pub chart: &'a ChartView,
}

/// Applies and clears linked highlights.
#[derive(Debug, Clone)]
pub struct LinkedHighlightController {
    stroke: StrokeStyle,
    placement: LabelPlacement,
    active: Option<HighlightResolution>,
}

impl LinkedHighlightController {
    /// Creates a controller that outlines highlighted elements with
    /// `stroke` and places labels with `placement`.
    #[must_use]
    pub const fn new(stroke: StrokeStyle, placement: LabelPlacement) -> Self {
        Self {
            stroke,
            placement,
            active: None,
        }
    }

    /// The highlight currently shown.
    #[must_use]
    pub const fn active(&self) -> Option<&HighlightResolution> {
        self.active.as_ref()
    }

    /// Highlights region `tract_id` and the bar holding its value. A region
    /// with a missing value highlights alone.
    ///
    /// Returns `None` if no region has that id.
    pub fn on_region_hover<S: DrawingSurface + ?Sized>(
        &mut self,
        tract_id: &str,
        pointer: ScreenPoint,
        views: LinkedViews<'_>,
        surface: &mut S,
    ) -> Option<HighlightResolution> {
        self.clear(views, surface);

        let Some(region) = views.map.region(tract_id) else {
            log::debug!("Hover on unknown region {tract_id}");
            return None;
        };
        let attribute = views.selection.active_attribute();
        let bar = views.selection.bin_for_region(region).map(|bin| bin.index);

        let regions = vec![region.tract_id.clone()];
        views.map.highlight(&regions, self.stroke, surface);
        if let Some(index) = bar {
            views.chart.highlight(index, self.stroke, surface);
        }
        surface.show_label(&HoverLabel::for_region(
            region,
            attribute,
            self.placement.position(pointer),
        ));

        log::debug!("Region {tract_id} resolved to bar {bar:?}");
        Some(self.activate(HighlightResolution {
            target: HoverTarget::Region(region.tract_id.clone()),
            regions,
            bar,
        }))
    }

    /// Highlights bar `index` and all of its member regions.
    ///
    /// Returns `None` if the active binning has no such bar.
    pub fn on_bar_hover<S: DrawingSurface + ?Sized>(
        &mut self,
        index: usize,
        pointer: ScreenPoint,
        views: LinkedViews<'_>,
        surface: &mut S,
    ) -> Option<HighlightResolution> {
        self.clear(views, surface);

        let Some(bin) = views.selection.binning().bin(index) else {
            log::debug!("Hover on unknown bar {index}");
            return None;
        };

        views.map.highlight(&bin.members, self.stroke, surface);
        views.chart.highlight(index, self.stroke, surface);
        surface.show_label(&HoverLabel::for_bin(
            bin,
            views.selection.active_attribute(),
            self.placement.position(pointer),
        ));

        log::debug!("Bar {index} resolved to {} regions", bin.count());
        Some(self.activate(HighlightResolution {
            target: HoverTarget::Bar(index),
            regions: bin.members.clone(),
            bar: Some(index),
        }))
    }

    /// Clears the highlight if region `tract_id` is the hovered element.
    /// Stale unhovers for anything else are ignored.
    pub fn on_region_unhover<S: DrawingSurface + ?Sized>(
        &mut self,
        tract_id: &str,
        views: LinkedViews<'_>,
        surface: &mut S,
    ) -> Option<HighlightResolution> {
        if self.is_hovering(&HoverTarget::Region(tract_id.to_string())) {
            self.clear(views, surface)
        } else {
            None
        }
    }

    /// Clears the highlight if bar `index` is the hovered element.
    pub fn on_bar_unhover<S: DrawingSurface + ?Sized>(
        &mut self,
        index: usize,
        views: LinkedViews<'_>,
        surface: &mut S,
    ) -> Option<HighlightResolution> {
        if self.is_hovering(&HoverTarget::Bar(index)) {
            self.clear(views, surface)
        } else {
            None
        }
    }

    /// Moves the label with the pointer. Returns whether a label is shown.
    pub fn on_pointer_move<S: DrawingSurface + ?Sized>(
        &self,
        pointer: ScreenPoint,
        surface: &mut S,
    ) -> bool {
        if self.active.is_some() {
            surface.move_label(self.placement.position(pointer));
            true
        } else {
            false
        }
    }

    /// Restores every highlighted element and removes the label. Returns
    /// the highlight that was cleared.
    pub fn clear<S: DrawingSurface + ?Sized>(
        &mut self,
        views: LinkedViews<'_>,
        surface: &mut S,
    ) -> Option<HighlightResolution> {
        let active = self.active.take()?;
        views.map.restore(&active.regions, surface);
        if let Some(index) = active.bar {
            views.chart.restore(index, surface);
        }
        surface.remove_label();
        Some(active)
    }

    fn is_hovering(&self, target: &HoverTarget) -> bool {
        self.active.as_ref().is_some_and(|active| &active.target == target)
    }

    fn activate(&mut self, resolution: HighlightResolution) -> HighlightResolution {
        self.active = Some(resolution.clone());
        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneRecorder;
    use tract_map_attributes::AttributeCatalog;
    use tract_map_classify::{ClassificationEngine, Color, Palette};
    use tract_map_region_models::Region;

    struct Fixture {
        selection: SelectionState,
        map: MapView,
        chart: ChartView,
        scene: SceneRecorder,
    }

    fn stroke(width: f64) -> StrokeStyle {
        StrokeStyle {
            color: Color::rgb(0, 0, 0),
            width,
        }
    }

    fn controller() -> LinkedHighlightController {
        LinkedHighlightController::new(
            stroke(2.0),
            LabelPlacement {
                offset: (10.0, -75.0),
                label_width: 200.0,
                frame_width: 960.0,
            },
        )
    }

    fn fixture() -> Fixture {
        let catalog = AttributeCatalog::builtin();
        let attribute = catalog.first().name.clone();
        let regions: Vec<Region> = [Some(100.0), Some(200.0), None, Some(900.0), Some(950.0)]
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let mut region = Region::new(format!("t{i}"));
                region.attributes.insert(attribute.clone(), value);
                region
            })
            .collect();
        let engine = ClassificationEngine::new(
            Palette {
                colors: vec![Color::rgb(1, 0, 0), Color::rgb(2, 0, 0)],
                no_data: Color::rgb(0xee, 0xee, 0xee),
            },
            2,
            4,
        )
        .unwrap();

        let selection = SelectionState::new(&catalog, &regions, &engine);
        let mut map = MapView::new(regions, stroke(0.5));
        let mut chart = ChartView::new(stroke(0.5));
        let mut scene = SceneRecorder::default();
        map.render(&selection, &mut scene);
        chart.render(&selection, &mut scene);

        Fixture {
            selection,
            map,
            chart,
            scene,
        }
    }

    #[test]
    fn region_and_bar_hover_resolve_symmetrically() {
        let mut f = fixture();
        let mut controller = controller();

        for region in f.map.regions().to_vec() {
            let views = LinkedViews {
                selection: &f.selection,
                map: &f.map,
                chart: &f.chart,
            };
            let from_region = controller
                .on_region_hover(&region.tract_id, ScreenPoint::default(), views, &mut f.scene)
                .unwrap();
            let Some(bar) = from_region.bar else {
                assert_eq!(region.value(&f.selection.active_attribute().name), None);
                continue;
            };

            let from_bar = controller
                .on_bar_hover(bar, ScreenPoint::default(), views, &mut f.scene)
                .unwrap();
            assert!(from_bar.regions.contains(&region.tract_id));
            assert_eq!(from_bar.bar, Some(bar));
        }
    }

    #[test]
    fn missing_value_region_highlights_alone() {
        let mut f = fixture();
        let mut controller = controller();
        let views = LinkedViews {
            selection: &f.selection,
            map: &f.map,
            chart: &f.chart,
        };

        let resolution = controller
            .on_region_hover("t2", ScreenPoint::default(), views, &mut f.scene)
            .unwrap();

        assert_eq!(resolution.regions, vec!["t2".to_string()]);
        assert_eq!(resolution.bar, None);
        assert!(f.scene.bars().iter().all(|bar| bar.style.stroke == stroke(0.5)));
        assert_eq!(f.scene.label().map(|l| l.text.as_str()), Some("No data"));
    }

    #[test]
    fn unhover_restores_captured_styles_and_removes_label() {
        let mut f = fixture();
        let mut controller = controller();
        let before = f.scene.clone();
        let views = LinkedViews {
            selection: &f.selection,
            map: &f.map,
            chart: &f.chart,
        };

        controller.on_bar_hover(3, ScreenPoint::new(40.0, 300.0), views, &mut f.scene);
        assert_eq!(f.scene.region_style("t3").unwrap().stroke, stroke(2.0));
        assert_eq!(f.scene.region_style("t3").unwrap().fill, before.region_style("t3").unwrap().fill);
        assert!(f.scene.label().is_some());

        controller.on_bar_unhover(3, views, &mut f.scene);

        assert_eq!(f.scene.regions(), before.regions());
        assert_eq!(f.scene.bars(), before.bars());
        assert!(f.scene.label().is_none());
        assert!(controller.active().is_none());
    }

    #[test]
    fn last_hover_wins_and_stale_unhover_is_ignored() {
        let mut f = fixture();
        let mut controller = controller();
        let views = LinkedViews {
            selection: &f.selection,
            map: &f.map,
            chart: &f.chart,
        };

        controller.on_region_hover("t0", ScreenPoint::default(), views, &mut f.scene);
        controller.on_region_hover("t4", ScreenPoint::default(), views, &mut f.scene);

        assert_eq!(f.scene.region_style("t0").unwrap().stroke, stroke(0.5));
        assert_eq!(f.scene.region_style("t4").unwrap().stroke, stroke(2.0));

        assert_eq!(controller.on_region_unhover("t0", views, &mut f.scene), None);
        assert_eq!(f.scene.region_style("t4").unwrap().stroke, stroke(2.0));
        assert!(f.scene.label().is_some());

        assert!(controller.on_region_unhover("t4", views, &mut f.scene).is_some());
        assert_eq!(f.scene.region_style("t4").unwrap().stroke, stroke(0.5));
        assert_eq!(f.scene.labels_shown(), 2);
        assert!(f.scene.label().is_none());
    }

    #[test]
    fn pointer_move_tracks_only_while_highlighted() {
        let mut f = fixture();
        let mut controller = controller();
        let views = LinkedViews {
            selection: &f.selection,
            map: &f.map,
            chart: &f.chart,
        };

        assert!(!controller.on_pointer_move(ScreenPoint::new(5.0, 100.0), &mut f.scene));

        controller.on_region_hover("t1", ScreenPoint::new(5.0, 100.0), views, &mut f.scene);
        assert!(controller.on_pointer_move(ScreenPoint::new(900.0, 100.0), &mut f.scene));
        assert_eq!(
            f.scene.label().unwrap().position,
            ScreenPoint::new(690.0, 25.0)
        );
    }

    #[test]
    fn unknown_targets_resolve_to_nothing() {
        let mut f = fixture();
        let mut controller = controller();
        let views = LinkedViews {
            selection: &f.selection,
            map: &f.map,
            chart: &f.chart,
        };

        assert_eq!(
            controller.on_region_hover("nope", ScreenPoint::default(), views, &mut f.scene),
            None
        );
        assert_eq!(
            controller.on_bar_hover(99, ScreenPoint::default(), views, &mut f.scene),
            None
        );
        assert!(f.scene.label().is_none());
    }
}
