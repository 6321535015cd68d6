use crate::core::session::{SessionView, ViewResults};
use crate::map::events::{ActionHandler, MapAction, MapEvent, MarkerId};
use crate::models::{Category, Coordinates, ViewportDirective};

/// A rendered report on the map
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub report_id: String,
    pub position: Coordinates,
    pub category: Category,
    /// Only set while a search is active
    pub match_score: Option<u8>,
    /// 1-based position in the ranked list
    pub rank: Option<usize>,
}

/// Owns the marker set and viewport currently shown on the map
///
/// Each applied view replaces the whole marker set in one step. Reports without
/// a valid location get no marker.
#[derive(Debug, Clone)]
pub struct MapController {
    markers: Vec<Marker>,
    viewport: Option<ViewportDirective>,
    is_search_active: bool,
    generation: u64,
    focus_zoom: u8,
}

impl MapController {
    pub fn new(focus_zoom: u8) -> Self {
        Self {
            markers: Vec::new(),
            viewport: None,
            is_search_active: false,
            generation: 0,
            focus_zoom,
        }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn viewport(&self) -> Option<&ViewportDirective> {
        self.viewport.as_ref()
    }

    /// Drives the search badge and reset button
    pub fn is_search_active(&self) -> bool {
        self.is_search_active
    }

    /// No results to show; the caller renders its "no results" state
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        if id.generation != self.generation {
            return None;
        }
        self.markers.get(id.index)
    }

    /// Replace markers and viewport with a new view
    pub fn apply(&mut self, view: &SessionView) {
        let generation = self.generation + 1;

        let entries: Vec<(String, Option<Coordinates>, Category, Option<u8>)> = match &view.results {
            ViewResults::Idle { reports } => reports
                .iter()
                .map(|report| (report.id.clone(), report.location(), report.category.clone(), None))
                .collect(),
            ViewResults::SearchActive { results } => results
                .iter()
                .map(|entry| {
                    (
                        entry.candidate.id.clone(),
                        entry.candidate.location(),
                        entry.candidate.category.clone(),
                        Some(entry.match_score),
                    )
                })
                .collect(),
        };

        let markers: Vec<Marker> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(position, (report_id, location, category, match_score))| {
                location.map(|point| (position, report_id, point, category, match_score))
            })
            .enumerate()
            .map(|(index, (position, report_id, point, category, match_score))| Marker {
                id: MarkerId { generation, index },
                report_id,
                position: point,
                category,
                rank: match_score.map(|_| position + 1),
                match_score,
            })
            .collect();

        tracing::debug!(
            "Applied map frame {} with {} markers (search active: {})",
            generation,
            markers.len(),
            view.is_search_active
        );

        self.markers = markers;
        self.viewport = Some(view.viewport);
        self.is_search_active = view.is_search_active;
        self.generation = generation;
    }

    /// Translate a map event into an action for `handler`
    ///
    /// Returns `false` when the event refers to a marker that is no longer shown.
    pub fn dispatch<H: ActionHandler>(&self, event: MapEvent, handler: &mut H) -> bool {
        let action = match event {
            MapEvent::MarkerClicked(id) => self.marker(id).map(|marker| MapAction::FocusReport {
                report_id: marker.report_id.clone(),
                center: marker.position,
                zoom: self.focus_zoom,
            }),
            MapEvent::DetailsRequested(id) => self.marker(id).map(|marker| MapAction::OpenReport {
                report_id: marker.report_id.clone(),
            }),
            MapEvent::ResetClicked => Some(MapAction::ResetSearch),
        };

        match action {
            Some(action) => {
                handler.handle(action);
                true
            }
            None => {
                tracing::debug!("Ignoring map event for stale marker: {:?}", event);
                false
            }
        }
    }
}

impl Default for MapController {
    fn default() -> Self {
        Self::new(crate::core::viewport::ZoomLevels::default().focus)
    }
}
