use geo::{BoundingRect, MultiPoint, Point};

use crate::models::{BoundingBox, Coordinates, ScoredCandidate, ViewportDirective, ViewportMode};

/// Zoom levels the fitter hands to the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomLevels {
    /// Zoom of the neutral (idle / no results) view
    pub neutral: u8,
    /// Zoom when centering on the best match
    pub focus: u8,
}

impl Default for ZoomLevels {
    fn default() -> Self {
        Self { neutral: 12, focus: 15 }
    }
}

/// Minimal rectangle covering every ranked candidate with valid coordinates
///
/// Returns `None` ("no bounds") when no candidate is located.
pub fn fit_all(ranked: &[ScoredCandidate]) -> Option<BoundingBox> {
    // geo works in (x, y) = (lng, lat)
    let points: MultiPoint<f64> = ranked
        .iter()
        .filter_map(|entry| entry.candidate.location())
        .map(|location| Point::new(location.longitude, location.latitude))
        .collect();

    let rect = points.bounding_rect()?;

    Some(BoundingBox {
        min_lat: rect.min().y,
        max_lat: rect.max().y,
        min_lon: rect.min().x,
        max_lon: rect.max().x,
    })
}

/// Location of the top-ranked candidate
///
/// Unlocated entries are skipped, so this is the best match that can actually be
/// shown on the map.
pub fn center_best(ranked: &[ScoredCandidate]) -> Option<Coordinates> {
    ranked.iter().find_map(|entry| entry.candidate.location())
}

/// Derives viewport directives from a ranked result set
#[derive(Debug, Clone, Copy)]
pub struct ViewportFitter {
    neutral_center: Coordinates,
    zoom: ZoomLevels,
}

impl ViewportFitter {
    pub fn new(neutral_center: Coordinates, zoom: ZoomLevels) -> Self {
        Self { neutral_center, zoom }
    }

    /// Default view: the fallback center at the neutral zoom
    pub fn neutral(&self) -> ViewportDirective {
        ViewportDirective::Neutral {
            center: self.neutral_center,
            zoom: self.zoom.neutral,
        }
    }

    /// Directive for a ranked result set. Falls back to the neutral view when nothing
    /// in the set has a location.
    pub fn fit(&self, ranked: &[ScoredCandidate], mode: ViewportMode) -> ViewportDirective {
        let directive = match mode {
            ViewportMode::FitAll => fit_all(ranked).map(|bounds| ViewportDirective::FitBounds { bounds }),
            ViewportMode::CenterBest => center_best(ranked).map(|center| ViewportDirective::Center {
                center,
                zoom: self.zoom.focus,
            }),
        };

        directive.unwrap_or_else(|| self.neutral())
    }
}

impl Default for ViewportFitter {
    fn default() -> Self {
        Self::new(crate::core::criteria::fallback_origin(), ZoomLevels::default())
    }
}
