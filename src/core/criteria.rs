use crate::models::{Behavior, Category, Coordinates, Filter, SearchCriteria, SearchRequest};

/// Latitude used when the searcher's location is unavailable (central Bangkok)
pub const FALLBACK_LATITUDE: f64 = 13.7563;
/// Longitude used when the searcher's location is unavailable
pub const FALLBACK_LONGITUDE: f64 = 100.5018;

/// Sentinel the search form sends for "no filter"
const ALL_SENTINEL: &str = "all";

pub fn fallback_origin() -> Coordinates {
    Coordinates::new(FALLBACK_LATITUDE, FALLBACK_LONGITUDE)
}

/// Turns raw search form input into canonical [`SearchCriteria`]
#[derive(Debug, Clone, Copy)]
pub struct CriteriaNormalizer {
    fallback: Coordinates,
}

impl CriteriaNormalizer {
    pub fn new(fallback: Coordinates) -> Self {
        Self { fallback }
    }

    pub fn fallback(&self) -> Coordinates {
        self.fallback
    }

    pub fn normalize(&self, request: &SearchRequest) -> SearchCriteria {
        SearchCriteria {
            category: parse_filter(request.category.as_deref(), Category::parse),
            behavior: parse_filter(request.behavior.as_deref(), Behavior::parse),
            keywords: tokenize_keyword(request.keyword.as_deref().unwrap_or("")),
            only_active: request.only_active,
            origin: self.origin(request.lat, request.lng),
        }
    }

    /// Searcher location, or the fallback when either coordinate is missing or invalid
    fn origin(&self, lat: Option<f64>, lng: Option<f64>) -> Coordinates {
        match (lat, lng) {
            (Some(lat), Some(lng)) => {
                let point = Coordinates::new(lat, lng);
                if point.is_valid() {
                    point
                } else {
                    tracing::debug!("Ignoring invalid searcher location ({}, {})", lat, lng);
                    self.fallback
                }
            }
            _ => self.fallback,
        }
    }
}

impl Default for CriteriaNormalizer {
    fn default() -> Self {
        Self::new(fallback_origin())
    }
}

/// Split a keyword into ordered, non-empty whitespace-delimited tokens
pub fn tokenize_keyword(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

/// Missing, blank and "all" (any case) all mean no filter
fn parse_filter<T>(raw: Option<&str>, parse: impl Fn(&str) -> T) -> Filter<T> {
    match raw.map(str::trim) {
        None => Filter::All,
        Some(value) if value.is_empty() || value.eq_ignore_ascii_case(ALL_SENTINEL) => Filter::All,
        Some(value) => Filter::Only(parse(value)),
    }
}
