use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::ViewportMode;

/// Raw search input as the search form submits it
///
/// Every field is optional: an empty body is a search with no filters from the
/// fallback location.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    /// Category name, or "all"
    #[serde(default)]
    #[validate(length(max = 64))]
    pub category: Option<String>,
    /// Behavior name, or "all"
    #[serde(default)]
    #[validate(length(max = 32))]
    pub behavior: Option<String>,
    /// Free text, split into tokens on whitespace
    #[serde(default)]
    #[validate(length(max = 256))]
    pub keyword: Option<String>,
    #[serde(alias = "only_active", rename = "onlyActive", default)]
    pub only_active: bool,
    /// Searcher latitude from the browser, if geolocation was granted
    ///
    /// Not range-validated: an unusable location falls back to the default origin.
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub viewport: Option<ViewportMode>,
    #[serde(default)]
    #[validate(range(min = 1, max = 1000))]
    pub limit: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_valid() {
        let req: SearchRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_ok());
        assert!(!req.only_active);
        assert!(req.keyword.is_none());
    }

    #[test]
    fn test_zero_limit_rejected() {
        let req: SearchRequest = serde_json::from_str(r#"{"limit":0}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_out_of_range_location_is_accepted() {
        let req: SearchRequest = serde_json::from_str(r#"{"lat":123.0,"lng":-500.0}"#).unwrap();
        assert!(req.validate().is_ok());

        let criteria = crate::core::CriteriaNormalizer::default().normalize(&req);
        assert_eq!(criteria.origin, crate::core::fallback_origin());
    }

    #[test]
    fn test_viewport_mode_parses() {
        let req: SearchRequest =
            serde_json::from_str(r#"{"viewport":"centerBest","onlyActive":true}"#).unwrap();
        assert_eq!(req.viewport, Some(ViewportMode::CenterBest));
        assert!(req.only_active);
    }
}
