use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::distance::is_valid_coordinate;

/// Animal categories the reporting form offers as fixed choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownCategory {
    Dog,
    Cat,
}

impl KnownCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            KnownCategory::Dog => "dog",
            KnownCategory::Cat => "cat",
        }
    }
}

/// Report category: either one of the fixed choices or free text typed by the reporter
///
/// Equality is the derived variant equality, so a custom value never equals a
/// known category even when it spells one differently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Known(KnownCategory),
    Custom(String),
}

impl Category {
    /// Parse a raw category value. Known names match case-insensitively,
    /// anything else is kept as trimmed custom text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_lowercase().as_str() {
            "dog" => Category::Known(KnownCategory::Dog),
            "cat" => Category::Known(KnownCategory::Cat),
            _ => Category::Custom(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Known(known) => known.as_str(),
            Category::Custom(text) => text,
        }
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        Category::parse(&raw)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observed behavior of the animal at report time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Behavior {
    Friendly,
    Aggressive,
    Injured,
    #[serde(other)]
    Other,
}

impl Behavior {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "friendly" => Behavior::Friendly,
            "aggressive" => Behavior::Aggressive,
            "injured" => Behavior::Injured,
            _ => Behavior::Other,
        }
    }
}

/// Lifecycle status of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Rescued,
    Moved,
    #[serde(other)]
    Other,
}

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Finite and inside the valid latitude/longitude ranges
    pub fn is_valid(&self) -> bool {
        is_valid_coordinate(self.latitude, self.longitude)
    }
}

/// Read-only snapshot of a stray animal report
///
/// Only the identifier, category, behavior and status are strict. Coordinates
/// and display fields with an unexpected shape read as missing so the report
/// still reaches ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    pub category: Category,
    pub behavior: Behavior,
    pub status: Status,
    #[serde(rename = "lat", default, deserialize_with = "lenient::coordinate")]
    pub latitude: Option<f64>,
    #[serde(rename = "lng", default, deserialize_with = "lenient::coordinate")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub description: Option<String>,
    #[serde(rename = "createdAt", default, deserialize_with = "lenient::optional")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "reporterName", default, deserialize_with = "lenient::text")]
    pub reporter_name: String,
    #[serde(rename = "imageUrl", default, deserialize_with = "lenient::optional")]
    pub image_url: Option<String>,
}

mod lenient {
    use serde::de::{DeserializeOwned, Error};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Identifier sent either as a string or as a number
    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(id) => Ok(id),
            Value::Number(id) => Ok(id.to_string()),
            other => Err(D::Error::custom(format!("invalid report id: {}", other))),
        }
    }

    /// Number or numeric string; anything else is treated as missing
    pub fn coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(value) => value.as_f64(),
            Value::String(value) => value.trim().parse().ok(),
            _ => None,
        })
    }

    /// `null` or a non-string value reads as empty text
    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(text) => text,
            _ => String::new(),
        })
    }

    pub fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value::<Option<T>>(value).ok().flatten())
    }
}

impl Candidate {
    /// Location of the report, or `None` when either coordinate is missing or invalid
    pub fn location(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if is_valid_coordinate(lat, lng) => {
                Some(Coordinates::new(lat, lng))
            }
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// A filter that is either the "all" sentinel or a single required value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T: PartialEq> Filter<T> {
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(required) => required == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Filter::All)
    }
}

/// Canonical search criteria, built once per search and never mutated
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    pub category: Filter<Category>,
    pub behavior: Filter<Behavior>,
    pub keywords: Vec<String>,
    pub only_active: bool,
    pub origin: Coordinates,
}

/// Why a candidate was removed from the result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Elimination {
    NotActive,
    BehaviorMismatch,
    CategoryMismatch,
}

/// Points each scoring component contributed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub category: u8,
    pub distance: u8,
    pub keyword: u8,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.category as u32 + self.distance as u32 + self.keyword as u32
    }
}

/// A candidate annotated with its relevance score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
    pub eliminated: bool,
    #[serde(rename = "eliminatedBy", skip_serializing_if = "Option::is_none", default)]
    pub eliminated_by: Option<Elimination>,
    #[serde(rename = "distanceKm", skip_serializing_if = "Option::is_none", default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub breakdown: ScoreBreakdown,
}

impl ScoredCandidate {
    /// Build an eliminated entry. The score is always zero.
    pub fn eliminated(candidate: Candidate, reason: Elimination) -> Self {
        Self {
            candidate,
            match_score: 0,
            eliminated: true,
            eliminated_by: Some(reason),
            distance_km: None,
            breakdown: ScoreBreakdown::default(),
        }
    }

    pub fn id(&self) -> &str {
        &self.candidate.id
    }
}

/// Geographic bounding rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn center(&self) -> Coordinates {
        Coordinates::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// A box collapsed onto a single point (one located result)
    pub fn is_degenerate(&self) -> bool {
        self.min_lat == self.max_lat && self.min_lon == self.max_lon
    }
}

/// Which viewport behavior a search should drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewportMode {
    #[default]
    FitAll,
    CenterBest,
}

/// Instruction for the map on how to frame a result set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ViewportDirective {
    /// Fit every located result
    FitBounds { bounds: BoundingBox },
    /// Center and zoom on a single result
    Center { center: Coordinates, zoom: u8 },
    /// Default view when there is nothing to frame
    Neutral { center: Coordinates, zoom: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("dog"), Category::Known(KnownCategory::Dog));
        assert_eq!(Category::parse(" Cat "), Category::Known(KnownCategory::Cat));
        assert_eq!(Category::parse("กระต่าย"), Category::Custom("กระต่าย".to_string()));
    }

    #[test]
    fn test_custom_category_never_equals_known() {
        let custom = Category::Custom("dogs".to_string());
        assert_ne!(custom, Category::Known(KnownCategory::Dog));
    }

    #[test]
    fn test_candidate_location_requires_both_coordinates() {
        let json = r#"{"id":"1","category":"dog","behavior":"friendly","status":"active","lat":13.7}"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();
        assert!(candidate.location().is_none());
    }

    #[test]
    fn test_unknown_enum_values_fall_back_to_other() {
        let json = r#"{"id":"1","category":"bird","behavior":"sleepy","status":"adopted","lat":13.7,"lng":100.5}"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.behavior, Behavior::Other);
        assert_eq!(candidate.status, Status::Other);
        assert_eq!(candidate.category, Category::Custom("bird".to_string()));
        assert!(candidate.location().is_some());
    }

    #[test]
    fn test_candidate_tolerates_loose_field_shapes() {
        let json = r#"{"id":7,"category":"dog","behavior":"injured","status":"active",
            "lat":"13.76","lng":" 100.50 ","reporterName":null,"createdAt":"yesterday","imageUrl":3}"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.id, "7");
        assert_eq!(candidate.location(), Some(Coordinates::new(13.76, 100.50)));
        assert_eq!(candidate.reporter_name, "");
        assert!(candidate.created_at.is_none());
        assert!(candidate.image_url.is_none());
    }

    #[test]
    fn test_malformed_coordinates_read_as_missing() {
        let json = r#"{"id":"1","category":"cat","behavior":"friendly","status":"active",
            "lat":{"deg":13},"lng":"east"}"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();
        assert!(candidate.latitude.is_none());
        assert!(candidate.longitude.is_none());
        assert!(candidate.location().is_none());
    }

    #[test]
    fn test_candidate_id_must_be_scalar() {
        let json = r#"{"id":[1],"category":"cat","behavior":"friendly","status":"active"}"#;
        assert!(serde_json::from_str::<Candidate>(json).is_err());
    }

    #[test]
    fn test_filter_accepts() {
        assert!(Filter::<Behavior>::All.accepts(&Behavior::Injured));
        assert!(Filter::Only(Behavior::Injured).accepts(&Behavior::Injured));
        assert!(!Filter::Only(Behavior::Injured).accepts(&Behavior::Friendly));
    }

    #[test]
    fn test_viewport_directive_wire_format() {
        let directive = ViewportDirective::Center {
            center: Coordinates::new(13.76, 100.5),
            zoom: 15,
        };
        let json = serde_json::to_value(directive).unwrap();
        assert_eq!(json["kind"], "center");
        assert_eq!(json["zoom"], 15);
    }
}
