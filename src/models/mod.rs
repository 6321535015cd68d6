// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Behavior, BoundingBox, Candidate, Category, Coordinates, Elimination, Filter, KnownCategory,
    ScoreBreakdown, ScoredCandidate, SearchCriteria, Status, ViewportDirective, ViewportMode,
};
pub use requests::SearchRequest;
pub use responses::{ErrorResponse, HealthResponse, RefreshResponse, SearchResponse};
