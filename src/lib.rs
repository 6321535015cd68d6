//! Stray Rank - geospatial relevance ranking for stray animal reports
//!
//! This library filters, scores and ranks open stray-animal reports against a
//! searcher's criteria and location, and derives the map viewport for the
//! ranked set. The pipeline is a pure, synchronous transformation over one
//! candidate snapshot per search.

pub mod config;
pub mod core;
pub mod map;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{haversine_distance, RankingEngine, RankingResult, SearchSession, ViewportFitter};
pub use crate::map::{MapController, MapEvent, MapAction};
pub use crate::models::{Candidate, Category, Coordinates, ScoredCandidate, SearchCriteria, SearchRequest, ViewportDirective};
