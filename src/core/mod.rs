// Core algorithm exports
pub mod criteria;
pub mod distance;
pub mod engine;
pub mod filters;
pub mod ranker;
pub mod scoring;
pub mod session;
pub mod viewport;

pub use criteria::{fallback_origin, tokenize_keyword, CriteriaNormalizer};
pub use distance::{distance_between, haversine_distance, is_valid_coordinate};
pub use engine::{RankingEngine, RankingResult};
pub use filters::{hard_filter, matches_behavior, matches_category, matches_status};
pub use ranker::rank;
pub use scoring::{distance_points, keyword_points, score_candidate};
pub use session::{SearchSession, SearchState, SessionView, ViewResults};
pub use viewport::{center_best, fit_all, ViewportFitter, ZoomLevels};
