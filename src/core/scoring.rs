use crate::core::{
    distance::distance_between,
    filters::{hard_filter, matches_category},
};
use crate::models::{Candidate, Elimination, ScoreBreakdown, ScoredCandidate, SearchCriteria};

/// Points for passing the category check
pub const CATEGORY_POINTS: u8 = 30;
/// Points for a description that contains any keyword token
pub const KEYWORD_POINTS: u8 = 30;
/// Points for a located report outside every distance band
pub const FAR_DISTANCE_POINTS: u8 = 5;
pub const MAX_SCORE: u8 = 100;

/// Upper distance bound (exclusive, km) and the points awarded below it
const DISTANCE_BANDS: [(f64, u8); 3] = [(2.0, 40), (5.0, 30), (10.0, 20)];

/// Calculate the match score (0-100) of a candidate against search criteria
///
/// Scoring formula:
/// score = min(100,
///     category_points +   # 30, or eliminated on mismatch
///     distance_points +   # 40 / 30 / 20 / 5 by band, 0 when unlocated
///     keyword_points      # 30 when any token hits the description
/// )
///
/// Hard filters run first; an eliminated candidate always scores zero. The
/// result depends only on the two arguments.
pub fn score_candidate(candidate: &Candidate, criteria: &SearchCriteria) -> ScoredCandidate {
    if let Some(reason) = hard_filter(candidate, criteria) {
        tracing::trace!("Report {} eliminated: {:?}", candidate.id, reason);
        return ScoredCandidate::eliminated(candidate.clone(), reason);
    }

    if !matches_category(candidate, criteria) {
        tracing::trace!("Report {} eliminated: category {}", candidate.id, candidate.category);
        return ScoredCandidate::eliminated(candidate.clone(), Elimination::CategoryMismatch);
    }

    let distance_km = candidate
        .location()
        .map(|location| distance_between(&criteria.origin, &location));

    let breakdown = ScoreBreakdown {
        category: CATEGORY_POINTS,
        distance: distance_km.map(distance_points).unwrap_or(0),
        keyword: keyword_points(candidate.description_text(), &criteria.keywords),
    };

    let match_score = breakdown.total().min(MAX_SCORE as u32) as u8;

    ScoredCandidate {
        candidate: candidate.clone(),
        match_score,
        eliminated: false,
        eliminated_by: None,
        distance_km,
        breakdown,
    }
}

/// Points for a known distance from the searcher
#[inline]
pub fn distance_points(distance_km: f64) -> u8 {
    DISTANCE_BANDS
        .iter()
        .find(|(limit, _)| distance_km < *limit)
        .map(|(_, points)| *points)
        .unwrap_or(FAR_DISTANCE_POINTS)
}

/// Binary keyword bonus
///
/// Full points as soon as one token is a substring of the description,
/// regardless of how many tokens hit. Both sides are lowercased first, an
/// intentional widening of plain substring matching so Latin-script tokens
/// match regardless of case. Thai text has no case and is unaffected.
#[inline]
pub fn keyword_points(description: &str, keywords: &[String]) -> u8 {
    if keywords.is_empty() || description.is_empty() {
        return 0;
    }

    let haystack = description.to_lowercase();
    let hit = keywords
        .iter()
        .any(|token| haystack.contains(&token.to_lowercase()));

    if hit {
        KEYWORD_POINTS
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::criteria::fallback_origin;
    use crate::models::{Behavior, Category, Filter, KnownCategory, Status};

    fn create_test_candidate(lat: Option<f64>, lng: Option<f64>, description: &str) -> Candidate {
        Candidate {
            id: "r1".to_string(),
            category: Category::Known(KnownCategory::Dog),
            behavior: Behavior::Friendly,
            status: Status::Active,
            latitude: lat,
            longitude: lng,
            description: Some(description.to_string()),
            created_at: None,
            reporter_name: "Test".to_string(),
            image_url: None,
        }
    }

    fn create_test_criteria(keywords: &[&str]) -> SearchCriteria {
        SearchCriteria {
            category: Filter::All,
            behavior: Filter::All,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            only_active: false,
            origin: fallback_origin(),
        }
    }

    #[test]
    fn test_distance_bands() {
        assert_eq!(distance_points(0.0), 40);
        assert_eq!(distance_points(1.0), 40);
        assert_eq!(distance_points(1.999), 40);
        assert_eq!(distance_points(2.0), 30);
        assert_eq!(distance_points(3.0), 30);
        assert_eq!(distance_points(5.0), 20);
        assert_eq!(distance_points(7.0), 20);
        assert_eq!(distance_points(10.0), FAR_DISTANCE_POINTS);
        assert_eq!(distance_points(50.0), FAR_DISTANCE_POINTS);
    }

    #[test]
    fn test_keyword_bonus_is_binary() {
        let description = "ขนสีน้ำตาล มีปลอกคอ";
        let one_hit = vec!["ปลอกคอ".to_string(), "แดง".to_string()];
        let two_hits = vec!["ปลอกคอ".to_string(), "ขน".to_string()];

        assert_eq!(keyword_points(description, &one_hit), 30);
        assert_eq!(keyword_points(description, &two_hits), 30);
        assert_eq!(keyword_points(description, &["แมว".to_string()]), 0);
        assert_eq!(keyword_points(description, &[]), 0);
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        assert_eq!(keyword_points("Red Collar", &["collar".to_string()]), 30);
    }

    #[test]
    fn test_missing_coordinates_skip_distance() {
        let candidate = create_test_candidate(None, None, "");
        let scored = score_candidate(&candidate, &create_test_criteria(&[]));

        assert!(!scored.eliminated);
        assert_eq!(scored.distance_km, None);
        assert_eq!(scored.breakdown.distance, 0);
        assert_eq!(scored.match_score, 30);
    }

    #[test]
    fn test_full_score() {
        let candidate = create_test_candidate(Some(13.7563), Some(100.5018), "มีปลอกคอ");
        let scored = score_candidate(&candidate, &create_test_criteria(&["ปลอกคอ"]));

        assert_eq!(scored.match_score, 100);
        assert_eq!(
            scored.breakdown,
            ScoreBreakdown { category: 30, distance: 40, keyword: 30 }
        );
    }

    #[test]
    fn test_category_mismatch_eliminates() {
        let candidate = create_test_candidate(Some(13.7563), Some(100.5018), "มีปลอกคอ");
        let mut criteria = create_test_criteria(&["ปลอกคอ"]);
        criteria.category = Filter::Only(Category::Known(KnownCategory::Cat));

        let scored = score_candidate(&candidate, &criteria);
        assert!(scored.eliminated);
        assert_eq!(scored.match_score, 0);
        assert_eq!(scored.eliminated_by, Some(Elimination::CategoryMismatch));
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let candidate = create_test_candidate(Some(13.80), Some(100.55), "ขนฟู");
        let criteria = create_test_criteria(&["ฟู"]);

        let first = score_candidate(&candidate, &criteria);
        let second = score_candidate(&candidate, &criteria);
        assert_eq!(first, second);
    }
}
