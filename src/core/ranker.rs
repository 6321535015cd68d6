use crate::models::ScoredCandidate;

/// Keep candidates with a positive score and order them by score, highest first
///
/// `sort_by` is stable, so equal scores keep their snapshot order.
pub fn rank(scored: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    let mut ranked: Vec<ScoredCandidate> = scored
        .into_iter()
        .filter(|entry| entry.match_score > 0)
        .collect();

    ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    ranked
}
