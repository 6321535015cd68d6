use crate::core::{
    criteria::CriteriaNormalizer,
    ranker::rank,
    scoring::score_candidate,
    viewport::ViewportFitter,
};
use crate::models::{
    Candidate, ScoredCandidate, SearchCriteria, SearchRequest, ViewportDirective, ViewportMode,
};

/// Result of one ranking pass
#[derive(Debug, Clone, PartialEq)]
pub struct RankingResult {
    pub criteria: SearchCriteria,
    pub ranked: Vec<ScoredCandidate>,
    pub viewport: ViewportDirective,
    pub total_candidates: usize,
    pub eliminated: usize,
}

/// Ranking orchestrator - runs the full relevance pipeline over a snapshot
///
/// # Pipeline Stages
/// 1. Criteria normalization
/// 2. Hard filtering (status, behavior)
/// 3. Scoring (category, distance, keyword)
/// 4. Ranking
/// 5. Viewport fitting
///
/// The engine holds no state between calls; every pass recomputes from the
/// snapshot it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingEngine {
    normalizer: CriteriaNormalizer,
    fitter: ViewportFitter,
}

impl RankingEngine {
    pub fn new(normalizer: CriteriaNormalizer, fitter: ViewportFitter) -> Self {
        Self { normalizer, fitter }
    }

    pub fn normalizer(&self) -> &CriteriaNormalizer {
        &self.normalizer
    }

    pub fn fitter(&self) -> &ViewportFitter {
        &self.fitter
    }

    /// Score every candidate in snapshot order, eliminated ones included
    pub fn score_all(&self, criteria: &SearchCriteria, candidates: &[Candidate]) -> Vec<ScoredCandidate> {
        candidates
            .iter()
            .map(|candidate| score_candidate(candidate, criteria))
            .collect()
    }

    /// Rank a snapshot against already normalized criteria
    ///
    /// # Arguments
    /// * `criteria` - Canonical search criteria
    /// * `candidates` - The full candidate snapshot, in fetch order
    /// * `mode` - Viewport behavior to derive from the ranked set
    /// * `limit` - Optional display cap, applied after the whole snapshot is scored
    ///   and sorted. There is no offset, so it only trims the tail.
    pub fn rank(
        &self,
        criteria: SearchCriteria,
        candidates: &[Candidate],
        mode: ViewportMode,
        limit: Option<usize>,
    ) -> RankingResult {
        let total_candidates = candidates.len();

        let scored = self.score_all(&criteria, candidates);
        let eliminated = scored.iter().filter(|entry| entry.eliminated).count();

        let mut ranked = rank(scored);
        if let Some(limit) = limit {
            ranked.truncate(limit);
        }

        let viewport = self.fitter.fit(&ranked, mode);

        tracing::debug!(
            "Ranked {} of {} reports ({} eliminated)",
            ranked.len(),
            total_candidates,
            eliminated
        );

        RankingResult {
            criteria,
            ranked,
            viewport,
            total_candidates,
            eliminated,
        }
    }

    /// Normalize a raw search request and rank the snapshot
    pub fn search(&self, request: &SearchRequest, candidates: &[Candidate]) -> RankingResult {
        let criteria = self.normalizer.normalize(request);
        self.rank(
            criteria,
            candidates,
            request.viewport.unwrap_or_default(),
            request.limit.map(usize::from),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Behavior, Category, Status};

    fn create_candidate(
        id: &str,
        category: &str,
        status: Status,
        behavior: Behavior,
        lat: f64,
        lng: f64,
        description: &str,
    ) -> Candidate {
        Candidate {
            id: id.to_string(),
            category: Category::parse(category),
            behavior,
            status,
            latitude: Some(lat),
            longitude: Some(lng),
            description: Some(description.to_string()),
            created_at: None,
            reporter_name: format!("Reporter {}", id),
            image_url: None,
        }
    }

    fn scenario_candidates() -> Vec<Candidate> {
        vec![
            create_candidate("1", "dog", Status::Active, Behavior::Injured, 13.76, 100.50, "ขาเจ็บ"),
            create_candidate("2", "cat", Status::Rescued, Behavior::Friendly, 13.80, 100.55, "ขนฟู"),
        ]
    }

    #[test]
    fn test_search_end_to_end() {
        let engine = RankingEngine::default();
        let request = SearchRequest {
            category: Some("dog".to_string()),
            behavior: Some("all".to_string()),
            keyword: Some(String::new()),
            only_active: true,
            lat: Some(13.7563),
            lng: Some(100.5018),
            ..Default::default()
        };

        let result = engine.search(&request, &scenario_candidates());

        assert_eq!(result.total_candidates, 2);
        assert_eq!(result.eliminated, 1);
        assert_eq!(result.ranked.len(), 1);
        assert_eq!(result.ranked[0].id(), "1");
        assert_eq!(result.ranked[0].match_score, 70);
    }

    #[test]
    fn test_score_all_keeps_eliminated() {
        let engine = RankingEngine::default();
        let mut request = SearchRequest::default();
        request.only_active = true;
        let criteria = engine.normalizer().normalize(&request);

        let scored = engine.score_all(&criteria, &scenario_candidates());
        assert_eq!(scored.len(), 2);
        assert!(!scored[0].eliminated);
        assert!(scored[1].eliminated);
        assert_eq!(scored[1].match_score, 0);
    }

    #[test]
    fn test_limit_applies_after_sorting() {
        let engine = RankingEngine::default();
        let candidates = vec![
            create_candidate("far", "dog", Status::Active, Behavior::Friendly, 14.5, 100.5, ""),
            create_candidate("near", "dog", Status::Active, Behavior::Friendly, 13.7563, 100.5018, ""),
        ];
        let request = SearchRequest {
            limit: Some(1),
            ..Default::default()
        };

        let result = engine.search(&request, &candidates);
        assert_eq!(result.ranked.len(), 1);
        assert_eq!(result.ranked[0].id(), "near");
        assert_eq!(result.total_candidates, 2);

        let uncapped = engine.search(&SearchRequest::default(), &candidates);
        assert_eq!(uncapped.ranked[..1], result.ranked[..]);
        assert_eq!(uncapped.eliminated, result.eliminated);
    }

    #[test]
    fn test_empty_snapshot() {
        let engine = RankingEngine::default();
        let result = engine.search(&SearchRequest::default(), &[]);

        assert!(result.ranked.is_empty());
        assert_eq!(result.viewport, engine.fitter().neutral());
    }
}
