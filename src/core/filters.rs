use crate::models::{Candidate, Elimination, SearchCriteria};

/// Check the required constraints for a candidate
///
/// This is the hard filter stage: it runs before any scoring and returns the
/// first violated constraint. A candidate that comes back with `Some(_)` is
/// eliminated with a score of zero.
#[inline]
pub fn hard_filter(candidate: &Candidate, criteria: &SearchCriteria) -> Option<Elimination> {
    if !matches_status(candidate, criteria) {
        return Some(Elimination::NotActive);
    }

    if !matches_behavior(candidate, criteria) {
        return Some(Elimination::BehaviorMismatch);
    }

    None
}

/// Only active reports pass when `only_active` is set
#[inline]
pub fn matches_status(candidate: &Candidate, criteria: &SearchCriteria) -> bool {
    !criteria.only_active || candidate.is_active()
}

#[inline]
pub fn matches_behavior(candidate: &Candidate, criteria: &SearchCriteria) -> bool {
    criteria.behavior.accepts(&candidate.behavior)
}

/// Category check. Evaluated by the scoring stage, but a mismatch eliminates just like
/// the hard filters do.
#[inline]
pub fn matches_category(candidate: &Candidate, criteria: &SearchCriteria) -> bool {
    criteria.category.accepts(&candidate.category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::criteria::fallback_origin;
    use crate::models::{Behavior, Category, Filter, KnownCategory, Status};

    fn create_test_candidate(status: Status, behavior: Behavior) -> Candidate {
        Candidate {
            id: "r1".to_string(),
            category: Category::Known(KnownCategory::Dog),
            behavior,
            status,
            latitude: Some(13.76),
            longitude: Some(100.50),
            description: None,
            created_at: None,
            reporter_name: "Somchai".to_string(),
            image_url: None,
        }
    }

    fn create_test_criteria() -> SearchCriteria {
        SearchCriteria {
            category: Filter::All,
            behavior: Filter::All,
            keywords: vec![],
            only_active: false,
            origin: fallback_origin(),
        }
    }

    #[test]
    fn test_no_filters_pass_everything() {
        let criteria = create_test_criteria();
        for status in [Status::Active, Status::Rescued, Status::Moved, Status::Other] {
            let candidate = create_test_candidate(status, Behavior::Other);
            assert_eq!(hard_filter(&candidate, &criteria), None);
        }
    }

    #[test]
    fn test_only_active_eliminates_closed_reports() {
        let mut criteria = create_test_criteria();
        criteria.only_active = true;

        let rescued = create_test_candidate(Status::Rescued, Behavior::Friendly);
        assert_eq!(hard_filter(&rescued, &criteria), Some(Elimination::NotActive));

        let active = create_test_candidate(Status::Active, Behavior::Friendly);
        assert_eq!(hard_filter(&active, &criteria), None);
    }

    #[test]
    fn test_behavior_mismatch() {
        let mut criteria = create_test_criteria();
        criteria.behavior = Filter::Only(Behavior::Injured);

        let friendly = create_test_candidate(Status::Active, Behavior::Friendly);
        assert_eq!(hard_filter(&friendly, &criteria), Some(Elimination::BehaviorMismatch));

        let injured = create_test_candidate(Status::Active, Behavior::Injured);
        assert_eq!(hard_filter(&injured, &criteria), None);
    }

    #[test]
    fn test_status_checked_before_behavior() {
        let mut criteria = create_test_criteria();
        criteria.only_active = true;
        criteria.behavior = Filter::Only(Behavior::Injured);

        let candidate = create_test_candidate(Status::Moved, Behavior::Friendly);
        assert_eq!(hard_filter(&candidate, &criteria), Some(Elimination::NotActive));
    }

    #[test]
    fn test_category_match() {
        let mut criteria = create_test_criteria();
        let candidate = create_test_candidate(Status::Active, Behavior::Friendly);
        assert!(matches_category(&candidate, &criteria));

        criteria.category = Filter::Only(Category::Known(KnownCategory::Cat));
        assert!(!matches_category(&candidate, &criteria));

        criteria.category = Filter::Only(Category::Custom("dog".to_string()));
        assert!(!matches_category(&candidate, &criteria));
    }
}
