mod rules;

use std::cmp::Reverse;

use super::aggregate::AreaCollection;
use super::domain::{dedup_features, FeatureTag, ScoredArea};

/// Points awarded per matched feature under [`MatchPolicy::Weighted`].
pub const FEATURE_WEIGHT: u32 = 10;

/// Filters applied to every candidate area.
#[derive(Debug, Clone, Default)]
pub struct MatchCriteria {
    pub budget_ceiling: u64,
    /// Substring matched against the prefecture name or the area name.
    pub location: Option<String>,
    pub features: Vec<FeatureTag>,
}

impl MatchCriteria {
    pub fn new(budget_ceiling: u64) -> Self {
        Self {
            budget_ceiling,
            ..Self::default()
        }
    }

    pub fn with_location(mut self, location: Option<String>) -> Self {
        self.location = location
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        self
    }

    pub fn with_features(mut self, features: &[FeatureTag]) -> Self {
        self.features = dedup_features(features);
        self
    }
}

/// Area ranking strategy; each orchestrator uses exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Every requested feature is mandatory. Ranked by matched count, then
    /// cheapest rent. Top 5.
    RequireAll,
    /// Partial credit per matched feature, listed rent required. Ranked by
    /// score only. Top 3.
    ///
    /// The rent floor of the computed range is not enforced.
    Weighted,
}

impl MatchPolicy {
    pub fn limit(self) -> usize {
        match self {
            MatchPolicy::RequireAll => 5,
            MatchPolicy::Weighted => 3,
        }
    }

    pub fn rank(self, areas: &AreaCollection, criteria: &MatchCriteria) -> Vec<ScoredArea> {
        let mut scored: Vec<ScoredArea> = match self {
            MatchPolicy::RequireAll => require_all(areas, criteria),
            MatchPolicy::Weighted => weighted(areas, criteria),
        };

        // Stable sorts: ties keep catalog order.
        match self {
            MatchPolicy::RequireAll => {
                scored.sort_by_key(|area| (Reverse(area.score), area.average_rent))
            }
            MatchPolicy::Weighted => scored.sort_by_key(|area| Reverse(area.score)),
        }

        scored.truncate(self.limit());
        scored
    }
}

fn require_all(areas: &AreaCollection, criteria: &MatchCriteria) -> Vec<ScoredArea> {
    areas
        .iter()
        .filter(|candidate| rules::within_ceiling(candidate, criteria.budget_ceiling))
        .filter(|candidate| rules::matches_location(candidate, criteria.location.as_deref()))
        .filter_map(|candidate| {
            let matched = rules::matched_features(&candidate, &criteria.features);
            if matched.len() < criteria.features.len() {
                return None;
            }
            let score = matched.len() as u32;
            Some(ScoredArea::new(
                candidate.prefecture,
                candidate.area,
                score,
                matched,
            ))
        })
        .collect()
}

fn weighted(areas: &AreaCollection, criteria: &MatchCriteria) -> Vec<ScoredArea> {
    areas
        .iter()
        .filter(rules::has_listed_rent)
        .filter(|candidate| rules::within_ceiling(candidate, criteria.budget_ceiling))
        .map(|candidate| {
            let matched = rules::matched_features(&candidate, &criteria.features);
            let score = matched.len() as u32 * FEATURE_WEIGHT;
            ScoredArea::new(candidate.prefecture, candidate.area, score, matched)
        })
        .collect()
}
