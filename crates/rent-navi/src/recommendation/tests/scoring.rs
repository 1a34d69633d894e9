use std::sync::Arc;

use super::common::*;
use crate::recommendation::aggregate::AreaCollection;
use crate::recommendation::domain::FeatureTag;
use crate::recommendation::scoring::{MatchCriteria, MatchPolicy};

fn sample_areas() -> AreaCollection {
    AreaCollection::new(vec![Arc::new(tokyo()), Arc::new(saitama())])
}

#[test]
fn require_all_ceiling_is_inclusive() {
    let areas = AreaCollection::new(vec![Arc::new(region(
        1,
        "edge",
        "境界県",
        vec![area("ちょうど市", 79_062, &[]), area("超過市", 79_063, &[])],
    ))]);

    let ranked = MatchPolicy::RequireAll.rank(&areas, &MatchCriteria::new(79_062));

    assert_eq!(names(&ranked), vec!["ちょうど市"]);
}

#[test]
fn require_all_sorts_by_rent_when_scores_tie() {
    let ranked = MatchPolicy::RequireAll.rank(&sample_areas(), &MatchCriteria::new(79_062));

    assert_eq!(
        names(&ranked),
        vec!["所沢市", "足立区", "板橋区", "川口市", "さいたま市浦和区"]
    );
    assert!(ranked.iter().all(|area| area.score == 0));
}

#[test]
fn require_all_demands_every_requested_feature() {
    let criteria = MatchCriteria::new(100_000)
        .with_features(&[FeatureTag::CostPerformance, FeatureTag::StudentFriendly]);

    let ranked = MatchPolicy::RequireAll.rank(&sample_areas(), &criteria);

    assert_eq!(names(&ranked), vec!["板橋区"]);
    assert_eq!(ranked[0].score, 2);
    assert_eq!(
        ranked[0].matched_features,
        vec![FeatureTag::CostPerformance, FeatureTag::StudentFriendly]
    );
    assert_eq!(ranked[0].features.len(), 3);
}

#[test]
fn require_all_never_returns_partial_matches() {
    let criteria = MatchCriteria::new(500_000)
        .with_features(&[FeatureTag::PetFriendly, FeatureTag::CostPerformance]);

    let ranked = MatchPolicy::RequireAll.rank(&sample_areas(), &criteria);

    assert!(ranked.is_empty());
}

#[test]
fn require_all_location_matches_prefecture_or_area_name() {
    let by_prefecture = MatchPolicy::RequireAll.rank(
        &sample_areas(),
        &MatchCriteria::new(100_000).with_location(Some("埼玉".to_string())),
    );
    assert_eq!(
        names(&by_prefecture),
        vec!["所沢市", "川口市", "さいたま市浦和区"]
    );
    assert!(by_prefecture.iter().all(|area| area.prefecture == "埼玉県"));

    let by_area = MatchPolicy::RequireAll.rank(
        &sample_areas(),
        &MatchCriteria::new(100_000).with_location(Some(" 中野 ".to_string())),
    );
    assert_eq!(names(&by_area), vec!["中野区"]);
}

#[test]
fn require_all_keeps_top_five() {
    let areas = AreaCollection::new(vec![Arc::new(region(
        1,
        "many",
        "多摩県",
        (0..8)
            .map(|index| area(&format!("区{index}"), 50_000 + index * 1_000, &[]))
            .collect(),
    ))]);

    let ranked = MatchPolicy::RequireAll.rank(&areas, &MatchCriteria::new(100_000));

    assert_eq!(ranked.len(), 5);
    assert_eq!(ranked[0].name, "区0");
    assert_eq!(ranked[4].name, "区4");
}

#[test]
fn weighted_excludes_unlisted_rent() {
    let criteria = MatchCriteria::new(90_000).with_features(&[FeatureTag::SportsPark]);

    let ranked = MatchPolicy::Weighted.rank(&sample_areas(), &criteria);

    assert!(ranked.iter().all(|area| area.average_rent > 0));
    assert!(!names(&ranked).contains(&"所沢市"));
}

#[test]
fn weighted_scores_partial_matches_and_keeps_catalog_order_on_ties() {
    let criteria = MatchCriteria::new(90_000)
        .with_features(&[FeatureTag::CostPerformance, FeatureTag::ChildRearing]);

    let ranked = MatchPolicy::Weighted.rank(&sample_areas(), &criteria);

    assert_eq!(names(&ranked), vec!["足立区", "板橋区", "川口市"]);
    assert_eq!(
        ranked.iter().map(|area| area.score).collect::<Vec<_>>(),
        vec![20, 10, 10]
    );
    assert_eq!(ranked[1].matched_features, vec![FeatureTag::CostPerformance]);
}

#[test]
fn weighted_does_not_enforce_a_rent_floor() {
    let areas = AreaCollection::new(vec![Arc::new(region(
        1,
        "cheap",
        "格安県",
        vec![area("激安町", 10_000, &[])],
    ))]);

    let ranked = MatchPolicy::Weighted.rank(&areas, &MatchCriteria::new(90_000));

    assert_eq!(names(&ranked), vec!["激安町"]);
}

#[test]
fn empty_collection_ranks_to_nothing() {
    for policy in [MatchPolicy::RequireAll, MatchPolicy::Weighted] {
        let ranked = policy.rank(&AreaCollection::default(), &MatchCriteria::new(1_000_000));
        assert!(ranked.is_empty());
    }
}

#[test]
fn duplicate_requested_features_count_once() {
    let criteria = MatchCriteria::new(90_000).with_features(&[
        FeatureTag::ChildRearing,
        FeatureTag::ChildRearing,
        FeatureTag::CostPerformance,
    ]);

    let ranked = MatchPolicy::Weighted.rank(&sample_areas(), &criteria);

    assert_eq!(ranked[0].name, "足立区");
    assert_eq!(ranked[0].score, 20);
}
