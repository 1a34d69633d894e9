use super::super::aggregate::RegionalArea;
use super::super::domain::FeatureTag;

pub(crate) fn within_ceiling(candidate: &RegionalArea<'_>, ceiling: u64) -> bool {
    candidate.area.average_rent <= ceiling
}

/// Zero rent marks missing data in the catalog.
pub(crate) fn has_listed_rent(candidate: &RegionalArea<'_>) -> bool {
    candidate.area.average_rent > 0
}

pub(crate) fn matches_location(candidate: &RegionalArea<'_>, location: Option<&str>) -> bool {
    match location {
        Some(text) => candidate.prefecture.contains(text) || candidate.area.name.contains(text),
        None => true,
    }
}

/// Requested tags present on the area, in request order.
pub(crate) fn matched_features(
    candidate: &RegionalArea<'_>,
    requested: &[FeatureTag],
) -> Vec<FeatureTag> {
    requested
        .iter()
        .filter(|tag| candidate.area.has_feature(tag))
        .cloned()
        .collect()
}
