use super::aggregate::AreaCollection;
use super::domain::IncomeGap;

/// Benchmark area used when the caller names none.
pub const DEFAULT_TARGET_AREA: &str = "港区";

/// Average rent assumed when the target area is missing from the catalog.
pub const DEFAULT_TARGET_RENT: u64 = 317_000;

/// Income needed to rent in `target_area` at the 27.5% affordability ratio.
///
/// The first area whose name equals `target_area` wins, in catalog order. When the
/// same name exists in several prefectures the earliest prefecture decides.
pub fn income_gap(areas: &AreaCollection, current_income: f64, target_area: &str) -> IncomeGap {
    let target_rent = areas
        .iter()
        .find(|candidate| candidate.area.name == target_area)
        .map(|candidate| candidate.area.average_rent)
        .unwrap_or(DEFAULT_TARGET_RENT);

    let required_income = required_income(target_rent);
    let gap = (required_income as f64 - current_income).max(0.0).ceil() as u64;

    IncomeGap {
        target_area: target_area.to_string(),
        required_income,
        gap,
    }
}

/// `ceil(rent / 0.275)`, computed exactly as `ceil(rent * 40 / 11)`.
pub fn required_income(rent: u64) -> u64 {
    (rent * 40).div_ceil(11)
}
