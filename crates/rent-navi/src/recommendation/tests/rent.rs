use crate::recommendation::domain::RentRange;
use crate::recommendation::rent::{RentPolicy, ValidationError};

#[test]
fn family_adjusted_band_for_single_household() {
    let range = RentPolicy::FamilyAdjusted { family_size: 1 }
        .compute(Some(250_000.0))
        .expect("valid salary");
    assert_eq!(
        range,
        RentRange {
            min: 58_437,
            ideal: 68_750,
            max: 79_062,
        }
    );
}

#[test]
fn family_adjusted_ideal_grows_with_household() {
    let mut previous = 0;
    for family_size in 1..=6 {
        let range = RentPolicy::FamilyAdjusted { family_size }
            .compute(Some(320_000.0))
            .expect("valid salary");
        assert!(range.min <= range.ideal && range.ideal <= range.max);
        assert!(range.ideal > previous, "family size {family_size}");
        previous = range.ideal;
    }
}

#[test]
fn family_size_zero_is_treated_as_one() {
    let zero = RentPolicy::FamilyAdjusted { family_size: 0 }.compute(Some(250_000.0));
    let one = RentPolicy::FamilyAdjusted { family_size: 1 }.compute(Some(250_000.0));
    assert_eq!(zero, one);
}

#[test]
fn flat_band_uses_fixed_ratios() {
    let range = RentPolicy::FlatBand
        .compute(Some(300_000.0))
        .expect("valid salary");
    assert_eq!(
        range,
        RentRange {
            min: 60_000,
            ideal: 75_000,
            max: 90_000,
        }
    );
}

#[test]
fn direct_budget_brackets_the_budget() {
    let range = RentPolicy::DirectBudget
        .compute(Some(60_000.0))
        .expect("valid budget");
    assert_eq!(
        range,
        RentRange {
            min: 55_000,
            ideal: 60_000,
            max: 65_000,
        }
    );
}

#[test]
fn direct_budget_floor_never_goes_negative() {
    let range = RentPolicy::DirectBudget
        .compute(Some(3_000.0))
        .expect("valid budget");
    assert_eq!(range.min, 0);
    assert_eq!(range.ideal, 3_000);
    assert_eq!(range.max, 8_000);
}

#[test]
fn direct_budget_spread_is_ten_thousand_above_the_margin() {
    for budget in [5_000.0, 42_000.0, 120_000.0] {
        let range = RentPolicy::DirectBudget
            .compute(Some(budget))
            .expect("valid budget");
        assert_eq!(range.ideal as f64, budget);
        assert_eq!(range.max - range.min, 10_000);
    }
}

#[test]
fn missing_or_non_positive_amounts_are_rejected() {
    for amount in [None, Some(0.0), Some(-1.0), Some(f64::NAN), Some(f64::INFINITY)] {
        assert_eq!(
            RentPolicy::FlatBand.compute(amount),
            Err(ValidationError::InvalidSalary)
        );
        assert_eq!(
            RentPolicy::FamilyAdjusted { family_size: 2 }.compute(amount),
            Err(ValidationError::InvalidSalary)
        );
        assert_eq!(
            RentPolicy::DirectBudget.compute(amount),
            Err(ValidationError::InvalidBudget)
        );
    }
}

#[test]
fn validation_messages_are_user_facing() {
    assert_eq!(
        ValidationError::InvalidSalary.to_string(),
        "正しい給与額を入力してください"
    );
    assert_eq!(
        ValidationError::InvalidBudget.to_string(),
        "正しい予算を入力してください"
    );
}

#[test]
fn oversized_budget_keeps_the_band_ordered() {
    let range = RentPolicy::DirectBudget
        .compute(Some(1e20))
        .expect("positive budget");

    assert_eq!(range.ideal, u64::MAX);
    assert_eq!(range.max, u64::MAX);
    assert_eq!(range.min, u64::MAX - 5_000);
    assert!(range.min <= range.ideal && range.ideal <= range.max);
}

#[test]
fn oversized_salary_keeps_the_band_ordered() {
    let range = RentPolicy::FamilyAdjusted {
        family_size: u32::MAX,
    }
    .compute(Some(1e15))
    .expect("positive salary");

    assert!(range.min <= range.ideal && range.ideal <= range.max);
}
