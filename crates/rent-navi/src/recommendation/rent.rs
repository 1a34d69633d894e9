use super::domain::RentRange;

/// Share of monthly take-home pay treated as the affordable rent benchmark.
pub const AFFORDABILITY_RATIO: f64 = 0.275;

const FAMILY_MEMBER_ALLOWANCE: f64 = 0.05;
const BAND_LOWER: f64 = 0.85;
const BAND_UPPER: f64 = 1.15;

const FLAT_MIN_RATIO: f64 = 0.20;
const FLAT_IDEAL_RATIO: f64 = 0.25;
const FLAT_MAX_RATIO: f64 = 0.30;

const BUDGET_MARGIN: u64 = 5_000;

/// Rejected primary input; the message is shown to end users as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("正しい給与額を入力してください")]
    InvalidSalary,
    #[error("正しい予算を入力してください")]
    InvalidBudget,
}

/// How a rent band is derived from the caller's income or budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentPolicy {
    /// 27.5% of salary, +5% per additional household member, ±15% band.
    FamilyAdjusted { family_size: u32 },
    /// 20% / 25% / 30% of salary.
    FlatBand,
    /// The caller's budget ±5,000 yen.
    DirectBudget,
}

impl RentPolicy {
    pub fn compute(self, amount: Option<f64>) -> Result<RentRange, ValidationError> {
        let amount = amount
            .filter(|value| value.is_finite() && *value > 0.0)
            .ok_or(match self {
                RentPolicy::DirectBudget => ValidationError::InvalidBudget,
                _ => ValidationError::InvalidSalary,
            })?;

        let range = match self {
            RentPolicy::FamilyAdjusted { family_size } => family_adjusted(amount, family_size),
            RentPolicy::FlatBand => flat_band(amount),
            RentPolicy::DirectBudget => direct_budget(amount),
        };
        Ok(range)
    }
}

fn yen(value: f64) -> u64 {
    value.floor() as u64
}

fn family_adjusted(salary: f64, family_size: u32) -> RentRange {
    let extra_members = f64::from(family_size.max(1) - 1);
    let ideal = yen(salary * AFFORDABILITY_RATIO * (1.0 + extra_members * FAMILY_MEMBER_ALLOWANCE));

    RentRange {
        min: yen(ideal as f64 * BAND_LOWER),
        ideal,
        max: yen(ideal as f64 * BAND_UPPER),
    }
}

fn flat_band(salary: f64) -> RentRange {
    RentRange {
        min: yen(salary * FLAT_MIN_RATIO),
        ideal: yen(salary * FLAT_IDEAL_RATIO),
        max: yen(salary * FLAT_MAX_RATIO),
    }
}

fn direct_budget(budget: f64) -> RentRange {
    let ideal = yen(budget);
    RentRange {
        min: ideal.saturating_sub(BUDGET_MARGIN),
        ideal,
        max: ideal.saturating_add(BUDGET_MARGIN),
    }
}
