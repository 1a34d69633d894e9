use super::{AnalysisInput, AreaAdvice, SalaryAnalysis};

const AREA1_COMMENT: &str =
    "家賃相場が手頃で、生活利便施設も整っています。初めての一人暮らしにもおすすめのエリアです。";
const AREA2_COMMENT: &str =
    "交通アクセスが良好で、通勤・通学に便利です。周辺環境も落ち着いており、快適に暮らせます。";
const AREA3_COMMENT: &str =
    "自然豊かで治安も良く、静かな環境を好む方に最適です。休日は近所の公園でリフレッシュできます。";
const SUMMARY_TAIL: &str = "ご希望の条件を満たすエリアを厳選しました。いずれも住みやすさには定評があり、ライフスタイルに合わせて比較検討してみてください。";

const TIP_FIXED_COSTS: &str = "固定費を見直して貯蓄を増やしましょう";
const TIP_INCOME: &str = "副業やスキルアップで収入アップを目指しましょう";
const TIP_NEGOTIATE: &str = "家賃交渉で月々の支出を抑えることも検討してください";

const ANALYSIS_UNAVAILABLE: &str = "AI分析は現在利用できません。基本的な分析結果をご確認ください。";

/// Static area comments; the summary names the budget ceiling when it is known.
pub(super) fn area_advice(budget_ceiling: Option<u64>) -> AreaAdvice {
    let summary = match budget_ceiling {
        Some(ceiling) => format!("予算{}万円以内で、{}", man_yen(ceiling), SUMMARY_TAIL),
        None => SUMMARY_TAIL.to_string(),
    };

    AreaAdvice {
        area1_comment: AREA1_COMMENT.to_string(),
        area2_comment: AREA2_COMMENT.to_string(),
        area3_comment: AREA3_COMMENT.to_string(),
        summary,
    }
}

/// Offline analysis used when no provider is configured.
pub(super) fn offline_analysis(input: &AnalysisInput) -> SalaryAnalysis {
    let income = if input.is_student {
        format!("予算{}円", grouped(input.budget.unwrap_or_default()))
    } else {
        format!("月収{}円", grouped(input.salary.unwrap_or_default()))
    };

    SalaryAnalysis {
        analysis: format!(
            "{income}の場合、推奨家賃は{}円です。{}などのエリアがおすすめです。",
            grouped(input.recommended_rent as f64),
            input.areas.join("、")
        ),
        tips: default_tips(),
    }
}

/// Analysis used after the provider failed.
pub(super) fn unavailable_analysis() -> SalaryAnalysis {
    SalaryAnalysis {
        analysis: ANALYSIS_UNAVAILABLE.to_string(),
        tips: vec![TIP_FIXED_COSTS.to_string(), TIP_INCOME.to_string()],
    }
}

pub(super) fn default_tips() -> Vec<String> {
    vec![
        TIP_FIXED_COSTS.to_string(),
        TIP_INCOME.to_string(),
        TIP_NEGOTIATE.to_string(),
    ]
}

/// Yen expressed in units of 10,000 with one decimal, e.g. `79062` → `7.9`.
pub(crate) fn man_yen(yen: u64) -> String {
    format!("{:.1}", yen as f64 / 10_000.0)
}

/// Thousands-separated integer part, e.g. `250000` → `250,000`.
pub(crate) fn grouped(value: f64) -> String {
    let digits = (value.max(0.0).round() as u64).to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
