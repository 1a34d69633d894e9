//! JSON bodies of the recommendation endpoints.
//!
//! Browsers post form values, so numeric fields also accept numeric strings and
//! `isStudent` accepts either a boolean or the string `"true"`.

use serde::{Deserialize, Deserializer, Serialize};

use super::domain::{FeatureTag, IncomeGap, RentRange, ScoredArea};
use crate::advice::{AreaAdvice, SalaryAnalysis};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default, deserialize_with = "deserialize_loose_number")]
    pub salary: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_loose_number")]
    pub family_size: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub features: Vec<FeatureTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub recommended_rent: RentRange,
    pub affordable_areas: Vec<ScoredArea>,
    pub income_gap: IncomeGap,
    pub chart_data: ChartData,
}

/// Bar chart series: min, ideal, max and 30% of the raw salary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
}

impl ChartData {
    pub fn rent_comparison(range: &RentRange, salary: f64) -> Self {
        Self {
            labels: ["最低", "推奨", "最高", "現在の給与"]
                .into_iter()
                .map(String::from)
                .collect(),
            datasets: vec![ChartDataset {
                label: "家賃(円)".to_string(),
                data: vec![
                    range.min as f64,
                    range.ideal as f64,
                    range.max as f64,
                    salary * 0.3,
                ],
            }],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerRequest {
    #[serde(default, deserialize_with = "deserialize_loose_number")]
    pub salary: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_loose_number")]
    pub budget: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_loose_number")]
    pub family_size: Option<f64>,
    #[serde(default)]
    pub prefectures: Vec<String>,
    #[serde(default)]
    pub features: Vec<FeatureTag>,
    #[serde(default, deserialize_with = "deserialize_student_flag")]
    pub is_student: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerResponse {
    pub rent_range: RentRange,
    pub top_areas: Vec<ScoredArea>,
    /// Always `null`; commentary is fetched through the advice endpoint.
    pub ai_advice: Option<AreaAdvice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaAdviceRequest {
    #[serde(default)]
    pub top_areas: Vec<ScoredArea>,
    #[serde(default)]
    pub features: Vec<FeatureTag>,
    #[serde(default, deserialize_with = "deserialize_student_flag")]
    pub is_student: bool,
    /// Band returned by the planner; its ceiling personalises the static summary.
    #[serde(default)]
    pub rent_range: Option<RentRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaAdviceResponse {
    pub ai_advice: Option<AreaAdvice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryAnalysisRequest {
    #[serde(default, deserialize_with = "deserialize_loose_number")]
    pub salary: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_loose_number")]
    pub budget: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_student_flag")]
    pub is_student: bool,
    #[serde(default, deserialize_with = "deserialize_loose_number")]
    pub recommended_rent: Option<f64>,
    #[serde(default)]
    pub areas: Vec<String>,
}

pub type SalaryAnalysisResponse = SalaryAnalysis;

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Text(String),
}

/// Numbers or numeric strings; unparseable strings are treated as absent.
fn deserialize_loose_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<LooseNumber>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        LooseNumber::Number(number) => Some(number),
        LooseNumber::Text(text) => text.trim().parse::<f64>().ok(),
    }))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseFlag {
    Bool(bool),
    Text(String),
}

fn deserialize_student_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<LooseFlag>::deserialize(deserializer)?;
    Ok(match raw {
        Some(LooseFlag::Bool(flag)) => flag,
        Some(LooseFlag::Text(text)) => text == "true",
        None => false,
    })
}
