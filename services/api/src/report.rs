use crate::infra::{build_service, load_config, parse_feature};
use clap::Args;
use rent_navi::advice::{AreaAdvice, SalaryAnalysis};
use rent_navi::error::AppError;
use rent_navi::recommendation::{
    AnalyzeRequest, AnalyzeResponse, AreaAdviceRequest, FeatureTag, PlannerRequest,
    PlannerResponse, SalaryAnalysisRequest, ScoredArea,
};
use rent_navi::telemetry::{self, LogSink};
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Monthly take-home salary in yen
    #[arg(long)]
    pub(crate) salary: f64,
    /// Household size (defaults to 1)
    #[arg(long)]
    pub(crate) family_size: Option<u32>,
    /// Prefecture or area name filter; also the income-gap benchmark area
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Required feature tag (repeatable), e.g. --feature pet_friendly
    #[arg(long, value_parser = parse_feature)]
    pub(crate) feature: Vec<FeatureTag>,
    /// Also print the income/rent analysis with saving tips
    #[arg(long)]
    pub(crate) advice: bool,
    /// Print the raw JSON response instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
    /// Override the directory holding prefectures.json and details/
    #[arg(long)]
    pub(crate) catalog_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct PlanArgs {
    /// Monthly take-home salary in yen
    #[arg(long)]
    pub(crate) salary: Option<f64>,
    /// Monthly rent budget in yen (used with --student)
    #[arg(long)]
    pub(crate) budget: Option<f64>,
    /// Student / first-time renter mode: plan directly from --budget
    #[arg(long)]
    pub(crate) student: bool,
    /// Prefecture slug to search (repeatable); all prefectures when omitted
    #[arg(long)]
    pub(crate) prefecture: Vec<String>,
    /// Preferred feature tag (repeatable)
    #[arg(long, value_parser = parse_feature)]
    pub(crate) feature: Vec<FeatureTag>,
    /// Request area commentary for the ranked results
    #[arg(long)]
    pub(crate) advice: bool,
    /// Print the raw JSON response instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
    /// Override the directory holding prefectures.json and details/
    #[arg(long)]
    pub(crate) catalog_dir: Option<PathBuf>,
}

pub(crate) async fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        salary,
        family_size,
        location,
        feature,
        advice,
        json,
        catalog_dir,
    } = args;

    let config = load_config(catalog_dir)?;
    telemetry::init(&config.telemetry, LogSink::Stderr)?;
    let service = build_service(&config)?;

    let response = service
        .analyze(AnalyzeRequest {
            salary: Some(salary),
            family_size: family_size.map(f64::from),
            location,
            features: feature,
        })
        .await?;

    let analysis = if advice {
        let request = SalaryAnalysisRequest {
            salary: Some(salary),
            budget: None,
            is_student: false,
            recommended_rent: Some(response.recommended_rent.ideal as f64),
            areas: response
                .affordable_areas
                .iter()
                .map(|area| area.name.clone())
                .collect(),
        };
        Some(service.salary_analysis(request).await)
    } else {
        None
    };

    if json {
        print_json(&response)?;
        if let Some(analysis) = &analysis {
            print_json(analysis)?;
        }
    } else {
        print!("{}", render_analysis(&response, family_size.unwrap_or(1)));
        if let Some(analysis) = &analysis {
            print!("{}", render_salary_analysis(analysis));
        }
    }

    Ok(())
}

pub(crate) async fn run_plan(args: PlanArgs) -> Result<(), AppError> {
    let PlanArgs {
        salary,
        budget,
        student,
        prefecture,
        feature,
        advice,
        json,
        catalog_dir,
    } = args;

    let config = load_config(catalog_dir)?;
    telemetry::init(&config.telemetry, LogSink::Stderr)?;
    let service = build_service(&config)?;

    let response = service
        .plan(PlannerRequest {
            salary,
            budget,
            family_size: None,
            prefectures: prefecture,
            features: feature.clone(),
            is_student: student,
        })
        .await?;

    let area_advice = if advice {
        service
            .area_advice(AreaAdviceRequest {
                top_areas: response.top_areas.clone(),
                features: feature,
                is_student: student,
                rent_range: Some(response.rent_range),
            })
            .await
            .ai_advice
    } else {
        None
    };

    if json {
        let mut response = response;
        response.ai_advice = area_advice;
        print_json(&response)?;
    } else {
        print!("{}", render_plan(&response, student));
        if let Some(area_advice) = &area_advice {
            print!("{}", render_area_advice(area_advice));
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn render_analysis(response: &AnalyzeResponse, family_size: u32) -> String {
    let range = &response.recommended_rent;
    let mut out = String::new();
    let _ = writeln!(out, "Quick analysis (household of {})", family_size.max(1));
    let _ = writeln!(
        out,
        "Recommended rent: {} yen (range {} - {} yen)",
        yen(range.ideal),
        yen(range.min),
        yen(range.max)
    );

    render_areas(&mut out, "Affordable areas", &response.affordable_areas);

    let gap = &response.income_gap;
    if gap.gap == 0 {
        let _ = writeln!(
            out,
            "\nIncome gap: current income already covers {} (requires {} yen)",
            gap.target_area,
            yen(gap.required_income)
        );
    } else {
        let _ = writeln!(
            out,
            "\nIncome gap: {} requires {} yen per month, {} yen more than today",
            gap.target_area,
            yen(gap.required_income),
            yen(gap.gap)
        );
    }
    out
}

pub(crate) fn render_plan(response: &PlannerResponse, student: bool) -> String {
    let range = &response.rent_range;
    let mut out = String::new();
    let mode = if student { "student budget" } else { "salary" };
    let _ = writeln!(out, "Rental planner ({mode})");
    let _ = writeln!(
        out,
        "Rent range: {} - {} yen (ideal {} yen)",
        yen(range.min),
        yen(range.max),
        yen(range.ideal)
    );
    render_areas(&mut out, "Top areas", &response.top_areas);
    out
}

fn render_areas(out: &mut String, heading: &str, areas: &[ScoredArea]) {
    if areas.is_empty() {
        let _ = writeln!(out, "\n{heading}: none within budget");
        return;
    }

    let _ = writeln!(out, "\n{heading}");
    for (index, area) in areas.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} ({}) {} yen | {} | score {}",
            index + 1,
            area.name,
            area.prefecture,
            yen(area.average_rent),
            area.distance,
            area.score
        );
        if !area.matched_features.is_empty() {
            let labels: Vec<&str> = area.matched_features.iter().map(FeatureTag::label).collect();
            let _ = writeln!(out, "   matched: {}", labels.join(", "));
        }
    }
}

fn render_area_advice(advice: &AreaAdvice) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nArea commentary");
    for (index, comment) in [
        &advice.area1_comment,
        &advice.area2_comment,
        &advice.area3_comment,
    ]
    .into_iter()
    .enumerate()
    {
        let _ = writeln!(out, "{}. {}", index + 1, comment);
    }
    let _ = writeln!(out, "Summary: {}", advice.summary);
    out
}

fn render_salary_analysis(analysis: &SalaryAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nAnalysis\n{}", analysis.analysis);
    for tip in &analysis.tips {
        let _ = writeln!(out, "- {}", tip.trim_start_matches(['-', '•', ' ']));
    }
    out
}

fn yen(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
