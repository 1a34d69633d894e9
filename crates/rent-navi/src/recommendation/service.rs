use std::sync::Arc;

use tracing::{debug, info, warn};

use super::aggregate::{collect_areas, AreaCollection};
use super::catalog::{AreaCatalog, CatalogError};
use super::domain::{RegionSummary, RentRange};
use super::income_gap::{income_gap, DEFAULT_TARGET_AREA};
use super::rent::{RentPolicy, ValidationError};
use super::scoring::{MatchCriteria, MatchPolicy};
use super::wire::{
    AnalyzeRequest, AnalyzeResponse, AreaAdviceRequest, AreaAdviceResponse, ChartData,
    PlannerRequest, PlannerResponse, SalaryAnalysisRequest, SalaryAnalysisResponse,
};
use crate::advice::{AdviceGateway, AdviceTone, AnalysisInput};

/// Orchestrates the quick-analyze and planner flows over a shared catalog.
pub struct RecommendationService<C> {
    catalog: Arc<C>,
    advice: AdviceGateway,
}

#[derive(Debug, thiserror::Error)]
pub enum RecommendationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("catalog failure: {0}")]
    Catalog(#[from] CatalogError),
}

impl<C> RecommendationService<C>
where
    C: AreaCatalog + 'static,
{
    pub fn new(catalog: Arc<C>, advice: AdviceGateway) -> Self {
        Self { catalog, advice }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn advice_enabled(&self) -> bool {
        self.advice.is_enabled()
    }

    /// Quick analysis: family-adjusted band, strict feature filter, income gap.
    ///
    /// The area list and the income-gap lookup aggregate the catalog
    /// independently; a failure in either degrades only its own part.
    pub async fn analyze(
        &self,
        request: AnalyzeRequest,
    ) -> Result<AnalyzeResponse, RecommendationError> {
        let family_size = household_size(request.family_size);
        let recommended_rent = RentPolicy::FamilyAdjusted { family_size }.compute(request.salary)?;
        let salary = request.salary.unwrap_or_default();

        let location = request
            .location
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);
        let target_area = location
            .clone()
            .unwrap_or_else(|| DEFAULT_TARGET_AREA.to_string());

        let criteria = MatchCriteria::new(recommended_rent.max)
            .with_location(location)
            .with_features(&request.features);

        let (area_pool, gap_pool) = tokio::join!(
            collect_areas(self.catalog.as_ref(), &[]),
            collect_areas(self.catalog.as_ref(), &[]),
        );
        let area_pool = degrade_to_empty(area_pool, "area ranking");
        let gap_pool = degrade_to_empty(gap_pool, "income gap lookup");

        let affordable_areas = MatchPolicy::RequireAll.rank(&area_pool, &criteria);
        let income_gap = income_gap(&gap_pool, salary, &target_area);

        info!(
            salary,
            family_size,
            ceiling = recommended_rent.max,
            matches = affordable_areas.len(),
            gap = income_gap.gap,
            "quick analysis complete"
        );

        Ok(AnalyzeResponse {
            chart_data: ChartData::rent_comparison(&recommended_rent, salary),
            recommended_rent,
            affordable_areas,
            income_gap,
        })
    }

    /// Planner: flat band or direct budget, weighted ranking over the chosen prefectures.
    ///
    /// Advice is never generated here; see [`Self::area_advice`].
    pub async fn plan(
        &self,
        request: PlannerRequest,
    ) -> Result<PlannerResponse, RecommendationError> {
        let rent_range = planner_range(&request)?;

        let criteria = MatchCriteria::new(rent_range.max).with_features(&request.features);
        let areas = collect_areas(self.catalog.as_ref(), &request.prefectures).await?;
        let top_areas = MatchPolicy::Weighted.rank(&areas, &criteria);

        info!(
            student = request.is_student,
            prefectures = request.prefectures.len(),
            candidates = areas.len(),
            ceiling = rent_range.max,
            matches = top_areas.len(),
            "planner ranking complete"
        );

        Ok(PlannerResponse {
            rent_range,
            top_areas,
            ai_advice: None,
        })
    }

    /// Commentary for planner results; an empty area list yields no advice.
    pub async fn area_advice(&self, request: AreaAdviceRequest) -> AreaAdviceResponse {
        if request.top_areas.is_empty() {
            debug!("no ranked areas supplied; skipping area advice");
            return AreaAdviceResponse { ai_advice: None };
        }

        let tone = AdviceTone::from_student_flag(request.is_student);
        let ceiling = request.rent_range.map(|range| range.max);
        let advice = self
            .advice
            .area_advice(&request.top_areas, &request.features, tone, ceiling)
            .await;

        AreaAdviceResponse {
            ai_advice: Some(advice),
        }
    }

    /// Income/rent analysis for the quick-analyze result page.
    pub async fn salary_analysis(&self, request: SalaryAnalysisRequest) -> SalaryAnalysisResponse {
        let recommended_rent = request
            .recommended_rent
            .filter(|rent| rent.is_finite() && *rent > 0.0)
            .map(|rent| rent.floor() as u64)
            .unwrap_or_default();

        let input = AnalysisInput {
            salary: request.salary,
            budget: request.budget,
            is_student: request.is_student,
            recommended_rent,
            areas: request.areas,
        };
        self.advice.salary_analysis(&input).await
    }

    /// Lightweight prefecture index for region pickers.
    pub async fn prefectures(&self) -> Result<Vec<RegionSummary>, RecommendationError> {
        Ok(self.catalog.regions().await?)
    }
}

fn planner_range(request: &PlannerRequest) -> Result<RentRange, ValidationError> {
    if request.is_student {
        RentPolicy::DirectBudget.compute(request.budget)
    } else {
        RentPolicy::FlatBand.compute(request.salary)
    }
}

/// Household size rounded down; absent, non-numeric or below one counts as one.
fn household_size(raw: Option<f64>) -> u32 {
    raw.filter(|value| value.is_finite() && *value >= 1.0)
        .map(|value| value.min(f64::from(u32::MAX)).floor() as u32)
        .unwrap_or(1)
}

fn degrade_to_empty(
    outcome: Result<AreaCollection, CatalogError>,
    purpose: &'static str,
) -> AreaCollection {
    outcome.unwrap_or_else(|error| {
        warn!(%error, purpose, "catalog aggregation failed; continuing without areas");
        AreaCollection::default()
    })
}
