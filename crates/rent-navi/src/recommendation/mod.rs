//! Rent band computation, area matching and the two request flows built on them.
//!
//! The quick-analyze flow pairs a family-adjusted rent band with a strict feature
//! filter and an income-gap benchmark. The planner flow uses a flat band (or the
//! caller's own budget) with weighted feature scoring, and fetches commentary in a
//! separate call.

pub mod aggregate;
pub mod catalog;
pub mod domain;
pub mod income_gap;
pub mod rent;
pub mod router;
pub mod scoring;
pub mod service;
pub mod wire;

#[cfg(test)]
mod tests;

pub use aggregate::{collect_areas, AreaCollection, RegionalArea};
pub use catalog::{AreaCatalog, CatalogError, StaticCatalog, PREFECTURE_LABELS};
pub use domain::{
    AreaRecord, FeatureTag, IncomeGap, RegionRecord, RegionSummary, RentRange, ScoredArea,
};
pub use income_gap::{income_gap, required_income, DEFAULT_TARGET_AREA, DEFAULT_TARGET_RENT};
pub use rent::{RentPolicy, ValidationError, AFFORDABILITY_RATIO};
pub use router::recommendation_router;
pub use scoring::{MatchCriteria, MatchPolicy, FEATURE_WEIGHT};
pub use service::{RecommendationError, RecommendationService};
pub use wire::{
    AnalyzeRequest, AnalyzeResponse, AreaAdviceRequest, AreaAdviceResponse, ChartData,
    ChartDataset, PlannerRequest, PlannerResponse, SalaryAnalysisRequest, SalaryAnalysisResponse,
};
