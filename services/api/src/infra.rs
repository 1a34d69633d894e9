use metrics_exporter_prometheus::PrometheusHandle;
use rent_navi::advice::AdviceGateway;
use rent_navi::config::AppConfig;
use rent_navi::error::AppError;
use rent_navi::recommendation::{FeatureTag, RecommendationService, StaticCatalog};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Environment configuration with an optional catalog directory override.
pub(crate) fn load_config(catalog_dir: Option<PathBuf>) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(dir) = catalog_dir {
        config.catalog.data_dir = dir;
    }
    Ok(config)
}

/// Load the catalog once and wire the advice gateway from configuration.
pub(crate) fn build_service(
    config: &AppConfig,
) -> Result<Arc<RecommendationService<StaticCatalog>>, AppError> {
    let catalog = StaticCatalog::load_dir(&config.catalog.data_dir)?;
    let advice = AdviceGateway::from_config(&config.advice)?;

    if advice.is_enabled() {
        info!(model = %config.advice.model, "advice provider enabled");
    } else {
        info!("OPENAI_API_KEY not set; advice falls back to static content");
    }

    Ok(Arc::new(RecommendationService::new(
        Arc::new(catalog),
        advice,
    )))
}

/// clap value parser for feature tags; unknown identifiers are kept verbatim.
pub(crate) fn parse_feature(raw: &str) -> Result<FeatureTag, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("feature tag must not be empty".to_string());
    }
    Ok(FeatureTag::parse(trimmed))
}
