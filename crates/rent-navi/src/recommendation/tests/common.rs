use std::collections::BTreeSet;
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::advice::{AdviceError, AdviceGateway, AdviceProvider, CompletionRequest};
use crate::recommendation::catalog::{AreaCatalog, CatalogError, StaticCatalog};
use crate::recommendation::domain::{AreaRecord, FeatureTag, RegionRecord, RegionSummary};
use crate::recommendation::service::RecommendationService;

pub(super) fn area(name: &str, rent: u64, features: &[FeatureTag]) -> AreaRecord {
    AreaRecord {
        name: name.to_string(),
        average_rent: rent,
        min_rent: None,
        max_rent: None,
        latitude: 35.68,
        longitude: 139.76,
        nearest_station: format!("{name}駅"),
        distance_to_station: 5,
        description: format!("{name}の紹介"),
        features: features.iter().cloned().collect::<BTreeSet<_>>(),
    }
}

pub(super) fn region(id: u32, slug: &str, name: &str, areas: Vec<AreaRecord>) -> RegionRecord {
    RegionRecord {
        id,
        name: name.to_string(),
        slug: slug.to_string(),
        region: "関東".to_string(),
        average_rent: 80_000,
        latitude: 35.68,
        longitude: 139.76,
        population: None,
        description: String::new(),
        areas,
    }
}

pub(super) fn tokyo() -> RegionRecord {
    region(
        13,
        "tokyo",
        "東京都",
        vec![
            area("港区", 275_000, &[FeatureTag::AccessGood, FeatureTag::SafeArea]),
            area(
                "中野区",
                98_000,
                &[
                    FeatureTag::ShoppingConvenient,
                    FeatureTag::SingleFriendly,
                    FeatureTag::StudentFriendly,
                ],
            ),
            area(
                "板橋区",
                72_000,
                &[
                    FeatureTag::CostPerformance,
                    FeatureTag::StudentFriendly,
                    FeatureTag::ShoppingConvenient,
                ],
            ),
            area(
                "足立区",
                65_000,
                &[FeatureTag::CostPerformance, FeatureTag::ChildRearing],
            ),
        ],
    )
}

pub(super) fn saitama() -> RegionRecord {
    region(
        11,
        "saitama",
        "埼玉県",
        vec![
            area(
                "川口市",
                72_000,
                &[FeatureTag::AccessGood, FeatureTag::CostPerformance],
            ),
            area(
                "さいたま市浦和区",
                78_000,
                &[FeatureTag::SafeArea, FeatureTag::ChildRearing],
            ),
            area("所沢市", 0, &[FeatureTag::SportsPark]),
        ],
    )
}

/// Tokyo and Saitama with full detail; Kanagawa is indexed but has no detail record.
pub(super) fn sample_catalog() -> StaticCatalog {
    let kanagawa = region(14, "kanagawa", "神奈川県", Vec::new()).summary();
    let index = vec![tokyo().summary(), kanagawa, saitama().summary()];
    StaticCatalog::with_index(index, vec![tokyo(), saitama()])
}

pub(super) fn sample_service() -> RecommendationService<StaticCatalog> {
    RecommendationService::new(Arc::new(sample_catalog()), AdviceGateway::disabled())
}

pub(super) fn service_with<C: AreaCatalog + 'static>(
    catalog: C,
    advice: AdviceGateway,
) -> Arc<RecommendationService<C>> {
    Arc::new(RecommendationService::new(Arc::new(catalog), advice))
}

/// Catalog whose index cannot be listed.
pub(super) struct UnavailableCatalog;

#[async_trait::async_trait]
impl AreaCatalog for UnavailableCatalog {
    async fn regions(&self) -> Result<Vec<RegionSummary>, CatalogError> {
        Err(CatalogError::Unavailable("index offline".to_string()))
    }

    async fn region_detail(&self, _slug: &str) -> Result<Option<Arc<RegionRecord>>, CatalogError> {
        Err(CatalogError::Unavailable("detail offline".to_string()))
    }
}

/// Delegates to the sample catalog but fails detail lookups for one slug.
pub(super) struct FlakyCatalog {
    pub(super) inner: StaticCatalog,
    pub(super) failing_slug: &'static str,
}

#[async_trait::async_trait]
impl AreaCatalog for FlakyCatalog {
    async fn regions(&self) -> Result<Vec<RegionSummary>, CatalogError> {
        self.inner.regions().await
    }

    async fn region_detail(&self, slug: &str) -> Result<Option<Arc<RegionRecord>>, CatalogError> {
        if slug == self.failing_slug {
            return Err(CatalogError::Unavailable(format!("{slug} timed out")));
        }
        self.inner.region_detail(slug).await
    }
}

/// Catalog whose detail lookups only complete once every expected lookup is in flight.
pub(super) struct RendezvousCatalog {
    pub(super) inner: StaticCatalog,
    pub(super) barrier: tokio::sync::Barrier,
}

impl RendezvousCatalog {
    pub(super) fn new(inner: StaticCatalog, lookups: usize) -> Self {
        Self {
            inner,
            barrier: tokio::sync::Barrier::new(lookups),
        }
    }
}

#[async_trait::async_trait]
impl AreaCatalog for RendezvousCatalog {
    async fn regions(&self) -> Result<Vec<RegionSummary>, CatalogError> {
        self.inner.regions().await
    }

    async fn region_detail(&self, slug: &str) -> Result<Option<Arc<RegionRecord>>, CatalogError> {
        self.barrier.wait().await;
        self.inner.region_detail(slug).await
    }
}

/// Provider that always fails with a server error.
pub(super) struct BrokenProvider;

#[async_trait::async_trait]
impl AdviceProvider for BrokenProvider {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, AdviceError> {
        Err(AdviceError::Status {
            status: 500,
            message: "upstream exploded".to_string(),
        })
    }
}

pub(super) fn broken_advice() -> AdviceGateway {
    AdviceGateway::new(Arc::new(BrokenProvider))
}

pub(super) fn names(areas: &[crate::recommendation::domain::ScoredArea]) -> Vec<&str> {
    areas.iter().map(|area| area.name.as_str()).collect()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
