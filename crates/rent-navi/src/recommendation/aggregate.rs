use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use super::catalog::{AreaCatalog, CatalogError};
use super::domain::{AreaRecord, RegionRecord};

/// Flattened view over the areas of every resolved prefecture.
///
/// Iteration follows prefecture order, then area order within each prefecture.
#[derive(Debug, Clone, Default)]
pub struct AreaCollection {
    regions: Vec<Arc<RegionRecord>>,
}

/// An area together with the display name of the prefecture that owns it.
#[derive(Debug, Clone, Copy)]
pub struct RegionalArea<'a> {
    pub prefecture: &'a str,
    pub area: &'a AreaRecord,
}

impl AreaCollection {
    pub fn new(regions: Vec<Arc<RegionRecord>>) -> Self {
        Self { regions }
    }

    pub fn iter(&self) -> impl Iterator<Item = RegionalArea<'_>> {
        self.regions.iter().flat_map(|region| {
            region.areas.iter().map(move |area| RegionalArea {
                prefecture: region.name.as_str(),
                area,
            })
        })
    }

    pub fn len(&self) -> usize {
        self.regions.iter().map(|region| region.areas.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }
}

/// Resolve the requested prefectures concurrently and flatten their areas.
///
/// An empty `slugs` slice means every prefecture in the catalog index. Slugs that
/// resolve to nothing, or whose lookup fails, contribute no areas. Only a failure
/// to list the index itself is returned as an error.
pub async fn collect_areas<C>(catalog: &C, slugs: &[String]) -> Result<AreaCollection, CatalogError>
where
    C: AreaCatalog + ?Sized,
{
    let slugs: Vec<String> = if slugs.is_empty() {
        catalog
            .regions()
            .await?
            .into_iter()
            .map(|region| region.slug)
            .collect()
    } else {
        slugs.to_vec()
    };

    let lookups = join_all(slugs.iter().map(|slug| catalog.region_detail(slug))).await;

    let mut regions = Vec::with_capacity(lookups.len());
    for (slug, lookup) in slugs.iter().zip(lookups) {
        match lookup {
            Ok(Some(region)) => regions.push(region),
            Ok(None) => debug!(%slug, "prefecture not found in catalog"),
            Err(error) => warn!(%slug, %error, "prefecture lookup failed; skipping"),
        }
    }

    Ok(AreaCollection::new(regions))
}
