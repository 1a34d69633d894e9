use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use super::domain::{RegionRecord, RegionSummary};

/// Slugs and display names of the prefectures offered by the planner form.
pub const PREFECTURE_LABELS: [(&str, &str); 7] = [
    ("tokyo", "東京都"),
    ("kanagawa", "神奈川県"),
    ("chiba", "千葉県"),
    ("saitama", "埼玉県"),
    ("aichi", "愛知県"),
    ("osaka", "大阪府"),
    ("fukuoka", "福岡県"),
];

const INDEX_FILE: &str = "prefectures.json";
const DETAILS_DIR: &str = "details";

/// Read-only source of prefecture data.
///
/// `region_detail` returns `Ok(None)` for slugs with no data; callers treat that
/// as an empty contribution rather than a failure.
#[async_trait::async_trait]
pub trait AreaCatalog: Send + Sync {
    async fn regions(&self) -> Result<Vec<RegionSummary>, CatalogError>;
    async fn region_detail(&self, slug: &str) -> Result<Option<Arc<RegionRecord>>, CatalogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Immutable catalog held in memory and shared across requests.
#[derive(Debug, Default, Clone)]
pub struct StaticCatalog {
    index: Vec<RegionSummary>,
    details: HashMap<String, Arc<RegionRecord>>,
}

impl StaticCatalog {
    /// Build a catalog whose index lists exactly the given regions.
    pub fn from_regions(regions: Vec<RegionRecord>) -> Self {
        let index = regions.iter().map(RegionRecord::summary).collect();
        let details = regions
            .into_iter()
            .map(|region| (region.slug.clone(), Arc::new(region)))
            .collect();
        Self { index, details }
    }

    /// Build a catalog from an explicit index; index entries without a detail record resolve to absent.
    pub fn with_index(index: Vec<RegionSummary>, regions: Vec<RegionRecord>) -> Self {
        let details = regions
            .into_iter()
            .map(|region| (region.slug.clone(), Arc::new(region)))
            .collect();
        Self { index, details }
    }

    /// Load `prefectures.json` and every `details/<slug>.json` present under `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let index: Vec<RegionSummary> = read_json(&dir.join(INDEX_FILE))?;

        let mut details = HashMap::with_capacity(index.len());
        for entry in &index {
            let path = dir.join(DETAILS_DIR).join(format!("{}.json", entry.slug));
            if !path.is_file() {
                debug!(slug = %entry.slug, "no detail file for prefecture");
                continue;
            }
            let record: RegionRecord = read_json(&path)?;
            details.insert(entry.slug.clone(), Arc::new(record));
        }

        info!(
            prefectures = index.len(),
            detailed = details.len(),
            dir = %dir.display(),
            "loaded rent catalog"
        );

        Ok(Self { index, details })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let raw = fs::read(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&raw).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[async_trait::async_trait]
impl AreaCatalog for StaticCatalog {
    async fn regions(&self) -> Result<Vec<RegionSummary>, CatalogError> {
        Ok(self.index.clone())
    }

    async fn region_detail(&self, slug: &str) -> Result<Option<Arc<RegionRecord>>, CatalogError> {
        Ok(self.details.get(slug).cloned())
    }
}
