use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifestyle/amenity attribute attached to an area.
///
/// Unknown identifiers are preserved in [`FeatureTag::Other`] so newer catalog
/// data and clients keep working against an older vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FeatureTag {
    PetFriendly,
    SafeArea,
    ChildRearing,
    AccessGood,
    CostPerformance,
    ShoppingConvenient,
    StudentFriendly,
    SingleFriendly,
    GymSauna,
    SportsPark,
    LibraryCafe,
    Other(String),
}

impl FeatureTag {
    /// Every tag of the controlled vocabulary, in presentation order.
    pub const KNOWN: [FeatureTag; 11] = [
        FeatureTag::PetFriendly,
        FeatureTag::SafeArea,
        FeatureTag::ChildRearing,
        FeatureTag::AccessGood,
        FeatureTag::CostPerformance,
        FeatureTag::ShoppingConvenient,
        FeatureTag::StudentFriendly,
        FeatureTag::SingleFriendly,
        FeatureTag::GymSauna,
        FeatureTag::SportsPark,
        FeatureTag::LibraryCafe,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "pet_friendly" => Self::PetFriendly,
            "safe_area" => Self::SafeArea,
            "child_rearing" => Self::ChildRearing,
            "access_good" => Self::AccessGood,
            "cost_performance" => Self::CostPerformance,
            "shopping_convenient" => Self::ShoppingConvenient,
            "student_friendly" => Self::StudentFriendly,
            "single_friendly" => Self::SingleFriendly,
            "gym_sauna" => Self::GymSauna,
            "sports_park" => Self::SportsPark,
            "library_cafe" => Self::LibraryCafe,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::PetFriendly => "pet_friendly",
            Self::SafeArea => "safe_area",
            Self::ChildRearing => "child_rearing",
            Self::AccessGood => "access_good",
            Self::CostPerformance => "cost_performance",
            Self::ShoppingConvenient => "shopping_convenient",
            Self::StudentFriendly => "student_friendly",
            Self::SingleFriendly => "single_friendly",
            Self::GymSauna => "gym_sauna",
            Self::SportsPark => "sports_park",
            Self::LibraryCafe => "library_cafe",
            Self::Other(raw) => raw,
        }
    }

    /// Display label; unknown tags fall back to their raw identifier.
    pub fn label(&self) -> &str {
        match self {
            Self::PetFriendly => "🐶 ペット可",
            Self::SafeArea => "🛡️ 治安重視",
            Self::ChildRearing => "👶 子育て環境",
            Self::AccessGood => "🚃 アクセス重視",
            Self::CostPerformance => "💰 コスパ重視",
            Self::ShoppingConvenient => "🛍️ 買い物便利",
            Self::StudentFriendly => "🎓 学生が多い",
            Self::SingleFriendly => "🏢 一人暮らし推奨",
            Self::GymSauna => "💪 ジム・サウナ",
            Self::SportsPark => "🏟️ 公園・スポーツ",
            Self::LibraryCafe => "📚 カフェ・図書館",
            Self::Other(raw) => raw,
        }
    }

    pub fn description(&self) -> Option<&'static str> {
        let text = match self {
            Self::PetFriendly => "ペット可物件の割合が高いエリアを優先します",
            Self::SafeArea => "犯罪発生率が低く、治安が良いエリアを優先します",
            Self::ChildRearing => "公園や学校が多く、子育てしやすい環境を優先します",
            Self::AccessGood => "複数路線利用可や、主要駅へのアクセスが良いエリアを優先します",
            Self::CostPerformance => "家賃相場の割に利便性が高いエリアを優先します",
            Self::ShoppingConvenient => "スーパーや商店街が充実しているエリアを優先します",
            Self::StudentFriendly => {
                "学生が多く活気があり、安くて美味しい飲食店が充実しているエリアを優先します"
            }
            Self::SingleFriendly => {
                "初めての一人暮らしでも安心な、生活利便性と治安のバランスが良いエリアを優先します"
            }
            Self::GymSauna => "仕事帰りや休日に通えるジムやサウナ施設が近くにあるエリアを優先します",
            Self::SportsPark => {
                "ランニングができる大きな公園や、スポーツ施設が充実しているエリアを優先します"
            }
            Self::LibraryCafe => "勉強やPC作業ができるカフェ、図書館が充実しているエリアを優先します",
            Self::Other(_) => return None,
        };
        Some(text)
    }
}

impl From<String> for FeatureTag {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<FeatureTag> for String {
    fn from(value: FeatureTag) -> Self {
        match value {
            FeatureTag::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for FeatureTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drop duplicate tags while keeping the caller's order.
pub fn dedup_features(features: &[FeatureTag]) -> Vec<FeatureTag> {
    let mut seen = BTreeSet::new();
    features
        .iter()
        .filter(|tag| seen.insert((*tag).clone()))
        .cloned()
        .collect()
}

/// One rentable municipality/ward inside a prefecture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaRecord {
    pub name: String,
    pub average_rent: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_rent: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rent: Option<u64>,
    pub latitude: f64,
    pub longitude: f64,
    pub nearest_station: String,
    /// Walking minutes from `nearest_station`.
    pub distance_to_station: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: BTreeSet<FeatureTag>,
}

impl AreaRecord {
    pub fn transit_summary(&self) -> String {
        format!(
            "{}から徒歩{}分",
            self.nearest_station, self.distance_to_station
        )
    }

    pub fn has_feature(&self, tag: &FeatureTag) -> bool {
        self.features.contains(tag)
    }
}

/// Lightweight index entry for a prefecture, without its areas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSummary {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub region: String,
    pub average_rent: u64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Full prefecture record including its ordered areas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRecord {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub region: String,
    pub average_rent: u64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub areas: Vec<AreaRecord>,
}

impl RegionRecord {
    pub fn summary(&self) -> RegionSummary {
        RegionSummary {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
            region: self.region.clone(),
            average_rent: self.average_rent,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Recommended monthly rent band in yen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentRange {
    pub min: u64,
    pub ideal: u64,
    pub max: u64,
}

/// Candidate area returned to callers, with the features that matched the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredArea {
    pub name: String,
    pub prefecture: String,
    pub average_rent: u64,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub features: Vec<FeatureTag>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub matched_features: Vec<FeatureTag>,
}

impl ScoredArea {
    pub fn new(
        prefecture: &str,
        area: &AreaRecord,
        score: u32,
        matched_features: Vec<FeatureTag>,
    ) -> Self {
        Self {
            name: area.name.clone(),
            prefecture: prefecture.to_string(),
            average_rent: area.average_rent,
            distance: area.transit_summary(),
            latitude: area.latitude,
            longitude: area.longitude,
            features: area.features.iter().cloned().collect(),
            description: area.description.clone(),
            score,
            matched_features,
        }
    }
}

/// Income needed to live in a benchmark area, and the shortfall against current income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeGap {
    pub target_area: String,
    pub required_income: u64,
    pub gap: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_feature_tags_round_trip_verbatim() {
        let tags: Vec<FeatureTag> =
            serde_json::from_str(r#"["pet_friendly","rooftop_garden"]"#).expect("tags parse");
        assert_eq!(
            tags,
            vec![
                FeatureTag::PetFriendly,
                FeatureTag::Other("rooftop_garden".to_string())
            ]
        );
        assert_eq!(
            serde_json::to_string(&tags).expect("tags serialize"),
            r#"["pet_friendly","rooftop_garden"]"#
        );
        assert_eq!(tags[1].label(), "rooftop_garden");
        assert!(tags[1].description().is_none());
    }

    #[test]
    fn every_known_tag_parses_back_to_itself() {
        for tag in FeatureTag::KNOWN {
            assert_eq!(FeatureTag::parse(tag.as_str()), tag);
            assert!(tag.description().is_some());
        }
    }

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        let tags = dedup_features(&[
            FeatureTag::SafeArea,
            FeatureTag::PetFriendly,
            FeatureTag::SafeArea,
        ]);
        assert_eq!(tags, vec![FeatureTag::SafeArea, FeatureTag::PetFriendly]);
    }

    #[test]
    fn transit_summary_uses_station_and_minutes() {
        let area = AreaRecord {
            name: "中野区".to_string(),
            average_rent: 98_000,
            min_rent: None,
            max_rent: None,
            latitude: 35.7073,
            longitude: 139.6636,
            nearest_station: "中野駅".to_string(),
            distance_to_station: 7,
            description: String::new(),
            features: BTreeSet::new(),
        };
        assert_eq!(area.transit_summary(), "中野駅から徒歩7分");
    }
}
