use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for the store.
///
/// Returned by [`crate::store::GeoStore::stats`]; counts reflect what was
/// loaded, after records with unusable types were skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub regions: usize,
    pub locations: usize,
    pub landmarks: usize,
}

impl DbStats {
    pub fn total(&self) -> usize {
        self.regions + self.locations + self.landmarks
    }
}

/// Summary text of a feature: `{summary, url}` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSummary {
    pub summary: String,
    pub url: String,
}

/// Everything the info panel shows for a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionDetail {
    pub size_km2: f64,
    pub sub_feature_count: usize,
    pub summary: String,
    pub url: String,
}

/// Detail of the selected feature, by layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FeatureDetail {
    Region(RegionDetail),
    Summary(FeatureSummary),
}

impl FeatureDetail {
    pub fn summary(&self) -> &str {
        match self {
            FeatureDetail::Region(r) => &r.summary,
            FeatureDetail::Summary(s) => &s.summary,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            FeatureDetail::Region(r) => &r.url,
            FeatureDetail::Summary(s) => &s.url,
        }
    }
}
