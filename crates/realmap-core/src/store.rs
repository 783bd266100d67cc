// crates/realmap-core/src/store.rs
use crate::common::{DbStats, FeatureSummary, RegionDetail};
use crate::error::{GeoError, Result};
use crate::model::{Feature, FeatureId, FeatureKey, LayerKind, Table};
use serde::{Deserialize, Serialize};

pub const M2_PER_KM2: f64 = 1e6;

/// The read-only geodata store.
///
/// Regions and their areas are kept as parallel arrays; locations and
/// landmarks share one table, as they do in the dataset.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GeoStore {
    regions: Vec<Feature>,
    /// Area of `regions[i]` in square metres.
    region_sizes: Vec<f64>,
    locations: Vec<Feature>,
}

impl GeoStore {
    pub(crate) fn from_parts(
        regions: Vec<Feature>,
        region_sizes: Vec<f64>,
        locations: Vec<Feature>,
    ) -> Self {
        debug_assert_eq!(regions.len(), region_sizes.len());
        Self {
            regions,
            region_sizes,
            locations,
        }
    }

    pub fn stats(&self) -> DbStats {
        let landmarks = self
            .locations
            .iter()
            .filter(|f| f.kind == LayerKind::Landmark)
            .count();
        DbStats {
            regions: self.regions.len(),
            locations: self.locations.len() - landmarks,
            landmarks,
        }
    }

    pub fn regions(&self) -> &[Feature] {
        &self.regions
    }

    pub fn locations(&self) -> &[Feature] {
        &self.locations
    }

    /// All features of one layer, in store order.
    pub fn features(&self, kind: LayerKind) -> Vec<&Feature> {
        match kind {
            LayerKind::Region => self.regions.iter().collect(),
            _ => self.locations.iter().filter(|f| f.kind == kind).collect(),
        }
    }

    pub fn feature(&self, key: FeatureKey) -> Option<&Feature> {
        match key.layer {
            LayerKind::Region => self.region(key.id),
            kind => self
                .locations
                .iter()
                .find(|f| f.id == key.id && f.kind == kind),
        }
    }

    pub fn region(&self, id: FeatureId) -> Option<&Feature> {
        self.region_index(id).map(|i| &self.regions[i])
    }

    /// A location or landmark by id, whichever holds it.
    pub fn location(&self, id: FeatureId) -> Option<&Feature> {
        self.locations.iter().find(|f| f.id == id)
    }

    /// `{summary, url}` of a record in `table`.
    pub fn summary(&self, table: Table, id: FeatureId) -> Result<FeatureSummary> {
        let feature = match table {
            Table::Regions => self.region(id),
            Table::Locations => self.location(id),
        }
        .ok_or_else(|| GeoError::NotFound(format!("{} {id}", table.as_str())))?;

        Ok(FeatureSummary {
            summary: feature.summary.clone(),
            url: feature.url.clone(),
        })
    }

    /// Region area in square metres.
    pub fn region_size_m2(&self, id: FeatureId) -> Result<f64> {
        self.region_index(id)
            .map(|i| self.region_sizes[i])
            .ok_or_else(|| GeoError::NotFound(format!("region {id}")))
    }

    pub fn region_size_km2(&self, id: FeatureId) -> Result<f64> {
        Ok(self.region_size_m2(id)? / M2_PER_KM2)
    }

    /// Size, contained feature count and summary of a region.
    pub fn region_detail(&self, id: FeatureId) -> Result<RegionDetail> {
        let summary = self.summary(Table::Regions, id)?;
        Ok(RegionDetail {
            size_km2: self.region_size_km2(id)?,
            sub_feature_count: self.count_features_in_region(id)?,
            summary: summary.summary,
            url: summary.url,
        })
    }

    /// Number of locations and landmarks whose point lies inside the region.
    pub fn count_features_in_region(&self, id: FeatureId) -> Result<usize> {
        let region = self
            .region(id)
            .ok_or_else(|| GeoError::NotFound(format!("region {id}")))?;
        Ok(self
            .locations
            .iter()
            .filter_map(|f| f.geometry.as_point())
            .filter(|p| region.geometry.contains(*p))
            .count())
    }

    fn region_index(&self, id: FeatureId) -> Option<usize> {
        self.regions.iter().position(|r| r.id == id)
    }
}
