// crates/realmap-core/src/query/local.rs
use super::validate_id;
use crate::common::{FeatureSummary, RegionDetail};
use crate::error::Result;
use crate::model::{Feature, FeatureId, LayerKind, Table};
use crate::store::GeoStore;
use crate::traits::QueryService;
use async_trait::async_trait;
use std::sync::Arc;

/// Answers queries straight from an in-process store.
///
/// Every call completes without suspending, so there is nothing to cancel.
#[derive(Clone, Debug)]
pub struct StoreQueryService {
    store: Arc<GeoStore>,
}

impl StoreQueryService {
    pub fn new(store: impl Into<Arc<GeoStore>>) -> Self {
        Self {
            store: store.into(),
        }
    }

    /// Service over the bundled dataset.
    pub fn bundled() -> Result<Self> {
        Ok(Self::new(GeoStore::load()?))
    }

    pub fn store(&self) -> &GeoStore {
        &self.store
    }
}

#[async_trait]
impl QueryService for StoreQueryService {
    async fn features_by_kind(&self, kind: LayerKind) -> Result<Vec<Feature>> {
        Ok(self.store.features(kind).into_iter().cloned().collect())
    }

    async fn feature_summary(&self, id: FeatureId) -> Result<FeatureSummary> {
        self.store.summary(Table::Locations, validate_id(id)?)
    }

    async fn region_detail(&self, id: FeatureId) -> Result<RegionDetail> {
        self.store.region_detail(validate_id(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::FeatureDetail;
    use crate::error::GeoError;
    use crate::model::FeatureKey;

    const DATASET: &str = r#"{
      "regions": [
        { "gid": 7, "name": "The Reach", "size": 1234000000,
          "summary": "Fertile lands.", "url": "https://example.org/reach",
          "geometry": { "type": "Polygon", "coordinates": [[[0,0],[4,0],[4,4],[0,4],[0,0]]] } }
      ],
      "locations": [
        { "gid": 1, "name": "Highgarden", "type": "location", "summary": "Seat of House Tyrell.",
          "url": "https://example.org/highgarden",
          "geometry": { "type": "Point", "coordinates": [2, 2] } },
        { "gid": 2, "name": "The Arbor", "type": "landmark",
          "geometry": { "type": "Point", "coordinates": [1, 3] } },
        { "gid": 3, "name": "Sunspear", "type": "location",
          "geometry": { "type": "Point", "coordinates": [9, 9] } }
      ]
    }"#;

    fn service() -> StoreQueryService {
        StoreQueryService::new(GeoStore::from_json_str(DATASET).unwrap())
    }

    #[tokio::test]
    async fn region_detail_converts_stored_size_to_km2() {
        let detail = service().region_detail(7).await.unwrap();
        assert_eq!(detail.size_km2, 1234.0);
        assert_eq!(detail.sub_feature_count, 2);
        assert_eq!(detail.summary, "Fertile lands.");
        assert_eq!(detail.url, "https://example.org/reach");
    }

    #[tokio::test]
    async fn features_by_kind_filters_point_layers() {
        let svc = service();
        let landmarks = svc.features_by_kind(LayerKind::Landmark).await.unwrap();
        assert_eq!(landmarks.len(), 1);
        assert_eq!(landmarks[0].name, "The Arbor");
        assert_eq!(svc.features_by_kind(LayerKind::Location).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let svc = service();
        assert!(matches!(svc.feature_summary(42).await, Err(GeoError::NotFound(_))));
        assert!(matches!(svc.region_detail(1).await, Err(GeoError::NotFound(_))));
    }

    #[tokio::test]
    async fn out_of_range_ids_fail_validation() {
        let svc = service();
        assert!(matches!(svc.feature_summary(5000).await, Err(GeoError::Validation(_))));
    }

    #[tokio::test]
    async fn feature_detail_dispatches_on_layer() {
        let svc = service();
        let region = svc
            .feature_detail(FeatureKey::new(LayerKind::Region, 7))
            .await
            .unwrap();
        assert!(matches!(region, FeatureDetail::Region(_)));

        let location = svc
            .feature_detail(FeatureKey::new(LayerKind::Location, 1))
            .await
            .unwrap();
        assert_eq!(location.summary(), "Seat of House Tyrell.");
    }
}
