// crates/realmap-core/src/query/http.rs
use super::slots::{RequestSlots, Resource};
use super::validate_id;
use crate::common::{FeatureSummary, RegionDetail};
use crate::config::ClientConfig;
use crate::error::{GeoError, Result};
use crate::model::convert::feature_from_geojson;
use crate::model::{Feature, FeatureId, LayerKind};
use crate::raw::LayerResponseRaw;
use crate::traits::QueryService;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Query service backed by the `realmap-server` HTTP API.
///
/// Layer listings and info-panel details each occupy one request slot, so a
/// new call cancels the one it supersedes.
#[derive(Debug)]
pub struct HttpQueryService {
    client: Client,
    base: Url,
    slots: RequestSlots,
}

impl HttpQueryService {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base)
            .map_err(|e| GeoError::Validation(format!("invalid base url '{}': {e}", config.base_url)))?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeoError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base,
            slots: RequestSlots::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self
            .base
            .join(path)
            .map_err(|e| GeoError::Validation(format!("invalid path '{path}': {e}")))?;
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    fn listing_path(kind: LayerKind) -> String {
        match kind {
            LayerKind::Region => "regions".to_string(),
            kind => format!("locations/{kind}"),
        }
    }
}

#[async_trait]
impl QueryService for HttpQueryService {
    async fn features_by_kind(&self, kind: LayerKind) -> Result<Vec<Feature>> {
        let path = Self::listing_path(kind);
        let listing: LayerResponseRaw = self
            .slots
            .run(Resource::Layer(kind), self.get_json(&path))
            .await?;
        listing
            .into_features()
            .into_iter()
            .map(|raw| feature_from_geojson(raw, kind))
            .collect()
    }

    async fn feature_summary(&self, id: FeatureId) -> Result<FeatureSummary> {
        let id = validate_id(id)?;
        let path = format!("locations/{id}/summary");
        self.slots.run(Resource::Detail, self.get_json(&path)).await
    }

    async fn region_detail(&self, id: FeatureId) -> Result<RegionDetail> {
        let id = validate_id(id)?;
        let size_path = format!("regions/{id}/size");
        let areas_path = format!("regions/{id}/areas");
        let summary_path = format!("regions/{id}/summary");

        let fetch = async {
            let (size_km2, sub_feature_count, summary) = futures::try_join!(
                self.get_json::<f64>(&size_path),
                self.get_json::<usize>(&areas_path),
                self.get_json::<FeatureSummary>(&summary_path),
            )?;
            Ok(RegionDetail {
                size_km2,
                sub_feature_count,
                summary: summary.summary,
                url: summary.url,
            })
        };
        self.slots.run(Resource::Detail, fetch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_a_trailing_slash() {
        let svc = HttpQueryService::new(&ClientConfig::new("http://localhost:5000/api")).unwrap();
        assert_eq!(svc.base_url().as_str(), "http://localhost:5000/api/");
        assert_eq!(
            svc.base_url().join("regions/7/size").unwrap().as_str(),
            "http://localhost:5000/api/regions/7/size"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = HttpQueryService::new(&ClientConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, GeoError::Validation(_)));
    }

    #[test]
    fn listing_paths() {
        assert_eq!(HttpQueryService::listing_path(LayerKind::Region), "regions");
        assert_eq!(HttpQueryService::listing_path(LayerKind::Landmark), "locations/landmark");
    }

    #[tokio::test]
    async fn out_of_range_id_never_leaves_the_process() {
        let svc = HttpQueryService::new(&ClientConfig::new("http://127.0.0.1:9/")).unwrap();
        assert!(matches!(svc.region_detail(1001).await, Err(GeoError::Validation(_))));
    }
}
