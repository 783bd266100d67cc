// crates/realmap-core/src/traits.rs
use crate::common::{FeatureDetail, FeatureSummary, RegionDetail};
use crate::error::Result;
use crate::model::{Feature, FeatureId, FeatureKey, LayerKind};
use async_trait::async_trait;

/// Typed lookups against the geodata, local or remote.
///
/// Every call may fail with `NotFound` or `Transport`; implementations do not
/// retry. An implementation that talks to a remote service cancels a stale
/// in-flight request when a newer one for the same resource is issued, and
/// the stale call resolves to `Cancelled`.
#[async_trait]
pub trait QueryService: Send + Sync {
    /// All features of one layer.
    async fn features_by_kind(&self, kind: LayerKind) -> Result<Vec<Feature>>;

    /// `{summary, url}` of a location or landmark.
    async fn feature_summary(&self, id: FeatureId) -> Result<FeatureSummary>;

    /// Size, contained feature count and summary of a region.
    async fn region_detail(&self, id: FeatureId) -> Result<RegionDetail>;

    /// Detail for the info panel, dispatched on the layer.
    async fn feature_detail(&self, key: FeatureKey) -> Result<FeatureDetail> {
        match key.layer {
            LayerKind::Region => self.region_detail(key.id).await.map(FeatureDetail::Region),
            _ => self.feature_summary(key.id).await.map(FeatureDetail::Summary),
        }
    }
}

/// What the selection logic needs from the map renderer.
///
/// Calls arrive in the order the map must apply them.
pub trait MapView {
    fn set_layer_visible(&mut self, kind: LayerKind, visible: bool);

    /// Highlight one region polygon, or clear the highlight with `None`.
    fn highlight_region(&mut self, region: Option<FeatureId>);

    /// Close the popup of a selected point feature, if any.
    fn close_popup(&mut self);

    /// Pan/zoom to a feature.
    fn focus(&mut self, feature: &Feature);
}

impl<M: MapView + ?Sized> MapView for &mut M {
    fn set_layer_visible(&mut self, kind: LayerKind, visible: bool) {
        (**self).set_layer_visible(kind, visible)
    }

    fn highlight_region(&mut self, region: Option<FeatureId>) {
        (**self).highlight_region(region)
    }

    fn close_popup(&mut self) {
        (**self).close_popup()
    }

    fn focus(&mut self, feature: &Feature) {
        (**self).focus(feature)
    }
}
