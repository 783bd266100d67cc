// crates/realmap-core/src/session.rs
//! The application context of one map view.

use crate::error::{GeoError, Result};
use crate::model::{FeatureKey, LayerKind, LayerSet};
use crate::search::{SearchEntry, SearchIndex};
use crate::selection::{DetailTicket, InfoPanel, SelectionCoordinator};
use crate::traits::{MapView, QueryService};
use tracing::{info, warn};

/// Owns the loaded layers, the search index and the selection of one map,
/// plus the query service that feeds them.
///
/// Everything a map click or a search box needs goes through here; there is
/// no global controller.
pub struct MapSession<Q: QueryService, M: MapView> {
    query: Q,
    layers: LayerSet,
    index: SearchIndex,
    selection: SelectionCoordinator<M>,
}

impl<Q: QueryService, M: MapView> MapSession<Q, M> {
    pub fn new(query: Q, map: M) -> Self {
        Self {
            query,
            layers: LayerSet::new(),
            index: SearchIndex::new(),
            selection: SelectionCoordinator::new(map),
        }
    }

    /// Loads regions, then each point layer in turn.
    ///
    /// A layer that fails to load is logged and skipped. Returns the layers
    /// that did load.
    pub async fn load_map_data(&mut self) -> Vec<LayerKind> {
        let mut loaded = Vec::with_capacity(LayerKind::ALL.len());
        for kind in LayerKind::ALL {
            match self.load_layer(kind).await {
                Ok(count) => {
                    info!(layer = %kind, features = count, "layer loaded");
                    loaded.push(kind);
                }
                Err(e) => warn!(layer = %kind, error = %e, "layer failed to load"),
            }
        }
        loaded
    }

    /// Fetches one layer, adds it to the layer set and the search index, and
    /// shows it.
    pub async fn load_layer(&mut self, kind: LayerKind) -> Result<usize> {
        let features = self.query.features_by_kind(kind).await?;
        let layer = self.layers.insert_features(kind, features);
        self.index.add_features(layer.features(), kind);
        let count = layer.len();
        self.set_layer_visible(kind, true);
        Ok(count)
    }

    pub fn search(&self, query: &str) -> Vec<&SearchEntry> {
        self.index.search(query)
    }

    /// Flips a layer on or off. `None` if the layer is not loaded.
    pub fn toggle_layer(&mut self, kind: LayerKind) -> Option<bool> {
        let visible = self.layers.toggle(kind)?;
        self.selection.map_mut().set_layer_visible(kind, visible);
        Some(visible)
    }

    pub fn set_layer_visible(&mut self, kind: LayerKind, visible: bool) {
        if self.layers.set_visible(kind, visible) {
            self.selection.map_mut().set_layer_visible(kind, visible);
        }
    }

    /// A feature was clicked on the map; selects it and fills the info panel.
    pub async fn click_feature(&mut self, key: FeatureKey) -> Result<&InfoPanel> {
        let feature = self
            .layers
            .feature(key)
            .ok_or_else(|| GeoError::NotFound(format!("feature {key} is not loaded")))?;
        let ticket = self.selection.on_map_click(feature);
        self.fetch_detail(ticket).await;
        Ok(self.selection.panel())
    }

    /// A search result was chosen; shows its layer, focuses it and fills the
    /// info panel.
    pub async fn select_search_result(&mut self, entry: &SearchEntry) -> Result<&InfoPanel> {
        let ticket = self
            .selection
            .on_search_result(entry.key(), &mut self.layers)?;
        self.fetch_detail(ticket).await;
        Ok(self.selection.panel())
    }

    pub fn deselect(&mut self) {
        self.selection.deselect();
    }

    async fn fetch_detail(&mut self, ticket: DetailTicket) {
        let result = self.query.feature_detail(ticket.key()).await;
        if let Err(e) = &result {
            if e.is_unavailable() {
                warn!(key = %ticket.key(), error = %e, "feature detail unavailable");
            }
        }
        self.selection.complete_detail(ticket, result);
    }

    pub fn layers(&self) -> &LayerSet {
        &self.layers
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn selection(&self) -> &SelectionCoordinator<M> {
        &self.selection
    }

    pub fn panel(&self) -> &InfoPanel {
        self.selection.panel()
    }

    pub fn query(&self) -> &Q {
        &self.query
    }

    pub fn map(&self) -> &M {
        self.selection.map()
    }
}
