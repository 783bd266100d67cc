// crates/realmap-core/src/selection.rs
//! Keeps the map, the search bar and the info panel in agreement about which
//! feature is selected.

use crate::common::FeatureDetail;
use crate::error::{GeoError, Result};
use crate::model::{Feature, FeatureId, FeatureKey, LayerKind, LayerSet};
use crate::text::group_thousands;
use crate::traits::MapView;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "feature", rename_all = "camelCase")]
pub enum SelectionState {
    Idle,
    FeatureSelected(FeatureKey),
}

/// Identifies one detail request. Only the most recently issued ticket can
/// still change the info panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailTicket {
    seq: u64,
    key: FeatureKey,
}

impl DetailTicket {
    pub fn key(&self) -> FeatureKey {
        self.key
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// What the info panel shows.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum InfoPanel {
    #[default]
    Closed,
    Loading {
        title: String,
        layer: LayerKind,
    },
    Ready {
        title: String,
        layer: LayerKind,
        detail: FeatureDetail,
    },
    Unavailable {
        title: String,
        layer: LayerKind,
        reason: String,
    },
}

impl InfoPanel {
    pub fn is_open(&self) -> bool {
        !matches!(self, InfoPanel::Closed)
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            InfoPanel::Closed => None,
            InfoPanel::Loading { title, .. }
            | InfoPanel::Ready { title, .. }
            | InfoPanel::Unavailable { title, .. } => Some(title),
        }
    }

    /// The panel for a finished detail request. A cancelled request leaves
    /// it loading; any other error makes it unavailable.
    pub fn resolved(title: String, layer: LayerKind, result: Result<FeatureDetail>) -> Self {
        match result {
            Ok(detail) => InfoPanel::Ready {
                title,
                layer,
                detail,
            },
            Err(GeoError::Cancelled) => InfoPanel::Loading { title, layer },
            Err(e) => InfoPanel::Unavailable {
                title,
                layer,
                reason: e.to_string(),
            },
        }
    }

    /// Plain-text rendering, one block per panel section.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        match self {
            InfoPanel::Closed => {}
            InfoPanel::Loading { title, layer } => {
                let _ = writeln!(out, "{title}");
                let _ = writeln!(out, "{}", layer.as_str().to_uppercase());
                let _ = writeln!(out, "Loading...");
            }
            InfoPanel::Ready {
                title,
                layer,
                detail,
            } => {
                let _ = writeln!(out, "{title}");
                let _ = writeln!(out, "{}", layer.as_str().to_uppercase());
                if let FeatureDetail::Region(region) = detail {
                    let _ = writeln!(out, "Size Estimate - {} km²", group_thousands(region.size_km2));
                    let _ = writeln!(out, "Number of Features - {}", region.sub_feature_count);
                }
                let _ = writeln!(out, "Summary");
                let _ = writeln!(out, "{}", detail.summary());
                if !detail.url().is_empty() {
                    let _ = writeln!(out, "Read More... {}", detail.url());
                }
            }
            InfoPanel::Unavailable {
                title,
                layer,
                reason,
            } => {
                let _ = writeln!(out, "{title}");
                let _ = writeln!(out, "{}", layer.as_str().to_uppercase());
                let _ = writeln!(out, "Details unavailable ({reason})");
            }
        }
        out
    }
}

/// The selection state machine.
///
/// Transitions are synchronous. Entering `FeatureSelected` hands out a
/// [`DetailTicket`]; whoever fetches the detail reports back through
/// [`SelectionCoordinator::complete_detail`]. A failed fetch never rolls the
/// selection back.
#[derive(Debug)]
pub struct SelectionCoordinator<M: MapView> {
    map: M,
    state: SelectionState,
    highlighted: Option<FeatureId>,
    panel: InfoPanel,
    issued: u64,
    pending: Option<DetailTicket>,
}

impl<M: MapView> SelectionCoordinator<M> {
    pub fn new(map: M) -> Self {
        Self {
            map,
            state: SelectionState::Idle,
            highlighted: None,
            panel: InfoPanel::Closed,
            issued: 0,
            pending: None,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn selected(&self) -> Option<FeatureKey> {
        match self.state {
            SelectionState::Idle => None,
            SelectionState::FeatureSelected(key) => Some(key),
        }
    }

    pub fn panel(&self) -> &InfoPanel {
        &self.panel
    }

    pub fn highlighted_region(&self) -> Option<FeatureId> {
        self.highlighted
    }

    /// The ticket whose response the panel is waiting for, if any.
    pub fn pending(&self) -> Option<DetailTicket> {
        self.pending
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    /// A feature was clicked on the map.
    pub fn on_map_click(&mut self, feature: &Feature) -> DetailTicket {
        self.clear_highlight();
        if feature.is_region() {
            self.map.close_popup();
            self.highlight(feature.id);
        }
        self.enter_selected(feature)
    }

    /// A search result was clicked.
    ///
    /// Shows the feature's layer first if it is hidden, then focuses the map
    /// on the feature. Fails with `NotFound` if the layer holding the entry is
    /// not loaded.
    pub fn on_search_result(
        &mut self,
        key: FeatureKey,
        layers: &mut LayerSet,
    ) -> Result<DetailTicket> {
        let feature = layers
            .feature(key)
            .cloned()
            .ok_or_else(|| GeoError::NotFound(format!("feature {key} is not loaded")))?;

        if layers.set_visible(key.layer, true) {
            debug!(layer = %key.layer, "showing hidden layer for search result");
            self.map.set_layer_visible(key.layer, true);
        }

        self.clear_highlight();
        self.map.close_popup();
        if feature.is_region() {
            self.highlight(feature.id);
        }
        self.map.focus(&feature);
        Ok(self.enter_selected(&feature))
    }

    /// Empty map area clicked or panel closed.
    pub fn deselect(&mut self) {
        self.clear_highlight();
        self.map.close_popup();
        self.state = SelectionState::Idle;
        self.panel = InfoPanel::Closed;
        self.pending = None;
        debug!("selection cleared");
    }

    /// Report the outcome of a detail request.
    ///
    /// Returns `true` if the panel changed. Responses for anything but the
    /// pending ticket are discarded, as are cancelled requests.
    pub fn complete_detail(
        &mut self,
        ticket: DetailTicket,
        result: Result<FeatureDetail>,
    ) -> bool {
        if self.pending != Some(ticket) {
            debug!(seq = ticket.seq, key = %ticket.key, "discarding stale detail response");
            return false;
        }
        let (title, layer) = match &self.panel {
            InfoPanel::Loading { title, layer } => (title.clone(), *layer),
            _ => return false,
        };

        match &result {
            Err(GeoError::Cancelled) => {
                debug!(seq = ticket.seq, "detail request cancelled");
                return false;
            }
            Err(e) => debug!(seq = ticket.seq, error = %e, "detail unavailable"),
            Ok(_) => {}
        }
        self.pending = None;
        self.panel = InfoPanel::resolved(title, layer, result);
        true
    }

    fn enter_selected(&mut self, feature: &Feature) -> DetailTicket {
        self.issued += 1;
        let ticket = DetailTicket {
            seq: self.issued,
            key: feature.key(),
        };
        self.state = SelectionState::FeatureSelected(ticket.key);
        self.pending = Some(ticket);
        self.panel = InfoPanel::Loading {
            title: feature.name.clone(),
            layer: feature.kind,
        };
        debug!(key = %ticket.key, seq = ticket.seq, "feature selected");
        ticket
    }

    fn highlight(&mut self, region: FeatureId) {
        self.highlighted = Some(region);
        self.map.highlight_region(Some(region));
    }

    fn clear_highlight(&mut self) {
        if self.highlighted.take().is_some() {
            self.map.highlight_region(None);
        }
    }
}
