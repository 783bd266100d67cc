//! realmap-wasm: WebAssembly bindings for realmap-core
//!
//! Exposes the search index and the selection coordinator of one map to
//! JavaScript. The page keeps doing what a browser is good at (fetching
//! layers and details, drawing with its map library); this module decides
//! what the map should show.
//!
//! What it provides
//! ----------------
//! - `RealmMap`, constructed with the renderer callbacks
//!   `{ setLayerVisible(kind, visible), highlightRegion(id | null),
//!   closePopup(), focus(feature) }`
//! - Layer loading from GeoJSON: `addLayer("region", featureCollection)`
//! - Ranked search: `search("winter", 10)`
//! - Selection: `clickFeature(kind, id)`, `selectSearchResult(kind, id)`,
//!   `deselect()`; both selections return a detail ticket
//! - Detail completion: `completeDetail(ticket, detail)` or
//!   `failDetail(ticket, message)`; stale tickets are ignored
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { RealmMap } from 'realmap-wasm';
//!
//! await init();
//! const map = new RealmMap({ setLayerVisible, highlightRegion, closePopup, focus });
//! map.addLayer('region', await (await fetch(`${api}/regions`)).json());
//!
//! const ticket = map.clickFeature('region', 7);
//! const [size, areas, summary] = await Promise.all([...]);
//! map.completeDetail(ticket, { sizeKm2: size, subFeatureCount: areas, ...summary });
//! render(map.panel());
//! ```
use js_sys::{Function, Reflect};
use realmap_core::api::{FeatureView, SearchHitView};
use realmap_core::model::convert::feature_from_geojson;
use realmap_core::raw::LayerResponseRaw;
use realmap_core::selection::DetailTicket;
use realmap_core::{
    Feature, FeatureDetail, FeatureId, FeatureKey, FeatureSummary, GeoError, GeoStore, LayerKind,
    LayerSet, MapView, RegionDetail, SearchIndex, SelectionCoordinator,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    log("realmap-wasm initialized");
}

fn log(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&e.to_string()))
}

fn js_err(e: GeoError) -> JsError {
    JsError::new(&e.to_string())
}

fn parse_kind(kind: &str) -> Result<LayerKind, JsError> {
    kind.parse().map_err(js_err)
}

/* --------------------------------------------------------------------------
   Renderer callbacks
-------------------------------------------------------------------------- */

/// Forwards map instructions to JavaScript functions.
struct JsMapView {
    set_layer_visible: Function,
    highlight_region: Function,
    close_popup: Function,
    focus: Function,
}

fn callback(callbacks: &JsValue, name: &str) -> Result<Function, JsError> {
    Reflect::get(callbacks, &JsValue::from_str(name))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
        .ok_or_else(|| JsError::new(&format!("missing renderer callback `{name}`")))
}

fn report(name: &str, outcome: Result<JsValue, JsValue>) {
    if let Err(e) = outcome {
        log(&format!("renderer callback `{name}` threw: {e:?}"));
    }
}

impl MapView for JsMapView {
    fn set_layer_visible(&mut self, kind: LayerKind, visible: bool) {
        report(
            "setLayerVisible",
            self.set_layer_visible
                .call2(&JsValue::NULL, &kind.as_str().into(), &visible.into()),
        );
    }

    fn highlight_region(&mut self, region: Option<FeatureId>) {
        let arg = region.map_or(JsValue::NULL, JsValue::from);
        report("highlightRegion", self.highlight_region.call1(&JsValue::NULL, &arg));
    }

    fn close_popup(&mut self) {
        report("closePopup", self.close_popup.call0(&JsValue::NULL));
    }

    fn focus(&mut self, feature: &Feature) {
        match to_js(&FeatureView(feature)) {
            Ok(arg) => report("focus", self.focus.call1(&JsValue::NULL, &arg)),
            Err(_) => log("could not serialize focused feature"),
        }
    }
}

/* --------------------------------------------------------------------------
   RealmMap
-------------------------------------------------------------------------- */

/// Layers, search index and selection of one map.
#[wasm_bindgen]
pub struct RealmMap {
    layers: LayerSet,
    index: SearchIndex,
    selection: SelectionCoordinator<JsMapView>,
}

impl RealmMap {
    fn insert_layer(&mut self, kind: LayerKind, features: Vec<Feature>) -> usize {
        let layer = self.layers.insert_features(kind, features);
        self.index.add_features(layer.features(), kind);
        let count = layer.len();
        if self.layers.set_visible(kind, true) {
            self.selection.map_mut().set_layer_visible(kind, true);
        }
        count
    }

    fn panel_changed(&self, changed: bool) -> bool {
        if changed {
            log(&format!("info panel: {}", self.selection.panel().title().unwrap_or("closed")));
        }
        changed
    }
}

#[wasm_bindgen]
impl RealmMap {
    #[wasm_bindgen(constructor)]
    pub fn new(callbacks: JsValue) -> Result<RealmMap, JsError> {
        let map = JsMapView {
            set_layer_visible: callback(&callbacks, "setLayerVisible")?,
            highlight_region: callback(&callbacks, "highlightRegion")?,
            close_popup: callback(&callbacks, "closePopup")?,
            focus: callback(&callbacks, "focus")?,
        };
        Ok(RealmMap {
            layers: LayerSet::new(),
            index: SearchIndex::new(),
            selection: SelectionCoordinator::new(map),
        })
    }

    /// Adds a GeoJSON layer listing, indexes it and shows it. Returns the
    /// number of features in the layer.
    #[wasm_bindgen(js_name = addLayer)]
    pub fn add_layer(&mut self, kind: &str, listing: JsValue) -> Result<usize, JsError> {
        let kind = parse_kind(kind)?;
        let listing: LayerResponseRaw = serde_wasm_bindgen::from_value(listing)?;
        let features = listing
            .into_features()
            .into_iter()
            .map(|raw| feature_from_geojson(raw, kind))
            .collect::<Result<Vec<_>, _>>()
            .map_err(js_err)?;
        let count = self.insert_layer(kind, features);
        log(&format!("loaded {count} {kind} features"));
        Ok(count)
    }

    /// Loads every layer of a `{regions, locations}` dataset document.
    #[wasm_bindgen(js_name = loadDataset)]
    pub fn load_dataset(&mut self, json: &str) -> Result<usize, JsError> {
        let store = GeoStore::from_json_str(json).map_err(js_err)?;
        let mut total = 0;
        for kind in LayerKind::ALL {
            let features = store.features(kind).into_iter().cloned().collect();
            total += self.insert_layer(kind, features);
        }
        Ok(total)
    }

    /// Ranked matches, best first.
    pub fn search(&self, query: &str, limit: Option<usize>) -> Result<JsValue, JsError> {
        let hits = self.index.search_ranked(query);
        let views: Vec<SearchHitView<'_>> = hits
            .iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(SearchHitView::from)
            .collect();
        to_js(&views)
    }

    /// Flips a layer; `undefined` if it is not loaded.
    #[wasm_bindgen(js_name = toggleLayer)]
    pub fn toggle_layer(&mut self, kind: &str) -> Result<Option<bool>, JsError> {
        let kind = parse_kind(kind)?;
        let visible = self.layers.toggle(kind);
        if let Some(visible) = visible {
            self.selection.map_mut().set_layer_visible(kind, visible);
        }
        Ok(visible)
    }

    #[wasm_bindgen(js_name = isLayerVisible)]
    pub fn is_layer_visible(&self, kind: &str) -> Result<bool, JsError> {
        Ok(self.layers.is_visible(parse_kind(kind)?))
    }

    /// A feature was clicked on the map. Returns the detail ticket.
    #[wasm_bindgen(js_name = clickFeature)]
    pub fn click_feature(&mut self, kind: &str, id: FeatureId) -> Result<JsValue, JsError> {
        let key = FeatureKey::new(parse_kind(kind)?, id);
        let feature = self
            .layers
            .feature(key)
            .ok_or_else(|| JsError::new(&format!("feature {key} is not loaded")))?;
        let ticket = self.selection.on_map_click(feature);
        to_js(&ticket)
    }

    /// A search result was clicked. Returns the detail ticket.
    #[wasm_bindgen(js_name = selectSearchResult)]
    pub fn select_search_result(&mut self, kind: &str, id: FeatureId) -> Result<JsValue, JsError> {
        let key = FeatureKey::new(parse_kind(kind)?, id);
        let ticket = self
            .selection
            .on_search_result(key, &mut self.layers)
            .map_err(js_err)?;
        to_js(&ticket)
    }

    pub fn deselect(&mut self) {
        self.selection.deselect();
    }

    /// Delivers a fetched detail: `{sizeKm2, subFeatureCount, summary, url}`
    /// for regions, `{summary, url}` otherwise. Returns whether the panel
    /// changed.
    #[wasm_bindgen(js_name = completeDetail)]
    pub fn complete_detail(&mut self, ticket: JsValue, detail: JsValue) -> Result<bool, JsError> {
        let ticket: DetailTicket = serde_wasm_bindgen::from_value(ticket)?;
        let detail = match ticket.key().layer {
            LayerKind::Region => FeatureDetail::Region(serde_wasm_bindgen::from_value::<RegionDetail>(detail)?),
            _ => FeatureDetail::Summary(serde_wasm_bindgen::from_value::<FeatureSummary>(detail)?),
        };
        let changed = self.selection.complete_detail(ticket, Ok(detail));
        Ok(self.panel_changed(changed))
    }

    /// Reports a failed fetch. `notFound` picks the error shown.
    #[wasm_bindgen(js_name = failDetail)]
    pub fn fail_detail(&mut self, ticket: JsValue, message: String, not_found: bool) -> Result<bool, JsError> {
        let ticket: DetailTicket = serde_wasm_bindgen::from_value(ticket)?;
        let error = if not_found {
            GeoError::NotFound(message)
        } else {
            GeoError::Transport(message)
        };
        let changed = self.selection.complete_detail(ticket, Err(error));
        Ok(self.panel_changed(changed))
    }

    /// The info panel state.
    pub fn panel(&self) -> Result<JsValue, JsError> {
        to_js(self.selection.panel())
    }

    #[wasm_bindgen(js_name = panelText)]
    pub fn panel_text(&self) -> String {
        self.selection.panel().render_text()
    }

    /// `{state: "idle"}` or `{state: "featureSelected", feature: {layer, id}}`.
    pub fn selection(&self) -> Result<JsValue, JsError> {
        to_js(&self.selection.state())
    }

    #[wasm_bindgen(js_name = featureCount)]
    pub fn feature_count(&self) -> usize {
        self.layers.feature_count()
    }
}
