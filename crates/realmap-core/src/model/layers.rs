// crates/realmap-core/src/model/layers.rs
use super::{Feature, FeatureKey, LayerKind};
use std::collections::{BTreeMap, HashMap};

/// One map layer: its features and whether the map currently shows it.
#[derive(Clone, Debug, Default)]
pub struct Layer {
    features: Vec<Feature>,
    by_id: HashMap<u32, usize>,
    visible: bool,
}

impl Layer {
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Loaded layers keyed by layer type.
///
/// Only two things mutate it: loading features into a layer and changing a
/// layer's visibility.
#[derive(Clone, Debug, Default)]
pub struct LayerSet {
    layers: BTreeMap<LayerKind, Layer>,
}

impl LayerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds features to a layer, replacing features that share an id.
    ///
    /// A newly created layer starts hidden. Features whose `kind` differs from
    /// `kind` are re-tagged, the layer decides.
    pub fn insert_features(&mut self, kind: LayerKind, features: Vec<Feature>) -> &Layer {
        let layer = self.layers.entry(kind).or_default();
        for mut f in features {
            f.kind = kind;
            match layer.by_id.get(&f.id) {
                Some(&pos) => layer.features[pos] = f,
                None => {
                    layer.by_id.insert(f.id, layer.features.len());
                    layer.features.push(f);
                }
            }
        }
        layer
    }

    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.get(&kind)
    }

    pub fn is_loaded(&self, kind: LayerKind) -> bool {
        self.layers.contains_key(&kind)
    }

    pub fn is_visible(&self, kind: LayerKind) -> bool {
        self.layers.get(&kind).is_some_and(|l| l.visible)
    }

    /// Sets visibility; returns `true` if it changed. Unloaded layers are left
    /// alone and report `false`.
    pub fn set_visible(&mut self, kind: LayerKind, visible: bool) -> bool {
        match self.layers.get_mut(&kind) {
            Some(layer) if layer.visible != visible => {
                layer.visible = visible;
                true
            }
            _ => false,
        }
    }

    /// Flips visibility and returns the new state, `None` if not loaded.
    pub fn toggle(&mut self, kind: LayerKind) -> Option<bool> {
        let layer = self.layers.get_mut(&kind)?;
        layer.visible = !layer.visible;
        Some(layer.visible)
    }

    pub fn feature(&self, key: FeatureKey) -> Option<&Feature> {
        let layer = self.layers.get(&key.layer)?;
        layer.by_id.get(&key.id).map(|&pos| &layer.features[pos])
    }

    pub fn kinds(&self) -> impl Iterator<Item = LayerKind> + '_ {
        self.layers.keys().copied()
    }

    /// Total number of loaded features across all layers.
    pub fn feature_count(&self) -> usize {
        self.layers.values().map(Layer::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Geometry;

    fn point(id: u32, name: &str) -> Feature {
        Feature {
            id,
            name: name.into(),
            kind: LayerKind::Location,
            geometry: Geometry::Point([0.0, 0.0]),
            summary: String::new(),
            url: String::new(),
        }
    }

    #[test]
    fn insert_replaces_same_id() {
        let mut set = LayerSet::new();
        set.insert_features(LayerKind::Location, vec![point(1, "Winterfell")]);
        let layer = set.insert_features(LayerKind::Location, vec![point(1, "Winterfell Keep")]);
        assert_eq!(layer.len(), 1);
        assert_eq!(
            set.feature(FeatureKey::new(LayerKind::Location, 1)).unwrap().name,
            "Winterfell Keep"
        );
    }

    #[test]
    fn new_layers_start_hidden_and_toggle() {
        let mut set = LayerSet::new();
        assert_eq!(set.toggle(LayerKind::Landmark), None);
        set.insert_features(LayerKind::Landmark, vec![point(2, "The Wall")]);
        assert!(!set.is_visible(LayerKind::Landmark));
        assert_eq!(set.toggle(LayerKind::Landmark), Some(true));
        assert!(!set.set_visible(LayerKind::Landmark, true));
        assert!(set.set_visible(LayerKind::Landmark, false));
    }

    #[test]
    fn features_take_the_layer_kind() {
        let mut set = LayerSet::new();
        set.insert_features(LayerKind::Landmark, vec![point(3, "Moat Cailin")]);
        let f = set.feature(FeatureKey::new(LayerKind::Landmark, 3)).unwrap();
        assert_eq!(f.kind, LayerKind::Landmark);
        assert!(set.feature(FeatureKey::new(LayerKind::Location, 3)).is_none());
    }
}
