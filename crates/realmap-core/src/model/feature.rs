// crates/realmap-core/src/model/feature.rs
use super::geometry::Geometry;
use crate::error::{GeoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric feature id as allocated by the store (`gid`).
pub type FeatureId = u32;

/// The three map layers. Each one is toggled as a unit on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Region,
    Location,
    Landmark,
}

impl LayerKind {
    /// All layers in load order: regions first, then the point layers.
    pub const ALL: [LayerKind; 3] = [LayerKind::Region, LayerKind::Location, LayerKind::Landmark];

    /// The point layers served by `/locations/{type}`.
    pub const POINT_LAYERS: [LayerKind; 2] = [LayerKind::Location, LayerKind::Landmark];

    pub fn as_str(self) -> &'static str {
        match self {
            LayerKind::Region => "region",
            LayerKind::Location => "location",
            LayerKind::Landmark => "landmark",
        }
    }

    /// The store table that allocates ids for this layer.
    pub fn table(self) -> Table {
        match self {
            LayerKind::Region => Table::Regions,
            LayerKind::Location | LayerKind::Landmark => Table::Locations,
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayerKind {
    type Err = GeoError;

    /// Case-insensitive; anything else is a validation error.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "region" => Ok(LayerKind::Region),
            "location" => Ok(LayerKind::Location),
            "landmark" => Ok(LayerKind::Landmark),
            other => Err(GeoError::Validation(format!("unknown layer type `{other}`"))),
        }
    }
}

/// The two store tables. Ids are unique within a table only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Regions,
    Locations,
}

impl Table {
    pub fn as_str(self) -> &'static str {
        match self {
            Table::Regions => "regions",
            Table::Locations => "locations",
        }
    }
}

/// Identity of a feature: its layer plus its id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FeatureKey {
    pub layer: LayerKind,
    pub id: FeatureId,
}

impl FeatureKey {
    pub fn new(layer: LayerKind, id: FeatureId) -> Self {
        Self { layer, id }
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.layer, self.id)
    }
}

/// A named geographic entity. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: FeatureId,
    pub name: String,
    pub kind: LayerKind,
    pub geometry: Geometry,
    /// Empty when the layer listing does not carry it; fetched on demand.
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub url: String,
}

impl Feature {
    pub fn key(&self) -> FeatureKey {
        FeatureKey::new(self.kind, self.id)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn is_region(&self) -> bool {
        self.kind == LayerKind::Region
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_kind_parses_case_insensitively() {
        assert_eq!("Region".parse::<LayerKind>().unwrap(), LayerKind::Region);
        assert_eq!(" LANDMARK ".parse::<LayerKind>().unwrap(), LayerKind::Landmark);
    }

    #[test]
    fn unknown_layer_kind_is_a_validation_error() {
        let err = "castle".parse::<LayerKind>().unwrap_err();
        assert!(matches!(err, GeoError::Validation(_)));
    }

    #[test]
    fn point_layers_share_the_locations_table() {
        assert_eq!(LayerKind::Location.table(), Table::Locations);
        assert_eq!(LayerKind::Landmark.table(), Table::Locations);
        assert_eq!(LayerKind::Region.table(), Table::Regions);
    }
}
