// crates/realmap-core/src/raw.rs
//! Raw input shapes, as they come from the dataset JSON and from the HTTP
//! API. Converted into the model in [`crate::model::convert`].
use serde::{Deserialize, Serialize};

use crate::model::Position;

/// GeoJSON geometry object (`{"type": "Point", "coordinates": [..]}`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeometryRaw {
    Point { coordinates: Position },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
}

/// One record of the `regions` or `locations` table.
#[derive(Clone, Debug, Deserialize)]
pub struct RecordRaw {
    pub gid: u32,
    pub name: String,
    /// Present on locations ("location", "landmark", any case).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    pub geometry: GeometryRaw,
    /// Region area in square metres.
    #[serde(default)]
    pub size: Option<f64>,
}

/// Top-level dataset file: `{ "regions": [...], "locations": [...] }`.
#[derive(Debug, Default, Deserialize)]
pub struct DatasetRaw {
    #[serde(default)]
    pub regions: Vec<RecordRaw>,
    #[serde(default)]
    pub locations: Vec<RecordRaw>,
}

/// `properties` of a GeoJSON feature served by the API.
#[derive(Clone, Debug, Deserialize)]
pub struct FeaturePropertiesRaw {
    pub id: u32,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// A GeoJSON feature served by the API.
#[derive(Clone, Debug, Deserialize)]
pub struct GeoJsonFeatureRaw {
    pub geometry: GeometryRaw,
    pub properties: FeaturePropertiesRaw,
}

/// A GeoJSON layer listing. Bare arrays of features are accepted too.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum LayerResponseRaw {
    Collection { features: Vec<GeoJsonFeatureRaw> },
    List(Vec<GeoJsonFeatureRaw>),
}

impl LayerResponseRaw {
    pub fn into_features(self) -> Vec<GeoJsonFeatureRaw> {
        match self {
            LayerResponseRaw::Collection { features } => features,
            LayerResponseRaw::List(features) => features,
        }
    }
}
