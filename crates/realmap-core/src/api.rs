// crates/realmap-core/src/api.rs
//! JSON views over model types, as served by the HTTP API and handed to
//! JavaScript by the browser bindings.

use crate::model::{Feature, FeatureId, LayerKind};
use crate::raw::GeometryRaw;
use crate::search::{MatchKind, SearchHit};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

/// A feature as a GeoJSON `Feature` with `properties: {name, type, id}`.
pub struct FeatureView<'a>(pub &'a Feature);

#[derive(Serialize)]
struct PropertiesView<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: LayerKind,
    id: FeatureId,
}

impl Serialize for FeatureView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let f = self.0;
        let mut s = serializer.serialize_struct("Feature", 3)?;
        s.serialize_field("type", "Feature")?;
        s.serialize_field("geometry", &GeometryRaw::from(&f.geometry))?;
        s.serialize_field(
            "properties",
            &PropertiesView {
                name: &f.name,
                kind: f.kind,
                id: f.id,
            },
        )?;
        s.end()
    }
}

/// A layer listing as a GeoJSON `FeatureCollection`.
pub struct FeatureCollectionView<'a>(pub Vec<&'a Feature>);

impl Serialize for FeatureCollectionView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut m = serializer.serialize_map(Some(2))?;
        m.serialize_entry("type", "FeatureCollection")?;
        let features: Vec<FeatureView<'_>> = self.0.iter().map(|f| FeatureView(f)).collect();
        m.serialize_entry("features", &features)?;
        m.end()
    }
}

/// One search result row.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHitView<'a> {
    pub name: &'a str,
    pub feature_id: FeatureId,
    pub layer: LayerKind,
    pub rank: MatchKind,
}

impl<'a> From<&SearchHit<'a>> for SearchHitView<'a> {
    fn from(hit: &SearchHit<'a>) -> Self {
        Self {
            name: &hit.entry.display_name,
            feature_id: hit.entry.feature_id,
            layer: hit.entry.layer,
            rank: hit.rank,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::convert::feature_from_geojson;
    use crate::model::Geometry;
    use crate::raw::LayerResponseRaw;
    use serde_json::json;

    fn winterfell() -> Feature {
        Feature {
            id: 1,
            name: "Winterfell".into(),
            kind: LayerKind::Location,
            geometry: Geometry::Point([-2.5, 54.0]),
            summary: "Seat of House Stark.".into(),
            url: String::new(),
        }
    }

    #[test]
    fn feature_view_is_geojson() {
        let f = winterfell();
        let v = serde_json::to_value(FeatureView(&f)).unwrap();
        assert_eq!(
            v,
            json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-2.5, 54.0] },
                "properties": { "name": "Winterfell", "type": "location", "id": 1 }
            })
        );
    }

    #[test]
    fn collection_parses_back_as_a_layer_listing() {
        let f = winterfell();
        let body = serde_json::to_string(&FeatureCollectionView(vec![&f])).unwrap();
        let listing: LayerResponseRaw = serde_json::from_str(&body).unwrap();
        let parsed: Vec<Feature> = listing
            .into_features()
            .into_iter()
            .map(|raw| feature_from_geojson(raw, LayerKind::Location).unwrap())
            .collect();
        assert_eq!(parsed[0].name, "Winterfell");
        assert_eq!(parsed[0].geometry, f.geometry);
    }
}
