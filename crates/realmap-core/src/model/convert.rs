// crates/realmap-core/src/model/convert.rs
use super::{Feature, Geometry, LayerKind};
use crate::error::{GeoError, Result};
use crate::raw::{DatasetRaw, GeoJsonFeatureRaw, GeometryRaw, RecordRaw};
use crate::store::GeoStore;
use tracing::warn;

impl From<GeometryRaw> for Geometry {
    fn from(raw: GeometryRaw) -> Self {
        match raw {
            GeometryRaw::Point { coordinates } => Geometry::Point(coordinates),
            GeometryRaw::Polygon { coordinates } => Geometry::Polygon(coordinates),
            GeometryRaw::MultiPolygon { coordinates } => Geometry::MultiPolygon(coordinates),
        }
    }
}

impl From<&Geometry> for GeometryRaw {
    fn from(g: &Geometry) -> Self {
        match g {
            Geometry::Point(p) => GeometryRaw::Point { coordinates: *p },
            Geometry::Polygon(rings) => GeometryRaw::Polygon {
                coordinates: rings.clone(),
            },
            Geometry::MultiPolygon(polys) => GeometryRaw::MultiPolygon {
                coordinates: polys.clone(),
            },
        }
    }
}

fn record_to_feature(raw: RecordRaw, kind: LayerKind) -> Feature {
    Feature {
        id: raw.gid,
        name: raw.name,
        kind,
        geometry: raw.geometry.into(),
        summary: raw.summary.unwrap_or_default(),
        url: raw.url.unwrap_or_default(),
    }
}

/// **Standard Converter:** Raw dataset -> store.
///
/// Location records with a missing or unknown `type` are skipped with a
/// warning. Regions without a stored `size` get their area computed from the
/// polygon.
pub fn from_raw(raw: DatasetRaw) -> GeoStore {
    let mut regions = Vec::with_capacity(raw.regions.len());
    let mut region_sizes = Vec::with_capacity(raw.regions.len());

    for r in raw.regions {
        let stored_size = r.size;
        let feature = record_to_feature(r, LayerKind::Region);
        region_sizes.push(stored_size.unwrap_or_else(|| feature.geometry.area_m2()));
        regions.push(feature);
    }

    let mut locations = Vec::with_capacity(raw.locations.len());
    for l in raw.locations {
        let kind = match l.kind.as_deref().map(str::parse::<LayerKind>) {
            Some(Ok(kind)) if kind != LayerKind::Region => kind,
            _ => {
                warn!(gid = l.gid, name = %l.name, kind = ?l.kind, "skipping location with unusable type");
                continue;
            }
        };
        locations.push(record_to_feature(l, kind));
    }

    GeoStore::from_parts(regions, region_sizes, locations)
}

/// Converts one GeoJSON feature from a layer listing.
///
/// The listing for `/regions` carries no `type` property; point listings do,
/// and it has to agree with the layer that was requested.
pub fn feature_from_geojson(raw: GeoJsonFeatureRaw, layer: LayerKind) -> Result<Feature> {
    if let Some(kind) = raw.properties.kind.as_deref() {
        let kind: LayerKind = kind.parse()?;
        if kind != layer {
            return Err(GeoError::InvalidData(format!(
                "feature {} is a {kind}, expected {layer}",
                raw.properties.id
            )));
        }
    }
    Ok(Feature {
        id: raw.properties.id,
        name: raw.properties.name,
        kind: layer,
        geometry: raw.geometry.into(),
        summary: String::new(),
        url: String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::FeaturePropertiesRaw;

    fn dataset() -> DatasetRaw {
        serde_json::from_str(
            r#"{
              "regions": [
                { "gid": 7, "name": "The North", "summary": "Cold.", "url": "https://example.org/north",
                  "size": 1234000000,
                  "geometry": { "type": "Polygon", "coordinates": [[[0,0],[2,0],[2,2],[0,2],[0,0]]] } },
                { "gid": 8, "name": "The Reach",
                  "geometry": { "type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]] } }
              ],
              "locations": [
                { "gid": 1, "name": "Winterfell", "type": "Location",
                  "geometry": { "type": "Point", "coordinates": [1, 1] } },
                { "gid": 2, "name": "The Wall", "type": "landmark",
                  "geometry": { "type": "Point", "coordinates": [1, 1.9] } },
                { "gid": 3, "name": "Nowhere", "type": "castle",
                  "geometry": { "type": "Point", "coordinates": [5, 5] } }
              ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn converts_dataset_and_skips_unknown_types() {
        let store = from_raw(dataset());
        let stats = store.stats();
        assert_eq!(stats.regions, 2);
        assert_eq!(stats.locations, 1);
        assert_eq!(stats.landmarks, 1);
    }

    #[test]
    fn stored_size_wins_over_computed_area() {
        let store = from_raw(dataset());
        assert_eq!(store.region_size_m2(7).unwrap(), 1_234_000_000.0);
        let computed = store.region_size_m2(8).unwrap();
        assert!(computed > 1.2e10 && computed < 1.3e10, "got {computed}");
    }

    #[test]
    fn geojson_kind_must_match_requested_layer() {
        let raw = GeoJsonFeatureRaw {
            geometry: GeometryRaw::Point {
                coordinates: [0.0, 0.0],
            },
            properties: FeaturePropertiesRaw {
                id: 4,
                name: "Eyrie".into(),
                kind: Some("landmark".into()),
            },
        };
        assert!(feature_from_geojson(raw.clone(), LayerKind::Landmark).is_ok());
        assert!(matches!(
            feature_from_geojson(raw, LayerKind::Location),
            Err(GeoError::InvalidData(_))
        ));
    }
}
