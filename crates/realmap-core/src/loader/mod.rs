// crates/realmap-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer (I/O, decompression, bincode cache) and
//! delegates record conversion to [`crate::model::convert`].

use crate::error::{GeoError, Result};
use crate::model::{convert, CACHE_SUFFIX};
use crate::raw::DatasetRaw;
use crate::store::GeoStore;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub mod common_io;

// Single in-process cache so the bundled dataset is parsed once per process.
static STORE_CACHE: OnceCell<GeoStore> = OnceCell::new();

impl GeoStore {
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    pub fn default_dataset_filename() -> &'static str {
        "realm.json"
    }

    pub fn default_dataset_path() -> PathBuf {
        Self::default_data_dir().join(Self::default_dataset_filename())
    }

    /// Load the bundled dataset, once per process.
    ///
    /// The bundled file is parsed directly; no cache is written into the
    /// crate's `data` directory.
    pub fn load() -> Result<Self> {
        STORE_CACHE
            .get_or_try_init(|| Self::load_json(Self::default_dataset_path()))
            .cloned()
    }

    /// **Smart Load:** uses the bincode cache next to `path` when it is fresh,
    /// otherwise parses the JSON source and refreshes the cache.
    ///
    /// Cache failures are never fatal; the cache is an optimisation only.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let cache_path = common_io::get_cache_path(path, CACHE_SUFFIX);

        if common_io::is_cache_fresh(path, &cache_path) {
            match common_io::read_bincode::<GeoStore>(&cache_path) {
                Ok(store) => {
                    debug!(cache = %cache_path.display(), "loaded store from cache");
                    return Ok(store);
                }
                Err(e) => warn!(cache = %cache_path.display(), error = %e, "ignoring unreadable cache"),
            }
        }

        let store = Self::load_json(path)?;

        if let Err(e) = common_io::write_bincode(&cache_path, &store) {
            debug!(cache = %cache_path.display(), error = %e, "could not write cache");
        }

        Ok(store)
    }

    /// Parse a `.json` (or `.json.gz`) dataset without touching any cache.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = common_io::open_stream(path)?;
        let raw: DatasetRaw = serde_json::from_reader(reader)?;
        let store = convert::from_raw(raw);
        let stats = store.stats();
        info!(
            path = %path.display(),
            regions = stats.regions,
            locations = stats.locations,
            landmarks = stats.landmarks,
            "loaded dataset"
        );
        Ok(store)
    }

    /// Parse a dataset held in memory.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: DatasetRaw = serde_json::from_str(json)?;
        Ok(convert::from_raw(raw))
    }

    /// Write the bincode form of the store.
    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(GeoError::InvalidData("empty output path".into()));
        }
        common_io::write_bincode(path, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LayerKind;

    const DATASET: &str = r#"{
      "regions": [
        { "gid": 1, "name": "The Vale", "size": 5000000,
          "geometry": { "type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]] } }
      ],
      "locations": [
        { "gid": 1, "name": "The Eyrie", "type": "landmark",
          "geometry": { "type": "Point", "coordinates": [0.5, 0.5] } }
      ]
    }"#;

    #[test]
    fn load_from_path_writes_and_reuses_cache() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("realm.json");
        std::fs::write(&json, DATASET).unwrap();

        let first = GeoStore::load_from_path(&json).unwrap();
        let cache = common_io::get_cache_path(&json, CACHE_SUFFIX);
        assert!(cache.exists());

        let second = GeoStore::load_from_path(&json).unwrap();
        assert_eq!(first.stats(), second.stats());
        assert_eq!(second.features(LayerKind::Landmark)[0].name, "The Eyrie");
    }

    #[test]
    fn missing_dataset_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = GeoStore::load_json(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, GeoError::NotFound(_)));
    }

    #[cfg(feature = "compact")]
    #[test]
    fn reads_gzip_datasets() {
        use flate2::{write::GzEncoder, Compression};
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("realm.json.gz");
        let mut enc = GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::default());
        enc.write_all(DATASET.as_bytes()).unwrap();
        enc.finish().unwrap();

        let store = GeoStore::load_json(&path).unwrap();
        assert_eq!(store.stats().regions, 1);
    }

    #[test]
    fn bundled_dataset_loads() {
        let store = GeoStore::load().unwrap();
        assert!(store.stats().regions > 0);
        assert!(store.stats().locations > 0);
        assert!(store.stats().landmarks > 0);

        let cache = common_io::get_cache_path(&GeoStore::default_dataset_path(), CACHE_SUFFIX);
        assert!(!cache.exists(), "bundled load wrote {}", cache.display());
    }
}
