// crates/realmap-core/src/loader/common_io.rs
use crate::error::{GeoError, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

/// Opens a dataset file, unwrapping gzip when the name ends in `.gz`.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        GeoError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    if is_gzip(path) {
        #[cfg(feature = "compact")]
        {
            return Ok(Box::new(GzDecoder::new(reader)));
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(GeoError::InvalidData(format!(
                "{} is gzip-compressed but 'compact' is disabled",
                path.display()
            )));
        }
    }

    Ok(Box::new(reader))
}

/// `realm.json` -> `realm.json.<suffix>`, next to the source.
pub fn get_cache_path(json_path: &Path, suffix: &str) -> PathBuf {
    let filename = json_path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());
    json_path.with_file_name(format!("{filename}.{suffix}"))
}

/// `true` when the cache exists and is at least as new as the source.
pub fn is_cache_fresh(source: &Path, cache: &Path) -> bool {
    let cache_time = match std::fs::metadata(cache).and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(_) => return false,
    };
    match std::fs::metadata(source).and_then(|m| m.modified()) {
        Ok(source_time) => source_time <= cache_time,
        Err(_) => true,
    }
}

/// Writes any serializable value as bincode, gzip-wrapped under `compact`.
pub fn write_bincode<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    #[cfg(feature = "compact")]
    {
        let mut encoder = GzEncoder::new(writer, Compression::default());
        bincode::serialize_into(&mut encoder, value)?;
        encoder.finish()?.flush()?;
    }

    #[cfg(not(feature = "compact"))]
    {
        let mut writer = writer;
        bincode::serialize_into(&mut writer, value)?;
        writer.flush()?;
    }

    Ok(())
}

/// Reads a value written by [`write_bincode`].
pub fn read_bincode<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    #[cfg(feature = "compact")]
    let mut decoder: Box<dyn Read> = Box::new(GzDecoder::new(reader));
    #[cfg(not(feature = "compact"))]
    let mut decoder: Box<dyn Read> = Box::new(reader);

    let mut bytes = Vec::new();
    decoder.read_to_end(&mut bytes)?;
    Ok(bincode::deserialize(&bytes)?)
}
