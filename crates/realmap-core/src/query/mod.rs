// crates/realmap-core/src/query/mod.rs

//! # Query Services
//!
//! Implementations of [`crate::traits::QueryService`]:
//! - [`StoreQueryService`] answers from an in-process [`crate::GeoStore`].
//! - [`HttpQueryService`] (feature `http-client`) talks to `realmap-server`.
//!
//! Both reject ids outside `0..=MAX_FEATURE_ID` before doing any work.

use crate::config::MAX_FEATURE_ID;
use crate::error::{GeoError, Result};
use crate::model::FeatureId;

#[cfg(feature = "http-client")]
pub mod http;
pub mod local;
pub mod slots;

#[cfg(feature = "http-client")]
pub use http::HttpQueryService;
pub use local::StoreQueryService;
pub use slots::{RequestSlots, Resource};

/// Rejects ids above [`MAX_FEATURE_ID`].
pub fn validate_id(id: FeatureId) -> Result<FeatureId> {
    if id > MAX_FEATURE_ID {
        return Err(GeoError::Validation(format!(
            "id {id} is out of range 0..={MAX_FEATURE_ID}"
        )));
    }
    Ok(id)
}

/// Parses an id taken from a path or a command line.
pub fn parse_id(raw: &str) -> Result<FeatureId> {
    let id: i64 = raw
        .trim()
        .parse()
        .map_err(|_| GeoError::Validation(format!("'{raw}' is not an integer id")))?;
    let id = FeatureId::try_from(id).map_err(|_| {
        GeoError::Validation(format!("id {id} is out of range 0..={MAX_FEATURE_ID}"))
    })?;
    validate_id(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_bounded() {
        assert_eq!(validate_id(0).unwrap(), 0);
        assert_eq!(validate_id(1000).unwrap(), 1000);
        assert!(matches!(validate_id(1001), Err(GeoError::Validation(_))));
    }

    #[test]
    fn parse_id_rejects_garbage_and_negatives() {
        assert_eq!(parse_id(" 7 ").unwrap(), 7);
        assert!(matches!(parse_id("-1"), Err(GeoError::Validation(_))));
        assert!(matches!(parse_id("seven"), Err(GeoError::Validation(_))));
        assert!(matches!(parse_id("99999999999"), Err(GeoError::Validation(_))));
    }
}
