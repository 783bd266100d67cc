//! realmap prelude: brings the common types and traits into scope for demos
//! and downstream crates.

#![allow(unused_imports)]

pub use crate::common::{DbStats, FeatureDetail, FeatureSummary, RegionDetail};
pub use crate::config::ClientConfig;
pub use crate::error::{GeoError, Result};
pub use crate::model::{Feature, FeatureId, FeatureKey, Geometry, LayerKind, LayerSet};
#[cfg(feature = "http-client")]
pub use crate::query::HttpQueryService;
pub use crate::query::StoreQueryService;
pub use crate::search::{SearchEntry, SearchIndex};
pub use crate::selection::{InfoPanel, SelectionCoordinator, SelectionState};
pub use crate::session::MapSession;
pub use crate::store::GeoStore;
pub use crate::text::group_thousands;
pub use crate::traits::{MapView, QueryService};
