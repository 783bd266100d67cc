// crates/realmap-core/src/lib.rs

pub mod api; // JSON views
pub mod common;
pub mod config;
pub mod error;
pub mod loader; // dataset + bincode cache
pub mod model;
pub mod prelude;
pub mod query;
pub mod search;
pub mod selection;
pub mod session;
pub mod store;
pub mod text;
pub mod traits;
// Raw input shapes, shared by the loader and the HTTP client
#[doc(hidden)]
pub mod raw;

// Re-exports
pub use crate::common::{DbStats, FeatureDetail, FeatureSummary, RegionDetail};
pub use crate::error::{GeoError, Result};
pub use crate::model::{Feature, FeatureId, FeatureKey, Geometry, LayerKind, LayerSet};
pub use crate::search::{SearchEntry, SearchIndex};
pub use crate::selection::{DetailTicket, InfoPanel, SelectionCoordinator, SelectionState};
pub use crate::session::MapSession;
pub use crate::store::GeoStore;
pub use crate::traits::{MapView, QueryService};
