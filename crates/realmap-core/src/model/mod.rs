// crates/realmap-core/src/model/mod.rs
pub mod convert;
pub mod feature;
pub mod geometry;
pub mod layers;

pub use feature::{Feature, FeatureId, FeatureKey, LayerKind, Table};
pub use geometry::{Geometry, Position, Ring};
pub use layers::{Layer, LayerSet};

#[cfg(not(feature = "compact"))]
pub const CACHE_SUFFIX: &str = "bin";
#[cfg(feature = "compact")]
pub const CACHE_SUFFIX: &str = "comp.bin";
