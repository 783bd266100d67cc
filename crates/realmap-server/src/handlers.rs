use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use realmap_core::api::FeatureCollectionView;
use realmap_core::model::{Feature, Table};
use realmap_core::query::parse_id;
use realmap_core::{FeatureSummary, GeoError, LayerKind};
use std::sync::Arc;
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;

type Shared = State<Arc<AppState>>;

pub async fn status() -> Json<&'static str> {
    Json("Up")
}

/// Server local time, `yyyy-mm-dd HH:MM:ss`.
pub async fn time() -> Json<String> {
    Json(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string())
}

fn collection(kind: LayerKind, features: Vec<&Feature>) -> Result<Response, ApiError> {
    if features.is_empty() {
        return Err(GeoError::NotFound(format!("no {kind} features")).into());
    }
    debug!(layer = %kind, count = features.len(), "serving layer");
    Ok(Json(FeatureCollectionView(features)).into_response())
}

/// `/locations/{type}`: point features of one type.
pub async fn locations_by_type(State(state): Shared, Path(kind): Path<String>) -> Result<Response, ApiError> {
    let kind: LayerKind = kind.parse()?;
    // Regions live in their own table and are never listed here.
    let features = match kind {
        LayerKind::Region => Vec::new(),
        kind => state.store.features(kind),
    };
    collection(kind, features)
}

pub async fn location_summary(State(state): Shared, Path(id): Path<String>) -> Result<Json<FeatureSummary>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.summary(Table::Locations, id)?))
}

pub async fn regions(State(state): Shared) -> Result<Response, ApiError> {
    collection(LayerKind::Region, state.store.features(LayerKind::Region))
}

/// Region area in km².
pub async fn region_size(State(state): Shared, Path(id): Path<String>) -> Result<Json<f64>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.region_size_km2(id)?))
}

pub async fn region_summary(State(state): Shared, Path(id): Path<String>) -> Result<Json<FeatureSummary>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.summary(Table::Regions, id)?))
}

/// Number of locations and landmarks inside the region.
pub async fn region_areas(State(state): Shared, Path(id): Path<String>) -> Result<Json<usize>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.count_features_in_region(id)?))
}
