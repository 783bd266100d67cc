//! Error handling example for realmap-rs
//!
//! Shows which errors the store and the query services report, and how a
//! failed detail request leaves the selection in place.

use realmap_core::prelude::*;
use realmap_core::query::parse_id;

struct NoMap;

impl MapView for NoMap {
    fn set_layer_visible(&mut self, _kind: LayerKind, _visible: bool) {}
    fn highlight_region(&mut self, _region: Option<FeatureId>) {}
    fn close_popup(&mut self) {}
    fn focus(&mut self, _feature: &Feature) {}
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== realmap-rs Error Handling Example ===\n");

    // Example 1: Handling dataset load errors
    println!("--- Example 1: Loading a dataset that does not exist ---");
    match GeoStore::load_json("does/not/exist.json") {
        Ok(_) => println!("  unexpectedly loaded"),
        Err(e) => println!("  ✗ {e}"),
    }
    println!();

    let service = StoreQueryService::bundled()?;

    // Example 2: Unknown ids
    println!("--- Example 2: Looking up ids that are not in the store ---");
    for id in [7, 500] {
        match service.region_detail(id).await {
            Ok(d) => println!("  region {id}: {:.0} km², {} features", d.size_km2, d.sub_feature_count),
            Err(e) => println!("  region {id}: {e}"),
        }
    }
    println!();

    // Example 3: Validation happens before any lookup
    println!("--- Example 3: Rejecting malformed input ---");
    for raw in ["12", "-1", "1001", "twelve"] {
        match parse_id(raw) {
            Ok(id) => println!("  {raw:>6} -> id {id}"),
            Err(e) => println!("  {raw:>6} -> {e}"),
        }
    }
    for kind in ["Landmark", "castle"] {
        match kind.parse::<LayerKind>() {
            Ok(k) => println!("  {kind:>8} -> {k}"),
            Err(e) => println!("  {kind:>8} -> {e}"),
        }
    }
    println!();

    // Example 4: An unreachable backend
    println!("--- Example 4: Selecting against an unreachable backend ---");
    let offline = HttpQueryService::new(&ClientConfig::new("http://127.0.0.1:9/"))?;
    let mut session = MapSession::new(offline, NoMap);
    let loaded = session.load_map_data().await;
    println!("  Layers loaded: {}", loaded.len());
    match session.click_feature(FeatureKey::new(LayerKind::Region, 7)).await {
        Ok(panel) => println!("{}", panel.render_text()),
        Err(e) => println!("  ✗ {e} (nothing is loaded, so there is nothing to click)"),
    }

    Ok(())
}
