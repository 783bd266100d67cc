//! Search and select walkthrough for realmap-rs
//!
//! Loads the bundled dataset into a map session, searches it and selects a
//! few features the way the browser map does. Renderer instructions are
//! printed instead of drawn.

use realmap_core::prelude::*;

struct PrintMap;

impl MapView for PrintMap {
    fn set_layer_visible(&mut self, kind: LayerKind, visible: bool) {
        println!("  [map] {kind} layer visible: {visible}");
    }

    fn highlight_region(&mut self, region: Option<FeatureId>) {
        println!("  [map] highlighted region: {region:?}");
    }

    fn close_popup(&mut self) {
        println!("  [map] popup closed");
    }

    fn focus(&mut self, feature: &Feature) {
        println!("  [map] focus on {}", feature.name);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== realmap-rs Search & Select Example ===\n");

    let mut session = MapSession::new(StoreQueryService::bundled()?, PrintMap);

    println!("--- Example 1: Loading the map ---");
    let loaded = session.load_map_data().await;
    println!("  Loaded layers: {loaded:?}");
    println!("  Indexed names: {}", session.index().len());
    println!();

    println!("--- Example 2: Ranked search ---");
    for query in ["winter", "the", "ÅSSHAI", "  "] {
        let names: Vec<&str> = session
            .search(query)
            .iter()
            .map(|e| e.display_name.as_str())
            .collect();
        println!("  {query:?} -> {names:?}");
    }
    println!();

    println!("--- Example 3: Selecting a hidden landmark from the search bar ---");
    session.toggle_layer(LayerKind::Landmark);
    if let Some(entry) = session.search("the wall").first().map(|e| (*e).clone()) {
        let panel = session.select_search_result(&entry).await?;
        println!("{}", panel.render_text());
    }

    println!("--- Example 4: Clicking a region ---");
    let panel = session
        .click_feature(FeatureKey::new(LayerKind::Region, 7))
        .await?;
    println!("{}", panel.render_text());

    println!("--- Example 5: Deselecting ---");
    session.deselect();
    println!("  Selection: {:?}", session.selection().state());

    Ok(())
}
