#![cfg(target_arch = "wasm32")]

use js_sys::{Function, Object, Reflect, JSON};
use realmap_wasm::RealmMap;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

const DATASET: &str = include_str!("../../realmap-core/data/realm.json");

fn callbacks() -> JsValue {
    let obj = Object::new();
    for (name, args) in [
        ("setLayerVisible", "kind, visible"),
        ("highlightRegion", "id"),
        ("closePopup", ""),
        ("focus", "feature"),
    ] {
        let f = Function::new_with_args(args, "");
        Reflect::set(&obj, &name.into(), &f).unwrap();
    }
    obj.into()
}

fn map() -> RealmMap {
    let mut map = RealmMap::new(callbacks()).unwrap();
    assert!(map.load_dataset(DATASET).unwrap() > 0);
    map
}

fn get(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &key.into()).unwrap()
}

#[wasm_bindgen_test]
fn search_ranks_winterfell_first() {
    let hits = map().search("winter", None).unwrap();
    let first = get(&hits, "0");
    assert_eq!(get(&first, "name").as_string().unwrap(), "Winterfell");
}

#[wasm_bindgen_test]
fn add_layer_accepts_a_feature_collection() {
    let mut map = RealmMap::new(callbacks()).unwrap();
    let listing = JSON::parse(
        r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","geometry":{"type":"Point","coordinates":[1,2]},
             "properties":{"name":"Pyke","type":"location","id":8}}]}"#,
    )
    .unwrap();
    assert_eq!(map.add_layer("location", listing).unwrap(), 1);
    assert!(map.is_layer_visible("location").unwrap());
}

#[wasm_bindgen_test]
fn stale_ticket_does_not_change_the_panel() {
    let mut map = map();
    let first = map.click_feature("location", 1).unwrap();
    let second = map.select_search_result("landmark", 16).unwrap();

    let detail = JSON::parse(r#"{"summary":"Old news","url":""}"#).unwrap();
    assert!(!map.complete_detail(first, detail).unwrap());

    let detail = JSON::parse(r#"{"summary":"Ice.","url":""}"#).unwrap();
    assert!(map.complete_detail(second, detail).unwrap());
    assert!(map.panel_text().contains("Ice."));
}

#[wasm_bindgen_test]
fn failed_detail_keeps_the_selection() {
    let mut map = map();
    let ticket = map.click_feature("region", 7).unwrap();
    assert!(map.fail_detail(ticket, "offline".into(), false).unwrap());
    assert!(map.panel_text().contains("Details unavailable"));
    let state = map.selection().unwrap();
    assert_eq!(get(&state, "state").as_string().unwrap(), "featureSelected");
}
