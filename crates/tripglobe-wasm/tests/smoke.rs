use wasm_bindgen_test::*;

// Import the wasm functions from this crate
use tripglobe_wasm::{classify_country, WasmGlobe};

const TRIPS: &str = r##"[
    { "country": "JPN", "city": "Tokyo", "lat": 35.68, "lng": 139.69, "color": "#e11d48" },
    { "country": "JPN", "city": "Kyoto", "lat": 35.01, "lng": 135.77, "color": "#e11d48" },
    { "country": "KOR", "city": "Seoul", "lat": 37.57, "lng": 126.98, "color": "#16a34a" }
]"##;

fn globe() -> WasmGlobe {
    match WasmGlobe::new(TRIPS, None) {
        Ok(g) => g,
        Err(_) => panic!("globe should build from valid records"),
    }
}

#[wasm_bindgen_test]
fn classifies_country_codes() {
    assert_eq!(classify_country("jp"), "Asia");
    assert_eq!(classify_country("XYZ"), "Unknown");
}

#[wasm_bindgen_test]
fn continent_drill_down_waits_for_arrival() {
    let mut g = globe();
    assert_eq!(g.display_mode(), "Continent");
    assert_eq!(g.visible_count(), 1);

    let cmds = g
        .dispatch_json(r#"{"type":"ClusterClicked","entry_id":"continent:asia"}"#)
        .unwrap_or_default();
    assert!(cmds.contains("MoveCamera"));
    let generation = g.camera_in_flight().expect("camera move in flight");
    assert_eq!(g.display_mode(), "Continent");

    let done = format!(r#"{{"type":"CameraTransitionCompleted","generation":{generation}}}"#);
    let cmds = g.dispatch_json(&done).unwrap_or_default();
    assert!(cmds.contains("SetVisibleEntries"));
    assert_eq!(g.display_mode(), "Country");
    assert_eq!(g.visible_count(), 2);
    assert_eq!(g.camera_in_flight(), None);
}
