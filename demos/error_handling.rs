//! Error handling example for tripglobe-rs
//!
//! This example demonstrates proper error handling and edge cases

use tripglobe_core::loader::locations_from_json_str;
use tripglobe_core::prelude::*;
use tripglobe_core::{GlobeError, Result};

fn main() -> Result<()> {
    println!("=== tripglobe-rs Error Handling Example ===\n");

    // Example 1: Invalid configuration is rejected up front
    println!("--- Example 1: Degenerate hysteresis band ---");
    match GlobeConfig::from_json_str(r#"{ "continent_altitude_threshold": { "in": 2.0, "out": 1.5 } }"#) {
        Ok(_) => println!("unexpectedly accepted"),
        Err(GlobeError::InvalidConfig(msg)) => println!("✓ rejected: {msg}"),
        Err(e) => return Err(e),
    }
    println!();

    // Example 2: Missing files
    println!("--- Example 2: Missing configuration file ---");
    match GlobeConfig::load_from_path("does/not/exist.json") {
        Ok(_) => println!("unexpectedly found"),
        Err(e) => println!("✓ {e}"),
    }
    println!();

    // Example 3: Malformed records are skipped, not fatal
    println!("--- Example 3: Partially broken export ---");
    let locations = locations_from_json_str(
        r#"[
            { "country": "JPN", "city": "Tokyo", "lat": 35.68, "lng": 139.69 },
            { "country": "JPN", "city": "Nowhere", "lat": "north", "lng": 0 },
            { "country": "Atlantis", "city": "Poseidonia", "lat": 36.0, "lng": -25.0 }
        ]"#,
    )?;
    for l in &locations {
        println!("  kept {} ({})", l.display_name, l.country_code);
    }
    println!();

    // Example 4: Unknown ids and stale completions are no-ops
    println!("--- Example 4: Ignored events ---");
    let mut session = GlobeSession::new(locations, GlobeConfig::default())?;
    session.start();
    let cmds = session.dispatch(GlobeEvent::ClusterClicked {
        entry_id: "country:XXX".into(),
    });
    println!("  unknown id -> {} commands", cmds.len());
    let cmds = session.dispatch(GlobeEvent::CameraTransitionCompleted { generation: 42 });
    println!("  stale completion -> {} commands", cmds.len());
    let cmds = session.dispatch(GlobeEvent::BackRequested);
    println!("  back on empty stack -> {} commands", cmds.len());
    println!("  unknown bucket markers: {:?}", session
        .visible_entries()
        .iter()
        .map(|e| e.label())
        .collect::<Vec<_>>());

    Ok(())
}
