//! Basic usage example for tripglobe-rs
//!
//! This example demonstrates how to:
//! - Build locations and classify them by continent
//! - Cluster a trip at every display level
//! - Drive a session with zoom events, the way a renderer would

use tripglobe_core::prelude::*;
use tripglobe_core::{build_clusters, classify, stats, Result};

fn main() -> Result<()> {
    println!("=== tripglobe-rs Basic Usage Example ===\n");

    let trip = vec![
        Location::new("JPN", "Tokyo", 35.68, 139.69, "#e11d48"),
        Location::new("JPN", "Kyoto", 35.01, 135.77, "#e11d48"),
        Location::new("JPN", "Osaka", 34.69, 135.50, "#e11d48"),
        Location::new("KR", "Seoul", 37.57, 126.98, "#16a34a"),
        Location::new("FRA", "Paris", 48.85, 2.35, "#2563eb"),
        Location::new("PER", "Cusco", -13.53, -71.97, "#f59e0b"),
    ];

    // Example 1: Classification
    println!("--- Example 1: Classify country codes ---");
    for code in ["JPN", "kr", "FRA", "PER", "ZZZ"] {
        println!("{code:>4} -> {}", classify(code));
    }
    let s = stats(&trip);
    println!(
        "{} locations, {} countries, {} continents\n",
        s.locations, s.countries, s.continents
    );

    // Example 2: Clustering at each level
    println!("--- Example 2: Clusters per display mode ---");
    for mode in [DisplayMode::Continent, DisplayMode::Country] {
        println!("{mode:?}:");
        for e in build_clusters(&trip, mode, None) {
            println!("  {:<28} {}", e.id, e.label());
        }
    }
    println!("City (JPN):");
    for e in build_clusters(&trip, DisplayMode::City, Some("JPN")) {
        println!("  {:<28} {}", e.id, e.label());
    }
    println!();

    // Example 3: A session driven by zoom telemetry
    println!("--- Example 3: Zooming in and out ---");
    let mut session = GlobeSession::new(trip, GlobeConfig::default())?;
    session.start();
    for altitude in [2.5, 2.0, 1.8, 1.6, 1.9, 2.05, 2.2] {
        let cmds = session.dispatch(GlobeEvent::ZoomLevelChanged { altitude });
        let marker_updates = cmds
            .iter()
            .filter(|c| matches!(c, GlobeCommand::SetVisibleEntries { .. }))
            .count();
        println!(
            "altitude {altitude:.2} -> {:?} ({} markers, {} updates)",
            session.state().display_mode,
            session.visible_entries().len(),
            marker_updates
        );
    }

    Ok(())
}
