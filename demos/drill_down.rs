//! Drill-down example for tripglobe-rs
//!
//! A scripted renderer that completes every camera move instantly:
//! continent -> country -> city detail, then back out again.

use tripglobe_core::prelude::*;
use tripglobe_core::{apply_commands, Result};

#[derive(Default)]
struct PrintingRenderer {
    arrivals: Vec<u64>,
}

impl Projector for PrintingRenderer {
    fn project(&self, latitude: f64, longitude: f64) -> Option<ScreenPoint> {
        // Only the hemisphere facing 130°E is visible.
        let dlng = (longitude - 130.0 + 540.0) % 360.0 - 180.0;
        (dlng.abs() < 90.0).then(|| ScreenPoint::new(dlng * 8.0, -latitude * 8.0))
    }
}

impl GlobeRenderer for PrintingRenderer {
    fn set_visible_entries(&mut self, entries: &[ClusterEntry]) {
        let labels: Vec<String> = entries.iter().map(|e| e.label()).collect();
        println!("  markers: {}", labels.join(", "));
    }

    fn move_camera(&mut self, mv: &CameraMove) {
        println!(
            "  camera #{} -> ({:.2}, {:.2}) alt {:.2}",
            mv.generation, mv.pose.latitude, mv.pose.longitude, mv.pose.altitude
        );
        self.arrivals.push(mv.generation);
    }
}

struct PrintingNavigator;

impl Navigator for PrintingNavigator {
    fn navigate_to_city_detail(&mut self, city_name: &str, location_id: &str) {
        println!("  open city detail: {city_name} [{location_id}]");
    }
}

fn run(
    session: &mut GlobeSession,
    renderer: &mut PrintingRenderer,
    navigator: &mut PrintingNavigator,
    event: GlobeEvent,
) {
    println!("{event:?}");
    let cmds = session.dispatch(event);
    apply_commands(&cmds, renderer, navigator);
    // Instant renderer: every move arrives right away.
    while let Some(generation) = renderer.arrivals.pop() {
        let cmds = session.dispatch(GlobeEvent::CameraTransitionCompleted { generation });
        apply_commands(&cmds, renderer, navigator);
    }
}

fn main() -> Result<()> {
    println!("=== tripglobe-rs Drill-down Example ===\n");

    let trip = vec![
        Location::new("JPN", "Tokyo", 35.68, 139.69, "#e11d48").with_id("trip-1"),
        Location::new("JPN", "Kyoto", 35.01, 135.77, "#e11d48").with_id("trip-2"),
        Location::new("KOR", "Seoul", 37.57, 126.98, "#16a34a").with_id("trip-3"),
        Location::new("ITA", "Rome", 41.90, 12.50, "#2563eb").with_id("trip-4"),
    ];
    let mut session = GlobeSession::new(trip, GlobeConfig::default())?;
    let mut renderer = PrintingRenderer::default();
    let mut navigator = PrintingNavigator;

    let cmds = session.start();
    apply_commands(&cmds, &mut renderer, &mut navigator);

    let click = |id: &str| GlobeEvent::ClusterClicked {
        entry_id: id.to_string(),
    };
    run(&mut session, &mut renderer, &mut navigator, click("continent:asia"));
    run(&mut session, &mut renderer, &mut navigator, click("country:JPN"));

    let tokyo = session
        .visible_entries()
        .iter()
        .find(|e| e.display_name == "Tokyo")
        .map(|e| e.id.clone())
        .unwrap_or_default();
    run(&mut session, &mut renderer, &mut navigator, click(&tokyo));

    let frame = session.layout(&renderer);
    for p in &frame.placements {
        println!("  label {} {:?} {:.0}px", p.entry_id, p.side, p.distance);
    }

    run(&mut session, &mut renderer, &mut navigator, GlobeEvent::BackRequested);
    run(&mut session, &mut renderer, &mut navigator, GlobeEvent::BackRequested);

    let state = session.state();
    println!(
        "\nfinal: {:?}, stack depth {}",
        state.display_mode,
        state.drill_down_stack.len()
    );
    Ok(())
}
