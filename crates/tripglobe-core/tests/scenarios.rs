// crates/tripglobe-core/tests/scenarios.rs

use tripglobe_core::prelude::*;
use tripglobe_core::{build_clusters, ClusteringState, LabelPhase};

fn asia_trip() -> Vec<Location> {
    vec![
        Location::new("JPN", "Tokyo", 35.68, 139.69, "#e11d48"),
        Location::new("JPN", "Kyoto", 35.01, 135.77, "#e11d48"),
        Location::new("JPN", "Osaka", 34.69, 135.50, "#e11d48"),
        Location::new("KOR", "Seoul", 37.57, 126.98, "#16a34a"),
        Location::new("KOR", "Busan", 35.18, 129.08, "#16a34a"),
    ]
}

fn world_trip() -> Vec<Location> {
    let mut locs = asia_trip();
    locs.extend([
        Location::new("FRA", "Paris", 48.85, 2.35, "#2563eb"),
        Location::new("ITA", "Rome", 41.90, 12.50, "#2563eb"),
        Location::new("PER", "Cusco", -13.53, -71.97, "#f59e0b"),
    ]);
    locs
}

fn session_with(locations: Vec<Location>, config: GlobeConfig) -> GlobeSession {
    let mut s = GlobeSession::new(locations, config).expect("valid config");
    s.start();
    s
}

fn click(s: &mut GlobeSession, id: &str) -> Vec<GlobeCommand> {
    s.dispatch(GlobeEvent::ClusterClicked {
        entry_id: id.to_string(),
    })
}

fn camera_moves(cmds: &[GlobeCommand]) -> Vec<CameraMove> {
    cmds.iter()
        .filter_map(|c| match c {
            GlobeCommand::MoveCamera(mv) => Some(*mv),
            _ => None,
        })
        .collect()
}

/// Report arrival of every move in `cmds`, like a renderer would.
fn arrive(s: &mut GlobeSession, cmds: &[GlobeCommand]) -> Vec<GlobeCommand> {
    let mut out = Vec::new();
    for mv in camera_moves(cmds) {
        out.extend(s.dispatch(GlobeEvent::CameraTransitionCompleted {
            generation: mv.generation,
        }));
    }
    out
}

/// Tiny deterministic generator for location sets.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}

fn generated_trip(seed: u64, len: usize) -> Vec<Location> {
    const CODES: [&str; 10] = ["JPN", "jp", "KOR", "FRA", "fr", "DEU", "BRA", "AUS", "USA", "ZZZ"];
    let mut rng = Lcg(seed);
    (0..len)
        .map(|i| {
            let code = CODES[(rng.next() % CODES.len() as u64) as usize];
            let lat = (rng.next() % 180) as f64 - 90.0;
            let lng = (rng.next() % 360) as f64 - 180.0;
            Location::new(code, format!("Place {i}"), lat, lng, "#000000")
        })
        .collect()
}

// -----------------------------------------------------------------------------
// grouping
// -----------------------------------------------------------------------------

#[test]
fn every_location_lands_in_exactly_one_country_cluster() {
    for seed in 0..20 {
        let locs = generated_trip(seed, 1 + seed as usize * 3);
        let entries = build_clusters(&locs, DisplayMode::Country, None);
        let total: usize = entries.iter().map(|e| e.member_count).sum();
        assert_eq!(total, locs.len(), "seed {seed}");
        assert!(entries.iter().all(|e| e.member_count == e.members.len()));
    }
}

#[test]
fn continent_cluster_counts_distinct_member_countries() {
    for seed in 0..20 {
        let locs = generated_trip(seed, 25);
        for entry in build_clusters(&locs, DisplayMode::Continent, None) {
            let mut codes: Vec<String> = entry
                .members
                .iter()
                .map(|l| tripglobe_core::continent::canonical_code(&l.country_code))
                .collect();
            codes.sort();
            codes.dedup();
            assert_eq!(entry.distinct_countries, codes.len(), "{}", entry.id);
        }
    }
}

#[test]
fn asia_trip_groups_by_continent_and_country() {
    let locs = asia_trip();
    let continents = build_clusters(&locs, DisplayMode::Continent, None);
    assert_eq!(continents.len(), 1);
    assert!(continents[0].display_name.contains("Asia"));
    assert_eq!(continents[0].distinct_countries, 2);

    let countries = build_clusters(&locs, DisplayMode::Country, None);
    let summary: Vec<(&str, usize)> = countries
        .iter()
        .map(|e| (e.display_name.as_str(), e.member_count))
        .collect();
    assert_eq!(summary, [("Japan", 3), ("South Korea", 2)]);
}

// -----------------------------------------------------------------------------
// zoom hysteresis
// -----------------------------------------------------------------------------

#[test]
fn zooming_out_switches_to_continents_once_past_the_exit_bound() {
    let cfg = GlobeConfig {
        default_display_mode: DisplayMode::Country,
        default_altitude: 1.0,
        ..GlobeConfig::default()
    };
    let exit = cfg.continent_altitude_threshold.exit;
    let mut s = session_with(world_trip(), cfg);

    let mut switches = Vec::new();
    let mut previous = s.state().display_mode;
    for step in 0..=60 {
        let altitude = 1.0 + step as f64 * 0.05;
        s.dispatch(GlobeEvent::ZoomLevelChanged { altitude });
        let mode = s.state().display_mode;
        if mode != previous {
            switches.push((altitude, mode));
            previous = mode;
        }
    }
    assert_eq!(switches.len(), 1);
    assert_eq!(switches[0].1, DisplayMode::Continent);
    assert!(switches[0].0 >= exit);
}

#[test]
fn jitter_around_a_threshold_flips_at_most_once() {
    let cfg = GlobeConfig::default();
    let band = cfg.continent_altitude_threshold;
    for pivot in [band.enter, band.exit, (band.enter + band.exit) / 2.0] {
        let mut s = session_with(world_trip(), cfg.clone());
        let mut flips = 0;
        let mut previous = s.state().display_mode;
        for i in 0..100 {
            let jitter = if i % 2 == 0 { 0.01 } else { -0.01 };
            s.dispatch(GlobeEvent::ZoomLevelChanged {
                altitude: pivot + jitter,
            });
            if s.state().display_mode != previous {
                flips += 1;
                previous = s.state().display_mode;
            }
        }
        assert!(flips <= 1, "pivot {pivot}: {flips} flips");
    }
}

// -----------------------------------------------------------------------------
// drill-down
// -----------------------------------------------------------------------------

/// Continent -> Asia -> Japan, with every camera move completed.
fn drilled_into_japan() -> GlobeSession {
    let mut s = session_with(asia_trip(), GlobeConfig::default());
    let cmds = click(&mut s, "continent:asia");
    arrive(&mut s, &cmds);
    assert_eq!(s.state().display_mode, DisplayMode::Country);
    let cmds = click(&mut s, "country:JPN");
    arrive(&mut s, &cmds);
    s
}

#[test]
fn country_click_expands_cities_immediately() {
    let mut s = session_with(asia_trip(), GlobeConfig::default());
    let cmds = click(&mut s, "continent:asia");
    arrive(&mut s, &cmds);

    click(&mut s, "country:JPN");
    assert_eq!(s.state().display_mode, DisplayMode::City);
    assert_eq!(s.state().expanded_country_code.as_deref(), Some("JPN"));

    let cities = build_clusters(s.locations(), DisplayMode::City, Some("JPN"));
    assert_eq!(cities.len(), 3);
    assert!(cities.iter().all(|e| e.kind == ClusterKind::IndividualCity));
    assert_eq!(s.visible_entries(), &cities[..]);
}

#[test]
fn panning_away_from_an_expanded_country_backs_out() {
    let mut s = drilled_into_japan();
    let depth = s.state().drill_down_stack.len();
    let threshold = s.config().rotation_significance_threshold;
    let here = s.state().last_known_rotation;

    s.dispatch(GlobeEvent::GlobeRotated {
        latitude: here.latitude,
        longitude: here.longitude + threshold * 3.0,
    });
    assert_eq!(s.state().display_mode, DisplayMode::Country);
    assert_eq!(s.state().expanded_country_code, None);
    assert_eq!(s.state().drill_down_stack.len(), depth - 1);
}

#[test]
fn small_pans_keep_the_expanded_country() {
    let mut s = drilled_into_japan();
    let here = s.state().last_known_rotation;
    for i in 1..=5 {
        s.dispatch(GlobeEvent::GlobeRotated {
            latitude: here.latitude,
            longitude: here.longitude + i as f64,
        });
    }
    assert_eq!(s.state().display_mode, DisplayMode::City);
}

#[test]
fn back_steps_undo_every_drill_down() {
    let cfg = GlobeConfig::default();
    let initial = ClusteringState::initial(&cfg).snapshot();

    // Two levels, undone by two explicit backs.
    let mut s = drilled_into_japan();
    for _ in 0..2 {
        let cmds = s.dispatch(GlobeEvent::BackRequested);
        arrive(&mut s, &cmds);
    }
    assert!(s.state().drill_down_stack.is_empty());
    assert_eq!(s.state().snapshot(), initial);

    // Same, with the first level undone by a pan instead.
    let mut s = drilled_into_japan();
    let here = s.state().last_known_rotation;
    s.dispatch(GlobeEvent::GlobeRotated {
        latitude: -here.latitude,
        longitude: here.longitude - 90.0,
    });
    let cmds = s.dispatch(GlobeEvent::BackRequested);
    arrive(&mut s, &cmds);
    assert!(s.state().drill_down_stack.is_empty());
    assert_eq!(s.state().snapshot(), initial);
    assert_eq!(s.state().display_mode, cfg.default_display_mode);

    // Extra backs are harmless.
    assert!(s.dispatch(GlobeEvent::BackRequested).is_empty());
}

#[test]
fn back_restores_zoom_level_together_with_selection() {
    let mut s = drilled_into_japan();
    let frame_altitude = s.state().drill_down_stack[1].altitude;
    let cmds = s.dispatch(GlobeEvent::BackRequested);
    let moves = camera_moves(&cmds);
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].pose.altitude, frame_altitude);
    assert_eq!(s.state().display_mode, DisplayMode::Country);
}

// -----------------------------------------------------------------------------
// camera
// -----------------------------------------------------------------------------

#[test]
fn second_continent_click_supersedes_the_first() {
    let mut s = session_with(world_trip(), GlobeConfig::default());
    let first = camera_moves(&click(&mut s, "continent:asia"))[0];
    let second = camera_moves(&click(&mut s, "continent:europe"))[0];
    assert!(second.generation > first.generation);
    assert_eq!(s.state().drill_down_stack.len(), 1);

    s.dispatch(GlobeEvent::CameraTransitionCompleted {
        generation: first.generation,
    });
    assert_eq!(s.state().display_mode, DisplayMode::Continent);
    assert!(s.state().is_camera_animating);

    s.dispatch(GlobeEvent::CameraTransitionCompleted {
        generation: second.generation,
    });
    assert_eq!(s.state().display_mode, DisplayMode::Country);
    assert_eq!(
        s.state().selected_cluster_id.as_deref(),
        Some("continent:europe")
    );

    // A late duplicate changes nothing.
    let before = s.state().clone();
    assert!(s
        .dispatch(GlobeEvent::CameraTransitionCompleted {
            generation: first.generation,
        })
        .is_empty());
    assert_eq!(s.state(), &before);
}

#[test]
fn arrival_does_not_count_as_a_user_pan() {
    let mut s = drilled_into_japan();
    // The focus move ended exactly where the baseline now sits.
    let here = s.state().last_known_rotation;
    s.dispatch(GlobeEvent::GlobeRotated {
        latitude: here.latitude,
        longitude: here.longitude,
    });
    assert_eq!(s.state().display_mode, DisplayMode::City);
}

#[test]
fn reset_beats_a_pending_transition() {
    let mut s = session_with(world_trip(), GlobeConfig::default());
    let drill = camera_moves(&click(&mut s, "continent:asia"))[0];
    let reset = camera_moves(&s.dispatch(GlobeEvent::ResetRequested))[0];
    s.dispatch(GlobeEvent::CameraTransitionCompleted {
        generation: drill.generation,
    });
    assert_eq!(s.state().display_mode, DisplayMode::Continent);
    s.dispatch(GlobeEvent::CameraTransitionCompleted {
        generation: reset.generation,
    });
    assert!(!s.state().is_camera_animating);
    assert_eq!(s.state().current_altitude, s.config().default_altitude);
}

// -----------------------------------------------------------------------------
// labels
// -----------------------------------------------------------------------------

fn flat(lat: f64, lng: f64) -> Option<ScreenPoint> {
    Some(ScreenPoint::new(lng * 4.0, -lat * 4.0))
}

#[test]
fn labels_stay_frozen_while_the_camera_moves() {
    let mut s = session_with(world_trip(), GlobeConfig::default());
    let before = s.layout(&flat);
    assert!(before.placements.iter().all(|p| !p.is_frozen));

    click(&mut s, "continent:asia");
    let mut frames = Vec::new();
    for altitude in [2.2, 1.9, 1.6, 1.3] {
        s.dispatch(GlobeEvent::ZoomLevelChanged { altitude });
        frames.push(s.layout(&flat));
    }
    for frame in &frames {
        assert_eq!(frame.entries, before.entries);
        assert!(frame.placements.iter().all(|p| p.is_frozen));
    }
}

#[test]
fn close_zoom_keeps_label_positions() {
    let mut s = drilled_into_japan();
    s.dispatch(GlobeEvent::ZoomLevelChanged { altitude: 0.5 });
    assert_eq!(s.state().label_phase, LabelPhase::Close);

    let first = s.layout(&flat);
    let shifted = |lat: f64, lng: f64| Some(ScreenPoint::new(lng * 40.0, -lat * 40.0));
    let second = s.layout(&shifted);
    assert_eq!(
        first.placements.iter().map(|p| p.distance).collect::<Vec<_>>(),
        second.placements.iter().map(|p| p.distance).collect::<Vec<_>>()
    );
}
