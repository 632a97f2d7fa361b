// crates/tripglobe-core/src/session.rs

//! # Globe Session
//!
//! One interactive globe view: the location store, the clustering state
//! machine, the label engine and the event queue, owned together. Nothing is
//! shared between sessions.
//!
//! Events are handled one at a time in arrival order. A click on a country
//! or a city, and an explicit back, that arrive while the camera is moving
//! are held back and replayed in order once the move completes. Continent
//! clicks are the exception: they supersede the move in flight.
//!
//! ```rust
//! use tripglobe_core::prelude::*;
//!
//! let locations = vec![
//!     Location::new("JPN", "Tokyo", 35.68, 139.69, "#e11d48"),
//!     Location::new("KOR", "Seoul", 37.57, 126.98, "#16a34a"),
//! ];
//! let mut session = GlobeSession::new(locations, GlobeConfig::default()).unwrap();
//! session.start();
//!
//! let cmds = session.dispatch(GlobeEvent::ClusterClicked { entry_id: "continent:asia".into() });
//! let GlobeCommand::MoveCamera(mv) = &cmds[0] else { panic!("expected a camera move") };
//!
//! // The renderer reports arrival; only now does the globe switch to countries.
//! session.dispatch(GlobeEvent::CameraTransitionCompleted { generation: mv.generation });
//! assert_eq!(session.state().display_mode, DisplayMode::Country);
//! assert_eq!(session.visible_entries().len(), 2);
//! ```

use std::collections::VecDeque;

use crate::camera::CameraMove;
use crate::cluster::{self, build_clusters};
use crate::config::GlobeConfig;
use crate::error::Result;
use crate::labels::{LabelFrame, LabelLayoutEngine, Projector};
use crate::machine::{ClusteringMachine, ClusteringState, GlobeCommand, GlobeEvent};
use crate::model::{ClusterEntry, ClusterKind, DisplayMode, Location, TripStats};

// -----------------------------------------------------------------------------
// COLLABORATORS
// -----------------------------------------------------------------------------

/// The external 3D globe.
///
/// After performing a [`CameraMove`] the renderer must dispatch
/// `GlobeEvent::CameraTransitionCompleted` with the move's generation.
pub trait GlobeRenderer: Projector {
    fn set_visible_entries(&mut self, entries: &[ClusterEntry]);
    fn move_camera(&mut self, mv: &CameraMove);
}

/// Receives "open this city" requests.
pub trait Navigator {
    fn navigate_to_city_detail(&mut self, city_name: &str, location_id: &str);
}

/// Hand a batch of commands to the collaborators, in order.
pub fn apply_commands<R, N>(commands: &[GlobeCommand], renderer: &mut R, navigator: &mut N)
where
    R: GlobeRenderer + ?Sized,
    N: Navigator + ?Sized,
{
    for cmd in commands {
        match cmd {
            GlobeCommand::SetVisibleEntries { entries } => renderer.set_visible_entries(entries),
            GlobeCommand::MoveCamera(mv) => renderer.move_camera(mv),
            GlobeCommand::NavigateToCityDetail {
                city_name,
                location_id,
            } => navigator.navigate_to_city_detail(city_name, location_id),
        }
    }
}

// -----------------------------------------------------------------------------
// SESSION
// -----------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct GlobeSession {
    locations: Vec<Location>,
    machine: ClusteringMachine,
    labels: LabelLayoutEngine,
    /// Entries for the current mode, cached by `(mode, expanded country)`.
    visible: Vec<ClusterEntry>,
    visible_key: Option<(DisplayMode, Option<String>)>,
    /// Last set sent with `SetVisibleEntries`.
    published: Option<Vec<ClusterEntry>>,
    inbox: VecDeque<Queued>,
    held: VecDeque<Queued>,
}

/// Work waiting in the session queues. Held clicks keep the entry they were
/// resolved to, since the marker set they came from may be gone on replay.
#[derive(Debug, Clone)]
enum Queued {
    Event(GlobeEvent),
    Click(ClusterEntry),
}

impl GlobeSession {
    /// Create a session; the configuration is validated first.
    pub fn new(locations: Vec<Location>, config: GlobeConfig) -> Result<Self> {
        config.validate()?;
        let labels = LabelLayoutEngine::new(config.labels);
        let mut session = Self {
            locations,
            machine: ClusteringMachine::new(config),
            labels,
            visible: Vec::new(),
            visible_key: None,
            published: None,
            inbox: VecDeque::new(),
            held: VecDeque::new(),
        };
        session.recompute_visible();
        Ok(session)
    }

    /// Initial commands for the renderer: the markers of the default mode.
    pub fn start(&mut self) -> Vec<GlobeCommand> {
        let mut out = Vec::new();
        self.publish(&mut out);
        out
    }

    /// Feed one event and collect the resulting commands.
    pub fn dispatch(&mut self, event: GlobeEvent) -> Vec<GlobeCommand> {
        self.inbox.push_back(Queued::Event(event));
        let mut out = Vec::new();
        while let Some(item) = self.inbox.pop_front() {
            let cmds = match item {
                Queued::Event(ev) => self.process(ev),
                Queued::Click(entry) => self.click(entry),
            };
            out.extend(cmds);
            self.recompute_visible();
            self.publish(&mut out);
        }
        out
    }

    /// Swap in a new location set (pattern switch): state is reset.
    pub fn replace_locations(&mut self, locations: Vec<Location>) -> Vec<GlobeCommand> {
        log::debug!("replacing {} locations with {}", self.locations.len(), locations.len());
        self.locations = locations;
        self.machine.reset_silently();
        self.labels.clear();
        self.inbox.clear();
        self.held.clear();
        self.visible_key = None;
        self.recompute_visible();
        let mut out = Vec::new();
        self.publish(&mut out);
        out
    }

    /// Label placement for the current frame.
    pub fn layout(&mut self, projector: &dyn Projector) -> LabelFrame {
        let animating = self.machine.is_animating();
        let phase = self.machine.state().label_phase;
        self.labels.layout(&self.visible, animating, phase, projector)
    }

    pub fn state(&self) -> &ClusteringState {
        self.machine.state()
    }

    pub fn config(&self) -> &GlobeConfig {
        self.machine.config()
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Entries of the current display mode (not frozen by animations).
    pub fn visible_entries(&self) -> &[ClusterEntry] {
        &self.visible
    }

    /// Generation of the camera move the renderer is expected to complete.
    pub fn camera_in_flight(&self) -> Option<u64> {
        self.machine.camera_in_flight()
    }

    /// Number of events waiting for the camera to arrive.
    pub fn held_events(&self) -> usize {
        self.held.len()
    }

    pub fn stats(&self) -> TripStats {
        cluster::stats(&self.locations)
    }

    // -------------------------------------------------------------------------
    // internals
    // -------------------------------------------------------------------------

    fn process(&mut self, event: GlobeEvent) -> Vec<GlobeCommand> {
        match event {
            GlobeEvent::ZoomLevelChanged { altitude } => self.machine.on_zoom(altitude),
            GlobeEvent::GlobeRotated {
                latitude,
                longitude,
            } => self.machine.on_rotate(latitude, longitude),
            GlobeEvent::ClusterClicked { entry_id } => {
                let Some(entry) = self.find_entry(&entry_id).cloned() else {
                    log::warn!("click on unknown cluster id {entry_id:?} ignored");
                    return Vec::new();
                };
                self.click(entry)
            }
            GlobeEvent::CameraTransitionCompleted { generation } => {
                let out = self.machine.on_camera_completed(generation);
                if !self.machine.is_animating() {
                    // Replay held events ahead of anything that arrived later.
                    while let Some(item) = self.held.pop_back() {
                        self.inbox.push_front(item);
                    }
                }
                out
            }
            GlobeEvent::BackRequested => {
                if self.machine.is_animating() {
                    log::debug!("holding back request until the camera arrives");
                    self.held.push_back(Queued::Event(GlobeEvent::BackRequested));
                    return Vec::new();
                }
                self.machine.on_back()
            }
            GlobeEvent::ResetRequested => {
                if !self.held.is_empty() {
                    log::debug!("reset drops {} held events", self.held.len());
                    self.held.clear();
                }
                self.labels.clear();
                self.machine.on_reset()
            }
        }
    }

    fn click(&mut self, entry: ClusterEntry) -> Vec<GlobeCommand> {
        if self.machine.is_animating() && entry.kind != ClusterKind::ContinentCluster {
            log::debug!("holding click on {} until the camera arrives", entry.id);
            self.held.push_back(Queued::Click(entry));
            return Vec::new();
        }
        self.machine.on_cluster_clicked(&entry)
    }

    fn find_entry(&self, id: &str) -> Option<&ClusterEntry> {
        self.visible
            .iter()
            .chain(self.published.iter().flatten())
            .find(|e| e.id == id)
    }

    fn recompute_visible(&mut self) {
        let st = self.machine.state();
        let key = (st.display_mode, st.expanded_country_code.clone());
        if self.visible_key.as_ref() == Some(&key) {
            return;
        }
        self.visible = build_clusters(&self.locations, key.0, key.1.as_deref());
        log::debug!("{:?} mode: {} entries", key.0, self.visible.len());
        self.visible_key = Some(key);
    }

    /// Send the mode-driven set unless a camera move is still running.
    fn publish(&mut self, out: &mut Vec<GlobeCommand>) {
        if self.machine.is_animating() || self.published.as_ref() == Some(&self.visible) {
            return;
        }
        self.published = Some(self.visible.clone());
        out.push(GlobeCommand::SetVisibleEntries {
            entries: self.visible.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GlobeSession {
        let locs = vec![
            Location::new("JPN", "Tokyo", 35.68, 139.69, "#e11d48"),
            Location::new("JPN", "Kyoto", 35.01, 135.77, "#e11d48"),
            Location::new("FRA", "Paris", 48.85, 2.35, "#2563eb"),
        ];
        GlobeSession::new(locs, GlobeConfig::default()).unwrap()
    }

    fn move_of(cmds: &[GlobeCommand]) -> CameraMove {
        cmds.iter()
            .find_map(|c| match c {
                GlobeCommand::MoveCamera(mv) => Some(*mv),
                _ => None,
            })
            .expect("camera move")
    }

    #[test]
    fn start_publishes_default_mode() {
        let mut s = session();
        let cmds = s.start();
        assert!(matches!(&cmds[..], [GlobeCommand::SetVisibleEntries { entries }] if entries.len() == 2));
        assert!(s.start().is_empty());
    }

    #[test]
    fn rejects_invalid_config() {
        let cfg = GlobeConfig {
            rotation_smoothing: 0.0,
            ..GlobeConfig::default()
        };
        assert!(GlobeSession::new(Vec::new(), cfg).is_err());
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut s = session();
        s.start();
        let before = s.state().clone();
        assert!(s
            .dispatch(GlobeEvent::ClusterClicked {
                entry_id: "country:XXX".into()
            })
            .is_empty());
        assert_eq!(s.state(), &before);
    }

    #[test]
    fn markers_wait_for_the_camera() {
        let mut s = session();
        s.start();
        let mv = move_of(&s.dispatch(GlobeEvent::ClusterClicked {
            entry_id: "continent:asia".into(),
        }));
        let during = s.dispatch(GlobeEvent::ZoomLevelChanged { altitude: 1.4 });
        assert!(during.is_empty());
        let after = s.dispatch(GlobeEvent::CameraTransitionCompleted {
            generation: mv.generation,
        });
        assert!(matches!(&after[..], [GlobeCommand::SetVisibleEntries { entries }]
            if entries.iter().all(|e| e.kind == ClusterKind::CountryCluster)));
    }

    #[test]
    fn clicks_during_a_move_are_replayed_in_order() {
        let mut s = session();
        s.start();
        let mv = move_of(&s.dispatch(GlobeEvent::ClusterClicked {
            entry_id: "continent:asia".into(),
        }));
        s.dispatch(GlobeEvent::GlobeRotated {
            latitude: 30.0,
            longitude: 130.0,
        });
        // Country entries are known from the mode-driven set only after
        // arrival; hold a back request and check it replays.
        assert!(s.dispatch(GlobeEvent::BackRequested).is_empty());
        assert_eq!(s.held_events(), 1);

        let cmds = s.dispatch(GlobeEvent::CameraTransitionCompleted {
            generation: mv.generation,
        });
        assert_eq!(s.held_events(), 0);
        // Arrival published countries, then the replayed back started a move.
        assert!(matches!(cmds[0], GlobeCommand::SetVisibleEntries { .. }));
        assert!(matches!(cmds[1], GlobeCommand::MoveCamera(_)));
        assert_eq!(s.state().display_mode, DisplayMode::Continent);
        assert!(s.state().drill_down_stack.is_empty());
    }

    #[test]
    fn held_country_click_survives_the_marker_swap() {
        let mut s = GlobeSession::new(
            session().locations().to_vec(),
            GlobeConfig {
                default_display_mode: DisplayMode::Country,
                ..GlobeConfig::default()
            },
        )
        .unwrap();
        s.start();
        let mv = move_of(&s.dispatch(GlobeEvent::ClusterClicked {
            entry_id: "country:FRA".into(),
        }));
        // Japan is only on the published country markers now.
        assert!(s
            .dispatch(GlobeEvent::ClusterClicked {
                entry_id: "country:JPN".into()
            })
            .is_empty());
        assert_eq!(s.held_events(), 1);

        let cmds = s.dispatch(GlobeEvent::CameraTransitionCompleted {
            generation: mv.generation,
        });
        assert_eq!(s.held_events(), 0);
        assert!(cmds.iter().any(|c| matches!(c, GlobeCommand::MoveCamera(_))));
        assert_eq!(s.state().display_mode, DisplayMode::City);
        assert_eq!(s.state().expanded_country_code.as_deref(), Some("JPN"));
        assert_eq!(s.state().drill_down_stack.len(), 2);
    }

    #[test]
    fn city_clicks_are_forwarded_to_the_navigator() {
        #[derive(Default)]
        struct Recorder {
            entries: usize,
            moves: Vec<u64>,
            opened: Vec<String>,
        }
        impl Projector for Recorder {
            fn project(&self, _: f64, _: f64) -> Option<crate::labels::ScreenPoint> {
                None
            }
        }
        impl GlobeRenderer for Recorder {
            fn set_visible_entries(&mut self, entries: &[ClusterEntry]) {
                self.entries = entries.len();
            }
            fn move_camera(&mut self, mv: &CameraMove) {
                self.moves.push(mv.generation);
            }
        }
        impl Navigator for Recorder {
            fn navigate_to_city_detail(&mut self, city_name: &str, _: &str) {
                self.opened.push(city_name.to_string());
            }
        }

        let mut s = GlobeSession::new(
            vec![Location::new("FRA", "Paris", 48.85, 2.35, "#2563eb")],
            GlobeConfig {
                default_display_mode: DisplayMode::Country,
                city_focus_altitude: None,
                ..GlobeConfig::default()
            },
        )
        .unwrap();
        let mut renderer = Recorder::default();
        let mut nav = Recorder::default();

        let cmds = s.start();
        apply_commands(&cmds, &mut renderer, &mut nav);
        let cmds = s.dispatch(GlobeEvent::ClusterClicked {
            entry_id: "country:FRA".into(),
        });
        apply_commands(&cmds, &mut renderer, &mut nav);
        let city_id = s.visible_entries()[0].id.clone();
        let cmds = s.dispatch(GlobeEvent::ClusterClicked { entry_id: city_id });
        apply_commands(&cmds, &mut renderer, &mut nav);

        assert_eq!(renderer.entries, 1);
        assert!(renderer.moves.is_empty());
        assert_eq!(nav.opened, ["Paris"]);
    }

    #[test]
    fn pattern_switch_resets_state() {
        let mut s = session();
        s.start();
        s.dispatch(GlobeEvent::ZoomLevelChanged { altitude: 1.0 });
        assert_eq!(s.state().display_mode, DisplayMode::Country);
        let cmds = s.replace_locations(vec![Location::new("BRA", "Rio", -22.9, -43.2, "#000")]);
        assert_eq!(s.state().display_mode, DisplayMode::Continent);
        assert!(matches!(&cmds[..], [GlobeCommand::SetVisibleEntries { entries }]
            if entries[0].id == "continent:south-america"));
    }
}
