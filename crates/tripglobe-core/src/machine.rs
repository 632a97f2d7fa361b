// crates/tripglobe-core/src/machine.rs

//! # Clustering State Machine
//!
//! Owns the [`ClusteringState`] of one globe view and the camera controller
//! that drives it. Each handler is a synchronous state update that returns
//! the side effects for the outside world as [`GlobeCommand`]s; nothing in
//! here talks to a renderer directly.
//!
//! Two rules keep camera telemetry and camera commands from feeding back
//! into each other:
//!
//! * while a move is in flight, zoom and rotation events only record
//!   telemetry, the mode is frozen to whatever the move will commit on
//!   arrival;
//! * on arrival the rotation baseline is reset to the arrival pose, so the
//!   camera's own travel never counts as a user pan.

use serde::{Deserialize, Serialize};

use crate::camera::{CameraController, CameraMove, Completion, DeferredTransition};
use crate::config::GlobeConfig;
use crate::geo::{angular_distance_deg, longitude_delta, normalize_longitude};
use crate::model::{CameraPose, ClusterEntry, ClusterKind, DisplayMode, Rotation};

// -----------------------------------------------------------------------------
// EVENTS & COMMANDS
// -----------------------------------------------------------------------------

/// Renderer / UI input, processed strictly in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GlobeEvent {
    ZoomLevelChanged { altitude: f64 },
    GlobeRotated { latitude: f64, longitude: f64 },
    ClusterClicked { entry_id: String },
    CameraTransitionCompleted { generation: u64 },
    BackRequested,
    ResetRequested,
}

/// Side effect requested by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GlobeCommand {
    /// Replace the markers on the globe.
    SetVisibleEntries { entries: Vec<ClusterEntry> },
    /// Fly the camera; report back with the move's generation.
    MoveCamera(CameraMove),
    /// Open the detail view of a single city.
    NavigateToCityDetail {
        city_name: String,
        location_id: String,
    },
}

// -----------------------------------------------------------------------------
// STATE
// -----------------------------------------------------------------------------

/// Label phase derived from the City <-> Country altitude band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelPhase {
    #[default]
    Overview,
    /// Camera is low enough that label placement is frozen.
    Close,
}

/// The selection part of the state that a drill-down can restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    pub display_mode: DisplayMode,
    pub expanded_country_code: Option<String>,
    pub selected_cluster_id: Option<String>,
}

/// One back step: where the camera was and what was selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillDownFrame {
    pub altitude: f64,
    pub selection: SelectionSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringState {
    pub display_mode: DisplayMode,
    /// Always set while `display_mode == City`.
    pub expanded_country_code: Option<String>,
    pub selected_cluster_id: Option<String>,
    pub is_camera_animating: bool,
    pub last_known_rotation: Rotation,
    pub current_altitude: f64,
    pub label_phase: LabelPhase,
    pub drill_down_stack: Vec<DrillDownFrame>,
}

impl ClusteringState {
    pub fn initial(cfg: &GlobeConfig) -> Self {
        let near = cfg
            .country_to_city_hysteresis_band
            .is_near(false, cfg.default_altitude);
        Self {
            display_mode: cfg.default_display_mode,
            expanded_country_code: None,
            selected_cluster_id: None,
            is_camera_animating: false,
            last_known_rotation: Rotation::default(),
            current_altitude: cfg.default_altitude,
            label_phase: if near {
                LabelPhase::Close
            } else {
                LabelPhase::Overview
            },
            drill_down_stack: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            display_mode: self.display_mode,
            expanded_country_code: self.expanded_country_code.clone(),
            selected_cluster_id: self.selected_cluster_id.clone(),
        }
    }

    fn restore(&mut self, snap: SelectionSnapshot) {
        self.display_mode = snap.display_mode;
        self.expanded_country_code = snap.expanded_country_code;
        self.selected_cluster_id = snap.selected_cluster_id;
    }
}

// -----------------------------------------------------------------------------
// MACHINE
// -----------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ClusteringMachine {
    config: GlobeConfig,
    state: ClusteringState,
    camera: CameraController,
}

impl ClusteringMachine {
    /// Build a machine from an already validated configuration.
    pub fn new(config: GlobeConfig) -> Self {
        Self {
            state: ClusteringState::initial(&config),
            camera: CameraController::from_config(&config),
            config,
        }
    }

    pub fn state(&self) -> &ClusteringState {
        &self.state
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    pub fn is_animating(&self) -> bool {
        self.camera.is_animating()
    }

    /// Generation of the camera move in flight, if any.
    pub fn camera_in_flight(&self) -> Option<u64> {
        self.camera.in_flight()
    }

    /// `ZoomLevelChanged`: altitude-driven Continent <-> Country switching.
    ///
    /// City mode is never entered or left by zoom alone.
    pub fn on_zoom(&mut self, altitude: f64) -> Vec<GlobeCommand> {
        if !altitude.is_finite() {
            log::warn!("ignoring non-finite altitude {altitude}");
            return Vec::new();
        }
        self.state.current_altitude = altitude;
        self.update_label_phase(altitude);

        if self.camera.is_animating() {
            log::trace!("zoom {altitude:.3} recorded during camera move");
            return Vec::new();
        }

        let band = self.config.continent_altitude_threshold;
        let next = match self.state.display_mode {
            DisplayMode::City => return Vec::new(),
            DisplayMode::Continent if band.is_near(false, altitude) => DisplayMode::Country,
            DisplayMode::Country if !band.is_near(true, altitude) => DisplayMode::Continent,
            current => current,
        };
        if next == self.state.display_mode {
            return Vec::new();
        }
        log::debug!(
            "zoom {altitude:.3}: {:?} -> {next:?}",
            self.state.display_mode
        );
        self.state.display_mode = next;

        // Back steps whose mode the user has already zoomed back into by hand.
        while self
            .state
            .drill_down_stack
            .last()
            .is_some_and(|top| top.selection.display_mode == next)
        {
            if let Some(frame) = self.state.drill_down_stack.pop() {
                log::debug!("dropping drill-down frame at {:.3}, unzoomed manually", frame.altitude);
                self.state.restore(frame.selection);
            }
        }
        Vec::new()
    }

    /// `GlobeRotated`: a significant pan out of a drilled-down country
    /// backs out to country mode; small moves only feed the smoothed
    /// rotation baseline.
    pub fn on_rotate(&mut self, latitude: f64, longitude: f64) -> Vec<GlobeCommand> {
        if !latitude.is_finite() || !longitude.is_finite() {
            log::warn!("ignoring non-finite rotation ({latitude}, {longitude})");
            return Vec::new();
        }
        if self.camera.is_animating() {
            log::trace!("rotation ({latitude:.2}, {longitude:.2}) during camera move");
            return Vec::new();
        }

        let last = self.state.last_known_rotation;
        let distance = angular_distance_deg(last.latitude, last.longitude, latitude, longitude);

        if distance > self.config.rotation_significance_threshold {
            if self.state.display_mode == DisplayMode::City {
                log::debug!("panned {distance:.1}° away from expanded country, backing out");
                self.pop_frame();
                self.state.display_mode = DisplayMode::Country;
                self.state.expanded_country_code = None;
            }
            self.state.last_known_rotation = Rotation::new(latitude, normalize_longitude(longitude));
        } else {
            let w = self.config.rotation_smoothing;
            let lat = last.latitude + w * (latitude - last.latitude);
            let lng = last.longitude + w * longitude_delta(last.longitude, longitude);
            self.state.last_known_rotation = Rotation::new(lat, normalize_longitude(lng));
        }
        Vec::new()
    }

    /// `ClusterClicked` for an entry resolved by the caller.
    pub fn on_cluster_clicked(&mut self, entry: &ClusterEntry) -> Vec<GlobeCommand> {
        match entry.kind {
            ClusterKind::ContinentCluster => self.drill_into_continent(entry),
            ClusterKind::CountryCluster => self.drill_into_country(entry),
            ClusterKind::IndividualCity => {
                let location_id = entry
                    .members
                    .first()
                    .map(|l| l.key())
                    .unwrap_or_else(|| entry.id.clone());
                vec![GlobeCommand::NavigateToCityDetail {
                    city_name: entry.display_name.clone(),
                    location_id,
                }]
            }
        }
    }

    /// `CameraTransitionCompleted`: apply the deferred mode of the latest
    /// move; stale generations are ignored.
    pub fn on_camera_completed(&mut self, generation: u64) -> Vec<GlobeCommand> {
        let Completion::Applied { pose, deferred } = self.camera.complete(generation) else {
            return Vec::new();
        };
        self.state.is_camera_animating = false;
        self.state.last_known_rotation = Rotation::new(pose.latitude, pose.longitude);
        self.state.current_altitude = pose.altitude;
        self.update_label_phase(pose.altitude);

        if let Some(DeferredTransition {
            mode,
            selected_cluster_id,
        }) = deferred
        {
            log::debug!("camera #{generation} arrived: {:?} -> {mode:?}", self.state.display_mode);
            self.state.display_mode = mode;
            self.state.selected_cluster_id = selected_cluster_id;
            if mode != DisplayMode::City {
                self.state.expanded_country_code = None;
            }
        }
        Vec::new()
    }

    /// Explicit back: restore the previous selection and zoom level together.
    pub fn on_back(&mut self) -> Vec<GlobeCommand> {
        let Some(frame) = self.pop_frame() else {
            return Vec::new();
        };
        let rot = self.state.last_known_rotation;
        let mv = self.start_move(
            CameraPose::new(rot.latitude, rot.longitude, frame.altitude),
            self.config.transition_duration_ms,
            None,
        );
        vec![GlobeCommand::MoveCamera(mv)]
    }

    /// `ResetRequested`: always applies, superseding any camera move.
    pub fn on_reset(&mut self) -> Vec<GlobeCommand> {
        log::debug!("reset view");
        self.camera.cancel();
        self.state.drill_down_stack.clear();
        self.state.expanded_country_code = None;
        self.state.selected_cluster_id = None;
        self.state.display_mode = self.config.default_display_mode;
        let rot = self.state.last_known_rotation;
        let mv = self.start_move(
            CameraPose::new(rot.latitude, rot.longitude, self.config.default_altitude),
            self.config.transition_duration_ms,
            None,
        );
        vec![GlobeCommand::MoveCamera(mv)]
    }

    /// Back to the freshly created state without issuing any command.
    pub fn reset_silently(&mut self) {
        self.camera.cancel();
        self.state = ClusteringState::initial(&self.config);
    }

    // -------------------------------------------------------------------------
    // internals
    // -------------------------------------------------------------------------

    fn drill_into_continent(&mut self, entry: &ClusterEntry) -> Vec<GlobeCommand> {
        let superseding = self
            .camera
            .pending_deferred()
            .is_some_and(|d| d.mode == DisplayMode::Country);
        if superseding {
            // The pending drill-down already pushed the frame we would push.
            log::debug!("continent click {} supersedes pending drill-down", entry.id);
        } else {
            self.push_frame();
        }
        let mv = self.start_move(
            CameraPose::new(
                entry.center_latitude,
                entry.center_longitude,
                self.config.country_target_altitude,
            ),
            self.config.transition_duration_ms,
            Some(DeferredTransition {
                mode: DisplayMode::Country,
                selected_cluster_id: Some(entry.id.clone()),
            }),
        );
        vec![GlobeCommand::MoveCamera(mv)]
    }

    fn drill_into_country(&mut self, entry: &ClusterEntry) -> Vec<GlobeCommand> {
        let Some(code) = entry.country_code().map(str::to_owned) else {
            log::warn!("country cluster {} carries no country code", entry.id);
            return Vec::new();
        };
        self.push_frame();
        log::debug!("expanding {code}: {:?} -> City", self.state.display_mode);
        self.state.expanded_country_code = Some(code);
        self.state.display_mode = DisplayMode::City;
        self.state.selected_cluster_id = Some(entry.id.clone());

        match self.config.city_focus_altitude {
            Some(focus) => {
                let altitude = focus.min(self.state.current_altitude);
                let mv = self.start_move(
                    CameraPose::new(entry.center_latitude, entry.center_longitude, altitude),
                    self.config.focus_duration_ms,
                    None,
                );
                vec![GlobeCommand::MoveCamera(mv)]
            }
            None => Vec::new(),
        }
    }

    fn start_move(
        &mut self,
        pose: CameraPose,
        duration_ms: u32,
        deferred: Option<DeferredTransition>,
    ) -> CameraMove {
        let mv = self.camera.move_to(pose, duration_ms, deferred);
        self.state.is_camera_animating = true;
        mv
    }

    fn push_frame(&mut self) {
        self.state.drill_down_stack.push(DrillDownFrame {
            altitude: self.state.current_altitude,
            selection: self.state.snapshot(),
        });
    }

    /// Pop and restore one frame; an empty stack is a logged no-op.
    fn pop_frame(&mut self) -> Option<DrillDownFrame> {
        match self.state.drill_down_stack.pop() {
            Some(frame) => {
                self.state.restore(frame.selection.clone());
                Some(frame)
            }
            None => {
                log::debug!("drill-down stack empty, nothing to restore");
                None
            }
        }
    }

    fn update_label_phase(&mut self, altitude: f64) {
        let band = self.config.country_to_city_hysteresis_band;
        let near = band.is_near(self.state.label_phase == LabelPhase::Close, altitude);
        self.state.label_phase = if near {
            LabelPhase::Close
        } else {
            LabelPhase::Overview
        };
    }
}
