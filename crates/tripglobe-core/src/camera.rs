// crates/tripglobe-core/src/camera.rs

//! # Camera Transition Controller
//!
//! Turns target poses into [`CameraMove`] commands and tracks which one is
//! in flight. Every move carries a generation number; the renderer reports
//! completion with that number and only the latest generation is honoured,
//! exactly once. Completions of superseded moves come back as
//! [`Completion::Stale`] and are dropped without further notice.

use serde::{Deserialize, Serialize};

use crate::config::GlobeConfig;
use crate::geo::normalize_longitude;
use crate::model::{CameraPose, DisplayMode};

/// Command for the renderer: fly to `pose` over `duration_ms`, then report
/// `CameraTransitionCompleted { generation }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraMove {
    pub generation: u64,
    pub pose: CameraPose,
    pub duration_ms: u32,
}

/// Mode change committed as the target of an animation, applied on arrival.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeferredTransition {
    pub mode: DisplayMode,
    pub selected_cluster_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The latest move arrived. Apply `deferred`, if any.
    Applied {
        pose: CameraPose,
        deferred: Option<DeferredTransition>,
    },
    /// Superseded, cancelled or already-completed generation.
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
struct InFlight {
    generation: u64,
    pose: CameraPose,
    deferred: Option<DeferredTransition>,
}

#[derive(Debug, Clone)]
pub struct CameraController {
    min_altitude: f64,
    max_altitude: f64,
    last_generation: u64,
    in_flight: Option<InFlight>,
}

impl CameraController {
    pub fn new(min_altitude: f64, max_altitude: f64) -> Self {
        Self {
            min_altitude,
            max_altitude,
            last_generation: 0,
            in_flight: None,
        }
    }

    pub fn from_config(cfg: &GlobeConfig) -> Self {
        Self::new(cfg.min_camera_altitude, cfg.max_camera_altitude)
    }

    /// Start a move, superseding whatever is in flight.
    ///
    /// Altitude is clamped into range, latitude into `[-90, 90]` and
    /// longitude wrapped; out-of-range input is never rejected.
    pub fn move_to(
        &mut self,
        pose: CameraPose,
        duration_ms: u32,
        deferred: Option<DeferredTransition>,
    ) -> CameraMove {
        let pose = CameraPose {
            latitude: pose.latitude.clamp(-90.0, 90.0),
            longitude: normalize_longitude(pose.longitude),
            altitude: pose.altitude.clamp(self.min_altitude, self.max_altitude),
        };
        self.last_generation += 1;
        if let Some(prev) = self.in_flight.take() {
            log::debug!(
                "camera move #{} superseded by #{}",
                prev.generation,
                self.last_generation
            );
        }
        self.in_flight = Some(InFlight {
            generation: self.last_generation,
            pose,
            deferred,
        });
        CameraMove {
            generation: self.last_generation,
            pose,
            duration_ms,
        }
    }

    /// Resolve a completion report from the renderer.
    pub fn complete(&mut self, generation: u64) -> Completion {
        match self.in_flight.take() {
            Some(InFlight {
                generation: g,
                pose,
                deferred,
            }) if g == generation => Completion::Applied { pose, deferred },
            other => {
                self.in_flight = other;
                log::trace!("ignoring stale camera completion #{generation}");
                Completion::Stale
            }
        }
    }

    /// Drop the in-flight move; its completion will be stale.
    pub fn cancel(&mut self) {
        if let Some(f) = self.in_flight.take() {
            log::debug!("camera move #{} cancelled", f.generation);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Generation of the move currently in flight.
    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight.as_ref().map(|f| f.generation)
    }

    /// Transition waiting on the in-flight move.
    pub fn pending_deferred(&self) -> Option<&DeferredTransition> {
        self.in_flight.as_ref().and_then(|f| f.deferred.as_ref())
    }
}
