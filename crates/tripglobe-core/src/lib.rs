// crates/tripglobe-core/src/lib.rs

//! # tripglobe-core
//!
//! Zoom-driven clustering for a travel globe. Visited places are grouped
//! into continents, countries or individual cities depending on how far the
//! camera is from the globe, with hysteresis so the view does not flicker at
//! a boundary, a drill-down stack for explicit back navigation, generation
//! counted camera moves and a deterministic label layout.
//!
//! The core never talks to a renderer. Events go in through
//! [`GlobeSession::dispatch`], [`GlobeCommand`]s come out.

pub mod camera;
pub mod cluster;
pub mod config;
pub mod continent;
pub mod error;
pub mod geo;
pub mod labels;
#[cfg(feature = "json")]
pub mod loader;
pub mod machine;
pub mod model;
pub mod session;
pub mod text;

// Re-exports
pub use crate::camera::{CameraController, CameraMove, Completion, DeferredTransition};
pub use crate::cluster::{build_clusters, stats};
pub use crate::config::{GlobeConfig, HysteresisBand, LabelConfig};
pub use crate::continent::{classify, country_name, same_continent, Continent};
pub use crate::error::{GlobeError, Result};
pub use crate::labels::{
    LabelFrame, LabelLayoutEngine, LabelPlacement, LabelSide, Projector, ScreenPoint,
};
pub use crate::machine::{
    ClusteringMachine, ClusteringState, DrillDownFrame, GlobeCommand, GlobeEvent, LabelPhase,
};
pub use crate::model::{
    CameraPose, ClusterEntry, ClusterKind, DisplayMode, Location, Rotation, TripStats,
};
pub use crate::session::{apply_commands, GlobeRenderer, GlobeSession, Navigator};

pub mod prelude {
    pub use crate::camera::CameraMove;
    pub use crate::config::GlobeConfig;
    pub use crate::labels::{LabelFrame, Projector, ScreenPoint};
    pub use crate::machine::{GlobeCommand, GlobeEvent};
    pub use crate::model::{ClusterEntry, ClusterKind, DisplayMode, Location};
    pub use crate::session::{GlobeRenderer, GlobeSession, Navigator};
}
