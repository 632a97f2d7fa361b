// crates/tripglobe-core/src/config.rs

//! # Configuration
//!
//! All thresholds of the globe core in one validated value. Every field has
//! a default, so a JSON file only needs the keys it wants to override:
//!
//! ```rust
//! use tripglobe_core::config::GlobeConfig;
//!
//! let cfg = GlobeConfig::from_json_str(r#"{
//!     "continent_altitude_threshold": { "in": 1.5, "out": 2.2 },
//!     "rotation_significance_threshold": 12.0
//! }"#).unwrap();
//! assert_eq!(cfg.continent_altitude_threshold.enter, 1.5);
//!
//! // `in` must stay below `out`.
//! assert!(GlobeConfig::from_json_str(
//!     r#"{ "continent_altitude_threshold": { "in": 2.0, "out": 2.0 } }"#
//! ).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{GlobeError, Result};
use crate::model::DisplayMode;

/// Distinct enter/exit altitudes around one boundary.
///
/// The "near" side is entered at `altitude <= enter` and only left again at
/// `altitude >= exit`, so `enter < exit` is required.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HysteresisBand {
    #[serde(rename = "in")]
    pub enter: f64,
    #[serde(rename = "out")]
    pub exit: f64,
}

impl HysteresisBand {
    pub const fn new(enter: f64, exit: f64) -> Self {
        Self { enter, exit }
    }

    /// Next "near" flag for `altitude`, given the current one.
    ///
    /// Inside the band the current side is kept.
    pub fn is_near(&self, currently_near: bool, altitude: f64) -> bool {
        if currently_near {
            altitude < self.exit
        } else {
            altitude <= self.enter
        }
    }

    fn validate(&self, name: &str) -> Result<()> {
        if !self.enter.is_finite() || !self.exit.is_finite() {
            return Err(GlobeError::InvalidConfig(format!("{name}: bounds must be finite")));
        }
        if self.enter >= self.exit {
            return Err(GlobeError::InvalidConfig(format!(
                "{name}: `in` ({}) must be lower than `out` ({})",
                self.enter, self.exit
            )));
        }
        Ok(())
    }
}

/// Label Layout Engine parameters (screen pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Anchors closer than this are one neighbor group.
    pub crowding_radius_px: f64,
    pub min_distance_px: f64,
    pub max_distance_px: f64,
    /// Extra distance per additional member of a neighbor group.
    pub distance_step_px: f64,
    /// Offset between same-side labels inside one group.
    pub stagger_px: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            crowding_radius_px: 48.0,
            min_distance_px: 12.0,
            max_distance_px: 72.0,
            distance_step_px: 8.0,
            stagger_px: 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    /// Continent <-> Country boundary.
    pub continent_altitude_threshold: HysteresisBand,
    /// Close <-> Overview label phase boundary (label freezing only).
    pub country_to_city_hysteresis_band: HysteresisBand,
    /// Great-circle degrees a rotation must move to count as a pan.
    pub rotation_significance_threshold: f64,
    /// Weight of a new sample in the rotation low-pass filter.
    pub rotation_smoothing: f64,
    pub min_camera_altitude: f64,
    pub max_camera_altitude: f64,
    pub default_display_mode: DisplayMode,
    /// Camera altitude at session start and after a reset.
    pub default_altitude: f64,
    /// Target altitude of a continent drill-down.
    pub country_target_altitude: f64,
    /// Altitude of the small camera refinement after a country click.
    pub city_focus_altitude: Option<f64>,
    pub transition_duration_ms: u32,
    pub focus_duration_ms: u32,
    pub labels: LabelConfig,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            continent_altitude_threshold: HysteresisBand::new(1.7, 2.1),
            country_to_city_hysteresis_band: HysteresisBand::new(0.6, 0.8),
            rotation_significance_threshold: 8.0,
            rotation_smoothing: 0.3,
            min_camera_altitude: 0.1,
            max_camera_altitude: 4.0,
            default_display_mode: DisplayMode::Continent,
            default_altitude: 2.5,
            country_target_altitude: 1.2,
            city_focus_altitude: Some(0.9),
            transition_duration_ms: 1000,
            focus_duration_ms: 600,
            labels: LabelConfig::default(),
        }
    }
}

impl GlobeConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: GlobeConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            GlobeError::NotFound(format!("Config not found at {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }

    /// Reject inconsistent settings at initialization time.
    pub fn validate(&self) -> Result<()> {
        self.continent_altitude_threshold
            .validate("continent_altitude_threshold")?;
        self.country_to_city_hysteresis_band
            .validate("country_to_city_hysteresis_band")?;

        let finite = [
            ("rotation_significance_threshold", self.rotation_significance_threshold),
            ("rotation_smoothing", self.rotation_smoothing),
            ("min_camera_altitude", self.min_camera_altitude),
            ("max_camera_altitude", self.max_camera_altitude),
            ("default_altitude", self.default_altitude),
            ("country_target_altitude", self.country_target_altitude),
        ];
        for (name, v) in finite {
            if !v.is_finite() {
                return Err(GlobeError::InvalidConfig(format!("{name} must be finite")));
            }
        }
        if self.rotation_significance_threshold <= 0.0 {
            return Err(GlobeError::InvalidConfig(
                "rotation_significance_threshold must be positive".into(),
            ));
        }
        if !(self.rotation_smoothing > 0.0 && self.rotation_smoothing <= 1.0) {
            return Err(GlobeError::InvalidConfig(
                "rotation_smoothing must be in (0, 1]".into(),
            ));
        }
        if self.min_camera_altitude <= 0.0 || self.min_camera_altitude >= self.max_camera_altitude
        {
            return Err(GlobeError::InvalidConfig(format!(
                "camera altitude range [{}, {}] is empty or non-positive",
                self.min_camera_altitude, self.max_camera_altitude
            )));
        }
        if let Some(focus) = self.city_focus_altitude {
            if !focus.is_finite() {
                return Err(GlobeError::InvalidConfig(
                    "city_focus_altitude must be finite".into(),
                ));
            }
        }
        if self.default_display_mode == DisplayMode::City {
            return Err(GlobeError::InvalidConfig(
                "default_display_mode cannot be City (no country is expanded at start)".into(),
            ));
        }
        let l = &self.labels;
        if !(l.min_distance_px >= 0.0 && l.min_distance_px <= l.max_distance_px) {
            return Err(GlobeError::InvalidConfig(format!(
                "labels: min_distance_px ({}) must be within [0, max_distance_px ({})]",
                l.min_distance_px, l.max_distance_px
            )));
        }
        if !(l.crowding_radius_px >= 0.0 && l.distance_step_px >= 0.0 && l.stagger_px >= 0.0) {
            return Err(GlobeError::InvalidConfig(
                "labels: radius, step and stagger must be non-negative".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        GlobeConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GlobeConfig::from_json_str(r#"{ "default_display_mode": "Country" }"#).unwrap();
        assert_eq!(cfg.default_display_mode, DisplayMode::Country);
        assert_eq!(cfg.rotation_smoothing, 0.3);
    }

    #[test]
    fn rejects_out_of_order_bands() {
        let err = GlobeConfig::from_json_str(
            r#"{ "country_to_city_hysteresis_band": { "in": 0.9, "out": 0.5 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, GlobeError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_city_default_and_empty_altitude_range() {
        let cfg = GlobeConfig {
            default_display_mode: DisplayMode::City,
            ..GlobeConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = GlobeConfig {
            min_camera_altitude: 3.0,
            max_camera_altitude: 3.0,
            ..GlobeConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn band_keeps_side_inside_the_band() {
        let band = HysteresisBand::new(1.0, 2.0);
        assert!(!band.is_near(false, 1.5));
        assert!(band.is_near(false, 1.0));
        assert!(band.is_near(true, 1.5));
        assert!(!band.is_near(true, 2.0));
    }
}
