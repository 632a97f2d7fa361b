// crates/tripglobe-core/src/model.rs

use serde::{Deserialize, Serialize};

use crate::continent::Continent;

/// A single visited place.
///
/// Immutable once loaded; the core only classifies and groups it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Optional identifier assigned by the backing travel-record store.
    #[serde(default)]
    pub id: Option<String>,
    pub country_code: String,
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub color_tag: String,
}

impl Location {
    pub fn new(
        country_code: impl Into<String>,
        display_name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        color_tag: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            country_code: country_code.into(),
            display_name: display_name.into(),
            latitude,
            longitude,
            color_tag: color_tag.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Stable identity: the assigned id, else `CODE@lat,lng`.
    pub fn key(&self) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!(
                "{}@{:.5},{:.5}",
                self.country_code.trim().to_uppercase(),
                self.latitude,
                self.longitude
            ),
        }
    }
}

/// Aggregation granularity of the globe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DisplayMode {
    #[default]
    Continent,
    Country,
    City,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClusterKind {
    ContinentCluster,
    CountryCluster,
    IndividualCity,
}

/// A renderable aggregation of one or more locations.
///
/// Built fresh on every re-cluster call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterEntry {
    pub id: String,
    pub display_name: String,
    /// Representative flag emoji (country and city entries of known countries).
    pub flag: Option<String>,
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub color_tag: String,
    pub members: Vec<Location>,
    pub member_count: usize,
    pub kind: ClusterKind,
    pub continent: Continent,
    /// Number of distinct country codes among `members`.
    pub distinct_countries: usize,
}

impl ClusterEntry {
    /// Country code of a country or city entry (canonical ISO3 when known).
    pub fn country_code(&self) -> Option<&str> {
        match self.kind {
            ClusterKind::ContinentCluster => None,
            ClusterKind::CountryCluster => self.id.strip_prefix("country:"),
            ClusterKind::IndividualCity => self.id.strip_prefix("city:").and_then(|rest| {
                rest.split_once(':').map(|(code, _)| code)
            }),
        }
    }

    /// Default marker text.
    ///
    /// Continents count countries, countries count cities; single-member
    /// groups show the bare name.
    pub fn label(&self) -> String {
        match self.kind {
            ClusterKind::ContinentCluster if self.distinct_countries > 1 => {
                format!("{} ({} countries)", self.display_name, self.distinct_countries)
            }
            ClusterKind::CountryCluster if self.member_count > 1 => {
                format!("{} ({})", self.display_name, self.member_count)
            }
            _ => self.display_name.clone(),
        }
    }
}

/// Camera viewpoint handed to the renderer. Altitude is in globe radii.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl CameraPose {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }
}

/// A rotation sample (`{lat, lng}` of the point under the camera).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub latitude: f64,
    pub longitude: f64,
}

impl Rotation {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Simple aggregate statistics for a location set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripStats {
    pub locations: usize,
    pub countries: usize,
    pub continents: usize,
}
