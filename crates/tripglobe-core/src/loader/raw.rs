// crates/tripglobe-core/src/loader/raw.rs

//! Raw travel-record shape as exported by the backing store.
//!
//! Field names vary between exports, so each field accepts its common
//! aliases; coordinates may arrive as numbers or strings.

use serde::Deserialize;
use serde_json::Value;

use crate::continent::{find_code_by_name, lookup};
use crate::geo::normalize_longitude;
use crate::model::Location;
use crate::text::parse_opt_f64;

pub const DEFAULT_COLOR_TAG: &str = "#9ca3af";

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CoordRaw {
    Number(f64),
    Text(String),
}

impl CoordRaw {
    fn value(&self) -> Option<f64> {
        match self {
            CoordRaw::Number(v) if v.is_finite() => Some(*v),
            CoordRaw::Number(_) => None,
            CoordRaw::Text(s) => parse_opt_f64(Some(s.as_str())),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationRaw {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, alias = "country", alias = "countryCode")]
    pub country_code: Option<String>,
    #[serde(default, alias = "city", alias = "name", alias = "displayName")]
    pub display_name: Option<String>,
    #[serde(default, alias = "lat")]
    pub latitude: Option<CoordRaw>,
    #[serde(default, alias = "lng", alias = "lon")]
    pub longitude: Option<CoordRaw>,
    #[serde(default, alias = "color", alias = "colorTag")]
    pub color_tag: Option<String>,
}

impl LocationRaw {
    /// Validate into a [`Location`], or say why the record is unusable.
    pub fn into_location(self) -> Result<Location, String> {
        let lat = self
            .latitude
            .as_ref()
            .and_then(CoordRaw::value)
            .ok_or("missing or invalid latitude")?;
        let lng = self
            .longitude
            .as_ref()
            .and_then(CoordRaw::value)
            .ok_or("missing or invalid longitude")?;
        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!("latitude {lat} out of range"));
        }

        let country = self
            .country_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or("missing country")?;
        // Some exports carry the country name instead of its code.
        let code = if lookup(country).is_some() {
            country.to_uppercase()
        } else if let Some(code) = find_code_by_name(country) {
            code.to_string()
        } else {
            country.to_uppercase()
        };

        let name = self
            .display_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or("missing city name")?;

        let color = self
            .color_tag
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COLOR_TAG.to_string());

        let mut loc = Location::new(code, name, lat, normalize_longitude(lng), color);
        loc.id = match self.id {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        Ok(loc)
    }
}
