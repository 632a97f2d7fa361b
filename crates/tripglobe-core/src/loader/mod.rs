// crates/tripglobe-core/src/loader/mod.rs

//! # Data Loader
//!
//! Reads travel records exported by the backing store into [`Location`]s.
//! Handles the physical layer (files, gzip) in `common_io` and delegates the
//! per-record parsing to [`LocationRaw`].
//!
//! A bad record never fails the whole load: it is skipped with a warning.
//! Only unreadable files and documents that are not JSON at all are errors.
//!
//! ```rust
//! use tripglobe_core::loader::locations_from_json_str;
//!
//! let locs = locations_from_json_str(r##"[
//!     { "country": "JP", "city": "Tokyo", "lat": 35.68, "lng": "139.69", "color": "#e11d48" },
//!     { "country": "France", "city": "Paris", "lat": 48.85, "lng": 2.35 },
//!     { "city": "Nowhere" }
//! ]"##).unwrap();
//!
//! assert_eq!(locs.len(), 2);
//! assert_eq!(locs[0].country_code, "JP");
//! assert_eq!(locs[1].country_code, "FRA");
//! ```

use serde::Deserialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::model::Location;

mod common_io;
mod raw;

pub use raw::{CoordRaw, LocationRaw, DEFAULT_COLOR_TAG};

/// Accepted document shapes: a bare array or `{ "locations": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    List(Vec<Value>),
    Wrapped { locations: Vec<Value> },
}

/// Parse travel records from a JSON string.
pub fn locations_from_json_str(s: &str) -> Result<Vec<Location>> {
    let doc: Document = serde_json::from_str(s)?;
    Ok(convert(doc))
}

/// Parse travel records from any reader.
pub fn locations_from_reader<R: Read>(reader: R) -> Result<Vec<Location>> {
    let doc: Document = serde_json::from_reader(reader)?;
    Ok(convert(doc))
}

/// Load travel records from a `.json` or `.json.gz` file.
#[cfg(feature = "json")]
pub fn load_locations_from_path(path: impl AsRef<Path>) -> Result<Vec<Location>> {
    let path = path.as_ref();
    let reader = common_io::open_stream(path)?;
    let locations = locations_from_reader(reader)?;
    log::debug!("loaded {} locations from {}", locations.len(), path.display());
    Ok(locations)
}

fn convert(doc: Document) -> Vec<Location> {
    let records = match doc {
        Document::List(v) | Document::Wrapped { locations: v } => v,
    };
    let total = records.len();
    let mut out = Vec::with_capacity(total);
    for (i, value) in records.into_iter().enumerate() {
        let parsed = serde_json::from_value::<LocationRaw>(value)
            .map_err(|e| e.to_string())
            .and_then(LocationRaw::into_location);
        match parsed {
            Ok(loc) => out.push(loc),
            Err(reason) => log::warn!("skipping travel record #{i}: {reason}"),
        }
    }
    if out.len() < total {
        log::warn!("{} of {total} travel records skipped", total - out.len());
    }
    out
}
