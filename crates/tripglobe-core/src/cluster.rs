// crates/tripglobe-core/src/cluster.rs

//! # Cluster Builder
//!
//! Pure grouping of locations into the entries drawn on the globe. Output
//! order is the first-seen order of the grouping key, so identical inputs
//! always produce identical entries.

use std::collections::{HashMap, HashSet};

use crate::continent::{self, Continent};
use crate::geo::mean_center;
use crate::model::{ClusterEntry, ClusterKind, DisplayMode, Location, TripStats};

/// Group `locations` for the given display mode.
///
/// * `City` keeps only the locations of `expanded_country_code` (ISO2 or
///   ISO3), one entry each. Without an expanded country nothing is shown.
/// * `Country` groups by country, counting cities.
/// * `Continent` groups by continent bucket, counting distinct countries.
pub fn build_clusters(
    locations: &[Location],
    mode: DisplayMode,
    expanded_country_code: Option<&str>,
) -> Vec<ClusterEntry> {
    match mode {
        DisplayMode::City => match expanded_country_code {
            Some(code) => city_entries(locations, code),
            None => Vec::new(),
        },
        DisplayMode::Country => country_clusters(locations),
        DisplayMode::Continent => continent_clusters(locations),
    }
}

fn city_entries(locations: &[Location], expanded: &str) -> Vec<ClusterEntry> {
    let wanted = continent::canonical_code(expanded);
    locations
        .iter()
        .filter(|loc| continent::canonical_code(&loc.country_code) == wanted)
        .map(|loc| ClusterEntry {
            id: format!("city:{}:{}", wanted, loc.key()),
            display_name: loc.display_name.clone(),
            flag: continent::country_flag(&wanted),
            center_latitude: loc.latitude,
            center_longitude: loc.longitude,
            color_tag: loc.color_tag.clone(),
            members: vec![loc.clone()],
            member_count: 1,
            kind: ClusterKind::IndividualCity,
            continent: continent::classify(&wanted),
            distinct_countries: 1,
        })
        .collect()
}

fn country_clusters(locations: &[Location]) -> Vec<ClusterEntry> {
    group_first_seen(locations, |loc| continent::canonical_code(&loc.country_code))
        .into_iter()
        .map(|(code, members)| {
            finish_entry(
                format!("country:{code}"),
                continent::country_name(&code),
                continent::country_flag(&code),
                ClusterKind::CountryCluster,
                continent::classify(&code),
                members,
            )
        })
        .collect()
}

fn continent_clusters(locations: &[Location]) -> Vec<ClusterEntry> {
    group_first_seen(locations, |loc| continent::classify(&loc.country_code))
        .into_iter()
        .map(|(bucket, members)| {
            finish_entry(
                format!("continent:{}", bucket.slug()),
                bucket.name().to_string(),
                None,
                ClusterKind::ContinentCluster,
                bucket,
                members,
            )
        })
        .collect()
}

/// Stable grouping: groups appear in the order their key was first seen.
fn group_first_seen<K, F>(locations: &[Location], key_of: F) -> Vec<(K, Vec<Location>)>
where
    K: Eq + std::hash::Hash + Clone,
    F: Fn(&Location) -> K,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<Location>)> = Vec::new();
    for loc in locations {
        let key = key_of(loc);
        match slots.get(&key) {
            Some(&idx) => groups[idx].1.push(loc.clone()),
            None => {
                slots.insert(key.clone(), groups.len());
                groups.push((key, vec![loc.clone()]));
            }
        }
    }
    groups
}

fn finish_entry(
    id: String,
    display_name: String,
    flag: Option<String>,
    kind: ClusterKind,
    bucket: Continent,
    members: Vec<Location>,
) -> ClusterEntry {
    let (center_latitude, center_longitude) =
        mean_center(members.iter().map(|m| (m.latitude, m.longitude))).unwrap_or((0.0, 0.0));
    let color_tag = members
        .first()
        .map(|m| m.color_tag.clone())
        .unwrap_or_default();
    ClusterEntry {
        id,
        display_name,
        flag,
        center_latitude,
        center_longitude,
        color_tag,
        member_count: members.len(),
        distinct_countries: distinct_countries(&members),
        members,
        kind,
        continent: bucket,
    }
}

fn distinct_countries(members: &[Location]) -> usize {
    members
        .iter()
        .map(|m| continent::canonical_code(&m.country_code))
        .collect::<HashSet<_>>()
        .len()
}

/// Counts of locations, distinct countries and distinct continent buckets.
pub fn stats(locations: &[Location]) -> TripStats {
    let continents: HashSet<Continent> = locations
        .iter()
        .map(|l| continent::classify(&l.country_code))
        .collect();
    TripStats {
        locations: locations.len(),
        countries: distinct_countries(locations),
        continents: continents.len(),
    }
}
