// crates/tripglobe-core/src/geo.rs

//! Small spherical helpers shared by the cluster builder and the state
//! machine. Degrees in, degrees out.

/// Wrap a longitude into `(-180, 180]`.
pub fn normalize_longitude(lng: f64) -> f64 {
    let mut l = (lng + 180.0).rem_euclid(360.0) - 180.0;
    if l == -180.0 {
        l = 180.0;
    }
    l
}

/// Signed shortest longitudinal step from `from` to `to`, in `(-180, 180]`.
pub fn longitude_delta(from: f64, to: f64) -> f64 {
    normalize_longitude(to - from)
}

/// Great-circle angle between two points in degrees (haversine).
pub fn angular_distance_deg(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let (p1, p2) = (lat1.to_radians(), lat2.to_radians());
    let dp = p2 - p1;
    let dl = longitude_delta(lng1, lng2).to_radians();
    let a = (dp / 2.0).sin().powi(2) + p1.cos() * p2.cos() * (dl / 2.0).sin().powi(2);
    (2.0 * a.sqrt().min(1.0).asin()).to_degrees()
}

/// Arithmetic mean of a set of coordinates with antimeridian correction.
///
/// When the longitudes span more than 180° the points are assumed to
/// straddle ±180°, so negative longitudes are shifted by +360° before
/// averaging and the result is wrapped back. Returns `None` for an empty
/// input.
pub fn mean_center<I>(points: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let points: Vec<(f64, f64)> = points.into_iter().collect();
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let lat = points.iter().map(|p| p.0).sum::<f64>() / n;

    let (min_lng, max_lng) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.1), hi.max(p.1))
        });
    let straddles = max_lng - min_lng > 180.0;
    let lng_sum: f64 = points
        .iter()
        .map(|&(_, lng)| if straddles && lng < 0.0 { lng + 360.0 } else { lng })
        .sum();

    Some((lat, normalize_longitude(lng_sum / n)))
}
