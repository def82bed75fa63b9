use itertools::Itertools;

use crate::Error;

/// A `[latitude, longitude]` pair, the order Leaflet expects.
pub type LatLon = [f64; 2];

/// Swap one GeoJSON `[lon, lat]` position into `[lat, lon]`.
pub fn swap_point<P: AsRef<[f64]>>(pair: P) -> Result<LatLon, Error> {
    match *pair.as_ref() {
        [x, y] if x.is_finite() && y.is_finite() => Ok([y, x]),
        ref other => Err(Error::InvalidGeometry(format!(
            "expected a pair of finite numbers, got {other:?}"
        ))),
    }
}

/// Convert a sequence of `[lon, lat]` pairs into `[lat, lon]` pairs.
///
/// Order and count are preserved. Applying it twice gives back the input.
pub fn swap_axes<P: AsRef<[f64]>>(pairs: &[P]) -> Result<Vec<LatLon>, Error> {
    pairs.iter().map(swap_point).collect()
}

/// Compass bearing in degrees (0 is north, 90 is east) of the first leg of a
/// lat/lon path. Repeated leading points are skipped.
pub fn initial_bearing(path: &[LatLon]) -> Option<f64> {
    let (start, next) = path
        .iter()
        .dedup_by(|a, b| a[0].to_bits() == b[0].to_bits() && a[1].to_bits() == b[1].to_bits())
        .take(2)
        .collect_tuple()?;
    let (lat1, lon1) = (start[0].to_radians(), start[1].to_radians());
    let (lat2, lon2) = (next[0].to_radians(), next[1].to_radians());
    let dlon = lon2 - lon1;
    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    let bearing = y.atan2(x).to_degrees();
    Some(if bearing < 0.0 { bearing + 360.0 } else { bearing })
}

/// Latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Limits of the city the tour runs through.
    pub const CITY: Bounds = Bounds {
        south: 48.0232,
        west: 14.3765,
        north: 48.0875,
        east: 14.4717,
    };

    pub fn contains(&self, point: LatLon) -> bool {
        let [lat, lon] = point;
        (self.south..=self.north).contains(&lat) && (self.west..=self.east).contains(&lon)
    }
}
