//! Spherical-earth helpers: grid resolution, distances and transects.

use crate::error::{GridError, Result};
use geo::{HaversineBearing, HaversineDistance, Point};
use ndarray::{ArrayView2, Zip};
use std::f64::consts::PI;

/// Earth radius (m) used to convert grid spacing to degrees.
pub const EARTH_RADIUS_M: f64 = 6_371_315.0;

/// Meters spanned by one degree of arc at [`EARTH_RADIUS_M`].
pub fn meters_per_degree() -> f64 {
    PI * EARTH_RADIUS_M / 180.0
}

/// Mean grid spacing in degrees from the inverse metrics `pm` and `pn`.
///
/// With a non-zero `meters`, that value is multiplied by
/// [`meters_per_degree`] instead and the metrics are ignored. `Some(0.0)`
/// behaves like `None`.
pub fn resolution(
    pm: ArrayView2<'_, f64>,
    pn: ArrayView2<'_, f64>,
    meters: Option<f64>,
) -> Result<f64> {
    if let Some(meters) = meters.filter(|&m| m != 0.0) {
        return Ok(meters * meters_per_degree());
    }
    if pm.dim() != pn.dim() {
        return Err(GridError::shape_mismatch(pm.shape(), pn.shape()));
    }

    let mut sum = 0.0;
    let mut count = 0usize;
    Zip::from(&pm).and(&pn).for_each(|&m, &n| {
        sum += ((1.0 / m) * (1.0 / n)).sqrt();
        count += 1;
    });
    if count == 0 {
        return Ok(f64::NAN);
    }
    Ok(sum / count as f64 / meters_per_degree())
}

/// Great-circle distance (m) between two points, haversine formula on the
/// mean earth radius.
pub fn distance(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    Point::new(lon1, lat1).haversine_distance(&Point::new(lon2, lat2))
}

/// Initial bearing from the first point to the second, degrees clockwise
/// from north in `[0, 360)`.
pub fn bearing(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    Point::new(lon1, lat1)
        .haversine_bearing(Point::new(lon2, lat2))
        .rem_euclid(360.0)
}

/// `num` evenly spaced values from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num)
                .map(|k| if k == num - 1 { stop } else { start + step * k as f64 })
                .collect()
        }
    }
}

/// Stations along a straight line between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Transect {
    /// Station longitudes.
    pub lon: Vec<f64>,
    /// Station latitudes.
    pub lat: Vec<f64>,
    /// Great-circle distance between the end points (m).
    pub distance_m: f64,
    /// Initial bearing (degrees from north).
    pub bearing_deg: f64,
}

impl Transect {
    /// Number of stations.
    pub fn len(&self) -> usize {
        self.lon.len()
    }

    /// Whether the transect has no stations.
    pub fn is_empty(&self) -> bool {
        self.lon.is_empty()
    }
}

/// Stations roughly `spacing_km` apart between two points.
///
/// Longitude and latitude are interpolated independently, which is only a
/// fair approximation of the great circle over short distances. The end
/// points are not checked against any grid.
pub fn transect(lon1: f64, lat1: f64, lon2: f64, lat2: f64, spacing_km: f64) -> Transect {
    let distance_m = distance(lon1, lat1, lon2, lat2);
    let stations = (distance_m / (spacing_km * 1000.0)).round();
    let stations = if stations.is_finite() && stations > 0.0 {
        stations as usize
    } else {
        0
    };

    Transect {
        lon: linspace(lon1, lon2, stations),
        lat: linspace(lat1, lat2, stations),
        distance_m,
        bearing_deg: bearing(lon1, lat1, lon2, lat2),
    }
}
