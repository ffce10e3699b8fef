//! Default GPS origin seam: small-angle tangent-plane projection.

use contracts::{GpsCollector, GpsMessage};

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Latches the first observed fix as the origin and projects subsequent
/// fixes onto the local NE plane with a spherical-earth model.
///
/// Adequate for the few-kilometre spans a local-frame estimator covers; a
/// full WGS-84 projector can be injected in its place.
#[derive(Debug, Clone, Default)]
pub struct LocalTangentPlane {
    /// Origin latitude/longitude (rad)
    origin: Option<(f64, f64)>,
}

impl LocalTangentPlane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin_set(&self) -> bool {
        self.origin.is_some()
    }
}

impl GpsCollector for LocalTangentPlane {
    fn collect(&mut self, _time_usec: u64, gps: &GpsMessage) -> bool {
        if self.origin.is_none() {
            let lat = (f64::from(gps.lat) * 1e-7).to_radians();
            let lon = (f64::from(gps.lon) * 1e-7).to_radians();
            self.origin = Some((lat, lon));
        }
        true
    }

    fn project(&self, lat_deg: f64, lon_deg: f64) -> (f32, f32) {
        match self.origin {
            Some((lat0, lon0)) => {
                let lat = lat_deg.to_radians();
                let lon = lon_deg.to_radians();
                let north = (lat - lat0) * EARTH_RADIUS_M;
                let east = (lon - lon0) * EARTH_RADIUS_M * lat0.cos();
                (north as f32, east as f32)
            }
            None => (0.0, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fix(lat_deg: f64, lon_deg: f64) -> GpsMessage {
        GpsMessage {
            lat: (lat_deg * 1e7) as i32,
            lon: (lon_deg * 1e7) as i32,
            fix_type: 3,
            ..GpsMessage::default()
        }
    }

    #[test]
    fn test_first_fix_becomes_origin() {
        let mut origin = LocalTangentPlane::new();
        assert!(!origin.origin_set());
        assert!(origin.collect(0, &fix(47.397742, 8.545594)));
        assert!(origin.origin_set());

        let (north, east) = origin.project(47.397742, 8.545594);
        assert_relative_eq!(north, 0.0, epsilon = 1e-3);
        assert_relative_eq!(east, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_projection_scale() {
        let mut origin = LocalTangentPlane::new();
        origin.collect(0, &fix(0.0, 0.0));

        // one arc-minute of latitude at the equator is a nautical mile
        let (north, east) = origin.project(1.0 / 60.0, 0.0);
        assert_relative_eq!(north, 1853.2, epsilon = 1.0);
        assert_relative_eq!(east, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_unset_origin_projects_to_zero() {
        let origin = LocalTangentPlane::new();
        assert_eq!(origin.project(45.0, 7.0), (0.0, 0.0));
    }
}
