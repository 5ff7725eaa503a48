//! Geographic primitives: points in degrees and great-circle distances.

const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub longitude: f64,
    pub latitude: f64,
}

impl Point {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Haversine distance to another point, in meters.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_zero() {
        let p = Point::new(1.433333, 43.6);
        assert_eq!(p.distance_to(&p), 0.0);
    }

    #[test]
    fn test_distance_toulouse_paris() {
        // Toulouse -> Paris is roughly 588 km as the crow flies.
        let toulouse = Point::new(1.444, 43.6045);
        let paris = Point::new(2.3522, 48.8566);
        let d = toulouse.distance_to(&paris);
        assert!((d - 588_000.0).abs() < 5_000.0, "got {d}");
    }

    #[test]
    fn test_distance_symmetric() {
        let a = Point::new(1.0, 44.0);
        let b = Point::new(1.01, 44.01);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-9);
    }
}
