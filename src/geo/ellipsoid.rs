// src/geo/ellipsoid.rs
// WGS84 ellipsoid conversions between ECEF and geodetic coordinates
// RELEVANT FILES: src/geo/enu.rs, src/tiles3d/origin.rs

use glam::DVec3;

/// WGS84 semi-major axis in meters
pub const WGS84_A: f64 = 6_378_137.0;

/// WGS84 flattening
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// Derived WGS84 quantities
#[derive(Debug, Clone, Copy)]
pub struct Ellipsoid {
    /// Semi-major axis (m)
    pub a: f64,
    /// Semi-minor axis (m)
    pub b: f64,
    /// First eccentricity squared
    pub e2: f64,
    /// Second eccentricity squared
    pub ep2: f64,
}

impl Ellipsoid {
    pub fn from_axis_flattening(a: f64, f: f64) -> Self {
        let b = a * (1.0 - f);
        Self {
            a,
            b,
            e2: 1.0 - (b * b) / (a * a),
            ep2: (a * a - b * b) / (b * b),
        }
    }

    pub fn wgs84() -> Self {
        Self::from_axis_flattening(WGS84_A, WGS84_F)
    }

    /// Prime vertical radius of curvature at a geodetic latitude (radians)
    pub fn prime_vertical_radius(&self, lat_rad: f64) -> f64 {
        let sin_lat = lat_rad.sin();
        self.a / (1.0 - self.e2 * sin_lat * sin_lat).sqrt()
    }
}

/// Geodetic position. Angles are radians or degrees depending on the producer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geodetic {
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
}

impl Geodetic {
    pub fn new(lat: f64, lon: f64, alt: f64) -> Self {
        Self { lat, lon, alt }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.lat, self.lon, self.alt]
    }
}

/// Convert ECEF meters to geodetic latitude/longitude in radians and altitude in meters.
///
/// Uses Bowring's closed-form approximation, no iteration. Sub-micrometer
/// round-trip accuracy holds for altitudes within a few kilometers of the ellipsoid.
/// Points on the polar axis get longitude 0.
pub fn ecef_to_geodetic_radians(ecef: DVec3) -> Geodetic {
    let ell = Ellipsoid::wgs84();
    let (a, b) = (ell.a, ell.b);
    let DVec3 { x, y, z } = ecef;

    let p = x.hypot(y);
    let lon = if p == 0.0 { 0.0 } else { y.atan2(x) };

    let theta = (z * a).atan2(p * b);
    let (sin_theta, cos_theta) = theta.sin_cos();
    let lat = (z + ell.ep2 * b * sin_theta.powi(3)).atan2(p - ell.e2 * a * cos_theta.powi(3));

    let (sin_lat, cos_lat) = lat.sin_cos();
    let n = ell.prime_vertical_radius(lat);
    let alt = if cos_lat.abs() < 1e-12 {
        // p / cos(lat) is 0/0 on the axis
        z.abs() / sin_lat.abs() - n * (1.0 - ell.e2)
    } else {
        p / cos_lat - n
    };

    Geodetic::new(lat, lon, alt)
}

/// Same as [`ecef_to_geodetic_radians`] with latitude/longitude in degrees
pub fn ecef_to_geodetic_degrees(ecef: DVec3) -> Geodetic {
    let g = ecef_to_geodetic_radians(ecef);
    Geodetic::new(g.lat.to_degrees(), g.lon.to_degrees(), g.alt)
}

/// Convert geodetic degrees/meters to ECEF meters
pub fn geodetic_degrees_to_ecef(geodetic: Geodetic) -> DVec3 {
    let ell = Ellipsoid::wgs84();
    let (sin_lat, cos_lat) = geodetic.lat.to_radians().sin_cos();
    let (sin_lon, cos_lon) = geodetic.lon.to_radians().sin_cos();

    let n = ell.a / (1.0 - ell.e2 * sin_lat * sin_lat).sqrt();
    DVec3::new(
        (n + geodetic.alt) * cos_lat * cos_lon,
        (n + geodetic.alt) * cos_lat * sin_lon,
        (n * (1.0 - ell.e2) + geodetic.alt) * sin_lat,
    )
}
