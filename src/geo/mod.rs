// src/geo/mod.rs
// Geodetic utilities: WGS84 conversions and local tangent frames
// RELEVANT FILES: src/geo/ellipsoid.rs, src/geo/enu.rs

pub mod ellipsoid;
pub mod enu;

// Re-export main types and functions
pub use ellipsoid::{
    ecef_to_geodetic_degrees, ecef_to_geodetic_radians, geodetic_degrees_to_ecef, Ellipsoid,
    Geodetic, WGS84_A, WGS84_F,
};
pub use enu::{enu_rotation, local_frame};
