// src/geo/enu.rs
// Local East-North-Up tangent frame built at an ECEF origin
// RELEVANT FILES: src/geo/ellipsoid.rs, src/manifest/local.rs

use glam::{DMat3, DMat4, DVec3};

use super::ellipsoid::ecef_to_geodetic_radians;

/// Rotation whose rows are the east, north and up unit vectors expressed in ECEF
pub fn enu_rotation(lat_rad: f64, lon_rad: f64) -> DMat3 {
    let (sin_lat, cos_lat) = lat_rad.sin_cos();
    let (sin_lon, cos_lon) = lon_rad.sin_cos();

    let east = DVec3::new(-sin_lon, cos_lon, 0.0);
    let north = DVec3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);
    let up = DVec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat);

    // glam is column-major, so the basis vectors go in as rows via transpose
    DMat3::from_cols(east, north, up).transpose()
}

/// Build the ECEF -> ENU transform centered at `origin_ecef`.
///
/// `local_frame(origin) * tile_absolute` re-expresses a tile in local meters.
pub fn local_frame(origin_ecef: DVec3) -> DMat4 {
    let geodetic = ecef_to_geodetic_radians(origin_ecef);
    let rotation = enu_rotation(geodetic.lat, geodetic.lon);
    let translation = -(rotation * origin_ecef);

    let mut frame = DMat4::from_mat3(rotation);
    frame.w_axis = translation.extend(1.0);
    frame
}
