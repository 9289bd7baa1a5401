//! Representative georeferencing origin of a tileset

use std::fmt;

use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

use super::bounds::BoundingVolume;
use super::error::TilesResult;
use super::tile::Tile;
use crate::geo::{ecef_to_geodetic_degrees, geodetic_degrees_to_ecef, Geodetic};
use crate::transforms::{transform_point, translation};

/// How the origin point was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginStrategy {
    /// Midpoint of the root region, at its minimum height
    Region,
    /// Root sphere center under the root transform
    Sphere,
    /// Root box center under the root transform
    Box,
    /// Translation of the root transform
    Root,
}

impl fmt::Display for OriginStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Region => "region",
            Self::Sphere => "sphere",
            Self::Box => "box",
            Self::Root => "root",
        };
        f.write_str(name)
    }
}

/// Origin point in both ECEF and geodetic form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    pub strategy: OriginStrategy,
    /// ECEF meters [x, y, z]
    pub ecef: [f64; 3],
    /// [latitude deg, longitude deg, altitude m]
    pub lla: [f64; 3],
}

impl Origin {
    fn from_ecef(strategy: OriginStrategy, ecef: DVec3) -> Self {
        let lla = ecef_to_geodetic_degrees(ecef);
        Self {
            strategy,
            ecef: ecef.to_array(),
            lla: lla.to_array(),
        }
    }

    pub fn ecef_point(&self) -> DVec3 {
        DVec3::from_array(self.ecef)
    }
}

/// Derive the origin from the root tile and its absolute transform.
///
/// Priority: region, sphere, box, then the root translation. Region bounds are
/// geographic already and ignore the root transform.
pub fn derive_origin(root: &Tile, root_absolute: &DMat4) -> TilesResult<Origin> {
    let origin = match root.bounding_volume()? {
        Some(BoundingVolume::Region(r)) => {
            let [west, south, east, north, min_height, _max_height] = r;
            let lla = Geodetic::new(
                ((south + north) * 0.5).to_degrees(),
                ((west + east) * 0.5).to_degrees(),
                min_height,
            );
            Origin {
                strategy: OriginStrategy::Region,
                ecef: geodetic_degrees_to_ecef(lla).to_array(),
                lla: lla.to_array(),
            }
        }
        Some(volume) => {
            let strategy = match &volume {
                BoundingVolume::Sphere(_) => OriginStrategy::Sphere,
                _ => OriginStrategy::Box,
            };
            let center = volume.local_center().unwrap_or(DVec3::ZERO);
            Origin::from_ecef(strategy, transform_point(root_absolute, center))
        }
        None => {
            log::warn!("Root tile has no usable bounding volume, using root transform translation");
            Origin::from_ecef(OriginStrategy::Root, translation(root_absolute))
        }
    };

    if origin.ecef_point().length() < 1.0 {
        log::warn!("Origin is at the geocenter; geodetic coordinates are degenerate");
    }
    Ok(origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tile(value: serde_json::Value) -> Tile {
        Tile::from_value(value).unwrap()
    }

    #[test]
    fn test_region_has_priority_over_sphere() {
        let root = tile(json!({
            "boundingVolume": {
                "sphere": [0, 0, 0, 5],
                "region": [-1.0, -0.5, 1.0, 0.5, 10, 50]
            }
        }));
        // A transform that would move a sphere center must not move the region
        let absolute = DMat4::from_translation(DVec3::new(1.0e6, 0.0, 0.0));
        let origin = derive_origin(&root, &absolute).unwrap();
        assert_eq!(origin.strategy, OriginStrategy::Region);
        assert_eq!(origin.lla, [0.0, 0.0, 10.0]);
        assert!((origin.ecef_point() - DVec3::new(6_378_147.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_sphere_at_identity() {
        let root = tile(json!({ "boundingVolume": { "sphere": [0, 0, 0, 5] } }));
        let origin = derive_origin(&root, &DMat4::IDENTITY).unwrap();
        assert_eq!(origin.strategy, OriginStrategy::Sphere);
        assert_eq!(origin.ecef, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_box_center_transformed() {
        let root = tile(json!({
            "boundingVolume": { "box": [10, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1] }
        }));
        let absolute = DMat4::from_translation(DVec3::new(6_378_127.0, 0.0, 0.0));
        let origin = derive_origin(&root, &absolute).unwrap();
        assert_eq!(origin.strategy, OriginStrategy::Box);
        assert_eq!(origin.ecef, [6_378_137.0, 0.0, 0.0]);
        assert!(origin.lla[0].abs() < 1e-9);
        assert!(origin.lla[1].abs() < 1e-9);
        assert!(origin.lla[2].abs() < 1e-6);
    }

    #[test]
    fn test_root_translation_fallback() {
        let ecef = geodetic_degrees_to_ecef(Geodetic::new(51.5, -0.12, 35.0));
        let root = tile(json!({}));
        let absolute = DMat4::from_translation(ecef);
        let origin = derive_origin(&root, &absolute).unwrap();
        assert_eq!(origin.strategy, OriginStrategy::Root);
        assert!((origin.lla[0] - 51.5).abs() < 1e-9);
        assert!((origin.lla[1] + 0.12).abs() < 1e-9);
        assert!((origin.lla[2] - 35.0).abs() < 1e-6);
    }

    #[test]
    fn test_malformed_volume_is_an_error() {
        let root = tile(json!({ "boundingVolume": { "region": [0, 0, 0] } }));
        assert!(derive_origin(&root, &DMat4::IDENTITY).is_err());
    }

    #[test]
    fn test_strategy_serializes_lowercase() {
        assert_eq!(serde_json::to_value(OriginStrategy::Box).unwrap(), json!("box"));
        assert_eq!(OriginStrategy::Region.to_string(), "region");
    }
}
