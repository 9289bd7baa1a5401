//! Local ENU export of manifest tiles.
//!
//! Authoring tools lose precision with ECEF coordinates in the millions of meters,
//! so each record is re-based into the East-North-Up frame at the manifest origin.

use std::path::{Path, PathBuf};

use glam::DMat4;
use serde::{Deserialize, Serialize};

use super::Manifest;
use crate::geo::local_frame;
use crate::tiles3d::{TilesError, TilesResult};
use crate::transforms::matrix_to_column_major;

/// A manifest record expressed in the local frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalTile {
    pub tile_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glb_path: Option<PathBuf>,
    /// ENU transform, column-major
    pub transform_enu: [f64; 16],
}

/// Export document read by the authoring tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalExport {
    pub tiles: Vec<LocalTile>,
}

impl LocalExport {
    pub fn save(&self, path: &Path) -> TilesResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TilesError::io(parent, e))?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data).map_err(|e| TilesError::io(path, e))
    }
}

/// Re-express every manifest record in the ENU frame at the manifest origin
pub fn build_local_tiles(manifest: &Manifest) -> TilesResult<LocalExport> {
    if manifest.tiles.is_empty() {
        return Err(TilesError::invalid("manifest contains no tiles to export"));
    }
    let frame = local_frame(manifest.origin.ecef_point());

    let tiles = manifest
        .tiles
        .iter()
        .map(|record| {
            let absolute = DMat4::from_cols_array(&record.transform_ecef);
            LocalTile {
                tile_id: record.tile_id.clone(),
                glb_path: record.glb_path.clone(),
                transform_enu: matrix_to_column_major(&(frame * absolute)),
            }
        })
        .collect();

    Ok(LocalExport { tiles })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{geodetic_degrees_to_ecef, Geodetic};
    use crate::manifest::TileRecord;
    use crate::tiles3d::{Origin, OriginStrategy};
    use glam::DVec3;

    fn manifest_at(lat: f64, lon: f64, offsets: &[DVec3]) -> Manifest {
        let origin_ecef = geodetic_degrees_to_ecef(Geodetic::new(lat, lon, 0.0));
        let tiles = offsets
            .iter()
            .enumerate()
            .map(|(i, offset)| TileRecord {
                tile_id: format!("tile_{i:06}"),
                b3dm_path: PathBuf::from(format!("/data/{i}.b3dm")),
                glb_path: None,
                transform_ecef: DMat4::from_translation(origin_ecef + *offset).to_cols_array(),
                bounding_volume: None,
            })
            .collect();
        Manifest {
            tiles,
            origin: Origin {
                strategy: OriginStrategy::Root,
                ecef: origin_ecef.to_array(),
                lla: [lat, lon, 0.0],
            },
        }
    }

    #[test]
    fn test_origin_tile_maps_near_zero() {
        let manifest = manifest_at(10.0, 20.0, &[DVec3::ZERO]);
        let export = build_local_tiles(&manifest).unwrap();
        let m = DMat4::from_cols_array(&export.tiles[0].transform_enu);
        assert!(m.w_axis.truncate().length() < 1e-6);
    }

    #[test]
    fn test_equator_offsets_become_enu() {
        // At (0, 0): ECEF +Y is east, +Z is north
        let manifest = manifest_at(0.0, 0.0, &[DVec3::new(0.0, 12.0, 0.0), DVec3::new(0.0, 0.0, 7.0)]);
        let export = build_local_tiles(&manifest).unwrap();
        let east = DMat4::from_cols_array(&export.tiles[0].transform_enu).w_axis.truncate();
        let north = DMat4::from_cols_array(&export.tiles[1].transform_enu).w_axis.truncate();
        assert!((east - DVec3::new(12.0, 0.0, 0.0)).length() < 1e-6);
        assert!((north - DVec3::new(0.0, 7.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_empty_manifest_rejected() {
        let mut manifest = manifest_at(0.0, 0.0, &[]);
        manifest.tiles.clear();
        assert!(build_local_tiles(&manifest).is_err());
    }
}
