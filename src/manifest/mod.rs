//! Flattened tile manifest: schema, assembly and I/O.
//!
//! The manifest is the hand-off to the downstream converter and exporter:
//! - `tiles` - one record per leaf payload, in traversal order
//! - `origin` - the georeferencing origin of the tileset
//!
//! Field names are a wire contract with those tools and are kept stable.

pub mod local;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ManifestConfig;
use crate::tiles3d::{
    derive_origin, Origin, TileDocument, TileWalk, TileWalker, TilesError, TilesResult, WalkStats,
};
use crate::transforms::matrix_to_column_major;

pub use local::{build_local_tiles, LocalExport, LocalTile};

/// One flattened leaf payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileRecord {
    /// Unique record id
    pub tile_id: String,
    /// Absolute path of the b3dm payload
    pub b3dm_path: PathBuf,
    /// Where the converter should write the glb for this record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glb_path: Option<PathBuf>,
    /// Absolute ECEF transform, column-major
    pub transform_ecef: [f64; 16],
    /// The tile's bounding volume exactly as written in the tileset
    #[serde(rename = "boundingVolume")]
    pub bounding_volume: Option<Value>,
}

/// Ordered tile records plus the tileset origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub tiles: Vec<TileRecord>,
    pub origin: Origin,
}

impl Manifest {
    /// Load manifest from a JSON file
    pub fn load(path: &Path) -> TilesResult<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| TilesError::io(path, e))?;
        serde_json::from_str(&data)
            .map_err(|e| TilesError::invalid(format!("{}: {}", path.display(), e)))
    }

    /// Save manifest to a JSON file, creating parent directories
    pub fn save(&self, path: &Path) -> TilesResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TilesError::io(parent, e))?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data).map_err(|e| TilesError::io(path, e))
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }
}

/// Collects walker output and the origin into a [`Manifest`]
#[derive(Debug)]
pub struct ManifestBuilder<'a> {
    config: &'a ManifestConfig,
}

impl<'a> ManifestBuilder<'a> {
    pub fn new(config: &'a ManifestConfig) -> Self {
        Self { config }
    }

    /// Turn walked tiles into records, in walk order.
    ///
    /// A leaf with several payloads yields one record per payload; the extra
    /// records get `_1`, `_2`, ... appended to the tile id.
    pub fn records(&self, walk: &TileWalk) -> Vec<TileRecord> {
        let mut records = Vec::new();
        for walked in walk.leaf_records() {
            let transform_ecef = matrix_to_column_major(&walked.absolute);
            for (n, payload) in walked.payloads.iter().enumerate() {
                let tile_id = if n == 0 {
                    walked.id.clone()
                } else {
                    format!("{}_{}", walked.id, n)
                };
                records.push(TileRecord {
                    glb_path: self.config.glb_path(&tile_id),
                    tile_id,
                    b3dm_path: payload.clone(),
                    transform_ecef,
                    bounding_volume: walked.tile.raw_bounding_volume().cloned(),
                });
            }
        }
        records
    }

    /// Assemble the final manifest; an empty record list is an error
    pub fn assemble(&self, walk: &TileWalk, origin: Origin) -> TilesResult<Manifest> {
        let tiles = self.records(walk);
        if tiles.is_empty() {
            return Err(TilesError::invalid("no leaf payload tiles found in tileset"));
        }
        Ok(Manifest { tiles, origin })
    }
}

/// Result of a complete flattening run
#[derive(Debug, Clone)]
pub struct ManifestResult {
    pub manifest: Manifest,
    pub tile_count: usize,
    pub stats: WalkStats,
}

/// Load a tileset, walk it, derive its origin and assemble the manifest
pub fn build_manifest(tileset_path: &Path, config: &ManifestConfig) -> TilesResult<ManifestResult> {
    let document = TileDocument::load(tileset_path)?;
    let walk = TileWalker::new(config).walk(document)?;

    let root = walk
        .root()
        .ok_or_else(|| TilesError::invalid("no tiles found in tileset"))?;
    let origin = derive_origin(&root.tile, &root.absolute)?;

    let manifest = ManifestBuilder::new(config).assemble(&walk, origin)?;
    let tile_count = manifest.tile_count();
    log::info!(
        "Manifest has {} tiles, origin {} ({:.6}, {:.6}, {:.2})",
        tile_count,
        manifest.origin.strategy,
        manifest.origin.lla[0],
        manifest.origin.lla[1],
        manifest.origin.lla[2]
    );

    Ok(ManifestResult {
        manifest,
        tile_count,
        stats: walk.stats,
    })
}
