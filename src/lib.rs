//! Tileset georeferencing: flattens 3D Tiles tile trees into manifests of leaf
//! payloads with absolute ECEF transforms and a representative geodetic origin.
//!
//! ```text
//! tileset.json --load--> TileDocument --walk--> TileWalk --+--> Manifest
//!                  ^                       |               |
//!                  +--- nested tilesets ---+   root tile --+--> Origin
//! ```

pub mod cli;
pub mod config;
pub mod geo;
pub mod manifest;
pub mod tiles3d;
pub mod transforms;

pub use config::ManifestConfig;
pub use manifest::{build_manifest, Manifest, ManifestBuilder, ManifestResult, TileRecord};
pub use tiles3d::{derive_origin, Origin, OriginStrategy, TileDocument, TileWalker, TilesError, TilesResult};
