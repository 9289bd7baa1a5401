//! 3D Tiles flattening for tileset_georef
//!
//! This module loads tileset.json documents, walks the tile tree (including nested
//! tilesets) into absolute ECEF transforms, and derives a georeferencing origin.
//! Leaf b3dm payloads are the only content that is flattened.

mod bounds;
mod error;
mod origin;
mod tile;
mod tileset;
mod traversal;
mod uri;

pub use bounds::BoundingVolume;
pub use error::{TilesError, TilesResult};
pub use origin::{derive_origin, Origin, OriginStrategy};
pub use tile::Tile;
pub use tileset::TileDocument;
pub use traversal::{TileWalk, TileWalker, WalkStats, WalkedTile, ROOT_TILE_ID};
pub use uri::{absolute_path, classify, resolve, strip_query_fragment, ReferenceKind};
