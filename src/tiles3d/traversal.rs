//! Tileset traversal: flattening a tile tree and its nested tilesets
//!
//! The walk is pre-order over an explicit stack. Nested tilesets referenced from a
//! tile are loaded as soon as that tile is visited and their roots go on top of the
//! stack, so they are walked before the referencing tile's children and siblings.

use std::collections::HashSet;
use std::path::PathBuf;

use glam::DMat4;

use super::error::{TilesError, TilesResult};
use super::tile::Tile;
use super::tileset::TileDocument;
use super::uri::{classify, resolve, ReferenceKind};
use crate::config::ManifestConfig;
use crate::transforms::compose;

/// Id given to the root tile of the root document
pub const ROOT_TILE_ID: &str = "tile_000000";

/// One visited tile
#[derive(Debug, Clone)]
pub struct WalkedTile {
    /// Unique id across the whole walk
    pub id: String,
    /// The tile, with its children moved out
    pub tile: Tile,
    /// Root-to-tile transform in ECEF
    pub absolute: DMat4,
    /// Directory of the document this tile came from
    pub base_dir: PathBuf,
    /// Resolved payload files, only populated for leaf tiles
    pub payloads: Vec<PathBuf>,
}

/// Counters collected during a walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Tiles popped from the stack
    pub tiles_visited: usize,
    /// Nested tilesets loaded (root document excluded)
    pub documents_loaded: usize,
    /// References to an already expanded tileset that were skipped
    pub duplicate_references: usize,
    /// Content URIs that were neither payloads nor tilesets
    pub unclassified_uris: usize,
    /// Payload URIs on non-leaf tiles, ignored for flattening
    pub ignored_payloads: usize,
}

/// Output of a complete walk
#[derive(Debug, Clone)]
pub struct TileWalk {
    /// Visited tiles in traversal order; the first entry is the root
    pub tiles: Vec<WalkedTile>,
    pub stats: WalkStats,
}

impl TileWalk {
    /// The root tile of the root document
    pub fn root(&self) -> Option<&WalkedTile> {
        self.tiles.first()
    }

    /// Visited tiles that carry at least one payload
    pub fn leaf_records(&self) -> impl Iterator<Item = &WalkedTile> {
        self.tiles.iter().filter(|t| !t.payloads.is_empty())
    }
}

struct Frame {
    id: String,
    tile: Tile,
    parent: DMat4,
    base_dir: PathBuf,
}

struct PendingReference {
    path: PathBuf,
    parent: DMat4,
}

/// Single-use traversal session.
///
/// Holds the id counter and the set of expanded tileset paths, so independent
/// walks never share state.
pub struct TileWalker<'a> {
    config: &'a ManifestConfig,
    counter: usize,
    visited: HashSet<PathBuf>,
    pending: Vec<PendingReference>,
    stats: WalkStats,
}

impl<'a> TileWalker<'a> {
    pub fn new(config: &'a ManifestConfig) -> Self {
        Self {
            config,
            counter: 0,
            visited: HashSet::new(),
            pending: Vec::new(),
            stats: WalkStats::default(),
        }
    }

    /// Walk a root document and every tileset reachable from it.
    ///
    /// The root document counts as expanded from the start, so a nested tileset
    /// that points back at it is skipped as a duplicate rather than walked again.
    pub fn walk(mut self, document: TileDocument) -> TilesResult<TileWalk> {
        let TileDocument {
            path,
            base_dir,
            root,
        } = document;
        self.visited.insert(path);

        let mut stack = vec![Frame {
            id: ROOT_TILE_ID.to_string(),
            tile: root,
            parent: DMat4::IDENTITY,
            base_dir,
        }];
        let mut tiles = Vec::new();

        while let Some(frame) = stack.pop() {
            let Frame {
                id,
                mut tile,
                parent,
                base_dir,
            } = frame;
            self.stats.tiles_visited += 1;

            let absolute = compose(&parent, &tile.local_transform().map_err(|e| at_tile(&id, e))?);

            let children = tile.take_children().map_err(|e| at_tile(&id, e))?;
            for child in children.into_iter().rev() {
                stack.push(Frame {
                    id: self.next_id(),
                    tile: child,
                    parent: absolute,
                    base_dir: base_dir.clone(),
                });
            }

            let payloads = self.visit_content(&id, &tile, absolute, &base_dir)?;
            self.drain_pending(&mut stack)?;

            log::debug!("Visited {} ({} payloads)", id, payloads.len());
            tiles.push(WalkedTile {
                id,
                tile,
                absolute,
                base_dir,
                payloads,
            });
        }

        log::info!(
            "Walked {} tiles across {} tilesets",
            self.stats.tiles_visited,
            self.stats.documents_loaded + 1
        );
        Ok(TileWalk {
            tiles,
            stats: self.stats,
        })
    }

    fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("tile_{:06}", self.counter)
    }

    /// Classify content URIs: queue nested tilesets, collect leaf payloads
    fn visit_content(
        &mut self,
        id: &str,
        tile: &Tile,
        absolute: DMat4,
        base_dir: &std::path::Path,
    ) -> TilesResult<Vec<PathBuf>> {
        let mut payloads = Vec::new();
        for uri in tile.content_uris().map_err(|e| at_tile(id, e))? {
            match classify(uri, self.config) {
                ReferenceKind::Document => {
                    self.pending.push(PendingReference {
                        path: resolve(base_dir, uri),
                        parent: absolute,
                    });
                }
                ReferenceKind::Payload if tile.is_leaf() => {
                    let path = resolve(base_dir, uri);
                    if !path.is_file() {
                        return Err(TilesError::MissingContent { path });
                    }
                    payloads.push(path);
                }
                ReferenceKind::Payload => {
                    self.stats.ignored_payloads += 1;
                    log::debug!("Ignoring payload {} on non-leaf tile {}", uri, id);
                }
                ReferenceKind::Unclassified => {
                    if self.config.strict_references {
                        return Err(TilesError::UnsupportedReference {
                            uri: uri.to_string(),
                        });
                    }
                    self.stats.unclassified_uris += 1;
                    log::debug!("Skipping unclassified content {} on {}", uri, id);
                }
            }
        }
        Ok(payloads)
    }

    /// Load queued tilesets and push their roots on top of the stack
    fn drain_pending(&mut self, stack: &mut Vec<Frame>) -> TilesResult<()> {
        while let Some(reference) = self.pending.pop() {
            if !self.visited.insert(reference.path.clone()) {
                self.stats.duplicate_references += 1;
                log::debug!("Skipping already expanded tileset {}", reference.path.display());
                continue;
            }
            let document = TileDocument::load(&reference.path)?;
            self.stats.documents_loaded += 1;
            stack.push(Frame {
                id: self.next_id(),
                tile: document.root,
                parent: reference.parent,
                base_dir: document.base_dir,
            });
        }
        Ok(())
    }
}

/// Prefix structural errors with the tile id
fn at_tile(id: &str, err: TilesError) -> TilesError {
    match err {
        TilesError::InvalidDocument(msg) => TilesError::InvalidDocument(format!("{id}: {msg}")),
        other => other,
    }
}
