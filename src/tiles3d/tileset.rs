//! Tileset document loading for 3D Tiles

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use super::error::{TilesError, TilesResult};
use super::tile::Tile;
use super::uri::absolute_path;

/// A loaded tileset document: its root tile and where it came from
#[derive(Debug, Clone)]
pub struct TileDocument {
    /// Absolute path of the document
    pub path: PathBuf,
    /// Directory used to resolve relative content URIs
    pub base_dir: PathBuf,
    /// Root tile
    pub root: Tile,
}

impl TileDocument {
    /// Load a tileset document from a file path.
    ///
    /// Only the top level is checked here: the payload must be a JSON object with
    /// an object-valued `root`. Tile fields are validated as the walker reaches them.
    pub fn load<P: AsRef<Path>>(path: P) -> TilesResult<Self> {
        let path = absolute_path(path.as_ref());
        let content = std::fs::read_to_string(&path).map_err(|e| TilesError::io(&path, e))?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let root = parse_root(&content)
            .map_err(|msg| TilesError::invalid(format!("{}: {}", path.display(), msg)))?;
        log::debug!("Loaded tileset {}", path.display());
        Ok(Self {
            path,
            base_dir,
            root,
        })
    }

    /// Build a document from JSON text with an explicit base directory
    pub fn from_json(json_str: &str, base_dir: PathBuf) -> TilesResult<Self> {
        let root = parse_root(json_str).map_err(TilesError::invalid)?;
        Ok(Self {
            path: base_dir.join("tileset.json"),
            base_dir,
            root,
        })
    }
}

/// Parse without a nesting limit; tile trees can be hundreds of levels deep.
/// The stacker grows the call stack on demand instead of overflowing it.
fn parse_json(content: &str) -> serde_json::Result<Value> {
    let mut de = serde_json::Deserializer::from_str(content);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

fn parse_root(content: &str) -> Result<Tile, String> {
    let value = parse_json(content).map_err(|e| format!("invalid JSON: {e}"))?;
    let Value::Object(mut obj) = value else {
        return Err("tileset must contain a JSON object".to_string());
    };
    match obj.remove("root") {
        Some(root @ Value::Object(_)) => Tile::from_value(root).map_err(|e| e.to_string()),
        _ => Err("tileset is missing a root tile".to_string()),
    }
}
