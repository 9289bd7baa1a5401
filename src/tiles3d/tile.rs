//! Tile structure for 3D Tiles
//!
//! Tiles keep their raw JSON object and validate fields only when asked, so a
//! malformed field is reported when the walker reaches that tile.

use glam::DMat4;
use serde_json::{Map, Value};

use super::bounds::BoundingVolume;
use super::error::{TilesError, TilesResult};
use crate::transforms::matrix_from_column_major;

/// A single tile in the 3D Tiles hierarchy
#[derive(Debug, Clone)]
pub struct Tile {
    node: Map<String, Value>,
    leaf: bool,
}

impl Tile {
    /// Wrap a tile node, which must be a JSON object
    pub fn from_value(value: Value) -> TilesResult<Self> {
        match value {
            Value::Object(node) => {
                let leaf = match node.get("children") {
                    None | Some(Value::Null) => true,
                    Some(Value::Array(children)) => children.is_empty(),
                    Some(_) => false,
                };
                Ok(Self { node, leaf })
            }
            other => Err(TilesError::invalid(format!(
                "tile must be an object, got {}",
                json_type(&other)
            ))),
        }
    }

    /// A leaf has no `children`, or an empty list. Content does not matter.
    pub fn is_leaf(&self) -> bool {
        self.leaf
    }

    /// Local transform; absent or null means identity
    pub fn local_transform(&self) -> TilesResult<DMat4> {
        let values = match self.node.get("transform") {
            None | Some(Value::Null) => return Ok(DMat4::IDENTITY),
            Some(Value::Array(values)) => values,
            Some(_) => return Err(TilesError::invalid("tile transform must be a 16-number array")),
        };
        let numbers = values
            .iter()
            .map(|v| v.as_f64().filter(|n| n.is_finite()))
            .collect::<Option<Vec<f64>>>()
            .ok_or_else(|| TilesError::invalid("tile transform must contain only numbers"))?;
        matrix_from_column_major(&numbers).ok_or_else(|| {
            TilesError::invalid(format!(
                "tile transform must be a 16-number array, got {} values",
                numbers.len()
            ))
        })
    }

    /// Move the child tiles out of this node, in document order
    pub fn take_children(&mut self) -> TilesResult<Vec<Tile>> {
        match self.node.remove("children") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(children)) => children.into_iter().map(Tile::from_value).collect(),
            Some(other) => Err(TilesError::invalid(format!(
                "tile children must be an array, got {}",
                json_type(&other)
            ))),
        }
    }

    /// Content URIs from both `content` and `contents`, in that order
    pub fn content_uris(&self) -> TilesResult<Vec<&str>> {
        let mut uris = Vec::new();
        match self.node.get("content") {
            None | Some(Value::Null) => {}
            Some(content) => uris.push(content_uri(content)?),
        }
        match self.node.get("contents") {
            None | Some(Value::Null) => {}
            Some(Value::Array(contents)) => {
                for content in contents {
                    uris.push(content_uri(content)?);
                }
            }
            Some(_) => return Err(TilesError::invalid("tile contents must be an array")),
        }
        Ok(uris)
    }

    /// Raw `boundingVolume` value, passed through to the manifest untouched
    pub fn raw_bounding_volume(&self) -> Option<&Value> {
        self.node.get("boundingVolume").filter(|v| !v.is_null())
    }

    /// Parsed bounding volume, `None` when absent or without a known encoding
    pub fn bounding_volume(&self) -> TilesResult<Option<BoundingVolume>> {
        match self.raw_bounding_volume() {
            Some(raw) => BoundingVolume::from_json(raw),
            None => Ok(None),
        }
    }
}

/// `uri`, or the pre-1.0 `url`, of a content object
fn content_uri(content: &Value) -> TilesResult<&str> {
    let obj = content
        .as_object()
        .ok_or_else(|| TilesError::invalid("tile content must be an object"))?;
    ["uri", "url"]
        .iter()
        .filter_map(|key| obj.get(*key).and_then(Value::as_str))
        .find(|uri| !uri.is_empty())
        .ok_or_else(|| TilesError::invalid("tile content is missing a 'uri' string"))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
