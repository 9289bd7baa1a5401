//! Bounding volume types for 3D Tiles

use glam::DVec3;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{TilesError, TilesResult};

/// Bounding volume of a tile, exactly one encoding active
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundingVolume {
    /// Geographic region: [west, south, east, north, min_height, max_height],
    /// angles in radians, heights in meters
    Region([f64; 6]),
    /// Sphere: [cx, cy, cz, radius]
    Sphere([f64; 4]),
    /// Oriented box: center (3) + x half-axis (3) + y half-axis (3) + z half-axis (3)
    Box([f64; 12]),
}

impl BoundingVolume {
    /// Pick one encoding from a raw `boundingVolume` object.
    ///
    /// A tile may carry several encodings; `region` wins over `sphere`, which wins
    /// over `box`. Returns `Ok(None)` when none of the three keys is present.
    pub fn from_json(value: &Value) -> TilesResult<Option<Self>> {
        let obj = value
            .as_object()
            .ok_or_else(|| TilesError::invalid("boundingVolume must be an object"))?;

        if let Some(region) = numbers::<6>(obj, "region")? {
            return Ok(Some(Self::Region(region)));
        }
        if let Some(sphere) = numbers::<4>(obj, "sphere")? {
            return Ok(Some(Self::Sphere(sphere)));
        }
        if let Some(data) = numbers::<12>(obj, "box")? {
            return Ok(Some(Self::Box(data)));
        }
        Ok(None)
    }

    /// Center in the tile's local frame; `None` for regions, which are geographic
    pub fn local_center(&self) -> Option<DVec3> {
        match self {
            Self::Region(_) => None,
            Self::Sphere(s) => Some(DVec3::new(s[0], s[1], s[2])),
            Self::Box(b) => Some(DVec3::new(b[0], b[1], b[2])),
        }
    }
}

/// Read a fixed-length number array under `key`, `None` if the key is absent
fn numbers<const N: usize>(obj: &Map<String, Value>, key: &str) -> TilesResult<Option<[f64; N]>> {
    let Some(value) = obj.get(key) else {
        return Ok(None);
    };
    let items = value
        .as_array()
        .filter(|items| items.len() == N)
        .ok_or_else(|| TilesError::invalid(format!("boundingVolume.{key} must be {N} numbers")))?;

    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = item
            .as_f64()
            .ok_or_else(|| TilesError::invalid(format!("boundingVolume.{key} must be {N} numbers")))?;
    }
    Ok(Some(out))
}
