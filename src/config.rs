//! Run configuration for tileset flattening.
//!
//! Every field has a default, so an empty TOML file (or no file at all) gives the
//! standard b3dm + tileset.json behaviour.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::tiles3d::{TilesError, TilesResult};

/// Default manifest file name inside the cache directory
pub const DEFAULT_MANIFEST_NAME: &str = "manifest.json";

/// Configuration shared by the loader, walker and manifest writer
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// Suffix marking leaf payload URIs (case-insensitive)
    pub payload_suffix: String,
    /// Suffix marking nested tileset URIs (case-insensitive)
    pub document_suffix: String,
    /// Fail on content URIs that are neither payloads nor tilesets
    pub strict_references: bool,
    /// Directory receiving converted tiles; enables `glb_path` in records
    pub cache_dir: Option<PathBuf>,
    /// Manifest file name written inside the cache directory
    pub manifest_name: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            payload_suffix: ".b3dm".to_string(),
            document_suffix: ".json".to_string(),
            strict_references: false,
            cache_dir: None,
            manifest_name: DEFAULT_MANIFEST_NAME.to_string(),
        }
    }
}

impl ManifestConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> TilesResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| TilesError::io(path, e))?;
        Self::from_toml(&text)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> TilesResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| TilesError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject suffix settings that would make classification meaningless
    pub fn validate(&self) -> TilesResult<()> {
        if self.payload_suffix.is_empty() || self.document_suffix.is_empty() {
            return Err(TilesError::Config("suffixes must not be empty".into()));
        }
        if self.payload_suffix.eq_ignore_ascii_case(&self.document_suffix) {
            return Err(TilesError::Config(format!(
                "payload and document suffix are both '{}'",
                self.payload_suffix
            )));
        }
        if self.manifest_name.is_empty() {
            return Err(TilesError::Config("manifest_name must not be empty".into()));
        }
        Ok(())
    }

    /// Where the converter is expected to write the glb for a record
    pub fn glb_path(&self, tile_id: &str) -> Option<PathBuf> {
        self.cache_dir
            .as_ref()
            .map(|dir| dir.join("glb").join(format!("{tile_id}.glb")))
    }
}
