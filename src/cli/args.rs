// src/cli/args.rs
// Command-line arguments for the tiles-manifest binary
// RELEVANT FILES: src/cli/mod.rs, src/config.rs

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::ManifestConfig;
use crate::tiles3d::{absolute_path, TilesError, TilesResult};

/// Name of the cache directory created inside the input directory
pub const CACHE_DIR_NAME: &str = ".tiles_manifest_cache";

/// Root tileset file expected in the input directory
pub const TILESET_FILE: &str = "tileset.json";

/// Flatten a 3D Tiles tileset into a georeferenced tile manifest.
#[derive(Parser, Debug, Clone)]
#[command(name = "tiles-manifest")]
#[command(about = "Flattens a 3D Tiles tileset into a georeferenced tile manifest")]
pub struct Args {
    /// Tileset input directory (must contain tileset.json).
    #[arg(short, long)]
    pub input: PathBuf,

    /// Manifest output path (default: <cache-dir>/manifest.json).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Cache directory for converted tiles (default: <input>/.tiles_manifest_cache).
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Also write tiles re-based into the local ENU frame to this path.
    #[arg(long)]
    pub local_export: Option<PathBuf>,

    /// Optional TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Fail on content that is neither b3dm nor a nested tileset.
    #[arg(long)]
    pub strict_references: bool,
}

/// Paths and configuration for one run, resolved from the arguments
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub input_dir: PathBuf,
    pub tileset_path: PathBuf,
    pub manifest_path: PathBuf,
    pub local_export_path: Option<PathBuf>,
    pub config: ManifestConfig,
}

impl Args {
    /// Resolve and validate paths, merge the config file with flag overrides
    pub fn plan(&self) -> TilesResult<RunPlan> {
        let input_dir = absolute_path(&self.input);
        if !input_dir.is_dir() {
            return Err(TilesError::Config(format!(
                "input directory not found: {}",
                input_dir.display()
            )));
        }
        let tileset_path = input_dir.join(TILESET_FILE);
        if !tileset_path.is_file() {
            return Err(TilesError::Config(format!(
                "{} not found: {}",
                TILESET_FILE,
                tileset_path.display()
            )));
        }

        let mut config = match &self.config {
            Some(path) => ManifestConfig::load(path)?,
            None => ManifestConfig::default(),
        };
        if self.strict_references {
            config.strict_references = true;
        }
        if let Some(dir) = &self.cache_dir {
            config.cache_dir = Some(dir.clone());
        }
        let cache_dir = absolute_path(
            config
                .cache_dir
                .as_deref()
                .unwrap_or(&input_dir.join(CACHE_DIR_NAME)),
        );
        config.cache_dir = Some(cache_dir.clone());

        let manifest_path = match &self.output {
            Some(path) => absolute_path(path),
            None => cache_dir.join(&config.manifest_name),
        };
        ensure_json_path(&manifest_path)?;
        let local_export_path = self.local_export.as_deref().map(absolute_path);
        if let Some(path) = &local_export_path {
            ensure_json_path(path)?;
        }

        Ok(RunPlan {
            input_dir,
            tileset_path,
            manifest_path,
            local_export_path,
            config,
        })
    }
}

fn ensure_json_path(path: &Path) -> TilesResult<()> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(())
    } else {
        Err(TilesError::Config(format!(
            "output file must have a .json extension: {}",
            path.display()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(input: &Path) -> Args {
        Args::parse_from(["tiles-manifest", "--input", input.to_str().unwrap()])
    }

    #[test]
    fn test_defaults_under_input_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(TILESET_FILE), "{}").unwrap();

        let plan = args(dir.path()).plan().unwrap();
        let input = std::fs::canonicalize(dir.path()).unwrap();
        let cache = input.join(CACHE_DIR_NAME);
        assert_eq!(plan.tileset_path, input.join(TILESET_FILE));
        assert_eq!(plan.manifest_path, cache.join("manifest.json"));
        assert_eq!(plan.config.cache_dir, Some(cache));
        assert!(plan.local_export_path.is_none());
    }

    #[test]
    fn test_flag_overrides() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(TILESET_FILE), "{}").unwrap();
        let out = dir.path().join("out.json");

        let parsed = Args::parse_from([
            "tiles-manifest",
            "--input",
            dir.path().to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
            "--strict-references",
        ]);
        let plan = parsed.plan().unwrap();
        assert!(plan.config.strict_references);
        assert!(plan.manifest_path.ends_with("out.json"));
    }

    #[test]
    fn test_rejects_missing_tileset_and_bad_output() {
        let dir = tempfile::tempdir().unwrap();
        assert!(args(dir.path()).plan().is_err());

        std::fs::write(dir.path().join(TILESET_FILE), "{}").unwrap();
        let parsed = Args::parse_from([
            "tiles-manifest",
            "--input",
            dir.path().to_str().unwrap(),
            "--output",
            "manifest.txt",
        ]);
        assert_eq!(parsed.plan().unwrap_err().kind(), "config");
    }
}
