//! Command-line driver for the tiles-manifest binary

pub mod args;

use anyhow::Context;

pub use args::{Args, RunPlan};

use crate::manifest::{build_local_tiles, build_manifest, ManifestResult};
use crate::tiles3d::TilesError;

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const INVALID_INPUT: i32 = 2;
    pub const WRITE_FAILURE: i32 = 4;
}

/// Map a library error to the exit code reported by the binary
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<TilesError>() {
        Some(TilesError::Io { .. }) | Some(TilesError::Json(_)) => exit_codes::WRITE_FAILURE,
        _ => exit_codes::INVALID_INPUT,
    }
}

/// Summary of a finished run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub result: ManifestResult,
    pub plan: RunPlan,
}

/// Build the manifest described by `plan` and write the requested outputs
pub fn run(plan: RunPlan) -> anyhow::Result<RunSummary> {
    log::info!("Input dir: {}", plan.input_dir.display());
    log::info!("Tileset: {}", plan.tileset_path.display());
    if let Some(cache) = &plan.config.cache_dir {
        log::info!("Cache dir: {}", cache.display());
    }

    // Input problems are reported before any output is written
    let result = build_manifest(&plan.tileset_path, &plan.config)
        .map_err(|e| anyhow::Error::new(InputError(e)))?;

    result
        .manifest
        .save(&plan.manifest_path)
        .with_context(|| format!("writing manifest {}", plan.manifest_path.display()))?;
    log::info!("Tiles discovered: {}", result.tile_count);
    log::info!("Manifest: {}", plan.manifest_path.display());

    if let Some(path) = &plan.local_export_path {
        let export = build_local_tiles(&result.manifest)?;
        export
            .save(path)
            .with_context(|| format!("writing local export {}", path.display()))?;
        log::info!("Local export: {} ({} tiles)", path.display(), export.tiles.len());
    }

    let [lat, lon, alt] = result.manifest.origin.lla;
    log::info!("Origin (lat, lon, alt): {:.6}, {:.6}, {:.2}", lat, lon, alt);
    log::info!("Origin strategy: {}", result.manifest.origin.strategy);
    if result.stats.unclassified_uris > 0 {
        log::warn!(
            "Skipped {} content URIs that were neither b3dm nor tilesets",
            result.stats.unclassified_uris
        );
    }

    Ok(RunSummary { result, plan })
}

/// Parse arguments, run, and return the process exit code
pub fn run_cli(args: Args) -> i32 {
    let plan = match args.plan() {
        Ok(plan) => plan,
        Err(e) => {
            log::error!("{}", e);
            return exit_codes::INVALID_INPUT;
        }
    };
    match run(plan) {
        Ok(_) => exit_codes::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            if e.downcast_ref::<InputError>().is_some() {
                exit_codes::INVALID_INPUT
            } else {
                exit_code_for(&e)
            }
        }
    }
}

/// Wraps errors raised while reading the tileset, so they are never reported as
/// output failures even when they are IO errors
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
struct InputError(TilesError);
