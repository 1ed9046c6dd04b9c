use std::fs;
use std::path::{Path, PathBuf};

use super::core::{DovmapConfig, CONFIG_FILE_NAME};
use crate::errors::{Error, Result};

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<DovmapConfig> {
    let config = toml::from_str::<DovmapConfig>(contents)?;

    if let Some(parallel) = &config.parallel {
        if parallel.max_concurrency == Some(0) {
            return Err(Error::Configuration(
                "parallel.max_concurrency must be at least 1".to_string(),
            ));
        }
    }

    Ok(config)
}

/// Load a configuration file from an explicit path.
pub fn load_config_from(path: &Path) -> Result<DovmapConfig> {
    let contents = fs::read_to_string(path).map_err(|e| Error::file_system(path, e))?;
    parse_and_validate_config(&contents)
}

/// Try loading config from a specific path; unreadable or invalid files
/// are reported and ignored.
fn try_load_config_from_path(config_path: &Path) -> Option<DovmapConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // Only log actual errors, not "file not found"
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!(
                "Ignoring {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            None
        }
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find `.dovmap.toml` in the current directory or one of its ancestors.
pub fn load_config() -> DovmapConfig {
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return DovmapConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            DovmapConfig::default()
        })
}
