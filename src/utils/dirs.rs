// src/utils/dirs.rs

//! Location of the snapshot store.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{AppError, Result};
use crate::models::StorageConfig;

const QUALIFIER: &str = "";
const ORGANIZATION: &str = "benediction";
const APPLICATION: &str = "pouetspy";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Directory holding the snapshot store: the configured one, or the
/// platform cache directory of the application.
pub fn cache_dir(config: &StorageConfig) -> Result<PathBuf> {
    if let Some(dir) = &config.cache_dir {
        return Ok(dir.clone());
    }
    project_dirs()
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .ok_or_else(|| AppError::config("No home directory to derive a cache directory from"))
}

/// `config.toml` in the platform config directory of the application.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Full path of the snapshot store file.
pub fn store_path(config: &StorageConfig) -> Result<PathBuf> {
    Ok(cache_dir(config)?.join(&config.file_name))
}
