//! Data directory resolution.
//!
//! Order of precedence:
//! 1. an explicit path (`BackendConfig::with_data_directory`)
//! 2. the `UDEASTAY_DATA_DIR` environment variable
//! 3. `<documents>/UdeAStay`, unless that directory holds a `.udeastay_redirect`
//!    file pointing somewhere else

use anyhow::{anyhow, Result};
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "UDEASTAY_DATA_DIR";
pub const DEFAULT_DIR_NAME: &str = "UdeAStay";
pub const REDIRECT_FILE: &str = ".udeastay_redirect";

#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub data_directory: PathBuf,
}

impl BackendConfig {
    pub fn with_data_directory<P: AsRef<Path>>(path: P) -> Self {
        Self {
            data_directory: path.as_ref().to_path_buf(),
        }
    }

    /// Resolve the data directory from the environment
    pub fn from_env() -> Result<Self> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                info!("Using data directory from {}: {}", DATA_DIR_ENV, dir);
                return Ok(Self::with_data_directory(dir.trim()));
            }
        }

        let documents_dir = dirs::document_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
            .ok_or_else(|| anyhow!("Could not determine documents directory"))?;

        Ok(Self::with_data_directory(resolve_redirect(&documents_dir.join(DEFAULT_DIR_NAME))))
    }
}

/// Follow a redirect file inside `default_dir`, falling back to `default_dir`
pub fn resolve_redirect(default_dir: &Path) -> PathBuf {
    let redirect_file = default_dir.join(REDIRECT_FILE);
    if !redirect_file.exists() {
        info!("No redirect file found, using data directory: {}", default_dir.display());
        return default_dir.to_path_buf();
    }

    match fs::read_to_string(&redirect_file) {
        Ok(contents) => {
            let target = PathBuf::from(contents.trim());
            if target.is_dir() {
                info!("Found redirect file, using data directory: {}", target.display());
                target
            } else {
                warn!(
                    "Redirect file points to non-existent directory: {}. Using default.",
                    target.display()
                );
                default_dir.to_path_buf()
            }
        }
        Err(e) => {
            error!("Failed to read redirect file: {}. Using default directory.", e);
            default_dir.to_path_buf()
        }
    }
}
