use std::fs;
use std::path::Path;

use crate::error::{ArtifactGuardError, Result};

use super::Config;

pub const CONFIG_FILE_NAME: &str = ".artifact-guard.toml";

pub trait ConfigLoader {
    /// Load configuration from the default location, falling back to
    /// defaults when no file is present.
    ///
    /// # Errors
    /// Returns an error if a present file cannot be read or parsed.
    fn load(&self) -> Result<Config>;

    /// Load configuration from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file is missing, unreadable, or malformed.
    fn load_from_path(&self, path: &Path) -> Result<Config>;
}

#[derive(Debug, Default)]
pub struct FileConfigLoader;

impl FileConfigLoader {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ConfigLoader for FileConfigLoader {
    fn load(&self) -> Result<Config> {
        let path = Path::new(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Config::default());
        }
        self.load_from_path(path)
    }

    fn load_from_path(&self, path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(ArtifactGuardError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| ArtifactGuardError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
