//! Implementation of the `init` command.
//!
//! Initialization creates the `.linkage/` directory with a YAML config and
//! an empty diagram snapshot, mirroring the layout every other command
//! discovers by walking up the directory tree.

use crate::error::{ConfigError, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Default edge id prefix if none specified.
pub const DEFAULT_PREFIX: &str = "wire";

/// Name of the linkage directory.
pub const LINKAGE_DIR_NAME: &str = ".linkage";

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the diagram snapshot file.
pub const DIAGRAM_FILE_NAME: &str = "diagram.jsonl";

/// Name of the gitignore file within .linkage.
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Minimum prefix length.
pub const MIN_PREFIX_LENGTH: usize = 2;

/// Maximum prefix length.
pub const MAX_PREFIX_LENGTH: usize = 20;

/// Maximum directory depth to traverse when searching for the linkage root.
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Configuration file structure for linkage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkageConfig {
    /// Edge id prefix (e.g., "wire" for "wire-a3f8").
    #[serde(rename = "edge-prefix")]
    pub edge_prefix: String,

    /// Storage configuration.
    pub storage: StorageConfig,
}

/// Storage configuration section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Storage backend type ("memory" for in-memory with JSONL persistence).
    pub backend: String,

    /// Path to the snapshot file, relative to the diagram root.
    pub data_file: String,
}

impl LinkageConfig {
    /// Create a new configuration with the given prefix.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            edge_prefix: prefix.to_string(),
            storage: StorageConfig {
                backend: "memory".to_string(),
                data_file: format!("{LINKAGE_DIR_NAME}/{DIAGRAM_FILE_NAME}"),
            },
        }
    }

    /// Load configuration from a file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Invalid(e.to_string()).into())
    }

    /// Save configuration to a file.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::Config(ConfigError::Invalid(format!("YAML error: {e}"))))?;
        fs::write(path, content).await?;
        Ok(())
    }
}

impl Default for LinkageConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

/// Result of the init command.
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created linkage directory.
    pub linkage_dir: PathBuf,
    /// Path to the created config file.
    pub config_file: PathBuf,
    /// Path to the created snapshot file.
    pub diagram_file: PathBuf,
    /// The prefix used for edge ids.
    pub prefix: String,
}

/// Validate edge id prefix format.
///
/// Requirements:
/// - 2-20 characters
/// - Alphanumeric only (letters and digits)
///
/// Note: Expects pre-trimmed input. Callers should trim whitespace before calling.
pub fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.len() < MIN_PREFIX_LENGTH {
        return Err(Error::Config(ConfigError::Invalid(format!(
            "Prefix must be at least {MIN_PREFIX_LENGTH} characters"
        ))));
    }

    if prefix.len() > MAX_PREFIX_LENGTH {
        return Err(Error::Config(ConfigError::Invalid(format!(
            "Prefix cannot exceed {MAX_PREFIX_LENGTH} characters"
        ))));
    }

    if !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::Config(ConfigError::Invalid(
            "Prefix must contain only alphanumeric characters".to_string(),
        )));
    }

    Ok(())
}

/// Search upward from `start` for a directory containing `.linkage/`.
///
/// Bounded by [`MAX_TRAVERSAL_DEPTH`] to stay well-behaved on pathological
/// filesystem layouts.
#[must_use]
pub fn find_linkage_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    for _ in 0..MAX_TRAVERSAL_DEPTH {
        let dir = current?;
        if dir.join(LINKAGE_DIR_NAME).is_dir() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

/// Initialize a new linkage diagram in the given directory.
///
/// Creates `.linkage/` with a config file, an empty snapshot, and a
/// gitignore covering the temp files left by interrupted atomic saves.
///
/// # Errors
///
/// Returns an error if a diagram is already initialized here, if the
/// prefix is invalid, or if any file cannot be created.
pub async fn init(base_dir: &Path, prefix: Option<&str>) -> Result<InitResult> {
    let prefix = prefix.unwrap_or(DEFAULT_PREFIX);
    validate_prefix(prefix)?;

    let linkage_dir = base_dir.join(LINKAGE_DIR_NAME);
    if linkage_dir.exists() {
        return Err(Error::Config(ConfigError::Invalid(format!(
            "{} already exists in {}",
            LINKAGE_DIR_NAME,
            base_dir.display()
        ))));
    }

    fs::create_dir_all(&linkage_dir).await?;

    let config_file = linkage_dir.join(CONFIG_FILE_NAME);
    let config = LinkageConfig::new(prefix);
    config.save(&config_file).await?;

    let diagram_file = linkage_dir.join(DIAGRAM_FILE_NAME);
    fs::write(&diagram_file, b"").await?;

    let gitignore_file = linkage_dir.join(GITIGNORE_FILE_NAME);
    fs::write(&gitignore_file, b"*.tmp\n").await?;

    tracing::info!(dir = %linkage_dir.display(), prefix, "initialized linkage diagram");

    Ok(InitResult {
        linkage_dir,
        config_file,
        diagram_file,
        prefix: prefix.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_validation_bounds() {
        assert!(validate_prefix("ab").is_ok());
        assert!(validate_prefix("wire").is_ok());
        assert!(validate_prefix("a").is_err());
        assert!(validate_prefix("x".repeat(21).as_str()).is_err());
        assert!(validate_prefix("has space").is_err());
        assert!(validate_prefix("has-dash").is_err());
    }

    #[test]
    fn config_round_trips_through_yaml() {
        let config = LinkageConfig::new("wire");
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: LinkageConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config, back);
    }

    #[tokio::test]
    async fn init_creates_layout_and_rejects_reinit() {
        let dir = tempfile::tempdir().unwrap();

        let result = init(dir.path(), Some("test")).await.unwrap();
        assert!(result.config_file.is_file());
        assert!(result.diagram_file.is_file());
        assert_eq!(result.prefix, "test");

        assert!(init(dir.path(), Some("test")).await.is_err());
    }

    #[tokio::test]
    async fn find_root_walks_upward() {
        let dir = tempfile::tempdir().unwrap();
        init(dir.path(), None).await.unwrap();

        let nested = dir.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_linkage_root(&nested).unwrap();
        assert_eq!(found, dir.path());
    }
}
