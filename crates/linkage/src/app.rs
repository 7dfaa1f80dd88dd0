//! Application context for CLI command execution.
//!
//! This module provides the `App` struct that manages snapshot-store
//! lifecycle and provides a context for executing CLI commands.
//!
//! # Example
//!
//! ```no_run
//! use linkage::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new(".")).await?;
//!     // Execute commands using app...
//!     Ok(())
//! }
//! ```

use crate::commands::init::{find_linkage_root, LinkageConfig, CONFIG_FILE_NAME, LINKAGE_DIR_NAME};
use crate::error::{ConfigError, Result};
use crate::store::in_memory::{load_from_jsonl, save_to_jsonl};
use crate::store::DiagramStore;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Application context for CLI operations.
///
/// Manages store initialization and lifecycle. The snapshot is loaded from
/// the linkage directory on creation; mutating commands call [`App::save`]
/// before returning.
pub struct App {
    /// The snapshot store (trait object for polymorphism).
    store: Box<dyn DiagramStore>,

    /// Path to the linkage directory (.linkage).
    linkage_dir: PathBuf,

    /// Absolute path to the snapshot file.
    diagram_path: PathBuf,

    /// Edge id prefix from configuration.
    prefix: String,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("linkage_dir", &self.linkage_dir)
            .field("diagram_path", &self.diagram_path)
            .field("prefix", &self.prefix)
            .field("store", &"<dyn DiagramStore>")
            .finish()
    }
}

impl App {
    /// Create an App instance from the given working directory.
    ///
    /// Searches up the directory tree to find a `.linkage/` directory,
    /// loads configuration, and loads the snapshot into an in-memory store.
    /// Load warnings are logged, not fatal.
    ///
    /// # Errors
    ///
    /// Returns an error if no linkage diagram is found in the directory
    /// tree, if configuration cannot be loaded, or if the snapshot file is
    /// unreadable.
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root_dir = find_linkage_root(working_dir).ok_or(ConfigError::NotInitialized)?;

        let linkage_dir = root_dir.join(LINKAGE_DIR_NAME);
        let config_path = linkage_dir.join(CONFIG_FILE_NAME);

        let config = LinkageConfig::load(&config_path).await?;
        let diagram_path = root_dir.join(&config.storage.data_file);

        let (store, warnings) =
            load_from_jsonl(&diagram_path, config.edge_prefix.clone()).await?;
        for warning in &warnings {
            warn!("{}", warning.description());
        }

        Ok(Self {
            store,
            linkage_dir,
            diagram_path,
            prefix: config.edge_prefix,
        })
    }

    /// The snapshot store, for read queries.
    #[must_use]
    pub fn store(&self) -> &dyn DiagramStore {
        self.store.as_ref()
    }

    /// The snapshot store, for mutations.
    pub fn store_mut(&mut self) -> &mut Box<dyn DiagramStore> {
        &mut self.store
    }

    /// Path to the `.linkage` directory.
    #[must_use]
    pub fn linkage_dir(&self) -> &Path {
        &self.linkage_dir
    }

    /// Path to the snapshot file.
    #[must_use]
    pub fn diagram_path(&self) -> &Path {
        &self.diagram_path
    }

    /// Edge id prefix from configuration.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Persist the current snapshot atomically.
    pub async fn save(&self) -> Result<()> {
        save_to_jsonl(self.store.as_ref(), &self.diagram_path).await
    }
}
