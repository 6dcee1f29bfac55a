use std::fs;
use std::path::{Path, PathBuf};

use crate::io::bridge::PersistenceBridge;
use crate::io::storage::FileStorage;
use crate::model::config::WorkspaceConfig;

/// Directory name that marks a tick workspace.
pub const TICK_DIR: &str = ".tick";

/// Error type for workspace discovery and loading.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("not a tick workspace: no .tick/ directory found (run `tk init`)")]
    NotAWorkspace,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A discovered workspace: the root directory, its `.tick/` dir, and the
/// parsed configuration.
pub struct Workspace {
    pub root: PathBuf,
    pub dir: PathBuf,
    pub config: WorkspaceConfig,
}

impl Workspace {
    /// Discover a workspace by walking up from `start`, then load its config.
    pub fn discover(start: &Path) -> Result<Self, WorkspaceError> {
        let root = discover_workspace(start)?;
        Workspace::load(&root)
    }

    /// Load the workspace rooted at `root` (which must contain `.tick/`).
    pub fn load(root: &Path) -> Result<Self, WorkspaceError> {
        let dir = root.join(TICK_DIR);
        if !dir.join("config.toml").exists() {
            return Err(WorkspaceError::NotAWorkspace);
        }

        let config_path = dir.join("config.toml");
        let config_text =
            fs::read_to_string(&config_path).map_err(|e| WorkspaceError::ReadError {
                path: config_path,
                source: e,
            })?;
        let config: WorkspaceConfig = toml::from_str(&config_text)?;

        Ok(Workspace {
            root: root.to_path_buf(),
            dir,
            config,
        })
    }

    /// Build the persistence bridge over this workspace's storage,
    /// journaling failures into `.tick/`.
    pub fn bridge(&self) -> PersistenceBridge {
        PersistenceBridge::with_journal(Box::new(FileStorage::new(&self.dir)), &self.dir)
    }
}

/// Walk up from `start` looking for a `.tick/config.toml`.
pub fn discover_workspace(start: &Path) -> Result<PathBuf, WorkspaceError> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(TICK_DIR).join("config.toml").exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(WorkspaceError::NotAWorkspace);
        }
    }
}
