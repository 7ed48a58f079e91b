//! Snapshot persistence service
//!
//! Loads and saves a family tree as a single pretty-printed JSON document.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{deserialize, serialize, FamilyTree, PersonDocument};
use crate::infrastructure::traits::FileSystem;

/// Reads and writes the tree snapshot at one fixed path.
pub struct SnapshotStore {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.fs.exists(&self.path)
    }

    /// Loads the tree, or `None` when no snapshot has been written yet.
    ///
    /// The loaded tree has no spouse links and no parent back-references.
    pub fn load(&self) -> ApplicationResult<Option<FamilyTree>> {
        if !self.exists() {
            debug!("load: no snapshot at {}", self.path.display());
            return Ok(None);
        }
        let content = self
            .fs
            .read_to_string(&self.path)
            .with_path_context("read snapshot", &self.path)?;
        let document: PersonDocument =
            serde_json::from_str(&content).map_err(|e| ApplicationError::Snapshot {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        let tree = deserialize(&document);
        debug!("load: {} persons from {}", tree.len(), self.path.display());
        Ok(Some(tree))
    }

    /// Overwrites the snapshot with the tree reachable from the root.
    pub fn save(&self, tree: &FamilyTree) -> ApplicationResult<()> {
        let document = serialize(tree, tree.root())?;
        let json =
            serde_json::to_string_pretty(&document).map_err(|e| ApplicationError::Snapshot {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        self.fs
            .ensure_parent(&self.path)
            .with_path_context("create snapshot directory", &self.path)?;
        self.fs
            .write(&self.path, &json)
            .with_path_context("write snapshot", &self.path)?;
        info!("saved family tree to {}", self.path.display());
        Ok(())
    }
}
