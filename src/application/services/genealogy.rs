//! Genealogy service
//!
//! Checked use cases on top of the domain operations: persons are addressed by
//! full name (`SURNAME GIVEN-NAME`), and marriage refuses partners who are
//! already married.

use tracing::{debug, instrument};

use crate::application::services::SnapshotStore;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DomainError, FamilyTree, ParentRole, PersonData, PersonId};

/// Service for building and editing a persisted family tree.
pub struct GenealogyService {
    store: SnapshotStore,
}

impl GenealogyService {
    pub fn new(store: SnapshotStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Load the persisted tree, failing if none exists yet.
    pub fn load_tree(&self) -> ApplicationResult<FamilyTree> {
        self.store
            .load()?
            .ok_or_else(|| ApplicationError::NoTree(self.store.path().to_path_buf()))
    }

    /// Create and save a new tree rooted at `root`, optionally married to `spouse`.
    ///
    /// The spouse is a detached person: married to the root but not part of
    /// the children tree.
    #[instrument(level = "debug", skip(self))]
    pub fn initialize(
        &self,
        root: PersonData,
        spouse: Option<PersonData>,
        force: bool,
    ) -> ApplicationResult<FamilyTree> {
        if self.store.exists() && !force {
            return Err(ApplicationError::SnapshotExists(
                self.store.path().to_path_buf(),
            ));
        }
        let mut tree = FamilyTree::new(root);
        if let Some(spouse) = spouse {
            let root = tree.root();
            let spouse = tree.add_person(spouse);
            tree.marry(root, spouse)?;
        }
        self.store.save(&tree)?;
        Ok(tree)
    }

    /// Resolve a full name to a person reachable from the root.
    pub fn find(&self, tree: &FamilyTree, full_name: &str) -> ApplicationResult<PersonId> {
        tree.search_by_full_name(tree.root(), full_name)
            .ok_or_else(|| DomainError::PersonNotFound(full_name.trim().to_string()).into())
    }

    /// Marry two persons found by full name; both must be unmarried.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn marry(
        &self,
        tree: &mut FamilyTree,
        first: &str,
        second: &str,
    ) -> ApplicationResult<(PersonId, PersonId)> {
        let a = self.find(tree, first)?;
        let b = self.find(tree, second)?;
        tree.marry_checked(a, b)?;
        debug!("marry: linked {:?} and {:?}", a, b);
        Ok((a, b))
    }

    /// Create `child` and attach it under the person named `parent_name`.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn add_child(
        &self,
        tree: &mut FamilyTree,
        parent_name: &str,
        child: PersonData,
        role: ParentRole,
    ) -> ApplicationResult<PersonId> {
        let parent = self.find(tree, parent_name)?;
        let child = tree.add_person(child);
        tree.attach_child(parent, child, role)?;
        Ok(child)
    }

    /// Remove everyone below the root. Returns the number of persons removed.
    pub fn reset(&self, tree: &mut FamilyTree) -> ApplicationResult<usize> {
        let root = tree.root();
        Ok(tree.clear_subtree(root)?)
    }

    pub fn save(&self, tree: &FamilyTree) -> ApplicationResult<()> {
        self.store.save(tree)
    }
}
