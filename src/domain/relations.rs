//! Relationship mutations: marriage, child attachment and subtree clearing.
//!
//! None of the unchecked operations validate the wider tree. Marrying someone
//! who is already married, or attaching the same child under two parents, is
//! the caller's responsibility to prevent.

use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::domain::arena::{FamilyTree, PersonId};
use crate::domain::entities::ParentRole;
use crate::domain::error::{DomainError, DomainResult};

impl FamilyTree {
    /// Links `a` and `b` as partners, overwriting any previous link on either side.
    ///
    /// A former partner of `a` or `b` keeps its one-sided link; use
    /// [`FamilyTree::marry_checked`] to refuse instead.
    #[instrument(level = "debug", skip(self))]
    pub fn marry(&mut self, a: PersonId, b: PersonId) -> DomainResult<()> {
        self.node(b)?;
        self.node_mut(a)?.spouse = Some(b);
        self.node_mut(b)?.spouse = Some(a);
        Ok(())
    }

    /// Like [`FamilyTree::marry`], but fails if either person already has a spouse.
    #[instrument(level = "debug", skip(self))]
    pub fn marry_checked(&mut self, a: PersonId, b: PersonId) -> DomainResult<()> {
        for id in [a, b] {
            let person = self.node(id)?;
            if person.spouse.is_some() {
                return Err(DomainError::AlreadyMarried {
                    name: person.data.full_name(),
                });
            }
        }
        self.marry(a, b)
    }

    /// Appends `child` to `parent`'s children and sets the back-reference for `role`.
    #[instrument(level = "debug", skip(self))]
    pub fn attach_child(
        &mut self,
        parent: PersonId,
        child: PersonId,
        role: ParentRole,
    ) -> DomainResult<()> {
        self.node(parent)?;
        let child_node = self.node_mut(child)?;
        match role {
            ParentRole::Father => child_node.father = Some(parent),
            ParentRole::Mother => child_node.mother = Some(parent),
        }
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Attaches each of `children` in order under the same role.
    pub fn attach_children(
        &mut self,
        parent: PersonId,
        children: &[PersonId],
        role: ParentRole,
    ) -> DomainResult<()> {
        for &child in children {
            self.attach_child(parent, child, role)?;
        }
        Ok(())
    }

    /// Removes every descendant of `node`, deepest first, leaving `node` with no children.
    ///
    /// A removed person's partner who is still reachable from the root loses
    /// the spouse link. A partner who is not (someone who only married into
    /// the family) is removed as well. Returns the number of persons removed.
    #[instrument(level = "debug", skip(self))]
    pub fn clear_subtree(&mut self, node: PersonId) -> DomainResult<usize> {
        self.node(node)?;
        let descendants: Vec<PersonId> = self
            .iter_postorder_from(node)
            .map(|(idx, _)| idx)
            .filter(|&idx| idx != node)
            .collect();
        let doomed: HashSet<PersonId> = descendants.iter().copied().collect();
        let survivors: HashSet<PersonId> = self
            .iter()
            .map(|(idx, _)| idx)
            .chain([node])
            .filter(|idx| !doomed.contains(idx))
            .collect();

        let mut removed = 0;
        for idx in descendants {
            let Some(person) = self.remove(idx) else {
                continue;
            };
            removed += 1;
            let Some(partner) = person.spouse else {
                continue;
            };
            if survivors.contains(&partner) {
                if let Some(partner_node) = self.get_mut(partner) {
                    if partner_node.spouse == Some(idx) {
                        partner_node.spouse = None;
                    }
                }
            } else if !doomed.contains(&partner) && self.remove(partner).is_some() {
                debug!("clear_subtree: dropped unreachable partner {:?}", partner);
                removed += 1;
            }
        }

        self.node_mut(node)?.children.clear();
        debug!("clear_subtree: removed {} persons", removed);
        Ok(removed)
    }
}
