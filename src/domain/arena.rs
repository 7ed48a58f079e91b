use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::PersonData;
use crate::domain::error::{DomainError, DomainResult};

/// Handle to a person stored in a [`FamilyTree`].
///
/// Handles are generational: once a person is removed, its handle never
/// resolves again, even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersonId(Index);

/// Person node in the arena-based family tree.
#[derive(Debug)]
pub struct Person {
    pub data: PersonData,
    /// Back-reference set when attached in the father role
    pub father: Option<PersonId>,
    /// Back-reference set when attached in the mother role
    pub mother: Option<PersonId>,
    /// Partner link; not part of the children tree
    pub spouse: Option<PersonId>,
    /// Owned descendants in insertion order
    pub children: Vec<PersonId>,
}

impl Person {
    fn new(data: PersonData) -> Self {
        Self {
            data,
            father: None,
            mother: None,
            spouse: None,
            children: Vec::new(),
        }
    }
}

/// Arena-based family tree anchored at a single root.
///
/// The arena also holds detached persons (created but never attached as a
/// child), which is where partners who married into the family live.
/// Parent and spouse links are plain handles, so no ownership cycle exists.
#[derive(Debug)]
pub struct FamilyTree {
    arena: Arena<Person>,
    root: PersonId,
}

impl FamilyTree {
    pub fn new(root: PersonData) -> Self {
        let mut arena = Arena::new();
        let root = PersonId(arena.insert(Person::new(root)));
        Self { arena, root }
    }

    /// Creates a person with no relationships.
    #[instrument(level = "trace", skip(self))]
    pub fn add_person(&mut self, data: PersonData) -> PersonId {
        PersonId(self.arena.insert(Person::new(data)))
    }

    pub fn root(&self) -> PersonId {
        self.root
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.arena.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: PersonId) -> Option<&mut Person> {
        self.arena.get_mut(id.0)
    }

    pub(crate) fn node(&self, id: PersonId) -> DomainResult<&Person> {
        self.get(id).ok_or(DomainError::StaleHandle)
    }

    pub(crate) fn node_mut(&mut self, id: PersonId) -> DomainResult<&mut Person> {
        self.get_mut(id).ok_or(DomainError::StaleHandle)
    }

    pub(crate) fn remove(&mut self, id: PersonId) -> Option<Person> {
        self.arena.remove(id.0)
    }

    /// Children of `person` whose handles still resolve, duplicates included.
    pub(crate) fn live_child_count(&self, person: &Person) -> usize {
        person
            .children
            .iter()
            .filter(|&&child| self.get(child).is_some())
            .count()
    }

    /// Partner of `id`, if both the link and the partner are live.
    pub fn spouse_of(&self, id: PersonId) -> Option<&Person> {
        self.get(id)
            .and_then(|person| person.spouse)
            .and_then(|spouse| self.get(spouse))
    }

    /// Number of persons held, detached ones included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Always false: the root cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order traversal from the root.
    pub fn iter(&self) -> PreOrderIterator<'_> {
        self.iter_from(self.root)
    }

    /// Pre-order traversal of the subtree rooted at `start`.
    #[instrument(level = "trace", skip(self))]
    pub fn iter_from(&self, start: PersonId) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self, start)
    }

    /// Post-order traversal of the subtree rooted at `start`.
    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder_from(&self, start: PersonId) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, start)
    }

    /// Number of generations below and including the root.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 1)];
        while let Some((idx, depth)) = stack.pop() {
            if let Some(person) = self.get(idx) {
                max_depth = max_depth.max(depth);
                stack.extend(person.children.iter().map(|&child| (child, depth + 1)));
            }
        }
        max_depth
    }

    /// Persons without children, in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<PersonId> {
        self.iter()
            .filter(|(_, person)| person.children.is_empty())
            .map(|(idx, _)| idx)
            .collect()
    }
}

pub struct PreOrderIterator<'a> {
    tree: &'a FamilyTree,
    stack: Vec<PersonId>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(tree: &'a FamilyTree, start: PersonId) -> Self {
        Self {
            tree,
            stack: vec![start],
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (PersonId, &'a Person);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(person) = self.tree.get(current) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(person.children.iter().rev());
                return Some((current, person));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a FamilyTree,
    stack: Vec<(PersonId, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a FamilyTree, start: PersonId) -> Self {
        Self {
            tree,
            stack: vec![(start, false)],
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (PersonId, &'a Person);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            if let Some(person) = self.tree.get(current) {
                if visited {
                    return Some((current, person));
                }
                self.stack.push((current, true));
                for &child in person.children.iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}
