//! Persisted document schema and the tree <-> document codec.
//!
//! The format is a display snapshot: only the children tree and the partner's
//! given name are written, and on the way back the partner name is ignored
//! and parent back-references are not rebuilt. A reloaded tree therefore has
//! no spouse links and no father/mother references.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::arena::{FamilyTree, PersonId};
use crate::domain::entities::PersonData;
use crate::domain::error::{DomainError, DomainResult};

/// One person and, recursively, its descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDocument {
    pub surname: String,
    pub given_name: String,
    pub birth_date: String,
    #[serde(default)]
    pub children: Vec<PersonDocument>,
    /// Partner's given name only
    pub spouse: Option<String>,
}

impl PersonDocument {
    fn person_data(&self) -> PersonData {
        PersonData::new(&self.surname, &self.given_name, &self.birth_date)
    }
}

/// Snapshot of the subtree rooted at `node`.
///
/// Every entry of a person's `children` is written, so a child attached
/// twice appears twice in the document.
#[instrument(level = "debug", skip(tree))]
pub fn serialize(tree: &FamilyTree, node: PersonId) -> DomainResult<PersonDocument> {
    // post-order leaves each person's child documents on top of the stack
    let mut built: Vec<PersonDocument> = Vec::new();
    for (idx, person) in tree.iter_postorder_from(node) {
        let first_child = built.len().saturating_sub(tree.live_child_count(person));
        let children = built.split_off(first_child);
        built.push(PersonDocument {
            surname: person.data.surname.clone(),
            given_name: person.data.given_name.clone(),
            birth_date: person.data.birth_date.clone(),
            children,
            spouse: tree.spouse_of(idx).map(|s| s.data.given_name.clone()),
        });
    }
    built.pop().ok_or(DomainError::StaleHandle)
}

/// Builds a fresh tree from `document`.
///
/// Children are appended directly, so no father/mother references are set,
/// and `spouse` names are not resolved into links.
#[instrument(level = "debug", skip(document))]
pub fn deserialize(document: &PersonDocument) -> FamilyTree {
    let mut tree = FamilyTree::new(document.person_data());
    let root = tree.root();
    let mut stack: Vec<(&PersonDocument, PersonId)> =
        document.children.iter().rev().map(|c| (c, root)).collect();

    while let Some((current, parent)) = stack.pop() {
        let idx = tree.add_person(current.person_data());
        if let Some(parent_node) = tree.get_mut(parent) {
            parent_node.children.push(idx);
        }
        stack.extend(current.children.iter().rev().map(|c| (c, idx)));
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ParentRole;

    fn doe_family() -> FamilyTree {
        let mut tree = FamilyTree::new(PersonData::new("Doe", "John", "1950-01-01"));
        let john = tree.root();
        let jane = tree.add_person(PersonData::new("Doe", "Jane", "1952-03-04"));
        let sam = tree.add_person(PersonData::new("Doe", "Sam", "1980-05-06"));
        let ann = tree.add_person(PersonData::new("Doe", "Ann", "1982-07-08"));
        let tim = tree.add_person(PersonData::new("Doe", "Tim", "2010-09-10"));
        tree.marry(john, jane).unwrap();
        tree.attach_children(john, &[sam, ann], ParentRole::Father)
            .unwrap();
        tree.attach_child(sam, tim, ParentRole::Father).unwrap();
        tree
    }

    #[test]
    fn given_family_when_serializing_then_nests_children_and_spouse_name() {
        let tree = doe_family();

        let doc = serialize(&tree, tree.root()).unwrap();

        assert_eq!(doc.given_name, "John");
        assert_eq!(doc.spouse.as_deref(), Some("Jane"));
        let names: Vec<&str> = doc.children.iter().map(|c| c.given_name.as_str()).collect();
        assert_eq!(names, vec!["Sam", "Ann"]);
        assert_eq!(doc.children[0].children[0].given_name, "Tim");
        assert_eq!(doc.children[0].spouse, None);
    }

    fn assert_children_match(tree: &FamilyTree, node: PersonId, doc: &PersonDocument) {
        let person = tree.get(node).unwrap();
        assert_eq!(doc.given_name, person.data.given_name);
        assert_eq!(doc.children.len(), person.children.len());
        for (&child, child_doc) in person.children.iter().zip(&doc.children) {
            assert_children_match(tree, child, child_doc);
        }
    }

    #[test]
    fn given_child_attached_twice_under_same_parent_when_serializing_then_writes_both() {
        let mut tree = FamilyTree::new(PersonData::new("Doe", "John", "1950-01-01"));
        let john = tree.root();
        let sam = tree.add_person(PersonData::new("Doe", "Sam", "1980-05-06"));
        tree.attach_children(john, &[sam, sam], ParentRole::Father)
            .unwrap();

        let doc = serialize(&tree, john).unwrap();

        let names: Vec<&str> = doc.children.iter().map(|c| c.given_name.as_str()).collect();
        assert_eq!(names, vec!["Sam", "Sam"]);
        assert_eq!(deserialize(&doc).len(), 3);
    }

    #[test]
    fn given_child_attached_under_two_generations_when_serializing_then_writes_every_position() {
        let mut tree = FamilyTree::new(PersonData::new("Doe", "John", "1950-01-01"));
        let john = tree.root();
        let sam = tree.add_person(PersonData::new("Doe", "Sam", "1980-05-06"));
        let ann = tree.add_person(PersonData::new("Doe", "Ann", "1982-07-08"));
        let tim = tree.add_person(PersonData::new("Doe", "Tim", "2010-09-10"));
        tree.attach_children(john, &[sam, ann], ParentRole::Father)
            .unwrap();
        tree.attach_child(sam, tim, ParentRole::Father).unwrap();
        tree.attach_child(ann, sam, ParentRole::Mother).unwrap();

        let doc = serialize(&tree, john).unwrap();

        assert_children_match(&tree, john, &doc);
        let root_names: Vec<&str> = doc.children.iter().map(|c| c.given_name.as_str()).collect();
        assert_eq!(root_names, vec!["Sam", "Ann"]);
        assert_eq!(doc.children[1].children[0].given_name, "Sam");
        assert_eq!(doc.children[1].children[0].children[0].given_name, "Tim");
    }

    #[test]
    fn given_stale_child_handle_when_serializing_then_skips_it() {
        let mut tree = doe_family();
        let john = tree.root();
        let ann = tree.get(john).unwrap().children[1];
        tree.remove(ann);

        let doc = serialize(&tree, john).unwrap();

        assert_eq!(doc.children.len(), 1);
        assert_eq!(doc.children[0].given_name, "Sam");
        assert_eq!(doc.children[0].children[0].given_name, "Tim");
    }

    #[test]
    fn given_document_when_serialized_to_json_then_uses_schema_field_names() {
        let tree = FamilyTree::new(PersonData::new("Doe", "John", "1950-01-01"));

        let doc = serialize(&tree, tree.root()).unwrap();
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "surname": "Doe",
                "given_name": "John",
                "birth_date": "1950-01-01",
                "children": [],
                "spouse": null
            })
        );
    }

    #[test]
    fn given_round_trip_when_deserializing_then_keeps_names_and_child_order() {
        let tree = doe_family();
        let doc = serialize(&tree, tree.root()).unwrap();

        let reloaded = deserialize(&doc);

        let original: Vec<_> = tree.iter().map(|(_, p)| p.data.clone()).collect();
        let restored: Vec<_> = reloaded.iter().map(|(_, p)| p.data.clone()).collect();
        assert_eq!(original, restored);
        assert_eq!(serialize(&reloaded, reloaded.root()).unwrap().children, doc.children);
    }

    #[test]
    fn given_round_trip_when_deserializing_then_drops_spouse_and_parent_links() {
        let tree = doe_family();
        let doc = serialize(&tree, tree.root()).unwrap();

        let reloaded = deserialize(&doc);

        for (_, person) in reloaded.iter() {
            assert_eq!(person.spouse, None);
            assert_eq!(person.father, None);
            assert_eq!(person.mother, None);
        }
        // the detached spouse is not part of the snapshot at all
        assert_eq!(reloaded.len(), 4);
    }

    #[test]
    fn given_document_without_children_field_when_parsing_then_defaults_to_empty() {
        let doc: PersonDocument = serde_json::from_str(
            r#"{"surname":"Doe","given_name":"John","birth_date":"1950","spouse":"Jane"}"#,
        )
        .unwrap();

        let tree = deserialize(&doc);

        assert!(doc.children.is_empty());
        assert_eq!(tree.len(), 1);
        assert!(tree.spouse_of(tree.root()).is_none());
    }
}
