//! Text renderings of a family tree.

use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::{FamilyTree, PersonId};

/// Spaces per generation in [`FamilyTree::render`].
pub const DEFAULT_INDENT_WIDTH: usize = 2;

impl FamilyTree {
    /// `GIVEN SURNAME (DATE)`, followed by the partner when married.
    pub fn label(&self, idx: PersonId) -> Option<String> {
        let person = self.get(idx)?;
        let data = &person.data;
        let mut label = format!("{} {} ({})", data.given_name, data.surname, data.birth_date);
        if let Some(spouse) = self.spouse_of(idx) {
            label.push_str(&format!(
                " married to {} {} ({})",
                spouse.data.surname, spouse.data.given_name, spouse.data.birth_date
            ));
        }
        Some(label)
    }

    /// One line per person below `from` (inclusive), in pre-order, indented
    /// by generation starting at `indent_level`.
    pub fn render(&self, from: PersonId, indent_level: usize) -> String {
        self.render_indented(from, indent_level, DEFAULT_INDENT_WIDTH)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn render_indented(&self, from: PersonId, indent_level: usize, width: usize) -> String {
        let mut out = String::new();
        let mut stack = vec![(from, indent_level)];
        while let Some((idx, level)) = stack.pop() {
            let (Some(person), Some(label)) = (self.get(idx), self.label(idx)) else {
                continue;
            };
            out.push_str(&" ".repeat(level * width));
            out.push_str(&label);
            out.push('\n');
            for &child in person.children.iter().rev() {
                stack.push((child, level + 1));
            }
        }
        out
    }
}

/// Conversion into a box-drawing tree for terminal display.
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for FamilyTree {
    /// Built bottom-up from the post-order iterator, so depth is not bounded
    /// by the call stack.
    fn to_tree_string(&self) -> Tree<String> {
        let mut built: Vec<Tree<String>> = Vec::new();
        for (idx, person) in self.iter_postorder_from(self.root()) {
            let first_child = built.len().saturating_sub(self.live_child_count(person));
            let leaves = built.split_off(first_child);
            built.push(Tree::new(self.label(idx).unwrap_or_default()).with_leaves(leaves));
        }
        built.pop().unwrap_or_else(|| Tree::new(String::new()))
    }
}
