//! Domain layer: the family tree and its relationship rules
//!
//! This layer is independent of external concerns (no file I/O, no CLI, no config loading).

pub mod arena;
pub mod display;
pub mod document;
pub mod entities;
pub mod error;
pub mod relations;
pub mod search;

pub use arena::{FamilyTree, Person, PersonId, PostOrderIterator, PreOrderIterator};
pub use display::{TreeNodeConvert, DEFAULT_INDENT_WIDTH};
pub use document::{deserialize, serialize, PersonDocument};
pub use entities::{ParentRole, PersonData};
pub use error::{DomainError, DomainResult};
pub use search::parse_full_name;
