//! famtree: an in-memory genealogical tree with JSON snapshots.
//!
//! The [`domain`] layer holds the arena-backed [`domain::FamilyTree`] and its
//! relationship, search and codec operations; [`application`] adds snapshot
//! persistence and checked use cases; [`cli`] is the command line front-end.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
