//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

use crate::domain::ParentRole;

/// Genealogical tree manager: persons, marriages, descendants and JSON snapshots
#[derive(Parser, Debug)]
#[command(name = "famtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Snapshot file (default: family_tree.json in the working directory)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Identifying attributes of a new person
#[derive(Args, Debug, Clone)]
pub struct PersonArgs {
    /// Family name
    #[arg(long)]
    pub surname: String,
    /// Given name(s)
    #[arg(long)]
    pub given: String,
    /// Birth date (free text)
    #[arg(long)]
    pub born: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new tree with its root ancestor
    Init {
        #[command(flatten)]
        root: PersonArgs,
        /// Spouse family name
        #[arg(long, requires_all = ["spouse_given", "spouse_born"])]
        spouse_surname: Option<String>,
        /// Spouse given name(s)
        #[arg(long, requires_all = ["spouse_surname", "spouse_born"])]
        spouse_given: Option<String>,
        /// Spouse birth date
        #[arg(long, requires_all = ["spouse_surname", "spouse_given"])]
        spouse_born: Option<String>,
        /// Overwrite an existing snapshot
        #[arg(long)]
        force: bool,
    },

    /// Print the family tree
    Show {
        /// Draw with box characters
        #[arg(short, long)]
        tree: bool,
    },

    /// Marry two unmarried persons ("SURNAME GIVEN")
    Marry {
        /// First partner's full name
        first: String,
        /// Second partner's full name
        second: String,
        /// Do not write the snapshot
        #[arg(long)]
        no_save: bool,
    },

    /// Add a child under a parent ("SURNAME GIVEN")
    AddChild {
        /// Parent's full name
        parent: String,
        #[command(flatten)]
        child: PersonArgs,
        /// Role of the parent: father or mother
        #[arg(long, value_parser = parse_role)]
        role: ParentRole,
        /// Do not write the snapshot
        #[arg(long)]
        no_save: bool,
    },

    /// Find a person by full name ("SURNAME GIVEN")
    Search {
        /// Full name, surname first
        name: String,
    },

    /// Find a person by given name (case-sensitive)
    Find {
        /// Given name
        given: String,
    },

    /// Remove everyone below the root ancestor
    Reset {
        /// Confirm the deletion
        #[arg(short, long)]
        yes: bool,
        /// Do not write the snapshot
        #[arg(long)]
        no_save: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Print a config template
    Init,

    /// Show config paths
    Path,
}

fn parse_role(s: &str) -> Result<ParentRole, String> {
    s.parse().map_err(|e: crate::domain::DomainError| e.to_string())
}
