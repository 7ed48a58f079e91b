//! Terminal output for family trees and command status
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::fmt::Display;
use std::path::Path;

use colored::Colorize;

use crate::domain::PersonData;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

pub fn success(msg: &(impl Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Confirm a snapshot write.
pub fn saved(path: &Path) {
    println!("  {} saved to {}", "✓".green(), path.display());
}

/// Print completed mutation (green label)
pub fn action(label: &str, msg: &(impl Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

pub fn header(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

pub fn detail(msg: &(impl Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print a rendered tree uncolored, so it can be piped.
pub fn tree(rendered: &(impl Display + ?Sized)) {
    println!("{}", rendered.to_string().trim_end());
}

/// Print one person record as `SURNAME GIVEN born DATE`.
pub fn record(person: &PersonData) {
    println!("{}", person);
}

/// Print the size line under `show`: persons, generations, persons without children.
pub fn summary(persons: usize, generations: usize, childless: usize) {
    let line = format!(
        "{} persons in {} generations, {} without children",
        persons, generations, childless
    );
    println!("{}", line.dimmed());
}

/// Print a configuration document verbatim.
pub fn config_text(text: &str) {
    print!("{}", text);
    if !text.ends_with('\n') {
        println!();
    }
}
