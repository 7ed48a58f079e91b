//! Name-based lookup over a subtree.

use std::io::{self, Write};

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::arena::{FamilyTree, PersonId};
use crate::domain::entities::PersonData;

/// Splits a `SURNAME GIVEN NAMES...` query.
///
/// The first whitespace-separated token is the surname; the rest, joined by
/// single spaces, is the given name. Queries with fewer than two tokens yield
/// `None`.
pub fn parse_full_name(query: &str) -> Option<(String, String)> {
    let mut tokens = query.split_whitespace();
    let surname = tokens.next()?;
    let given_name = tokens.join(" ");
    if given_name.is_empty() {
        return None;
    }
    Some((surname.to_string(), given_name))
}

fn matches_full_name(data: &PersonData, surname: &str, given_name: &str) -> bool {
    data.surname.trim().to_lowercase() == surname.to_lowercase()
        && data.given_name.trim().to_lowercase() == given_name.to_lowercase()
}

impl FamilyTree {
    /// First person in pre-order below `from` (inclusive) whose surname and
    /// given name match `query`, ignoring case. Spouses are not searched.
    #[instrument(level = "debug", skip(self))]
    pub fn search_by_full_name(&self, from: PersonId, query: &str) -> Option<PersonId> {
        let Some((surname, given_name)) = parse_full_name(query) else {
            debug!("search_by_full_name: unparseable query {:?}", query);
            return None;
        };
        self.iter_from(from)
            .find(|(_, person)| matches_full_name(&person.data, &surname, &given_name))
            .map(|(idx, _)| idx)
    }

    /// First person in pre-order below `from` (inclusive) with exactly this
    /// given name (case-sensitive).
    #[instrument(level = "debug", skip(self))]
    pub fn find_by_given_name(&self, from: PersonId, given_name: &str) -> Option<PersonId> {
        self.iter_from(from)
            .find(|(_, person)| person.data.given_name == given_name)
            .map(|(idx, _)| idx)
    }

    /// Given-name search that reports the matched record to `out`.
    ///
    /// Returns whether a person was found.
    pub fn search_by_given_name<W: Write>(
        &self,
        from: PersonId,
        given_name: &str,
        out: &mut W,
    ) -> io::Result<bool> {
        match self
            .find_by_given_name(from, given_name)
            .and_then(|idx| self.get(idx))
        {
            Some(person) => {
                writeln!(out, "{}", person.data)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
