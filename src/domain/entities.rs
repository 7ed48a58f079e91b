//! Domain entities: core data structures

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// Identifying attributes of one family member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonData {
    pub surname: String,
    pub given_name: String,
    /// Free-form date string; never parsed or validated
    pub birth_date: String,
}

impl PersonData {
    pub fn new(
        surname: impl Into<String>,
        given_name: impl Into<String>,
        birth_date: impl Into<String>,
    ) -> Self {
        Self {
            surname: surname.into(),
            given_name: given_name.into(),
            birth_date: birth_date.into(),
        }
    }

    /// Name in the `SURNAME GIVEN-NAME` order used by full-name search.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.surname, self.given_name)
    }
}

impl fmt::Display for PersonData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} born {}",
            self.surname, self.given_name, self.birth_date
        )
    }
}

/// Role under which a parent attaches a child.
///
/// Exactly one back-reference is set per attachment: the other parent slot
/// stays empty even when both parents are in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentRole {
    Father,
    Mother,
}

impl fmt::Display for ParentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentRole::Father => write!(f, "father"),
            ParentRole::Mother => write!(f, "mother"),
        }
    }
}

impl FromStr for ParentRole {
    type Err = DomainError;

    /// Accepts `father`/`mother` as well as the legacy `pere`/`mere` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "father" | "pere" | "père" => Ok(ParentRole::Father),
            "mother" | "mere" | "mère" => Ok(ParentRole::Mother),
            _ => Err(DomainError::UnknownRole(s.to_string())),
        }
    }
}
