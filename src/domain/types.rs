//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., a well-formed search term)
//! so that once a value reaches the service layer it can be treated as
//! trusted.
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided search term is too short or contains non-word characters.
    #[error("search term must be at least three word characters")]
    InvalidSearchTerm,
}

/// Validated search term: at least three ASCII word characters, nothing else.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Validates and wraps a raw term string.
    pub fn new<S: Into<String>>(term: S) -> Result<Self, TypeConstraintError> {
        let term = term.into();
        let word_chars = term.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if term.len() >= 3 && word_chars {
            Ok(Self(term))
        } else {
            Err(TypeConstraintError::InvalidSearchTerm)
        }
    }

    /// Borrow the term as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for SearchTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for SearchTerm {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for SearchTerm {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SearchTerm> for String {
    fn from(value: SearchTerm) -> Self {
        value.0
    }
}

/// Sort direction requested by the caller. Defaults to ascending.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDir {
    #[default]
    #[serde(alias = "asc")]
    Asc,
    #[serde(alias = "desc")]
    Desc,
}

impl SortDir {
    /// Uppercase form written into pagination links.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }

    /// Lowercase form expected by the upstream repository API.
    pub fn as_dir_param(&self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }
}

impl Display for SortDir {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
