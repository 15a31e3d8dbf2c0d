//! Core data types for the Digital Library API.
//!
//! A [`Book`] is created exactly once, by appending a validated [`NewBook`]
//! to the registry. Clients submit a [`BookDraft`], whose fields are all
//! optional so that a missing field can be reported by name instead of as a
//! generic deserialization failure.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

// ============================================================================
// ID Types
// ============================================================================

/// Identifier of a book in the registry.
///
/// Identifiers start at 1 and grow monotonically. They are never reused
/// because books are never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub u64);

impl BookId {
    /// Identifier assigned to the first book of an empty registry.
    pub const FIRST: Self = Self(1);

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns the identifier following this one, or `None` once the
    /// identifier space is exhausted.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

// ============================================================================
// Book
// ============================================================================

/// A book stored in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    /// Book ID.
    #[schema(value_type = u64, example = 1)]
    pub id: BookId,
    /// Book title.
    #[schema(example = "The Great Gatsby")]
    pub title: String,
    /// Book author.
    #[schema(example = "F. Scott Fitzgerald")]
    pub author: String,
    /// Publication year.
    #[schema(example = 1925)]
    pub year: i32,
}

impl Book {
    /// Builds the stored record for `new` under the given identifier.
    pub fn from_new(id: BookId, new: NewBook) -> Self {
        Self {
            id,
            title: new.title,
            author: new.author,
            year: new.year,
        }
    }
}

/// A book that passed validation and is ready to be appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i32,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
        }
    }
}

/// Book fields as submitted by a client.
///
/// Absent and `null` fields both deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(as = BookInput)]
pub struct BookDraft {
    /// Book title.
    #[schema(example = "Dune")]
    #[serde(default)]
    pub title: Option<String>,
    /// Book author.
    #[schema(example = "Frank Herbert")]
    #[serde(default)]
    pub author: Option<String>,
    /// Publication year.
    #[schema(example = 1965)]
    #[serde(default)]
    pub year: Option<i32>,
}

impl BookDraft {
    /// Creates a draft with every field present.
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            year: Some(year),
        }
    }

    /// Checks that every required field is present.
    ///
    /// Fields are checked in the order title, author, year; the first
    /// missing one is reported.
    pub fn validate(self) -> Result<NewBook, ValidationError> {
        let title = self.title.ok_or(ValidationError::MissingField("title"))?;
        let author = self.author.ok_or(ValidationError::MissingField("author"))?;
        let year = self.year.ok_or(ValidationError::MissingField("year"))?;
        Ok(NewBook {
            title,
            author,
            year,
        })
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Input validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was absent or null.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_id_next() {
        assert_eq!(BookId::FIRST.next(), Some(BookId(2)));
        assert_eq!(BookId(u64::MAX).next(), None);
    }

    #[test]
    fn test_book_id_display_and_parse() {
        let id: BookId = "42".parse().unwrap();
        assert_eq!(id, BookId(42));
        assert_eq!(id.to_string(), "42");
        assert!("abc".parse::<BookId>().is_err());
    }

    #[test]
    fn test_book_serializes_flat() {
        let book = Book::from_new(BookId(4), NewBook::new("Dune", "Frank Herbert", 1965));
        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 4,
                "title": "Dune",
                "author": "Frank Herbert",
                "year": 1965
            })
        );
    }

    #[test]
    fn test_draft_validate_complete() {
        let new = BookDraft::new("Dune", "Frank Herbert", 1965).validate().unwrap();
        assert_eq!(new, NewBook::new("Dune", "Frank Herbert", 1965));
    }

    #[test]
    fn test_draft_reports_first_missing_field() {
        let draft: BookDraft = serde_json::from_str(r#"{"year": 1965}"#).unwrap();
        assert_eq!(draft.validate(), Err(ValidationError::MissingField("title")));

        let draft: BookDraft =
            serde_json::from_str(r#"{"title": "Dune", "author": null, "year": 1965}"#).unwrap();
        assert_eq!(draft.validate(), Err(ValidationError::MissingField("author")));

        let draft: BookDraft =
            serde_json::from_str(r#"{"title": "Dune", "author": "Frank Herbert"}"#).unwrap();
        let err = draft.validate().unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: year");
    }
}
