//! Quote domain model.
//!
//! # Responsibility
//! - Define the canonical quote record exchanged between store and callers.
//! - Own the content validation shared by repository and service layers.
//!
//! # Invariants
//! - `id` is assigned by the store and never reused after deletion.
//! - `text` is never blank for a persisted quote.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned identity of a quote.
pub type QuoteId = i64;

/// Validation failures for quote input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteValidationError {
    /// `text` is empty or whitespace only.
    EmptyText,
    /// A search term is empty or whitespace only.
    EmptySearchTerm,
}

impl Display for QuoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "quote text must not be empty"),
            Self::EmptySearchTerm => write!(f, "search term must not be empty"),
        }
    }
}

impl Error for QuoteValidationError {}

/// A single quote.
///
/// Serialized as `{ "id": integer|null, "text", "author", "category" }`.
/// `author` and `category` default to empty strings when absent from input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// `None` until the store assigns an identity.
    #[serde(default)]
    pub id: Option<QuoteId>,
    pub text: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub category: String,
}

impl Quote {
    /// Creates an unsaved quote.
    pub fn new(
        text: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            text: text.into(),
            author: author.into(),
            category: category.into(),
        }
    }

    /// Checks content invariants.
    ///
    /// # Errors
    /// - `EmptyText` when `text` is blank after trimming.
    pub fn validate(&self) -> Result<(), QuoteValidationError> {
        if self.text.trim().is_empty() {
            return Err(QuoteValidationError::EmptyText);
        }
        Ok(())
    }

    /// Returns whether the store has assigned an identity.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Returns a copy carrying `id` and this quote's content.
    pub fn with_id(&self, id: QuoteId) -> Self {
        Self {
            id: Some(id),
            ..self.clone()
        }
    }

    /// Returns whether both quotes carry the same content, ignoring identity.
    pub fn same_content(&self, other: &Quote) -> bool {
        self.text == other.text && self.author == other.author && self.category == other.category
    }
}

#[cfg(test)]
mod tests {
    use super::{Quote, QuoteValidationError};

    #[test]
    fn blank_text_is_rejected() {
        let quote = Quote::new("  \t ", "nobody", "misc");
        assert_eq!(quote.validate(), Err(QuoteValidationError::EmptyText));
    }

    #[test]
    fn empty_author_and_category_are_allowed() {
        let quote = Quote::new("Anonymous wisdom", "", "");
        assert!(quote.validate().is_ok());
        assert!(!quote.is_persisted());
    }

    #[test]
    fn with_id_keeps_content() {
        let quote = Quote::new("Be water", "Bruce Lee", "wisdom");
        let saved = quote.with_id(7);
        assert_eq!(saved.id, Some(7));
        assert!(saved.same_content(&quote));
    }
}
