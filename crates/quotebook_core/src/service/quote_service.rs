//! Quote use-case service.
//!
//! # Responsibility
//! - Provide the transport-independent quote contract for core callers.
//! - Enforce existence checks on update/delete and input validation.
//! - Classify repository failures into caller-facing error kinds.
//!
//! # Invariants
//! - The service keeps no state between calls.
//! - Reads that find nothing return empty results, never errors.
//! - Invalid input is rejected before it reaches the store.

use crate::model::quote::{Quote, QuoteId, QuoteValidationError};
use crate::repo::quote_repo::{QuoteRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, QuoteServiceError>;

/// Service error for quote use-cases.
#[derive(Debug)]
pub enum QuoteServiceError {
    /// Input rejected before reaching the store.
    Validation(QuoteValidationError),
    /// Update/delete target does not exist.
    NotFound(QuoteId),
    /// Backend is temporarily unreachable; no retry was attempted.
    StoreUnavailable(RepoError),
    /// Any other persistence-layer failure.
    Repo(RepoError),
}

impl QuoteServiceError {
    /// Short stable identifier used in logs and CLI diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::StoreUnavailable(_) => "store_unavailable",
            Self::Repo(_) => "repo_error",
        }
    }
}

impl Display for QuoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "quote not found with id: {id}"),
            Self::StoreUnavailable(err) => write!(f, "quote store unavailable: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for QuoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::StoreUnavailable(err) | Self::Repo(err) => Some(err),
        }
    }
}

impl From<QuoteValidationError> for QuoteServiceError {
    fn from(value: QuoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for QuoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other if other.is_transient() => Self::StoreUnavailable(other),
            other => Self::Repo(other),
        }
    }
}

/// Quote service facade over a repository implementation.
pub struct QuoteService<R: QuoteRepository> {
    repo: R,
}

impl<R: QuoteRepository> QuoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every quote ordered by id.
    pub fn get_all(&self) -> ServiceResult<Vec<Quote>> {
        Ok(self.repo.find_all()?)
    }

    /// Gets one quote. Absence is `Ok(None)`.
    pub fn get_by_id(&self, id: QuoteId) -> ServiceResult<Option<Quote>> {
        Ok(self.repo.find_by_id(id)?)
    }

    /// Creates a quote and returns it with its assigned id.
    ///
    /// # Contract
    /// - Blank `text` fails with `Validation(EmptyText)` and nothing is stored.
    /// - A caller-supplied `id` is ignored; the store always assigns one.
    pub fn create(&self, quote: &Quote) -> ServiceResult<Quote> {
        if let Err(err) = quote.validate() {
            warn!(
                "event=quote_create module=service status=error error_code=validation_error reason={err:?}"
            );
            return Err(err.into());
        }

        let unsaved = Quote {
            id: None,
            ..quote.clone()
        };
        let created = self
            .repo
            .save(&unsaved)
            .map_err(|err| log_failure("quote_create", err))?;
        info!(
            "event=quote_create module=service status=ok id={}",
            created.id.unwrap_or_default()
        );
        Ok(created)
    }

    /// Replaces text, author and category of an existing quote.
    ///
    /// # Contract
    /// - Missing `id` fails with `NotFound(id)` whatever `new_data` holds, and
    ///   the store is unchanged.
    /// - `id` is preserved; any id inside `new_data` is ignored.
    /// - Blank `text` on an existing quote fails with `Validation(EmptyText)`.
    pub fn update(&self, id: QuoteId, new_data: &Quote) -> ServiceResult<Quote> {
        let Some(mut current) = self.repo.find_by_id(id)? else {
            warn!("event=quote_update module=service status=error error_code=not_found id={id}");
            return Err(QuoteServiceError::NotFound(id));
        };
        new_data.validate()?;

        current.text.clone_from(&new_data.text);
        current.author.clone_from(&new_data.author);
        current.category.clone_from(&new_data.category);

        let updated = self
            .repo
            .save(&current)
            .map_err(|err| log_failure("quote_update", err))?;
        info!("event=quote_update module=service status=ok id={id}");
        Ok(updated)
    }

    /// Hard-deletes an existing quote.
    ///
    /// Missing `id` fails with `NotFound(id)`. The row is not read first, so
    /// rows that fail validation on read can still be removed.
    pub fn delete(&self, id: QuoteId) -> ServiceResult<()> {
        self.repo
            .delete_by_id(id)
            .map_err(|err| log_failure("quote_delete", err))?;
        info!("event=quote_delete module=service status=ok id={id}");
        Ok(())
    }

    /// Lists quotes whose category equals `category` exactly.
    pub fn get_by_category(&self, category: &str) -> ServiceResult<Vec<Quote>> {
        Ok(self.repo.find_by_category(category)?)
    }

    /// Lists quotes whose author equals `author` exactly.
    pub fn get_by_author(&self, author: &str) -> ServiceResult<Vec<Quote>> {
        Ok(self.repo.find_by_author(author)?)
    }

    /// Lists quotes matching both `category` and `author` exactly.
    pub fn get_by_category_and_author(
        &self,
        category: &str,
        author: &str,
    ) -> ServiceResult<Vec<Quote>> {
        Ok(self.repo.find_by_category_and_author(category, author)?)
    }

    /// Case-insensitive substring search over text and author.
    ///
    /// # Contract
    /// - Blank `term` fails with `Validation(EmptySearchTerm)`.
    /// - Otherwise `term` is matched as given, whitespace included.
    pub fn search(&self, term: &str) -> ServiceResult<Vec<Quote>> {
        if term.trim().is_empty() {
            return Err(QuoteValidationError::EmptySearchTerm.into());
        }

        let hits = self
            .repo
            .search(term)
            .map_err(|err| log_failure("quote_search", err))?;
        info!(
            "event=quote_search module=service status=ok term_chars={} hits={}",
            term.chars().count(),
            hits.len()
        );
        Ok(hits)
    }

    /// Picks one quote at random. Empty store is `Ok(None)`.
    pub fn get_random(&self) -> ServiceResult<Option<Quote>> {
        Ok(self.repo.find_random()?)
    }

    /// Number of stored quotes.
    pub fn count(&self) -> ServiceResult<u64> {
        Ok(self.repo.count()?)
    }
}

fn log_failure(event: &'static str, err: RepoError) -> QuoteServiceError {
    let err = QuoteServiceError::from(err);
    warn!(
        "event={event} module=service status=error error_code={}",
        err.code()
    );
    err
}
