//! The in-memory catalog store.
//!
//! The [`Catalog`] owns every book for the lifetime of the process. Queries
//! borrow its books as a slice (see [`crate::domain::query`]); lending
//! operations look a book up by identifier and mutate it in place.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, instrument};

use crate::{
    domain::{query, Book, Config},
    storage::seed::{self, SeedError},
};

/// Errors returned by lending operations.
///
/// The display text of each variant is the message shown to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No book has the requested identifier.
    #[error("Book with ID {0} not found.")]
    NotFound(String),

    /// The book is already checked out.
    #[error("Book '{title}' is currently unavailable.")]
    Unavailable {
        /// Title of the book.
        title: String,
    },

    /// The loan period would put the due date out of range.
    #[error("Book '{title}' cannot be lent for that long.")]
    LoanOutOfRange {
        /// Title of the book.
        title: String,
    },

    /// The book is already on the shelf.
    #[error("Book '{title}' was already available.")]
    AlreadyAvailable {
        /// Title of the book.
        title: String,
    },
}

/// An ordered, in-memory collection of books.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    /// Creates a catalog holding the given books, in order.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::DuplicateId`] if two books share an identifier,
    /// ignoring case and whitespace.
    pub fn new(books: Vec<Book>) -> Result<Self, SeedError> {
        seed::ensure_unique_ids(&books)?;
        Ok(Self { books })
    }

    /// Loads the catalog from the bundled seed records.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed records are malformed.
    #[instrument(level = "debug")]
    pub fn seeded() -> Result<Self, SeedError> {
        Self::from_toml(seed::LIBRARY_BOOKS)
    }

    /// Loads the catalog from a TOML document of `[[books]]` records.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed, or if any record is
    /// invalid.
    pub fn from_toml(document: &str) -> Result<Self, SeedError> {
        let books = seed::parse(document)?;
        info!(count = books.len(), "loaded catalog");
        Ok(Self { books })
    }

    /// All books, in catalog order.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Whether the catalog holds no books.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Find a book by identifier.
    #[must_use]
    pub fn get(&self, id: &str, config: &Config) -> Option<&Book> {
        query::get_book_by_id(id, &self.books, config.search_normalization)
    }

    fn get_mut(&mut self, id: &str, config: &Config) -> Result<&mut Book, CatalogError> {
        let index = query::position_by_id(id, &self.books, config.search_normalization)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        Ok(&mut self.books[index])
    }

    /// Check out the book with the given identifier.
    ///
    /// On success the book is due `config.loan_period()` after `now`.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the catalog unchanged, if no book has this
    /// identifier, if the book is already checked out, or if the loan period
    /// would put the due date out of range.
    #[instrument(level = "debug", skip(self, config))]
    pub fn checkout(
        &mut self,
        id: &str,
        now: DateTime<Utc>,
        config: &Config,
    ) -> Result<&Book, CatalogError> {
        let loan_period = config.loan_period();
        let book = self.get_mut(id, config)?;
        if !book.available() {
            return Err(CatalogError::Unavailable {
                title: book.title().to_string(),
            });
        }
        if !book.checkout(now, loan_period) {
            return Err(CatalogError::LoanOutOfRange {
                title: book.title().to_string(),
            });
        }
        info!(id = %book.id(), checkouts = book.checkouts(), "checked out");
        Ok(&*book)
    }

    /// Return the book with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the catalog unchanged, if no book has this
    /// identifier or if the book is not checked out.
    #[instrument(level = "debug", skip(self, config))]
    pub fn return_book(&mut self, id: &str, config: &Config) -> Result<&Book, CatalogError> {
        let book = self.get_mut(id, config)?;
        if !book.return_book() {
            return Err(CatalogError::AlreadyAvailable {
                title: book.title().to_string(),
            });
        }
        info!(id = %book.id(), "returned");
        Ok(&*book)
    }
}
