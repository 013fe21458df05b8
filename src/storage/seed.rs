//! Static seed records for the catalog.
//!
//! The seed is a TOML document compiled into the binary. Each `[[books]]`
//! table is one [`BookRecord`], converted into a domain [`Book`] on load.

use std::collections::HashSet;

use serde::Deserialize;

use crate::domain::{
    query::{normalize, Normalization},
    Book, BookId, DueDate, Lending,
};

/// The records the catalog starts with.
pub(crate) const LIBRARY_BOOKS: &str = include_str!("library_books.toml");

#[derive(Debug, Deserialize)]
struct SeedDocument {
    #[serde(default)]
    books: Vec<BookRecord>,
}

/// A book as written in the seed document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct BookRecord {
    id: String,
    title: String,
    author: String,
    genre: String,
    available: bool,
    /// `YYYY-MM-DD`. Kept verbatim and parsed when first queried.
    #[serde(default)]
    due_date: Option<String>,
    #[serde(default)]
    checkouts: u32,
}

/// Errors raised while loading seed records.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// The seed document is not valid TOML, or a record is malformed.
    #[error("Failed to parse book records: {0}")]
    Parse(#[from] toml::de::Error),

    /// A record has an empty identifier.
    #[error("Book '{title}' has an empty identifier")]
    EmptyId {
        /// Title of the offending record.
        title: String,
    },

    /// Two records share an identifier, ignoring case and whitespace.
    #[error("Duplicate book identifier: {0}")]
    DuplicateId(String),

    /// A checked-out record has no due date.
    #[error("Book {0} is checked out but has no due date")]
    MissingDueDate(String),

    /// An available record carries a due date.
    #[error("Book {0} is available but has a due date")]
    UnexpectedDueDate(String),
}

impl TryFrom<BookRecord> for Book {
    type Error = SeedError;

    fn try_from(record: BookRecord) -> Result<Self, Self::Error> {
        let BookRecord {
            id,
            title,
            author,
            genre,
            available,
            due_date,
            checkouts,
        } = record;

        let Ok(id) = BookId::new(id) else {
            return Err(SeedError::EmptyId { title });
        };

        let lending = match (available, due_date) {
            (true, None) => Lending::Available,
            (false, Some(raw)) => Lending::OnLoan {
                due: DueDate::Raw(raw),
            },
            (true, Some(_)) => return Err(SeedError::UnexpectedDueDate(id.to_string())),
            (false, None) => return Err(SeedError::MissingDueDate(id.to_string())),
        };

        Ok(Self::with_lending(
            id, title, author, genre, lending, checkouts,
        ))
    }
}

/// Parse a seed document into books, preserving document order.
///
/// # Errors
///
/// Returns an error if the document cannot be parsed, if any record breaks the
/// lending invariant, or if identifiers are empty or repeated.
pub(crate) fn parse(document: &str) -> Result<Vec<Book>, SeedError> {
    let SeedDocument { books } = toml::from_str(document)?;

    let books = books
        .into_iter()
        .map(Book::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    ensure_unique_ids(&books)?;
    Ok(books)
}

/// Check that no two books can be confused by an id lookup.
///
/// Ids are compared in their [`Normalization::Compact`] form, the loosest
/// form lookups use, so they stay distinct under either normalization.
pub(crate) fn ensure_unique_ids(books: &[Book]) -> Result<(), SeedError> {
    let mut seen = HashSet::with_capacity(books.len());
    for book in books {
        if !seen.insert(normalize(book.id(), Normalization::Compact)) {
            return Err(SeedError::DuplicateId(book.id().to_string()));
        }
    }
    Ok(())
}
