//! Read-only queries over a sequence of books.
//!
//! These are pure functions over slices so they work equally on the whole
//! catalog or on any subset of it. Results borrow from the input and keep its
//! order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Book;

/// How user input and stored values are normalized before comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// Trim surrounding whitespace and lowercase.
    #[default]
    Trim,
    /// As [`Normalization::Trim`], and also remove internal whitespace.
    ///
    /// `"Science Fiction"` normalizes to `"sciencefiction"`.
    Compact,
}

/// Normalize a string for comparison.
#[must_use]
pub fn normalize(text: &str, normalization: Normalization) -> String {
    let lowered = text.trim().to_lowercase();
    match normalization {
        Normalization::Trim => lowered,
        Normalization::Compact => lowered.split_whitespace().collect(),
    }
}

/// Books that are currently on the shelf.
#[must_use]
pub fn view_available(books: &[Book]) -> Vec<&Book> {
    books.iter().filter(|book| book.available()).collect()
}

/// Books whose author or genre equals the query, after normalization.
///
/// Matching is exact. A query matches a book if it is equal to either the
/// normalized author or the normalized genre.
#[must_use]
pub fn search_book<'a>(
    query: &str,
    books: &'a [Book],
    normalization: Normalization,
) -> Vec<&'a Book> {
    let query = normalize(query, normalization);
    books
        .iter()
        .filter(|book| {
            normalize(book.author(), normalization) == query
                || normalize(book.genre(), normalization) == query
        })
        .collect()
}

/// Books that are checked out and due strictly before `now`.
///
/// Raw seed dates are parsed at this point. Books whose due date cannot be
/// parsed are never reported as overdue.
#[must_use]
pub fn list_overdue(books: &[Book], now: DateTime<Utc>) -> Vec<&Book> {
    books.iter().filter(|book| is_overdue(book, now)).collect()
}

/// Whether a book is checked out and due strictly before `now`.
#[must_use]
pub fn is_overdue(book: &Book, now: DateTime<Utc>) -> bool {
    !book.available() && book.due_date().is_some_and(|due| due < now)
}

/// Find the book with the given identifier, comparing normalized forms.
#[must_use]
pub fn get_book_by_id<'a>(
    id: &str,
    books: &'a [Book],
    normalization: Normalization,
) -> Option<&'a Book> {
    position_by_id(id, books, normalization).map(|index| &books[index])
}

pub(crate) fn position_by_id(
    id: &str,
    books: &[Book],
    normalization: Normalization,
) -> Option<usize> {
    let id = normalize(id, normalization);
    books
        .iter()
        .position(|book| normalize(book.id(), normalization) == id)
}
