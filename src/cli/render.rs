//! One-line and JSON renderings of books, shared by the menu and the
//! one-shot subcommands.

use serde_json::{Value, json};
use shelf::{Book, DueDate};

/// The due date as `YYYY-MM-DD`, if the book is on loan and the date resolves.
pub fn due_label(book: &Book) -> Option<String> {
    book.due_date()
        .map(|due| due.format(DueDate::FORMAT).to_string())
}

pub fn available_line(book: &Book) -> String {
    format!(
        "ID: {} | Title: {} | Author: {}",
        book.id(),
        book.title(),
        book.author()
    )
}

pub fn search_line(book: &Book) -> String {
    format!(
        "ID: {} | Title: {} | Author: {} | Genre: {} | Available: {}",
        book.id(),
        book.title(),
        book.author(),
        book.genre(),
        book.available()
    )
}

pub fn overdue_line(book: &Book) -> String {
    format!(
        "ID: {} | Title: {} | Due Date: {}",
        book.id(),
        book.title(),
        due_label(book).unwrap_or_default()
    )
}

pub fn book_json(book: &Book) -> Value {
    json!({
        "id": book.id().as_str(),
        "title": book.title(),
        "author": book.author(),
        "genre": book.genre(),
        "available": book.available(),
        "due_date": due_label(book),
        "checkouts": book.checkouts(),
    })
}

pub fn books_json<'a>(books: impl IntoIterator<Item = &'a Book>) -> Value {
    Value::Array(books.into_iter().map(book_json).collect())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone, Utc};
    use shelf::BookId;

    use super::*;

    fn book() -> Book {
        Book::new(
            BookId::new("b4".to_string()).unwrap(),
            "The Hobbit",
            "J.R.R. Tolkien",
            "Fantasy",
        )
    }

    #[test]
    fn lines() {
        let book = book();
        assert_eq!(
            available_line(&book),
            "ID: b4 | Title: The Hobbit | Author: J.R.R. Tolkien"
        );
        assert_eq!(
            search_line(&book),
            "ID: b4 | Title: The Hobbit | Author: J.R.R. Tolkien | Genre: Fantasy | Available: true"
        );
    }

    #[test]
    fn overdue_line_shows_due_date() {
        let mut book = book();
        book.checkout(
            Utc.with_ymd_and_hms(2025, 1, 1, 9, 30, 0).unwrap(),
            TimeDelta::days(14),
        );
        assert_eq!(
            overdue_line(&book),
            "ID: b4 | Title: The Hobbit | Due Date: 2025-01-15"
        );
    }

    #[test]
    fn json_has_null_due_date_when_available() {
        let value = book_json(&book());
        assert_eq!(value["id"], "b4");
        assert_eq!(value["available"], true);
        assert!(value["due_date"].is_null());
        assert_eq!(value["checkouts"], 0);
    }
}
