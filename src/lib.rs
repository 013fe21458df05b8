//! In-memory Library Catalog
//!
//! A small collection of books, seeded at startup, that can be browsed,
//! searched, checked out and returned.

pub mod domain;
pub use domain::{Book, BookId, Clock, Config, DueDate, Lending, Normalization};

/// The in-memory catalog store and its seed records.
pub mod storage;
pub use storage::{Catalog, CatalogError, SeedError};
