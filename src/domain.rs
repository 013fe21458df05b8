//! Domain models for the library catalog.
//!
//! This module contains the book entity and its lending state, the read-only
//! query layer, and configuration.

/// Book entity and lending state.
pub mod book;
pub use book::{Book, BookId, DueDate, EmptyIdError, Lending};

mod clock;
pub use clock::{Clock, FixedClock, SystemClock};

mod config;
pub use config::Config;

pub mod query;
pub use query::Normalization;
