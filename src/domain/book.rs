use std::{fmt, ops::Deref};

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use non_empty_string::NonEmptyString;
use tracing::{debug, instrument};

/// The unique identifier of a book in the catalog (for example `b1`).
///
/// Identifiers are guaranteed to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookId(NonEmptyString);

impl BookId {
    /// Creates a new `BookId` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyIdError`] if the string is empty.
    pub fn new(s: String) -> Result<Self, EmptyIdError> {
        NonEmptyString::new(s).map(Self).map_err(|_| EmptyIdError)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for BookId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a book identifier is empty.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Book identifier must not be empty")]
pub struct EmptyIdError;

/// The date a loaned book is due back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DueDate {
    /// A due date set by a checkout in this session.
    At(DateTime<Utc>),
    /// A `YYYY-MM-DD` date carried over from the seed records.
    ///
    /// Parsed on demand; see [`DueDate::resolve`].
    Raw(String),
}

impl DueDate {
    /// The calendar format used for raw seed dates and for display.
    pub const FORMAT: &'static str = "%Y-%m-%d";

    /// Resolves the due date to a timestamp.
    ///
    /// Raw dates resolve to midnight UTC of that day. A raw date that cannot
    /// be parsed resolves to `None`.
    #[must_use]
    pub fn resolve(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::At(date) => Some(*date),
            Self::Raw(raw) => {
                let parsed = NaiveDate::parse_from_str(raw.trim(), Self::FORMAT)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
                    .map(|datetime| datetime.and_utc());
                if parsed.is_none() {
                    debug!(raw = %raw, "ignoring unparseable due date");
                }
                parsed
            }
        }
    }
}

/// The lending state of a book.
///
/// A due date exists exactly when the book is on loan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lending {
    /// The book is on the shelf.
    Available,
    /// The book is checked out.
    OnLoan {
        /// When the book is due back.
        due: DueDate,
    },
}

/// A book record in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
    genre: String,
    lending: Lending,
    checkouts: u32,
}

impl Book {
    /// Construct a new, available [`Book`] that has never been checked out.
    #[must_use]
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self::with_lending(id, title, author, genre, Lending::Available, 0)
    }

    /// Construct a [`Book`] with an explicit lending state and checkout count.
    #[must_use]
    pub fn with_lending(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        lending: Lending,
        checkouts: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            lending,
            checkouts,
        }
    }

    /// The book's identifier.
    #[must_use]
    pub const fn id(&self) -> &BookId {
        &self.id
    }

    /// The book's title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The book's author.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// The book's genre.
    #[must_use]
    pub fn genre(&self) -> &str {
        &self.genre
    }

    /// Whether the book is on the shelf.
    #[must_use]
    pub const fn available(&self) -> bool {
        matches!(self.lending, Lending::Available)
    }

    /// The stored due date, if the book is on loan.
    #[must_use]
    pub const fn due(&self) -> Option<&DueDate> {
        match &self.lending {
            Lending::Available => None,
            Lending::OnLoan { due } => Some(due),
        }
    }

    /// The due date as a timestamp.
    ///
    /// Raw seed dates are parsed here. Returns `None` if the book is available
    /// or if its raw due date cannot be parsed.
    #[must_use]
    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due().and_then(DueDate::resolve)
    }

    /// How many times the book has been checked out.
    #[must_use]
    pub const fn checkouts(&self) -> u32 {
        self.checkouts
    }

    /// Check the book out, making it due `loan_period` after `now`.
    ///
    /// Returns `true` if the book was checked out, or `false` (leaving the
    /// book untouched) if it was already on loan or the due date would be out
    /// of range.
    #[instrument(level = "debug", skip(self), fields(id = %self.id))]
    pub fn checkout(&mut self, now: DateTime<Utc>, loan_period: TimeDelta) -> bool {
        if !self.available() {
            debug!("book is already checked out");
            return false;
        }
        let Some(due) = now.checked_add_signed(loan_period) else {
            debug!("due date out of range");
            return false;
        };

        self.lending = Lending::OnLoan {
            due: DueDate::At(due),
        };
        self.checkouts += 1;
        true
    }

    /// Return the book to the shelf.
    ///
    /// Returns `true` if the book was on loan, or `false` (leaving the book
    /// untouched) if it was already available.
    #[instrument(level = "debug", skip(self), fields(id = %self.id))]
    pub fn return_book(&mut self) -> bool {
        if self.available() {
            debug!("book is already available");
            return false;
        }

        self.lending = Lending::Available;
        true
    }
}
