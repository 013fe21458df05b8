//! The interactive lending menu.
//!
//! The menu waits for a choice, runs it, and shows the menu again. Only the
//! exit choice (or end of input) stops the loop.

use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use shelf::{
    Catalog, Clock, Config,
    domain::query::{self, normalize},
};
use tracing::{debug, instrument};

use super::{
    render::{available_line, due_label, overdue_line, search_line},
    terminal::Palette,
};

/// A menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    ViewAvailable,
    Search,
    Checkout,
    Return,
    ListOverdue,
    Exit,
}

impl Choice {
    const ALL: [Self; 6] = [
        Self::ViewAvailable,
        Self::Search,
        Self::Checkout,
        Self::Return,
        Self::ListOverdue,
        Self::Exit,
    ];

    const fn key(self) -> &'static str {
        match self {
            Self::ViewAvailable => "1",
            Self::Search => "2",
            Self::Checkout => "3",
            Self::Return => "4",
            Self::ListOverdue => "5",
            Self::Exit => "6",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::ViewAvailable => "View Available Books",
            Self::Search => "Search for a Book",
            Self::Checkout => "Check Out a Book",
            Self::Return => "Return a Book",
            Self::ListOverdue => "List Overdue Books",
            Self::Exit => "Exit",
        }
    }
}

/// Error returned for input that is not a menu choice.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid choice")]
pub struct InvalidChoice(String);

impl FromStr for Choice {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|choice| choice.key() == key)
            .ok_or_else(|| InvalidChoice(s.to_string()))
    }
}

/// The read-evaluate-print loop over a catalog.
pub struct Menu<'a, R, W, C> {
    catalog: &'a mut Catalog,
    config: &'a Config,
    palette: Palette,
    input: R,
    output: W,
    clock: C,
}

impl<'a, R, W, C> Menu<'a, R, W, C>
where
    R: BufRead,
    W: Write,
    C: Clock,
{
    pub const fn new(
        catalog: &'a mut Catalog,
        config: &'a Config,
        palette: Palette,
        input: R,
        output: W,
        clock: C,
    ) -> Self {
        Self {
            catalog,
            config,
            palette,
            input,
            output,
            clock,
        }
    }

    /// Run until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    #[instrument(level = "debug", skip(self))]
    pub fn run(mut self) -> io::Result<()> {
        loop {
            self.display_menu()?;
            let Some(line) = self.prompt("Enter choice: ")? else {
                debug!("input closed");
                writeln!(self.output)?;
                writeln!(self.output, "Exiting")?;
                return Ok(());
            };

            match line.parse::<Choice>() {
                Ok(Choice::Exit) => {
                    writeln!(self.output, "Exiting")?;
                    return Ok(());
                }
                Ok(choice) => self.dispatch(choice)?,
                Err(error) => {
                    debug!(input = %error.0, "unrecognised menu choice");
                    writeln!(self.output, "{}", self.palette.warning(&error.to_string()))?;
                }
            }
        }
    }

    fn display_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", self.palette.heading("--- Library ---"))?;
        for choice in Choice::ALL {
            writeln!(self.output, "{}. {}", choice.key(), choice.label())?;
        }
        writeln!(self.output, "--------------------")
    }

    /// Write a prompt and read one line, without its line ending.
    ///
    /// Returns `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Prompt for a value and normalize it. End of input reads as empty.
    fn prompt_normalized(&mut self, prompt: &str) -> io::Result<String> {
        let raw = self.prompt(prompt)?.unwrap_or_default();
        Ok(normalize(&raw, self.config.search_normalization))
    }

    fn dispatch(&mut self, choice: Choice) -> io::Result<()> {
        debug!(?choice, "dispatching");
        match choice {
            Choice::ViewAvailable => self.view_available(),
            Choice::Search => self.search(),
            Choice::Checkout => self.checkout(),
            Choice::Return => self.return_book(),
            Choice::ListOverdue => self.list_overdue(),
            Choice::Exit => Ok(()),
        }
    }

    fn view_available(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", self.palette.heading("--- Available Books ---"))?;

        let available = query::view_available(self.catalog.books());
        if available.is_empty() {
            return writeln!(self.output, "No books currently available.");
        }
        for book in available {
            writeln!(self.output, "{}", available_line(book))?;
        }
        Ok(())
    }

    fn search(&mut self) -> io::Result<()> {
        let query = self.prompt_normalized("Enter author or genre to search: ")?;
        let results = query::search_book(
            &query,
            self.catalog.books(),
            self.config.search_normalization,
        );

        if results.is_empty() {
            return writeln!(self.output, "No books found matching '{query}'.");
        }

        writeln!(self.output)?;
        writeln!(self.output, "{}", self.palette.heading("--- Search Results ---"))?;
        for book in results {
            writeln!(self.output, "{}", search_line(book))?;
        }
        Ok(())
    }

    fn checkout(&mut self) -> io::Result<()> {
        let id = self.prompt_normalized("Enter book id to check out: ")?;
        let now = self.clock.now();

        let message = match self.catalog.checkout(&id, now, self.config) {
            Ok(book) => self.palette.success(&format!(
                "Book '{}' has been checked out. Due date: {}",
                book.title(),
                due_label(book).unwrap_or_default()
            )),
            Err(error) => self.palette.warning(&error.to_string()),
        };
        writeln!(self.output, "{message}")
    }

    fn return_book(&mut self) -> io::Result<()> {
        let id = self.prompt_normalized("Enter book id to return: ")?;

        let message = match self.catalog.return_book(&id, self.config) {
            Ok(book) => self
                .palette
                .success(&format!("Book '{}' has been returned.", book.title())),
            Err(error) => self.palette.warning(&error.to_string()),
        };
        writeln!(self.output, "{message}")
    }

    fn list_overdue(&mut self) -> io::Result<()> {
        let overdue = query::list_overdue(self.catalog.books(), self.clock.now());
        if overdue.is_empty() {
            return writeln!(self.output, "No books currently overdue.");
        }

        writeln!(self.output)?;
        writeln!(self.output, "{}", self.palette.heading("--- Overdue Books ---"))?;
        for book in overdue {
            writeln!(self.output, "{}", overdue_line(book))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use shelf::{Book, BookId, DueDate, Lending, domain::FixedClock};
    use test_case::test_case;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Book::new(
                BookId::new("b1".to_string()).unwrap(),
                "The Hobbit",
                "J.R.R. Tolkien",
                "Fantasy",
            ),
            Book::with_lending(
                BookId::new("b2".to_string()).unwrap(),
                "And Then There Were None",
                "Agatha Christie",
                "Mystery",
                Lending::OnLoan {
                    due: DueDate::Raw("2025-02-01".to_string()),
                },
                4,
            ),
            Book::new(
                BookId::new("b3".to_string()).unwrap(),
                "Dune",
                "Frank Herbert",
                "Science Fiction",
            ),
        ])
        .unwrap()
    }

    fn run_with(catalog: &mut Catalog, config: &Config, input: &str) -> String {
        let mut output = Vec::new();
        Menu::new(
            catalog,
            config,
            Palette::plain(),
            input.as_bytes(),
            &mut output,
            FixedClock(now()),
        )
        .run()
        .unwrap();
        String::from_utf8(output).unwrap()
    }

    fn run(input: &str) -> (String, Catalog) {
        let mut catalog = catalog();
        let output = run_with(&mut catalog, &Config::default(), input);
        (output, catalog)
    }

    #[test_case("1", Choice::ViewAvailable; "view available")]
    #[test_case("2", Choice::Search; "search")]
    #[test_case("3", Choice::Checkout; "checkout")]
    #[test_case("4", Choice::Return; "return")]
    #[test_case("5", Choice::ListOverdue; "list overdue")]
    #[test_case(" 6 ", Choice::Exit; "exit with whitespace")]
    fn parse_choice(input: &str, expected: Choice) {
        assert_eq!(input.parse::<Choice>(), Ok(expected));
    }

    #[test_case(""; "empty")]
    #[test_case("7"; "out of range")]
    #[test_case("exit"; "word")]
    fn parse_invalid_choice(input: &str) {
        assert!(input.parse::<Choice>().is_err());
    }

    #[test]
    fn exit_stops_the_loop() {
        let (output, _) = run("6\n1\n");
        assert_eq!(output.matches("--- Library ---").count(), 1);
        assert!(output.ends_with("Enter choice: Exiting\n"));
        assert!(!output.contains("--- Available Books ---"));
    }

    #[test]
    fn end_of_input_exits() {
        let (output, _) = run("");
        assert!(output.ends_with("Exiting\n"));
    }

    #[test]
    fn end_of_input_at_id_prompt_reads_as_empty() {
        let (output, catalog) = run("3\n");
        assert!(output.contains("Enter book id to check out: Book with ID  not found.\n"));
        assert!(output.ends_with("Exiting\n"));
        assert_eq!(catalog, self::catalog());
    }

    #[test]
    fn menu_lists_six_choices() {
        let (output, _) = run("6\n");
        let expected = "--- Library ---\n\
                        1. View Available Books\n\
                        2. Search for a Book\n\
                        3. Check Out a Book\n\
                        4. Return a Book\n\
                        5. List Overdue Books\n\
                        6. Exit\n\
                        --------------------\n";
        assert!(output.starts_with(expected));
    }

    #[test]
    fn invalid_choice_redisplays_menu() {
        let (output, _) = run("9\n6\n");
        assert!(output.contains("Invalid choice\n"));
        assert_eq!(output.matches("--- Library ---").count(), 2);
    }

    #[test]
    fn view_available_lists_shelved_books() {
        let (output, _) = run("1\n6\n");
        assert!(output.contains("--- Available Books ---\n"));
        assert!(output.contains("ID: b1 | Title: The Hobbit | Author: J.R.R. Tolkien\n"));
        assert!(output.contains("ID: b3 | Title: Dune | Author: Frank Herbert\n"));
        assert!(!output.contains("ID: b2"));
    }

    #[test]
    fn view_available_when_everything_is_out() {
        let (output, _) = run("3\nb1\n3\nb3\n1\n6\n");
        assert!(output.contains("No books currently available.\n"));
    }

    #[test]
    fn search_by_genre() {
        let (output, _) = run("2\n  MYSTERY \n6\n");
        assert!(output.contains("--- Search Results ---\n"));
        assert!(output.contains(
            "ID: b2 | Title: And Then There Were None | Author: Agatha Christie | Genre: Mystery | Available: false\n"
        ));
    }

    #[test]
    fn search_without_results() {
        let (output, _) = run("2\nHorror\n6\n");
        assert!(output.contains("No books found matching 'horror'.\n"));
        assert!(!output.contains("--- Search Results ---"));
    }

    #[test]
    fn checkout_scenario() {
        let (output, catalog) = run("3\nb1\n3\nb1\n6\n");
        assert!(output.contains("Book 'The Hobbit' has been checked out. Due date: 2025-03-15\n"));
        assert!(output.contains("Book 'The Hobbit' is currently unavailable.\n"));

        let book = catalog.get("b1", &Config::default()).unwrap();
        assert!(!book.available());
        assert_eq!(book.checkouts(), 1);
    }

    #[test]
    fn checkout_then_return() {
        let (output, catalog) = run("3\nB1\n4\nb1\n4\nb1\n6\n");
        assert!(output.contains("Book 'The Hobbit' has been returned.\n"));
        assert!(output.contains("Book 'The Hobbit' was already available.\n"));

        let book = catalog.get("b1", &Config::default()).unwrap();
        assert!(book.available());
        assert_eq!(book.due(), None);
        assert_eq!(book.checkouts(), 1);
    }

    #[test]
    fn unknown_id_is_reported() {
        let (output, catalog) = run("3\nb42\n4\nb42\n6\n");
        assert_eq!(output.matches("Book with ID b42 not found.\n").count(), 2);
        assert_eq!(catalog, self::catalog());
    }

    #[test]
    fn overdue_lists_past_due_books() {
        let (output, _) = run("5\n6\n");
        assert!(output.contains("--- Overdue Books ---\n"));
        assert!(output.contains(
            "ID: b2 | Title: And Then There Were None | Due Date: 2025-02-01\n"
        ));
    }

    #[test]
    fn fresh_checkout_is_not_overdue() {
        let (output, _) = run("4\nb2\n3\nb1\n5\n6\n");
        assert!(output.contains("No books currently overdue.\n"));
    }

    #[test]
    fn compact_normalization_applies_to_search() {
        let mut catalog = catalog();
        let config: Config =
            toml::from_str("_version = \"1\"\nsearch_normalization = \"compact\"\n").unwrap();

        let output = run_with(&mut catalog, &config, "2\nScience Fiction\n6\n");

        assert!(!output.contains("No books found matching"));
        assert!(output.contains("ID: b3 | Title: Dune"));
    }
}
