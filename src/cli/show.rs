use std::io::Write;

use clap::Parser;
use serde_json::json;
use shelf::{
    Book, Catalog, CatalogError, Clock, Config,
    domain::query::{self, normalize},
};
use tracing::instrument;

use super::{
    OutputFormat,
    render::{book_json, due_label},
    terminal::Palette,
};

#[derive(Debug, Parser)]
#[command(about = "Display every attribute of a book")]
pub struct Show {
    /// Identifier of the book to display
    id: String,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

impl Show {
    #[instrument(level = "debug", skip(catalog, config, clock, out))]
    pub fn run(
        self,
        catalog: &Catalog,
        config: &Config,
        palette: Palette,
        clock: &impl Clock,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        let Some(book) = catalog.get(&self.id, config) else {
            let id = normalize(&self.id, config.search_normalization);
            return Err(CatalogError::NotFound(id).into());
        };

        let overdue = query::is_overdue(book, clock.now());

        match self.output {
            OutputFormat::Json => {
                let mut value = book_json(book);
                value["overdue"] = json!(overdue);
                writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
            }
            OutputFormat::Table => output_table(book, overdue, palette, out)?,
        }
        Ok(())
    }
}

fn output_table(
    book: &Book,
    overdue: bool,
    palette: Palette,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    writeln!(out, "{}", palette.heading(&format!("# {}", book.id())))?;
    writeln!(out, "{}\n", book.title())?;

    write_field(out, "Author", book.author())?;
    write_field(out, "Genre", book.genre())?;
    write_field(out, "Available", if book.available() { "yes" } else { "no" })?;

    let due = match due_label(book) {
        Some(label) if overdue => format!("{label} {}", palette.warning("(overdue)")),
        Some(label) => label,
        None => palette.dim("–"),
    };
    write_field(out, "Due date", &due)?;
    write_field(out, "Checkouts", &book.checkouts().to_string())?;
    Ok(())
}

fn write_field(out: &mut impl Write, name: &str, value: &str) -> std::io::Result<()> {
    writeln!(out, "  {:<10} {value}", format!("{name}:"))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use shelf::domain::FixedClock;

    use super::*;

    fn show(id: &str, output: OutputFormat) -> anyhow::Result<String> {
        let catalog = Catalog::seeded().unwrap();
        let clock = FixedClock(Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0).unwrap());
        let mut out = Vec::new();
        Show {
            id: id.to_string(),
            output,
        }
        .run(
            &catalog,
            &Config::default(),
            Palette::plain(),
            &clock,
            &mut out,
        )?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn table_for_shelved_book() {
        let out = show("b1", OutputFormat::Table).unwrap();
        assert!(out.starts_with("# b1\nThe Lightning Thief\n\n"));
        assert!(out.contains("  Author:    Rick Riordan\n"));
        assert!(out.contains("  Available: yes\n"));
        assert!(out.contains("  Due date:  –\n"));
    }

    #[test]
    fn table_flags_overdue_loan() {
        let out = show("B2", OutputFormat::Table).unwrap();
        assert!(out.contains("  Available: no\n"));
        assert!(out.contains("  Due date:  2025-11-01 (overdue)\n"));
    }

    #[test]
    fn json_includes_overdue_flag() {
        let out = show("b2", OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["due_date"], "2025-11-01");
        assert_eq!(value["overdue"], true);
    }

    #[test]
    fn unknown_id_is_reported_normalized() {
        let error = show("  B404 ", OutputFormat::Table).unwrap_err();
        assert_eq!(error.to_string(), "Book with ID b404 not found.");
    }

    #[test]
    fn unknown_id_is_an_error() {
        let error = show("b404", OutputFormat::Table).unwrap_err();
        assert_eq!(error.to_string(), "Book with ID b404 not found.");
    }
}
