use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use clap::Parser;
use shelf::{Catalog, Clock, DueDate, domain::query};
use tracing::instrument;

use super::{
    OutputFormat,
    render::{books_json, overdue_line},
};

#[derive(Debug, Parser, Default)]
#[command(about = "List checked-out books that are past their due date")]
pub struct Overdue {
    /// Report books overdue at the start of this day (YYYY-MM-DD) instead of now
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    as_of: Option<DateTime<Utc>>,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

fn parse_date(s: &str) -> Result<DateTime<Utc>, String> {
    NaiveDate::parse_from_str(s.trim(), DueDate::FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
        .ok_or_else(|| format!("expected a date in YYYY-MM-DD format, got '{s}'"))
}

impl Overdue {
    #[instrument(level = "debug", skip(catalog, clock, out))]
    pub fn run(
        self,
        catalog: &Catalog,
        clock: &impl Clock,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        let now = self.as_of.unwrap_or_else(|| clock.now());
        let overdue = query::list_overdue(catalog.books(), now);

        match self.output {
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(&books_json(overdue))?)?;
            }
            OutputFormat::Table => {
                if overdue.is_empty() {
                    writeln!(out, "No books currently overdue.")?;
                }
                for book in overdue {
                    writeln!(out, "{}", overdue_line(book))?;
                }
            }
        }
        Ok(())
    }
}
