use std::io::Write;

use clap::Parser;
use shelf::{Catalog, domain::query};
use tracing::instrument;

use super::{
    OutputFormat,
    render::{available_line, books_json},
};

#[derive(Debug, Parser, Default)]
#[command(about = "List books that are on the shelf")]
pub struct Available {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

impl Available {
    #[instrument(level = "debug", skip(self, catalog, out))]
    pub fn run(self, catalog: &Catalog, out: &mut impl Write) -> anyhow::Result<()> {
        let available = query::view_available(catalog.books());

        match self.output {
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(&books_json(available))?)?;
            }
            OutputFormat::Table => {
                if available.is_empty() {
                    writeln!(out, "No books currently available.")?;
                }
                for book in available {
                    writeln!(out, "{}", available_line(book))?;
                }
            }
        }
        Ok(())
    }
}
