use std::io::Write;

use clap::Parser;
use shelf::{
    Catalog, Config,
    domain::query::{self, normalize},
};
use tracing::instrument;

use super::{
    OutputFormat,
    render::{books_json, search_line},
};

#[derive(Debug, Parser)]
#[command(about = "Find books whose author or genre matches exactly")]
pub struct Search {
    /// Author or genre to look for (case and surrounding whitespace are ignored)
    query: String,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,
}

impl Search {
    #[instrument(level = "debug", skip(catalog, config, out))]
    pub fn run(self, catalog: &Catalog, config: &Config, out: &mut impl Write) -> anyhow::Result<()> {
        let query = normalize(&self.query, config.search_normalization);
        let results = query::search_book(&query, catalog.books(), config.search_normalization);

        match self.output {
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string_pretty(&books_json(results))?)?;
            }
            OutputFormat::Table => {
                if results.is_empty() {
                    writeln!(out, "No books found matching '{query}'.")?;
                }
                for book in results {
                    writeln!(out, "{}", search_line(book))?;
                }
            }
        }
        Ok(())
    }
}
