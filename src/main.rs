//! `catalog`: browse and lend books from an in-memory library catalog.

use clap::Parser;

mod cli;
use cli::Cli;

fn main() -> anyhow::Result<()> {
    Cli::parse().run()
}
