use std::{
    io::{self, Write},
    path::PathBuf,
};

mod available;
mod menu;
mod overdue;
mod render;
mod search;
mod show;
mod terminal;

use available::Available;
use clap::ArgAction;
use menu::Menu;
use overdue::Overdue;
use search::Search;
use shelf::{Catalog, Config, domain::SystemClock};
use show::Show;
use terminal::Palette;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = match &self.config {
            Some(path) => Config::load(path).map_err(anyhow::Error::msg)?,
            None => Config::default(),
        };
        let mut catalog = Catalog::seeded()?;
        let palette = Palette::detect(config.color);

        self.command
            .unwrap_or_default()
            .run(&mut catalog, &config, palette)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stderr, so log lines never mix with menu output
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, Default, clap::Parser)]
pub enum Command {
    /// Run the interactive lending menu (default)
    #[default]
    Menu,

    /// List books that are on the shelf
    Available(Available),

    /// Find books by author or genre
    Search(Search),

    /// List checked-out books that are past their due date
    Overdue(Overdue),

    /// Show every attribute of one book
    Show(Show),
}

impl Command {
    #[instrument(level = "debug", skip(catalog, config))]
    fn run(self, catalog: &mut Catalog, config: &Config, palette: Palette) -> anyhow::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();

        match self {
            Self::Menu => {
                Menu::new(
                    catalog,
                    config,
                    palette,
                    io::stdin().lock(),
                    &mut out,
                    SystemClock,
                )
                .run()?;
            }
            Self::Available(command) => command.run(catalog, &mut out)?,
            Self::Search(command) => command.run(catalog, config, &mut out)?,
            Self::Overdue(command) => command.run(catalog, &SystemClock, &mut out)?,
            Self::Show(command) => command.run(catalog, config, palette, &SystemClock, &mut out)?,
        }

        out.flush()?;
        Ok(())
    }
}

/// Output format for the one-shot subcommands.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}
