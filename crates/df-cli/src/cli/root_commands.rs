use std::path::PathBuf;

use clap::{Args, Subcommand};
use df_config::SampleConfig;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Extract the three sample files and print what they contain (default).
    Run(RunArgs),
    /// Extract any supported file and print its parsed data.
    Extract(ExtractArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Self::Run(RunArgs::default())
    }
}

#[derive(Clone, Debug, Default, Args)]
pub struct RunArgs {
    /// SQLite database holding a `genres` table.
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// JSON array of movies.
    #[arg(long)]
    pub movies: Option<PathBuf>,

    /// XML document of persons.
    #[arg(long)]
    pub people: Option<PathBuf>,
}

impl RunArgs {
    /// Overlay the flags that were given on top of the configured samples.
    #[must_use]
    pub fn resolve(&self, configured: &SampleConfig) -> SampleConfig {
        SampleConfig {
            database: self
                .database
                .clone()
                .unwrap_or_else(|| configured.database.clone()),
            movies: self
                .movies
                .clone()
                .unwrap_or_else(|| configured.movies.clone()),
            people: self
                .people
                .clone()
                .unwrap_or_else(|| configured.people.clone()),
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct ExtractArgs {
    /// File to extract (`.json`, `.xml` or `.db`).
    pub path: PathBuf,

    /// Element path to evaluate against an XML document, e.g. `.//person[lastName='Liar']`.
    #[arg(short, long)]
    pub select: Option<String>,
}
