use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `dfx` binary.
#[derive(Debug, Parser)]
#[command(
    name = "dfx",
    version,
    about = "datafactory - pick a JSON, XML or SQLite extractor by file extension"
)]
pub struct Cli {
    /// Defaults to `run` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format for printed data: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only in logs)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["dfx"]).expect("cli should parse");
        assert!(cli.command.is_none());
        assert!(matches!(cli.command.unwrap_or_default(), Commands::Run(_)));
    }

    #[test]
    fn run_accepts_sample_overrides() {
        let cli = Cli::try_parse_from(["dfx", "run", "--movies", "other.json", "--verbose"])
            .expect("cli should parse");
        assert!(cli.verbose);
        let Some(Commands::Run(args)) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.movies, Some(PathBuf::from("other.json")));
        assert_eq!(args.database, None);
    }

    #[test]
    fn extract_parses_path_and_select() {
        let cli = Cli::try_parse_from([
            "dfx",
            "--format",
            "raw",
            "extract",
            "person.xml",
            "--select",
            ".//person[lastName='Liar']",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        let Some(Commands::Extract(args)) = cli.command else {
            panic!("expected extract");
        };
        assert_eq!(args.path, PathBuf::from("person.xml"));
        assert_eq!(args.select.as_deref(), Some(".//person[lastName='Liar']"));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["dfx", "--format", "table", "run"]).is_err());
    }

    #[test]
    fn extract_requires_a_path() {
        assert!(Cli::try_parse_from(["dfx", "extract"]).is_err());
    }
}
