//! CLI definition using clap

use clap::{ArgAction, Args, Parser, Subcommand};
use parking_types::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "parking-lot")]
#[command(version)]
#[command(about = "Track parked cars and compute parking charges")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Currency symbol for charges. Uses config value if not specified.
    #[arg(long, global = true)]
    pub currency: Option<String>,

    /// Config file path (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,

    /// Verbose output (-v info, -vv debug)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Starting values for a session
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Charge per hour. Uses config value if not specified.
    #[arg(long, short = 'r')]
    pub rate: Option<f64>,

    /// Number of parking spaces. Uses config value if not specified.
    #[arg(long, short = 's')]
    pub spaces: Option<u32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session (default)
    Shell {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Run shell commands from a file
    Run {
        /// Path to the command file
        script: PathBuf,

        #[command(flatten)]
        session: SessionArgs,

        /// Continue after a failing command
        #[arg(long)]
        keep_going: bool,

        /// Use a clock that only moves with `advance`
        #[arg(long)]
        manual_clock: bool,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default hourly rate
        #[arg(long)]
        set_rate: Option<f64>,

        /// Set default number of spaces
        #[arg(long)]
        set_spaces: Option<u32>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set currency symbol
        #[arg(long)]
        set_currency: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_arguments() {
        let cli = Cli::try_parse_from([
            "parking-lot", "-f", "json", "run", "day.txt", "--rate", "10", "--manual-clock",
        ])
        .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Some(Commands::Run { script, session, keep_going, manual_clock }) => {
                assert_eq!(script, PathBuf::from("day.txt"));
                assert_eq!(session.rate, Some(10.0));
                assert_eq!(session.spaces, None);
                assert!(!keep_going);
                assert!(manual_clock);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["parking-lot", "-vv"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 2);
    }
}
