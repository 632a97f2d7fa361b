use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tripglobe_core::DisplayMode;

/// CLI arguments for tripglobe-cli
#[derive(Debug, Parser)]
#[command(
    name = "tripglobe",
    version,
    about = "CLI for inspecting travel records and replaying globe interactions"
)]
pub struct CliArgs {
    /// Travel records, `.json` or `.json.gz`
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<PathBuf>,

    /// Optional JSON configuration overriding the default thresholds
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Log state transitions (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the loaded locations
    Stats,

    /// Print the cluster entries for a display mode
    Clusters {
        /// Aggregation level
        #[arg(short, long, value_enum, default_value_t = ModeArg::Continent)]
        mode: ModeArg,

        /// Expanded country (ISO2 or ISO3), required for `--mode city`
        #[arg(long)]
        country: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Classify a country code into its continent bucket
    Classify {
        /// ISO2 or ISO3 code (e.g. JP, KOR)
        code: String,
    },

    /// Feed a JSON event script through a session and print the commands
    Replay {
        /// JSON array of events, e.g. `[{"type":"ClusterClicked","entry_id":"continent:asia"}]`
        script: PathBuf,

        /// Complete every camera move immediately, like an instant renderer
        #[arg(long)]
        auto_complete: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Continent,
    Country,
    City,
}

impl From<ModeArg> for DisplayMode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Continent => DisplayMode::Continent,
            ModeArg::Country => DisplayMode::Country,
            ModeArg::City => DisplayMode::City,
        }
    }
}
