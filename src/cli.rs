use clap::{Parser, Subcommand};

#[derive(Parser, Clone)]
#[command(name = "pgdrift")]
#[command(about = "PostgreSQL schema comparison and drift detection")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Increase verbosity level (can be used multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: Option<u8>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Generate a sample configuration file
    Init,

    /// Compare a source schema against a destination schema
    Compare {
        /// Profile name from pgdrift.toml
        #[arg(value_name = "PROFILE")]
        profile: Option<String>,

        /// Source connection URL (overrides the profile)
        #[arg(long)]
        source: Option<String>,

        /// Destination connection URL (overrides the profile)
        #[arg(long)]
        destination: Option<String>,

        /// Schema to compare on the source (overrides the profile)
        #[arg(long)]
        source_schema: Option<String>,

        /// Schema to compare on the destination (defaults to the source schema)
        #[arg(long)]
        destination_schema: Option<String>,

        /// Print the full result as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Skip writing the run to comparison history
        #[arg(long)]
        no_record: bool,
    },

    /// Show recent comparison runs from history
    History {
        /// Profile name to filter by
        #[arg(value_name = "PROFILE")]
        profile: Option<String>,

        /// Maximum number of runs to show
        #[arg(long, default_value = "20")]
        limit: i64,

        /// History store connection URL (overrides pgdrift.toml)
        #[arg(long)]
        connection_string: Option<String>,
    },

    /// Check whether the latest run drifted from the one before it
    Drift {
        /// Profile name from pgdrift.toml
        #[arg(value_name = "PROFILE")]
        profile: String,

        /// History store connection URL (overrides pgdrift.toml)
        #[arg(long)]
        connection_string: Option<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
