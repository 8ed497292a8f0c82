//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;

use crate::config::OutputFormat;

#[derive(Parser)]
#[command(name = "chatlens")]
#[command(about = "Interaction graph and signature vocabulary for exported group chats")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file (default: chatlens.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

// Bot identities to drop, added to those in the configuration
#[derive(Args, Debug, Clone, Default)]
pub struct BotArgs {
    /// Bots that answer commands (comma-separated ids); the command before each reply is dropped too
    #[arg(long, value_delimiter = ',')]
    pub bots: Vec<String>,
    /// Bots that post on their own (comma-separated ids)
    #[arg(long, value_delimiter = ',')]
    pub quiet_bots: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full analysis and print a report
    Analyze {
        /// Chat export file
        input: PathBuf,
        #[command(flatten)]
        bots: BotArgs,
        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
        /// Words shown per participant
        #[arg(short, long)]
        top: Option<usize>,
        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export the interaction graph as JSON
    Graph {
        /// Chat export file
        input: PathBuf,
        #[command(flatten)]
        bots: BotArgs,
        /// Write the graph to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show each participant's signature words
    Terms {
        /// Chat export file
        input: PathBuf,
        #[command(flatten)]
        bots: BotArgs,
        /// Words shown per participant
        #[arg(short, long)]
        top: Option<usize>,
    },
    /// Show session statistics
    Sessions {
        /// Chat export file
        input: PathBuf,
        #[command(flatten)]
        bots: BotArgs,
        /// Gap limit in seconds (default: the configured short and long gaps)
        #[arg(short, long)]
        gap: Option<i64>,
    },
    /// Print the salted digest of identities, for the blacklist
    Hash {
        /// Identities to hash
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Show current configuration
    Config,
}
