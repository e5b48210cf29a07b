pub mod commands;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::Config;
use crate::store::SortKey;

#[derive(Parser)]
#[command(name = "quakewatch")]
#[command(about = "Browse recent earthquakes from the USGS feed", long_about = None)]
pub struct Cli {
    /// Feed URL (overrides the config file)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.feed.url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.feed.timeout_secs = timeout;
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the feed and list earthquakes
    List {
        #[command(flatten)]
        view: ViewArgs,

        /// Show at most this many earthquakes
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show details for one earthquake
    Show {
        /// Position in the list (as printed by `list` with the same options)
        index: usize,

        #[command(flatten)]
        view: ViewArgs,
    },
    /// Print the magnitude legend
    Legend,
    /// Launch the TUI
    Tui,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Sort order (default: feed order)
    #[arg(short, long, value_enum)]
    pub sort: Option<SortArg>,

    /// Only show earthquakes whose place contains this text
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortArg {
    Magnitude,
    Date,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Magnitude => SortKey::Magnitude,
            SortArg::Date => SortKey::Date,
        }
    }
}
