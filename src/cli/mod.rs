pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{Config, ConfigError};
use crate::domain::SortOption;

#[derive(Parser)]
#[command(name = "readit")]
#[command(about = "Read reddit threads and profiles in the terminal", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/readit/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Maximum number of post-info fetches in flight
    #[arg(long, global = true)]
    pub concurrency: Option<usize>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Load the configuration and apply command-line overrides.
    pub fn resolve_config(&self) -> Result<Config, ConfigError> {
        let mut config = match self.config {
            Some(ref path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        if let Some(concurrency) = self.concurrency {
            config.enrichment.concurrency = concurrency;
        }

        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a comment thread
    Thread {
        /// Thread URL, absolute or site-relative
        url: String,

        /// Comment sort order
        #[arg(short, long, value_enum)]
        sort: Option<SortOption>,
    },
    /// Show a single post
    Post {
        /// Post URL, absolute or site-relative
        url: String,
    },
    /// Show a user's posts and comments, newest first
    Profile {
        username: String,

        /// Profile section (e.g. "comments", "submitted")
        #[arg(short, long)]
        filter: Option<String>,

        /// Pagination token from a previous page
        #[arg(long)]
        after: Option<String>,
    },
    /// Show a user's activity as cards, one per post
    Cards {
        username: String,

        /// Profile section (e.g. "comments", "submitted")
        #[arg(short, long)]
        filter: Option<String>,

        /// Pagination token from a previous page
        #[arg(long)]
        after: Option<String>,
    },
}
