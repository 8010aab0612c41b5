//! CLI module for Pressroom
//!
//! Provides command-line interface parsing and handling for the pressroom-server binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod config;
pub mod init;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pressroom - articles and comments server
///
/// Token-authenticated publishing backend where only an item's creator
/// may change or delete it.
#[derive(Parser, Debug)]
#[command(
    name = "pressroom-server",
    version,
    about = "Pressroom - articles and comments server",
    long_about = "A publishing backend: register, log in for a bearer token, then create\n\
                  articles and comment on them. Only the creator of an article or comment\n\
                  may update or delete it.\n\n\
                  Run without arguments to start the server, or use 'init' to scaffold a new project.",
    after_help = "EXAMPLES:\n    \
                  pressroom-server init                  # Scaffold pressroom.toml and .env.example\n    \
                  pressroom-server                       # Start the server (requires pressroom.toml)\n    \
                  pressroom-server config --validate     # Check configuration and environment\n    \
                  pressroom-server --config my.toml      # Use a custom config file"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "pressroom.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new Pressroom project
    ///
    /// Creates pressroom.toml, .env.example, .gitignore and the data/ directory.
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,

        /// Host address for the server
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for the server
        #[arg(long, default_value = "3000")]
        port: u16,
    },

    /// Show configuration information
    Config {
        /// Validate the configuration file and required environment variables
        #[arg(long)]
        validate: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
