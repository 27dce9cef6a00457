//! Command-line interface built on clap.

use clap::{Parser, Subcommand};

/// Lingora - bilingual content management backend
#[derive(Parser)]
#[command(name = "lingora")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server (default)
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}
