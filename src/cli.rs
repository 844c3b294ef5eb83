use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// docwatch - template-to-PDF build tool
#[derive(Parser, Debug)]
#[command(name = "docwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to ./docwatch.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build templates once (every [[templates]] entry unless --template is given)
    Build {
        /// Template to build
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// TOML data file for the template
        #[arg(short, long, requires = "template")]
        data: Option<PathBuf>,
    },

    /// Rebuild a template whenever it or its data file changes
    Watch {
        /// Template to watch
        #[arg(short, long)]
        template: PathBuf,

        /// TOML data file for the template
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
}
