//! docwatch CLI - template-to-PDF builds
//!
//! Usage: docwatch <COMMAND>
//!
//! Commands:
//!   build   Build templates once (in parallel)
//!   watch   Rebuild a template whenever its sources change

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    docwatch::logging::init(cli.verbose, cli.json);

    match cli.command {
        Commands::Build { template, data } => commands::build::cmd_build(
            cli.config.as_deref(),
            template.as_deref(),
            data.as_deref(),
            cli.json,
        ),
        Commands::Watch { template, data } => commands::watch::cmd_watch(
            cli.config.as_deref(),
            &template,
            data.as_deref(),
            cli.json,
        ),
    }
}
