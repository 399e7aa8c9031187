mod bootstrap_helpers;
mod cli_args;
mod commands;

use anyhow::Result;
use clap::Parser;

use crate::bootstrap_helpers::init_tracing;
use crate::cli_args::Cli;
use crate::commands::run_command;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    if let Some(output) = run_command(&cli).await? {
        if output.ends_with('\n') {
            print!("{output}");
        } else {
            println!("{output}");
        }
    }
    Ok(())
}
