//! `cbuild`, the command line front end of the component builder.
//!
//! Exit status is 0 when every view compiled (or the scan finished), 1 when
//! the run failed and the error was printed to stderr with its details and a
//! suggestion, and 2 for command line usage errors reported by clap.

use anyhow::Result;
use clap::Parser;
use component_builder::cli;
use component_builder::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // ANSI colors for the stderr error report
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(error) = cli.execute().await {
        user_friendly_error(error).display();
        std::process::exit(1);
    }
    Ok(())
}
