//! Cafe Menu CLI

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    cli::init_logging(cli.verbose)?;

    cli.run()
}
