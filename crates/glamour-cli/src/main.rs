use anyhow::Result;
use clap::Parser;
use glamour_cli::cli_args::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    glamour_cli::run(cli).map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}
