use anyhow::Result;
use clap::Parser;
use fintelli::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    fintelli::logging::init(cli.verbose);
    cli.run().await
}
