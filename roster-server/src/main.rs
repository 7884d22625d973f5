//! Roster server binary

use anyhow::Result;
use clap::Parser;
use roster_config::{ConfigLoader, RosterConfig};
use roster_server::{Cli, Server};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        println!("{}", RosterConfig::generate_sample());
        return Ok(());
    }

    let mut config = ConfigLoader::new().load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config)?;

    let server = Server::new(config).await?;
    server.start().await
}
