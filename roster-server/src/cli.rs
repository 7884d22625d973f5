//! Command line interface

use anyhow::Result;
use clap::Parser;
use roster_config::RosterConfig;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(author, version, about = "Roster people, comments and votes API", long_about = None)]
pub struct Cli {
    /// Configuration file path (YAML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Server bind address, e.g. 127.0.0.1
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Number of fake people to load at startup
    #[arg(long, value_name = "QUANTITY")]
    pub seed: Option<usize>,

    /// Print the default configuration and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Command line flags win over file and environment values
    pub fn apply_overrides(&self, config: &mut RosterConfig) -> Result<()> {
        if let Some(bind) = &self.bind {
            config.server.bind_address = bind.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(quantity) = self.seed {
            config.seed.quantity = quantity;
        }

        config
            .validate_all()
            .map_err(|e| anyhow::anyhow!("Invalid command line override: {}", e))
    }
}
