//! Startup arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ProxyConfiguration;

/// Configuration file used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "conf/server.toml";

#[derive(Debug, Parser)]
#[command(name = "sharding-proxy")]
#[command(about = "Database sharding proxy", long_about = None)]
pub struct BootstrapArgs {
    /// Port to listen on; overrides listener.port from the config file.
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

impl BootstrapArgs {
    /// The port to bind: the override if given, else the configured one.
    pub fn port_or(&self, config: &ProxyConfiguration) -> u16 {
        self.port.unwrap_or(config.listener.port)
    }
}
