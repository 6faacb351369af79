use std::path::PathBuf;

use clap::{Parser, Subcommand};

use sharding_proxy::bootstrap::verify_startup_plan;
use sharding_proxy::cli::DEFAULT_CONFIG_PATH;
use sharding_proxy::config::load_config;
use sharding_proxy::governance::GovernanceProviderRegistry;
use sharding_proxy::persist::DefaultRepositoryFactory;

#[derive(Parser)]
#[command(name = "proxy-cli")]
#[command(about = "Inspect how the sharding proxy would start", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the startup mode (standard or governance)
    Mode,
    /// Print the resolved persistence or governance configuration as JSON
    Resolve,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    let plan = verify_startup_plan(
        &config,
        &DefaultRepositoryFactory,
        &GovernanceProviderRegistry::with_defaults(),
    )?;

    match cli.command {
        Commands::Mode => println!("{}", plan.mode()),
        Commands::Resolve => println!("{}", serde_json::to_string_pretty(&plan)?),
    }

    Ok(())
}
