//! Database sharding proxy.
//!
//! # Startup
//!
//! ```text
//!   args (--config, --port)
//!       │
//!       ▼
//!   config loader ──▶ ProxyConfiguration
//!       │
//!       ▼
//!   governance section?
//!       ├── no  ──▶ rules ──▶ metadata persist config ──▶ repository ──▶ Standard
//!       └── yes ──▶ governance config ──▶ governance rule ─────────────▶ Governance
//!                                                                          │
//!                                                   init(config, port) ◀───┘
//!                                                          │
//!                                                          ▼
//!                                                   listener until shutdown
//! ```
//!
//! Any error before the listener binds aborts with a non-zero exit status.

use clap::Parser;

use sharding_proxy::cli::BootstrapArgs;
use sharding_proxy::config::load_config;
use sharding_proxy::lifecycle::startup;
use sharding_proxy::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = BootstrapArgs::parse();
    let config = load_config(&args.config)?;

    logging::init(&config.observability);

    let port = args.port_or(&config);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %args.config.display(),
        port,
        governance = config.has_governance(),
        "sharding-proxy starting"
    );

    startup::start(config, port).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
