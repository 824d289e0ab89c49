//! Optimizer gateway.
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │               OPTIMIZER GATEWAY              │
//!   POST              │  ┌──────────┐   ┌─────────┐   ┌───────────┐  │
//!   /routes/optimize ─┼─▶│ request  │──▶│ payload │──▶│ optimizer │──┼──▶ POST /optimize
//!                     │  │   id     │   │  check  │   │  client   │  │    (optimizer service)
//!                     │  └──────────┘   └─────────┘   └─────┬─────┘  │
//!                     │                                     │        │
//!   200 body ◀────────┼─────────────── relay ◀──────────────┤        │
//!   503 / 500 ◀───────┼────────── error mapping ◀───────────┘        │
//!                     └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use optimizer_gateway::lifecycle::startup::load_config_and_init_logging;
use optimizer_gateway::observability::metrics;
use optimizer_gateway::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "optimizer-gateway")]
#[command(about = "HTTP gateway in front of the route optimizer service", version)]
struct Args {
    /// Path to a TOML config file. Built-in defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config_and_init_logging(args.config.as_deref())?;

    tracing::info!("optimizer-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?args.config,
        bind_address = %config.listener.bind_address,
        optimizer = %config.optimizer.endpoint(),
        timeout_secs = ?config.optimizer.timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
