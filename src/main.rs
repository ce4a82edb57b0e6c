//! Edge query-string-to-header promoter: local runtime harness.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────────┐
//!                    │                 INVOCATION HARNESS                   │
//!                    │                                                      │
//!   edge event JSON  │  ┌─────────┐    ┌──────────┐    ┌─────────────────┐  │
//!  ──────────────────┼─▶│  http   │───▶│ handler  │───▶│   transform     │  │
//!                    │  │ server  │    │Records[0]│    │ query → headers │  │
//!                    │  └─────────┘    └──────────┘    └────────┬────────┘  │
//!                    │                                          │           │
//!   request JSON     │                                          ▼           │
//!  ◀─────────────────┼──────────────────────────────── mutated CfRequest     │
//!                    │                                                      │
//!                    │  ┌────────────────────────────────────────────────┐  │
//!                    │  │ config · mapping (startup) · observability ·   │  │
//!                    │  │ lifecycle                                      │  │
//!                    │  └────────────────────────────────────────────────┘  │
//!                    └──────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use edge_query_headers::http::HttpServer;
use edge_query_headers::lifecycle::shutdown::Shutdown;
use edge_query_headers::lifecycle::startup::{build_mapping, resolve_config, StartupOptions};
use edge_query_headers::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "edge-query-headers")]
#[command(about = "Serve the query-string-to-header hook on a local invocation endpoint", long_about = None)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Mapping file (`<sourceKey> <HeaderName>` per line).
    #[arg(short, long)]
    mapping: Option<PathBuf>,

    /// Listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let options = StartupOptions {
        config_path: args.config,
        mapping_path: args.mapping,
        bind_address: args.bind,
    };

    let config = resolve_config(&options)?;
    logging::init_logging(&config.observability);

    tracing::info!("edge-query-headers v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        mapping_path = ?config.mapping.path,
        mapping_args = config.mapping.args.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let mapping = match build_mapping(&config.mapping) {
        Ok(mapping) => mapping,
        Err(e) => {
            tracing::error!(error = %e, "Refusing to serve without a mapping table");
            return Err(e.into());
        }
    };

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = HttpServer::new(config, mapping);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
