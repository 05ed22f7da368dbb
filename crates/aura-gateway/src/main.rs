//! Aura session gateway — entry point.
//!
//! Reads configuration from environment variables and starts the axum-based
//! HTTP gateway service.
//!
//! # Environment variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AURA_PORT` | `3000` | TCP port to listen on. |
//! | `AURA_ENV` | `production` | Runtime environment; only `development` enables the bypass cookie. |
//! | `IDENTITY_BASE_URL` | `http://127.0.0.1:9100` | Identity service base URL. |
//! | `DATA_SERVICE_BASE_URL` | `http://127.0.0.1:9200` | Hosted data service base URL. |
//! | `RESOLVE_TIMEOUT_MS` | `3000` | Bounded timeout for identity resolution. |

use aura_gateway::server::{GatewayServer, GatewayServerConfig};
use aura_kernel::gate::{Environment, GateConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("aura_gateway=info".parse().unwrap()),
        )
        .init();

    let port: u16 = std::env::var("AURA_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);

    // Resolved once here; request handling only reads the resulting value.
    let environment = Environment::from_str_ci(
        &std::env::var("AURA_ENV").unwrap_or_else(|_| "production".to_string()),
    );

    let identity_base_url = std::env::var("IDENTITY_BASE_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:9100".to_string());
    let data_base_url = std::env::var("DATA_SERVICE_BASE_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:9200".to_string());

    let resolve_timeout_ms: u64 = std::env::var("RESOLVE_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3_000);

    if environment == Environment::Development {
        tracing::warn!(
            "AURA_ENV=development — the aura-bypass cookie DISABLES session gating. \
             Do not use this configuration in production."
        );
    }

    let gate_config = GateConfig::default().with_resolve_timeout_ms(resolve_timeout_ms);

    if let Err(e) = gate_config.validate() {
        eprintln!("Invalid gate configuration: {e}");
        std::process::exit(1);
    }

    info!(
        port = port,
        environment = ?environment,
        identity_base_url = %identity_base_url,
        data_base_url = %data_base_url,
        resolve_timeout_ms = resolve_timeout_ms,
        "Aura session gateway configuration loaded"
    );

    let server = GatewayServer::new(GatewayServerConfig {
        port,
        environment,
        identity_base_url,
        data_base_url,
    });

    if let Err(e) = server.start(gate_config).await {
        eprintln!("Gateway error: {e}");
        std::process::exit(1);
    }
}
