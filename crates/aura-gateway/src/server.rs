//! Axum-based gateway server.
//!
//! [`GatewayServer`] wires the session-gate middleware, the identity-service
//! client, and the streak passthrough into a running axum service.
//!
//! # Endpoints
//!
//! | Method | Path | Gated | Description |
//! |--------|------|-------|-------------|
//! | `GET`  | `/health` | no | Liveness check — always `200 OK`. |
//! | `GET`  | `/api/streak` | yes | Read the caller's streak row. |
//! | `PUT`  | `/api/streak` | yes | Replace the caller's streak row. |
//! | `ANY`  | `/*` | yes | Application page shell (pass-through target). |

use crate::identity::IdentityClient;
use crate::middleware::session_gate;
use crate::streaks::{DataServiceClient, StreakStore, get_streak, put_streak};
use aura_kernel::gate::{Environment, GateConfig, SessionResolver};
use axum::{Json, Router, http::Uri, response::IntoResponse, routing::get};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Timeout for data-service calls, independent of the resolve timeout.
const DATA_TIMEOUT_MS: u64 = 10_000;

// ─────────────────────────────────────────────────────────────────────────────
// Shared application state
// ─────────────────────────────────────────────────────────────────────────────

/// Shared state injected into the middleware and every handler via axum's
/// `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Identity-resolution seam; stubbed in tests.
    pub resolver: Arc<dyn SessionResolver>,
    /// Streak-row store; stubbed in tests.
    pub store: Arc<dyn StreakStore>,
    /// Validated gate configuration.
    pub config: Arc<GateConfig>,
    /// Runtime environment, resolved once at startup.
    pub environment: Environment,
}

// ─────────────────────────────────────────────────────────────────────────────
// GatewayServerConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Runtime configuration for [`GatewayServer`].
pub struct GatewayServerConfig {
    /// TCP port to listen on (default: 3000).
    pub port: u16,
    /// Runtime environment.  Only `Development` honors the bypass cookie.
    pub environment: Environment,
    /// Identity service base URL.
    pub identity_base_url: String,
    /// Hosted data service base URL.
    pub data_base_url: String,
}

impl Default for GatewayServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            environment: Environment::Production,
            identity_base_url: "http://127.0.0.1:9100".to_string(),
            data_base_url: "http://127.0.0.1:9200".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GatewayServer
// ─────────────────────────────────────────────────────────────────────────────

/// High-level gateway server encapsulating the gate middleware, identity
/// client, and streak passthrough.
pub struct GatewayServer {
    config: GatewayServerConfig,
}

impl GatewayServer {
    /// Create a new server from the given configuration.
    pub fn new(config: GatewayServerConfig) -> Self {
        Self { config }
    }

    /// Build the axum [`Router`] wired to the provided [`GateConfig`].
    ///
    /// Validates the gate config and constructs the real identity and data
    /// clients.  Call [`start()`](Self::start) to bind and serve.
    pub fn build_app(&self, gate_config: GateConfig) -> Router {
        gate_config.validate().expect("invalid gate config");

        // The resolve timeout comes from the validated gate config.
        let resolver = IdentityClient::new(
            &self.config.identity_base_url,
            gate_config.resolve_timeout_ms,
        );
        let store = DataServiceClient::new(&self.config.data_base_url, DATA_TIMEOUT_MS);

        let state = AppState {
            resolver: Arc::new(resolver),
            store: Arc::new(store),
            config: Arc::new(gate_config),
            environment: self.config.environment,
        };

        router(state)
    }

    /// Bind the server to `0.0.0.0:{port}` and serve until the process exits.
    pub async fn start(self, gate_config: GateConfig) -> std::io::Result<()> {
        let app = self.build_app(gate_config);
        let addr = format!("0.0.0.0:{}", self.config.port);
        info!(addr = %addr, environment = ?self.config.environment, "Aura session gateway starting");
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await
    }
}

/// Assemble the router around an existing [`AppState`].
///
/// Split out from [`GatewayServer::build_app`] so integration tests can
/// inject stub resolvers and stores.
pub fn router(state: AppState) -> Router {
    // Everything except /health sits behind the session gate.  The gate's
    // own asset exclusion runs inside the middleware, before any session
    // logic.
    let gated = Router::new()
        .route("/api/streak", get(get_streak).put(put_streak))
        .fallback(page_shell)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_gate,
        ));

    Router::new()
        .route("/health", get(health))
        .merge(gated)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// `GET /health` — liveness probe.
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "aura-gateway" }))
}

/// Pass-through target for application pages.
///
/// The UI bundle itself is served by the hosting platform; this stub keeps
/// local runs and integration tests self-contained.
async fn page_shell(uri: Uri) -> impl IntoResponse {
    Json(json!({ "page": uri.path() }))
}
