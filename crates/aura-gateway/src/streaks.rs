//! Streak-state passthrough.
//!
//! The only persistence fact the gateway touches: one row of streak state
//! per user, held by the hosted relational data service.  The handlers here
//! are thin read/write passthroughs — no streak arithmetic happens in the
//! gateway.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/streak` | Read the caller's current streak row. |
//! | `PUT` | `/api/streak` | Replace the caller's streak row. |
//!
//! Both handlers require the subject the session gate attached to the
//! request; a request that somehow reaches them anonymously gets `401`.

use crate::error::{GatewayError, GatewayResult};
use crate::server::AppState;
use async_trait::async_trait;
use aura_kernel::gate::Subject;
use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

// ─────────────────────────────────────────────────────────────────────────────
// StreakState / StreakStore
// ─────────────────────────────────────────────────────────────────────────────

/// One user's streak row, mirrored verbatim from the data service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    /// Current consecutive-day streak count.
    pub current: u32,
}

/// Contract for reading and writing one streak row by subject.
#[async_trait]
pub trait StreakStore: Send + Sync {
    /// Read the subject's streak row.
    async fn fetch(&self, subject: &Subject) -> GatewayResult<StreakState>;
    /// Replace the subject's streak row.
    async fn store(&self, subject: &Subject, streak: &StreakState) -> GatewayResult<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// DataServiceClient
// ─────────────────────────────────────────────────────────────────────────────

/// [`StreakStore`] backed by the hosted relational data service.
pub struct DataServiceClient {
    base_url: String,
    client: Client,
}

impl DataServiceClient {
    /// Create a new client against `base_url`, e.g. `https://data.aura.dev`.
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    fn row_url(&self, subject: &Subject) -> String {
        format!("{}/streaks/{}", self.base_url, subject.as_str())
    }
}

#[async_trait]
impl StreakStore for DataServiceClient {
    #[instrument(skip(self), fields(subject = %subject))]
    async fn fetch(&self, subject: &Subject) -> GatewayResult<StreakState> {
        let url = self.row_url(subject);
        debug!(url = %url, "reading streak row");

        let reply = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GatewayError::DataUnreachable(e.to_string()))?;

        let status = reply.status();
        if !status.is_success() {
            return Err(GatewayError::DataStatus(status.as_u16()));
        }

        reply
            .json()
            .await
            .map_err(|e| GatewayError::Internal(e.to_string()))
    }

    #[instrument(skip(self, streak), fields(subject = %subject))]
    async fn store(&self, subject: &Subject, streak: &StreakState) -> GatewayResult<()> {
        let url = self.row_url(subject);
        debug!(url = %url, current = streak.current, "writing streak row");

        let reply = self
            .client
            .put(&url)
            .json(streak)
            .send()
            .await
            .map_err(|e| GatewayError::DataUnreachable(e.to_string()))?;

        let status = reply.status();
        if !status.is_success() {
            return Err(GatewayError::DataStatus(status.as_u16()));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// `GET /api/streak` — read the caller's streak row.
pub async fn get_streak(
    State(state): State<AppState>,
    subject: Option<Extension<Subject>>,
) -> GatewayResult<Json<StreakState>> {
    let Extension(subject) = subject.ok_or(GatewayError::Unauthenticated)?;
    let streak = state.store.fetch(&subject).await?;
    Ok(Json(streak))
}

/// `PUT /api/streak` — replace the caller's streak row.
pub async fn put_streak(
    State(state): State<AppState>,
    subject: Option<Extension<Subject>>,
    Json(streak): Json<StreakState>,
) -> GatewayResult<impl IntoResponse> {
    let Extension(subject) = subject.ok_or(GatewayError::Unauthenticated)?;
    state.store.store(&subject, &streak).await?;
    Ok(StatusCode::NO_CONTENT)
}
