//! Identity-service client.
//!
//! [`IdentityClient`] implements the kernel's
//! [`SessionResolver`](aura_kernel::gate::SessionResolver) seam against the
//! hosted identity service.  It forwards the request's raw `Cookie` header
//! and gets back the current subject plus any refreshed session cookies.
//!
//! Every failure mode — connect error, bounded timeout, non-2xx status,
//! undecodable body — surfaces as a [`GateError`], which the middleware maps
//! to "no identity" (fail-closed).  The variants only feed the warn log.

use async_trait::async_trait;
use aura_kernel::gate::{CookieRecord, GateError, SessionResolution, SessionResolver, Subject};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Wire shape of the identity service's `/session/resolve` answer.
#[derive(Debug, Deserialize)]
struct ResolveReply {
    subject: Option<Subject>,
    #[serde(default)]
    cookies: Vec<CookieRecord>,
}

/// Resolves sessions against the hosted identity service over HTTP.
pub struct IdentityClient {
    base_url: String,
    client: Client,
}

impl IdentityClient {
    /// Create a new client.
    ///
    /// - `base_url`: identity service base URL, e.g. `https://identity.aura.dev`.
    /// - `timeout_ms`: bounded per-request timeout; a timed-out resolution is
    ///   reported as [`GateError::ResolveTimeout`] and treated like any other
    ///   resolution failure.
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
}

#[async_trait]
impl SessionResolver for IdentityClient {
    #[instrument(skip(self, cookie_header))]
    async fn resolve(&self, cookie_header: &str) -> Result<SessionResolution, GateError> {
        let url = format!("{}/session/resolve", self.base_url);
        debug!(url = %url, "resolving session against identity service");

        let mut builder = self.client.post(&url);
        if !cookie_header.is_empty() {
            builder = builder.header("cookie", cookie_header);
        }

        let reply = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                GateError::ResolveTimeout
            } else {
                GateError::ResolveUnreachable(e.to_string())
            }
        })?;

        let status = reply.status();
        if !status.is_success() {
            return Err(GateError::ResolveStatus(status.as_u16()));
        }

        let body: ResolveReply = reply
            .json()
            .await
            .map_err(|e| GateError::ResolveDecode(e.to_string()))?;

        Ok(SessionResolution {
            subject: body.subject,
            cookies_to_persist: body.cookies,
        })
    }
}
