//! Identity-resolution seam.
//!
//! The gate performs at most one outbound call per request, through this
//! trait.  The runtime crate implements it with a reqwest client against the
//! identity service; tests implement it with in-memory stubs.

use super::error::GateError;
use super::types::SessionResolution;
use async_trait::async_trait;

/// Contract for resolving the current session from request cookies.
///
/// Implementations must be `Send + Sync` so they can be shared across Tokio
/// tasks without additional synchronization by the caller.
///
/// # Fail-closed contract
///
/// Returning `Err` means "resolution did not happen" — network failure, bad
/// status, timeout.  The gate treats any `Err` identically to an anonymous
/// [`SessionResolution`]: a broken or unreachable identity service must
/// never be interpreted as "authenticated".
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// Resolve the session carried by `cookie_header` (the raw `Cookie`
    /// request header value; empty string when the request carried none).
    ///
    /// On success the resolution holds the *current* subject — after any
    /// silent token refresh the service performed — plus every cookie the
    /// service wants persisted on the browser.
    async fn resolve(&self, cookie_header: &str) -> Result<SessionResolution, GateError>;
}
