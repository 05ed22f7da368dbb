//! Gate error types for `aura-kernel`.
//!
//! [`GateError`] covers configuration-time failures — an empty allowlist, a
//! login path that would redirect-loop — and the resolution failures the
//! runtime's identity client can report.  The gate maps *every* resolution
//! failure to "no identity" (fail-closed); the variants exist so the client
//! can say *why* in its log line, not so callers can branch on them.

use thiserror::Error;

/// Error type for the session-gate contract.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum GateError {
    // ── Configuration ────────────────────────────────────────────────────────
    /// The public allowlist is empty — every path would require a session,
    /// including the sign-in page itself.
    #[error("public allowlist cannot be empty")]
    EmptyAllowlist,

    /// An allowlist entry does not start with `/`.
    #[error("public path '{0}' must start with '/'")]
    UnrootedPublicPath(String),

    /// The auth-flow prefix does not start with `/`.
    #[error("auth-flow prefix '{0}' must start with '/'")]
    UnrootedAuthPrefix(String),

    /// The login path is not inside the public allowlist: an anonymous user
    /// redirected there would immediately be redirected again.
    #[error("login path '{0}' must appear in the public allowlist")]
    LoginNotAllowlisted(String),

    /// The login path is outside the auth-flow prefix, so rule 2 would not
    /// recognize it as part of the sign-in flow.
    #[error("login path '{0}' must be under the auth-flow prefix '{1}'")]
    LoginOutsideAuthFlow(String, String),

    /// The landing path is under the auth-flow prefix: an authenticated user
    /// sent there would bounce straight back out.
    #[error("landing path '{0}' must not be under the auth-flow prefix '{1}'")]
    LandingInsideAuthFlow(String, String),

    /// `resolve_timeout_ms` is zero, which would fail every resolution.
    #[error("resolve timeout must be greater than 0 ms")]
    InvalidTimeout,

    // ── Resolution ───────────────────────────────────────────────────────────
    /// The identity service could not be reached.
    #[error("identity service unreachable: {0}")]
    ResolveUnreachable(String),

    /// The identity service answered with a non-success status.
    #[error("identity service returned status {0}")]
    ResolveStatus(u16),

    /// The identity service's answer could not be decoded.
    #[error("identity service response could not be decoded: {0}")]
    ResolveDecode(String),

    /// The resolution call exceeded its bounded timeout.  Treated exactly
    /// like any other resolution failure.
    #[error("identity service resolution timed out")]
    ResolveTimeout,
}
