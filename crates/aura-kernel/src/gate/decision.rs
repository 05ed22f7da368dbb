//! The gate decision state machine.
//!
//! Per request the gate produces exactly one decision, terminal after one
//! transition:
//!
//! ```text
//! Start ──► {Bypass} | {Resolve session ──► decide() ──► Respond}
//! ```
//!
//! [`decide`] is a pure function of the resolved subject, the request path,
//! and the static [`RouteTable`] — it performs no I/O and holds no state, so
//! it is trivially idempotent: the same inputs always yield the same
//! decision.

use super::routes::{RouteClass, RouteTable};
use super::types::{Subject, cookie_value};

/// Name of the development-only bypass cookie.
pub const BYPASS_COOKIE: &str = "aura-bypass";

// ─────────────────────────────────────────────────────────────────────────────
// Environment
// ─────────────────────────────────────────────────────────────────────────────

/// Runtime environment, resolved once at startup and carried in shared state.
///
/// Only [`Environment::Development`] honors the bypass cookie.  Parsing is
/// fail-closed: anything that is not explicitly a development marker is
/// treated as production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    /// Case-insensitive parse from a string such as the `AURA_ENV` variable.
    pub fn from_str_ci(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            _ => Environment::Production,
        }
    }
}

/// True when the request asks for the development bypass *and* the process
/// is running outside production.
///
/// The environment check is the outer guard: in production the cookie has no
/// effect regardless of its value.  This is the single most
/// security-sensitive branch in the gateway.
pub fn bypass_requested(environment: Environment, cookie_header: &str) -> bool {
    environment == Environment::Development
        && cookie_value(cookie_header, BYPASS_COOKIE) == Some("true")
}

// ─────────────────────────────────────────────────────────────────────────────
// GateDecision
// ─────────────────────────────────────────────────────────────────────────────

/// The gate's verdict for one request.
///
/// Exactly one decision is produced per request.  Refreshed session cookies
/// ride on whichever response the decision yields — pass-through and
/// redirect alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Let the request continue to its handler.
    PassThrough,
    /// Client-visible 3xx redirect to the given path (same origin; only the
    /// path of the current URL is replaced).
    Redirect(String),
}

/// Decide what happens to a request, given the resolved subject (the *fresh*
/// one, after any silent token refresh) and the request path.
///
/// The three redirect rules are checked in order and are mutually exclusive,
/// which structurally rules out redirect loops: an authenticated user on an
/// auth-flow page is sent away from it, never back into it.
pub fn decide(subject: Option<&Subject>, path: &str, table: &RouteTable) -> GateDecision {
    // 1. Anonymous access to a protected path → sign-in.  Resolution
    //    failures degrade to `subject == None`, so a broken identity service
    //    lands here too (fail-closed); public and auth-flow paths stay
    //    reachable.
    if subject.is_none() && table.classify(path) == RouteClass::Protected {
        return GateDecision::Redirect(table.login_path.clone());
    }

    // 2. Authenticated user on an auth-flow page → landing.  Note this is
    //    the broad prefix test, not the allowlist: `/auth/reset` redirects
    //    just like `/auth/login`.
    if subject.is_some() && table.is_auth_flow(path) {
        return GateDecision::Redirect(table.landing_path.clone());
    }

    // 3. Authenticated user on the anonymous landing page → landing.  Root
    //    is a marketing page for visitors only; exact match, `/dashboard`
    //    itself must not re-trigger.
    if subject.is_some() && path == "/" {
        return GateDecision::Redirect(table.landing_path.clone());
    }

    GateDecision::PassThrough
}
