//! Route classification for the session gate.
//!
//! Every request path falls into exactly one of three classes:
//!
//! | Class | Test | Session required |
//! |-------|------|------------------|
//! | `Public` | exact match against a fixed allowlist | no |
//! | `AuthFlow` | prefix match against the auth-flow prefix | no |
//! | `Protected` | everything else | yes |
//!
//! The two tests are intentionally different granularities and are kept as
//! two separate predicates: [`RouteTable::is_public`] is an exact-match
//! allowlist ("reachable with no session at all"), while
//! [`RouteTable::is_auth_flow`] is a broader prefix test ("part of the
//! sign-in flow, so never loop back to login").  `/auth/login` satisfies
//! both; `/auth/reset` satisfies only the prefix test.

use std::collections::HashSet;

/// Classification of a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Exact-match allowlisted path, reachable with no session.
    Public,
    /// Path under the auth-flow prefix (sign-in / sign-up / callback).
    AuthFlow,
    /// Any other path; requires a valid session.
    Protected,
}

/// Static route-classification table.
///
/// All fields are startup configuration — nothing here is mutated at
/// request time.  [`GateConfig::validate()`](super::validation::GateConfig::validate)
/// checks the structural invariants (login path inside the allowlist and the
/// auth prefix, landing path outside the prefix) before the table is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    /// Exact-match allowlist of paths reachable without a session.
    pub public_paths: HashSet<String>,
    /// Prefix marking the sign-in / sign-up / callback flow.
    pub auth_prefix: String,
    /// Redirect target for anonymous access to a protected path.
    pub login_path: String,
    /// Redirect target for authenticated access to `/` or an auth-flow path.
    pub landing_path: String,
    /// Path prefixes that never reach the gate (internal build assets).
    pub asset_prefixes: Vec<String>,
    /// Path suffixes that never reach the gate (favicon, common image types).
    pub asset_suffixes: Vec<String>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            public_paths: ["/", "/auth/login", "/auth/signup", "/auth/callback"]
                .into_iter()
                .map(String::from)
                .collect(),
            auth_prefix: "/auth".to_string(),
            login_path: "/auth/login".to_string(),
            landing_path: "/dashboard".to_string(),
            asset_prefixes: vec!["/_assets/".to_string()],
            asset_suffixes: [
                "/favicon.ico",
                ".svg",
                ".png",
                ".jpg",
                ".jpeg",
                ".gif",
                ".webp",
                ".ico",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

impl RouteTable {
    /// Builder helper: add a path to the public allowlist.
    pub fn with_public_path(mut self, path: impl Into<String>) -> Self {
        self.public_paths.insert(path.into());
        self
    }

    /// Exact-match allowlist test: is `path` reachable with no session?
    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.contains(path)
    }

    /// Prefix test: does `path` belong to the sign-in / sign-up / callback flow?
    pub fn is_auth_flow(&self, path: &str) -> bool {
        path.starts_with(&self.auth_prefix)
    }

    /// Classify a request path.
    ///
    /// The allowlist wins over the prefix test, so `/auth/login` (which
    /// satisfies both) classifies as `Public`.  The distinction never changes
    /// a gate decision — both classes pass anonymous requests through — but
    /// keeps the two predicates separately observable.
    pub fn classify(&self, path: &str) -> RouteClass {
        if self.is_public(path) {
            RouteClass::Public
        } else if self.is_auth_flow(path) {
            RouteClass::AuthFlow
        } else {
            RouteClass::Protected
        }
    }

    /// Static-asset exclusion: requests matching this never reach the gate.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.asset_prefixes.iter().any(|p| path.starts_with(p.as_str()))
            || self.asset_suffixes.iter().any(|s| path.ends_with(s.as_str()))
    }
}
