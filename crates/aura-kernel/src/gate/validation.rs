//! Gate configuration container and startup validation.
//!
//! [`GateConfig`] aggregates the route table and the per-request resolution
//! parameters, and exposes a single [`validate()`](GateConfig::validate)
//! method that checks all structural invariants *before* the server starts
//! taking traffic.  In particular it proves, structurally, that neither
//! redirect target can form a loop.

use super::error::GateError;
use super::routes::RouteTable;

/// Top-level session-gate configuration.
///
/// Call [`validate()`](Self::validate) before handing this to the gateway
/// runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Static route classification table.
    pub routes: RouteTable,
    /// Bounded timeout for the identity-resolution call (must be > 0).
    /// A timed-out resolution is treated like any other failure.
    pub resolve_timeout_ms: u64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            routes: RouteTable::default(),
            resolve_timeout_ms: 3_000,
        }
    }
}

impl GateConfig {
    /// Builder: replace the route table.
    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    /// Builder: set the resolution timeout.
    pub fn with_resolve_timeout_ms(mut self, ms: u64) -> Self {
        self.resolve_timeout_ms = ms;
        self
    }

    /// Validate all structural invariants of this configuration.
    ///
    /// Checks, in order:
    /// 1. the public allowlist is non-empty and every entry is `/`-rooted;
    /// 2. the auth-flow prefix is `/`-rooted;
    /// 3. the login path is allowlisted *and* under the auth prefix, so an
    ///    anonymous user redirected to it is never redirected again;
    /// 4. the landing path is *not* under the auth prefix, so an
    ///    authenticated user redirected to it is never redirected again;
    /// 5. the resolve timeout is non-zero.
    pub fn validate(&self) -> Result<(), GateError> {
        let routes = &self.routes;

        if routes.public_paths.is_empty() {
            return Err(GateError::EmptyAllowlist);
        }
        for path in &routes.public_paths {
            if !path.starts_with('/') {
                return Err(GateError::UnrootedPublicPath(path.clone()));
            }
        }

        if !routes.auth_prefix.starts_with('/') {
            return Err(GateError::UnrootedAuthPrefix(routes.auth_prefix.clone()));
        }

        if !routes.is_public(&routes.login_path) {
            return Err(GateError::LoginNotAllowlisted(routes.login_path.clone()));
        }
        if !routes.is_auth_flow(&routes.login_path) {
            return Err(GateError::LoginOutsideAuthFlow(
                routes.login_path.clone(),
                routes.auth_prefix.clone(),
            ));
        }

        if routes.is_auth_flow(&routes.landing_path) {
            return Err(GateError::LandingInsideAuthFlow(
                routes.landing_path.clone(),
                routes.auth_prefix.clone(),
            ));
        }

        if self.resolve_timeout_ms == 0 {
            return Err(GateError::InvalidTimeout);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GateConfig::default().validate(), Ok(()));
    }

    #[test]
    fn empty_allowlist_is_rejected() {
        let mut config = GateConfig::default();
        config.routes.public_paths.clear();
        assert_eq!(config.validate(), Err(GateError::EmptyAllowlist));
    }

    #[test]
    fn unrooted_public_path_is_rejected() {
        let config = GateConfig::default().with_routes(
            RouteTable::default().with_public_path("pricing"),
        );
        assert_eq!(
            config.validate(),
            Err(GateError::UnrootedPublicPath("pricing".into()))
        );
    }

    #[test]
    fn login_path_must_be_allowlisted() {
        let mut config = GateConfig::default();
        config.routes.public_paths.remove("/auth/login");
        assert_eq!(
            config.validate(),
            Err(GateError::LoginNotAllowlisted("/auth/login".into()))
        );
    }

    #[test]
    fn login_path_must_sit_under_auth_prefix() {
        let mut config = GateConfig::default();
        config.routes.login_path = "/login".to_string();
        config.routes.public_paths.insert("/login".to_string());
        assert_eq!(
            config.validate(),
            Err(GateError::LoginOutsideAuthFlow(
                "/login".into(),
                "/auth".into()
            ))
        );
    }

    #[test]
    fn landing_path_must_sit_outside_auth_prefix() {
        let mut config = GateConfig::default();
        config.routes.landing_path = "/auth/welcome".to_string();
        assert_eq!(
            config.validate(),
            Err(GateError::LandingInsideAuthFlow(
                "/auth/welcome".into(),
                "/auth".into()
            ))
        );
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = GateConfig::default().with_resolve_timeout_ms(0);
        assert_eq!(config.validate(), Err(GateError::InvalidTimeout));
    }
}
