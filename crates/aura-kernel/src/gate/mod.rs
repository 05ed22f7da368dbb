//! Session-gate kernel contract.
//!
//! This module defines the *types, traits, and pure decision logic* for the
//! Aura session gateway.  No concrete implementations live here — those
//! belong in `aura-gateway` (runtime).
//!
//! # Architecture mapping
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              aura-kernel  (this module)                     │
//! │  SessionResolver trait    RouteTable + classify()           │
//! │  decide() state machine   GateConfig + validate()           │
//! │  CookieRecord / SessionResolution  GateError                │
//! └──────────────────────────┬──────────────────────────────────┘
//!                            │  depends on
//! ┌──────────────────────────▼──────────────────────────────────┐
//! │              aura-gateway  (runtime crate)                  │
//! │  IdentityClient: impl SessionResolver  (reqwest)            │
//! │  session_gate  (axum middleware)                            │
//! │  GatewayServer  (axum HTTP server)                          │
//! │  DataServiceClient  (streak row passthrough)                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use aura_kernel::gate::{GateConfig, GateDecision, decide};
//!
//! let config = GateConfig::default();
//! config.validate().expect("gate config is valid");
//!
//! // An anonymous request to a protected page redirects to sign-in.
//! let decision = decide(None, "/settings", &config.routes);
//! assert_eq!(decision, GateDecision::Redirect("/auth/login".into()));
//! ```

pub mod decision;
pub mod error;
pub mod resolver;
pub mod routes;
pub mod types;
pub mod validation;

// ── Flat re-exports ────────────────────────────────────────────────────────

pub use decision::{BYPASS_COOKIE, Environment, GateDecision, bypass_requested, decide};
pub use error::GateError;
pub use resolver::SessionResolver;
pub use routes::{RouteClass, RouteTable};
pub use types::{CookieOptions, CookieRecord, SameSite, SessionResolution, Subject, cookie_value};
pub use validation::GateConfig;
