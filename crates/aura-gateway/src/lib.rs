//! `aura-gateway` — Aura session gateway runtime.
//!
//! This crate provides the concrete implementations of the gate contracts
//! defined in `aura-kernel::gate`:
//!
//! | Kernel contract | Implementation |
//! |----------------|----------------|
//! | [`SessionResolver`](aura_kernel::gate::SessionResolver) | [`identity::IdentityClient`] |
//! | [`decide`](aura_kernel::gate::decide) + [`RouteTable`](aura_kernel::gate::RouteTable) | applied by [`middleware::session_gate`] |
//!
//! The [`server::GatewayServer`] wires everything together into an axum HTTP
//! service: the session-gate middleware in front, the streak read/write
//! passthrough ([`streaks`]) behind it.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use aura_gateway::server::{GatewayServer, GatewayServerConfig};
//! use aura_kernel::gate::GateConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = GatewayServer::new(GatewayServerConfig {
//!         port: 3000,
//!         identity_base_url: "https://identity.aura.dev".into(),
//!         ..Default::default()
//!     });
//!
//!     server.start(GateConfig::default()).await.unwrap();
//! }
//! ```

pub mod error;
pub mod identity;
pub mod middleware;
pub mod server;
pub mod streaks;

// Re-export the kernel gate types for convenience.
pub use aura_kernel::gate;
