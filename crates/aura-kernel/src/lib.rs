//! `aura-kernel` — contract layer for the Aura session gateway.
//!
//! This crate defines the *types, traits, and pure decision logic* for the
//! request-gating middleware that fronts the Aura application.  No I/O lives
//! here — the concrete identity-service client and the axum wiring belong in
//! `aura-gateway`.

pub mod gate;
