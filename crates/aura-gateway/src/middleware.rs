//! The session gate, as axum middleware.
//!
//! Runs once per inbound request, in order:
//!
//! 1. **Asset exclusion** — internal build assets, the favicon, and common
//!    image paths skip the gate entirely.
//! 2. **Development bypass** — outside production, an `aura-bypass=true`
//!    cookie passes the request through with no identity-service call.
//! 3. **Session resolution** — one bounded call to the
//!    [`SessionResolver`](aura_kernel::gate::SessionResolver).  Any failure
//!    degrades to an anonymous resolution (fail-closed).
//! 4. **Decision** — [`decide`] on the *refreshed* subject; pass through or
//!    redirect.  Refreshed cookies are attached to whichever response
//!    leaves, options preserved verbatim.
//!
//! Exactly one response is produced per request; the gate holds no state
//! across requests.

use crate::server::AppState;
use aura_kernel::gate::{GateDecision, SessionResolution, bypass_requested, decide};
use axum::{
    extract::{Request, State},
    http::{
        HeaderValue,
        header::{COOKIE, SET_COOKIE},
    },
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Session-gate middleware, installed via `axum::middleware::from_fn_with_state`.
pub async fn session_gate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();

    // Static assets never reach the gate.
    if state.config.routes.is_excluded(&path) {
        return next.run(req).await;
    }

    let request_id = Uuid::new_v4();
    let cookie_header = req
        .headers()
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    // Development bypass: environment-gated first, cookie-gated second.
    // Skips session resolution entirely; never active in production.
    if bypass_requested(state.environment, &cookie_header) {
        debug!(request_id = %request_id, path = %path, "session gate bypassed (development)");
        return next.run(req).await;
    }

    // Resolve the working session.  The resolution carries the *fresh*
    // subject (after any silent token refresh) — that, not whatever the
    // stale cookies implied, is what the decision below evaluates.
    let resolution = match state.resolver.resolve(&cookie_header).await {
        Ok(resolution) => resolution,
        Err(err) => {
            // Fail-closed: a broken identity service is "no identity", which
            // redirects protected-route access to sign-in.  Logged so
            // outages stay visible even though behavior does not branch.
            warn!(
                request_id = %request_id,
                path = %path,
                error = %err,
                "session resolution failed; treating request as unauthenticated"
            );
            SessionResolution::anonymous()
        }
    };

    // Expose the subject to downstream handlers within this same pass.
    if let Some(subject) = &resolution.subject {
        req.extensions_mut().insert(subject.clone());
    }

    let decision = decide(resolution.subject.as_ref(), &path, &state.config.routes);

    let mut response = match decision {
        GateDecision::PassThrough => next.run(req).await,
        GateDecision::Redirect(target) => {
            info!(
                request_id = %request_id,
                path = %path,
                target = %target,
                authenticated = resolution.subject.is_some(),
                "→ gate redirect"
            );
            // Same-origin redirect: only the path of the current URL changes.
            Redirect::temporary(&target).into_response()
        }
    };

    // Persist every refreshed cookie on the outgoing response, verbatim.
    // Each record becomes its own Set-Cookie header with options intact.
    for cookie in &resolution.cookies_to_persist {
        match HeaderValue::from_str(&cookie.to_set_cookie()) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(_) => {
                warn!(
                    request_id = %request_id,
                    cookie = %cookie.name,
                    "refreshed cookie is not a valid header value; dropped"
                );
            }
        }
    }

    response
}
