//! End-to-end gate-flow tests.
//!
//! Drives the real axum router — session-gate middleware included — with
//! in-memory stubs for the identity service and the data service, using
//! `tower::ServiceExt::oneshot`.

use async_trait::async_trait;
use aura_gateway::error::GatewayResult;
use aura_gateway::gate::{
    CookieOptions, CookieRecord, Environment, GateConfig, GateError, SessionResolution,
    SessionResolver, Subject,
};
use aura_gateway::server::{AppState, router};
use aura_gateway::streaks::{StreakState, StreakStore};
use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::util::ServiceExt;

// ─────────────────────────────────────────────────────────────────────────────
// Stubs
// ─────────────────────────────────────────────────────────────────────────────

/// Identity-service stub with a fixed outcome and a call counter.
struct StubResolver {
    outcome: Option<SessionResolution>,
    calls: AtomicUsize,
}

impl StubResolver {
    fn resolving(resolution: SessionResolution) -> Arc<Self> {
        Arc::new(Self {
            outcome: Some(resolution),
            calls: AtomicUsize::new(0),
        })
    }

    /// A resolver whose every call fails, as during an identity outage.
    fn failing() -> Arc<Self> {
        Arc::new(Self {
            outcome: None,
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionResolver for StubResolver {
    async fn resolve(&self, _cookie_header: &str) -> Result<SessionResolution, GateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Some(resolution) => Ok(resolution.clone()),
            None => Err(GateError::ResolveUnreachable("connection refused".into())),
        }
    }
}

/// Data-service stub holding a single fixed streak row.
struct StubStore;

#[async_trait]
impl StreakStore for StubStore {
    async fn fetch(&self, _subject: &Subject) -> GatewayResult<StreakState> {
        Ok(StreakState { current: 7 })
    }

    async fn store(&self, _subject: &Subject, _streak: &StreakState) -> GatewayResult<()> {
        Ok(())
    }
}

fn app(environment: Environment, resolver: Arc<StubResolver>) -> Router {
    router(AppState {
        resolver,
        store: Arc::new(StubStore),
        config: Arc::new(GateConfig::default()),
        environment,
    })
}

async fn get(app: &Router, path: &str, cookies: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(cookies) = cookies {
        builder = builder.header(header::COOKIE, cookies);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect carries a Location header")
        .to_str()
        .unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Anonymous flows
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn anonymous_protected_path_redirects_to_login() {
    let app = app(
        Environment::Production,
        StubResolver::resolving(SessionResolution::anonymous()),
    );
    // No cookies at all.
    let response = get(&app, "/settings", None).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/auth/login");
}

#[tokio::test]
async fn anonymous_public_and_auth_flow_paths_pass() {
    let app = app(
        Environment::Production,
        StubResolver::resolving(SessionResolution::anonymous()),
    );
    for path in ["/", "/auth/login", "/auth/signup", "/auth/callback"] {
        let response = get(&app, path, None).await;
        assert_eq!(response.status(), StatusCode::OK, "path {path}");
    }
}

#[tokio::test]
async fn identity_outage_fails_closed() {
    let resolver = StubResolver::failing();
    let app = app(Environment::Production, resolver.clone());

    // Protected path: the outage reads as "no identity" and redirects.
    let response = get(&app, "/settings", Some("sb-access-token=tok")).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/auth/login");

    // Public and auth-flow paths stay reachable during the outage.
    for path in ["/", "/auth/login"] {
        let response = get(&app, path, None).await;
        assert_eq!(response.status(), StatusCode::OK, "path {path}");
    }
    assert_eq!(resolver.call_count(), 3);
}

// ─────────────────────────────────────────────────────────────────────────────
// Authenticated flows
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn authenticated_protected_path_passes() {
    let app = app(
        Environment::Production,
        StubResolver::resolving(SessionResolution::authenticated("user-42")),
    );
    let response = get(&app, "/dashboard", Some("sb-access-token=tok")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn authenticated_auth_flow_redirects_to_dashboard() {
    let app = app(
        Environment::Production,
        StubResolver::resolving(SessionResolution::authenticated("user-42")),
    );
    for path in ["/auth/login", "/auth/signup"] {
        let response = get(&app, path, Some("sb-access-token=tok")).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "path {path}");
        assert_eq!(location(&response), "/dashboard", "path {path}");
    }
}

#[tokio::test]
async fn authenticated_root_redirects_to_dashboard() {
    let app = app(
        Environment::Production,
        StubResolver::resolving(SessionResolution::authenticated("user-42")),
    );
    let response = get(&app, "/", Some("sb-access-token=tok")).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn same_request_decides_the_same_twice() {
    let app = app(
        Environment::Production,
        StubResolver::resolving(SessionResolution::authenticated("user-42")),
    );
    let first = get(&app, "/auth/login", Some("sb-access-token=tok")).await;
    let second = get(&app, "/auth/login", Some("sb-access-token=tok")).await;
    assert_eq!(first.status(), second.status());
    assert_eq!(location(&first), location(&second));
}

// ─────────────────────────────────────────────────────────────────────────────
// Cookie refresh
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn refreshed_session_passes_and_carries_new_cookies() {
    // Expired access token in the request; the identity service silently
    // refreshes and answers with the fresh subject plus two cookies.
    let refreshed = SessionResolution::authenticated("user-42")
        .with_cookie(
            CookieRecord::new("sb-access-token", "fresh-access").with_options(CookieOptions {
                path: Some("/".into()),
                http_only: true,
                secure: true,
                ..Default::default()
            }),
        )
        .with_cookie(CookieRecord::new("sb-refresh-token", "fresh-refresh"));
    let app = app(Environment::Production, StubResolver::resolving(refreshed));

    let response = get(&app, "/dashboard", Some("sb-access-token=stale")).await;

    // The refreshed identity, not the stale cookie, drove the decision.
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookies: Vec<&str> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert_eq!(
        set_cookies,
        vec![
            "sb-access-token=fresh-access; Path=/; Secure; HttpOnly",
            "sb-refresh-token=fresh-refresh",
        ]
    );
}

#[tokio::test]
async fn refreshed_cookies_also_ride_on_redirects() {
    let refreshed = SessionResolution::authenticated("user-42")
        .with_cookie(CookieRecord::new("sb-access-token", "fresh-access"));
    let app = app(Environment::Production, StubResolver::resolving(refreshed));

    let response = get(&app, "/auth/login", Some("sb-access-token=stale")).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/dashboard");
    assert_eq!(
        response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap(),
        "sb-access-token=fresh-access"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Development bypass
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn bypass_cookie_skips_resolution_in_development() {
    let resolver = StubResolver::resolving(SessionResolution::anonymous());
    let app = app(Environment::Development, resolver.clone());

    let response = get(&app, "/settings", Some("aura-bypass=true")).await;
    assert_eq!(response.status(), StatusCode::OK);
    // The identity service was never consulted.
    assert_eq!(resolver.call_count(), 0);
}

#[tokio::test]
async fn bypass_cookie_has_no_effect_in_production() {
    let resolver = StubResolver::resolving(SessionResolution::anonymous());
    let app = app(Environment::Production, resolver.clone());

    let response = get(&app, "/settings", Some("aura-bypass=true")).await;
    // Normal resolution ran and the anonymous request was redirected.
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/auth/login");
    assert_eq!(resolver.call_count(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Asset exclusion + health
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn asset_requests_never_reach_the_gate() {
    let resolver = StubResolver::resolving(SessionResolution::anonymous());
    let app = app(Environment::Production, resolver.clone());

    for path in ["/_assets/app.js", "/favicon.ico", "/images/zen-garden.png"] {
        let response = get(&app, path, None).await;
        assert_eq!(response.status(), StatusCode::OK, "path {path}");
    }
    assert_eq!(resolver.call_count(), 0);
}

#[tokio::test]
async fn health_endpoint_is_not_gated() {
    let resolver = StubResolver::resolving(SessionResolution::anonymous());
    let app = app(Environment::Production, resolver.clone());

    let response = get(&app, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(resolver.call_count(), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Streak passthrough behind the gate
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn authenticated_streak_read_passes_through() {
    let app = app(
        Environment::Production,
        StubResolver::resolving(SessionResolution::authenticated("user-42")),
    );
    let response = get(&app, "/api/streak", Some("sb-access-token=tok")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let streak: StreakState = serde_json::from_slice(&body).unwrap();
    assert_eq!(streak, StreakState { current: 7 });
}

#[tokio::test]
async fn authenticated_streak_write_passes_through() {
    let app = app(
        Environment::Production,
        StubResolver::resolving(SessionResolution::authenticated("user-42")),
    );
    let request = Request::builder()
        .method("PUT")
        .uri("/api/streak")
        .header(header::COOKIE, "sb-access-token=tok")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{ "current": 8 }"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn anonymous_streak_read_is_redirected_by_the_gate() {
    let app = app(
        Environment::Production,
        StubResolver::resolving(SessionResolution::anonymous()),
    );
    let response = get(&app, "/api/streak", None).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/auth/login");
}
