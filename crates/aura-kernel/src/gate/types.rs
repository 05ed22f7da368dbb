//! Core data types for the session-gate kernel contract.
//!
//! These types are shared between the gate decision logic
//! ([`decide`](super::decision::decide)) and the identity-resolution seam
//! ([`SessionResolver`](super::resolver::SessionResolver)) and carry no
//! runtime dependencies beyond `serde`, `chrono`, and `std`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Subject
// ─────────────────────────────────────────────────────────────────────────────

/// Opaque user identifier recovered from a valid session.
///
/// The gateway never inspects the identifier — it only checks presence and
/// threads it through to downstream handlers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject(String);

impl Subject {
    /// Wrap an identifier issued by the identity service.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cookies
// ─────────────────────────────────────────────────────────────────────────────

/// `SameSite` attribute of a cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    /// Attribute value as it appears in a `Set-Cookie` header.
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Attributes attached to a cookie by the identity service.
///
/// Every attribute is carried through to the outgoing `Set-Cookie` header
/// exactly as supplied — the gateway never fills in, drops, or rewrites an
/// option (a cookie the identity service marked `http_only` must stay so).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Lifetime in seconds (`Max-Age`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age_secs: Option<i64>,
    /// Absolute expiry (`Expires`), RFC 7231 formatted on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default)]
    pub secure: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_site: Option<SameSite>,
}

/// One cookie the identity service wants persisted on the browser.
///
/// An ordered list of these forms the "cookie set" of a session refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub options: CookieOptions,
}

impl CookieRecord {
    /// Construct a bare cookie with default (empty) options.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            options: CookieOptions::default(),
        }
    }

    /// Builder helper: replace the options wholesale.
    pub fn with_options(mut self, options: CookieOptions) -> Self {
        self.options = options;
        self
    }

    /// Render this cookie as a `Set-Cookie` header value.
    ///
    /// Attribute order follows the common `Domain`, `Path`, `Max-Age`,
    /// `Expires`, `SameSite`, `Secure`, `HttpOnly` convention.  Only
    /// attributes that are actually set are emitted.
    pub fn to_set_cookie(&self) -> String {
        let mut out = format!("{}={}", self.name, self.value);
        let opts = &self.options;
        if let Some(domain) = &opts.domain {
            out.push_str("; Domain=");
            out.push_str(domain);
        }
        if let Some(path) = &opts.path {
            out.push_str("; Path=");
            out.push_str(path);
        }
        if let Some(max_age) = opts.max_age_secs {
            out.push_str(&format!("; Max-Age={max_age}"));
        }
        if let Some(expires) = &opts.expires {
            // RFC 7231 IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
            out.push_str(&format!(
                "; Expires={}",
                expires.format("%a, %d %b %Y %H:%M:%S GMT")
            ));
        }
        if let Some(same_site) = opts.same_site {
            out.push_str("; SameSite=");
            out.push_str(same_site.as_str());
        }
        if opts.secure {
            out.push_str("; Secure");
        }
        if opts.http_only {
            out.push_str("; HttpOnly");
        }
        out
    }
}

/// Extract a named cookie's value from a raw `Cookie` request header.
///
/// Returns `None` when the header does not carry the cookie.  Malformed
/// pairs (no `=`) are skipped rather than rejected — a broken cookie header
/// is treated the same as an absent one.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k.trim() == name).then(|| v.trim())
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// SessionResolution
// ─────────────────────────────────────────────────────────────────────────────

/// The identity service's answer for one request.
///
/// `subject` is the *current* identity after any silent token refresh the
/// service performed; `cookies_to_persist` is every cookie it wants written
/// to the browser (including ones the inbound request already carried, when
/// the refresh re-issued them).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResolution {
    pub subject: Option<Subject>,
    #[serde(default)]
    pub cookies_to_persist: Vec<CookieRecord>,
}

impl SessionResolution {
    /// An anonymous resolution: no identity, nothing to persist.
    ///
    /// This is also what a failed resolution degrades to (fail-closed).
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A resolution for the given subject with no cookie refresh.
    pub fn authenticated(subject: impl Into<String>) -> Self {
        Self {
            subject: Some(Subject::new(subject)),
            cookies_to_persist: Vec::new(),
        }
    }

    /// Builder helper: append a cookie to persist.
    pub fn with_cookie(mut self, cookie: CookieRecord) -> Self {
        self.cookies_to_persist.push(cookie);
        self
    }
}
