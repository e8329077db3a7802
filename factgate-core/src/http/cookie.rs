//! Session cookie handling for the `/me` endpoint
//!
//! Parity with the original service: a session cookie is issued to clients
//! that do not carry one, but nothing is stored server-side.

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Cookie configuration
#[derive(Debug, Clone)]
pub struct CookieConfig {
    /// Cookie name
    pub name: String,

    /// Cookie path
    pub path: String,

    /// Secure flag (HTTPS only)
    pub secure: bool,

    /// HttpOnly flag (no JavaScript access)
    pub http_only: bool,

    /// Max age in seconds
    pub max_age: i64,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "factgate_session".to_string(),
            path: "/".to_string(),
            secure: false, // the service itself listens on plain HTTP
            http_only: true,
            max_age: 86400,
        }
    }
}

/// Session cookie builder
#[derive(Debug, Clone)]
pub struct SessionCookie {
    config: CookieConfig,
}

impl SessionCookie {
    pub fn new(config: CookieConfig) -> Self {
        Self { config }
    }

    /// Generate a fresh random session id.
    pub fn new_session_id(&self) -> String {
        rand::thread_rng().sample_iter(&Alphanumeric).take(32).map(char::from).collect()
    }

    /// Build a Set-Cookie header value
    pub fn build_set_cookie(&self, session_id: &str) -> String {
        let mut parts = vec![format!("{}={}", self.config.name, session_id)];

        parts.push(format!("Path={}", self.config.path));
        parts.push(format!("Max-Age={}", self.config.max_age));

        if self.config.secure {
            parts.push("Secure".to_string());
        }

        if self.config.http_only {
            parts.push("HttpOnly".to_string());
        }

        parts.push("SameSite=Lax".to_string());

        parts.join("; ")
    }

    /// Extract session ID from a Cookie header
    pub fn extract_from_header(&self, cookie_header: &str) -> Option<String> {
        cookie_header.split(';').find_map(|cookie| {
            let cookie = cookie.trim();
            cookie.strip_prefix(&format!("{}=", self.config.name)).map(|value| value.to_string())
        })
    }
}

impl Default for SessionCookie {
    fn default() -> Self {
        Self::new(CookieConfig::default())
    }
}
