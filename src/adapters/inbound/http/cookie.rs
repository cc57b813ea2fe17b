use axum::http::header::{HeaderMap, COOKIE};

/// Name and lifetime of the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieSettings {
    pub name: String,
    pub max_age_secs: i64,
}

impl CookieSettings {
    /// `Set-Cookie` value carrying a session id.
    pub fn session_cookie(&self, session_id: &str) -> String {
        format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            self.name, session_id, self.max_age_secs
        )
    }

    /// `Set-Cookie` value that makes the browser drop the cookie.
    pub fn expired_cookie(&self) -> String {
        format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", self.name)
    }

    /// Session id from the request's `Cookie` headers, if present.
    pub fn session_id_from_headers(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.name)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }
}
