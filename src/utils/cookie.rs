//! Session cookie helpers

use axum::http::{HeaderMap, HeaderValue, header};

/// Session cookie attributes
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub name: &'static str,
    pub path: &'static str,
    pub secure: bool,
    pub max_age_secs: i64,
}

impl SessionCookie {
    /// Build the Set-Cookie value carrying `token`
    pub fn build(&self, token: &str) -> String {
        let mut cookie = format!(
            "{}={}; HttpOnly; SameSite=Lax; Path={}; Max-Age={}",
            self.name, token, self.path, self.max_age_secs
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    /// Build the Set-Cookie value that deletes the cookie
    pub fn build_removal(&self) -> String {
        format!("{}=; HttpOnly; SameSite=Lax; Path={}; Max-Age=0", self.name, self.path)
    }

    pub fn header_value(&self, token: &str) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.build(token)).ok()
    }

    pub fn removal_header_value(&self) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.build_removal()).ok()
    }
}

/// Extract a cookie value from request headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}

/// Extract a bearer token from the Authorization header
pub fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie() -> SessionCookie {
        SessionCookie {
            name: "admin_auth_token",
            path: "/",
            secure: false,
            max_age_secs: 3600,
        }
    }

    #[test]
    fn test_build_cookie() {
        let value = cookie().build("abc.def");
        assert!(value.starts_with("admin_auth_token=abc.def"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("Path=/"));
        assert!(value.contains("Max-Age=3600"));
        assert!(!value.contains("Secure"));

        let secure = SessionCookie { secure: true, ..cookie() }.build("abc");
        assert!(secure.ends_with("; Secure"));
    }

    #[test]
    fn test_build_removal() {
        let value = cookie().build_removal();
        assert!(value.starts_with("admin_auth_token=;"));
        assert!(value.contains("Max-Age=0"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; admin_auth_token=abc123; other=xyz"),
        );

        assert_eq!(extract_cookie(&headers, "admin_auth_token"), Some("abc123".to_string()));
        assert_eq!(extract_cookie(&headers, "theme"), Some("dark".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_empty_cookie_is_none() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("admin_auth_token="));
        assert_eq!(extract_cookie(&headers, "admin_auth_token"), None);
    }

    #[test]
    fn test_extract_bearer() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok"));
        assert_eq!(extract_bearer(&headers), Some("tok".to_string()));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(extract_bearer(&headers), None);
    }
}
