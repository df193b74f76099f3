//! Session-cookie gate for the admin API.
//!
//! Authentication is a single shared credential: a successful login sets the
//! `admin_session` cookie and every admin route checks it here. There are no
//! per-user sessions to track server-side.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

pub const SESSION_COOKIE: &str = "admin_session";
pub const SESSION_VALUE: &str = "authenticated";

/// Whether the jar carries a valid admin session cookie.
pub fn has_session(jar: &CookieJar) -> bool {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value() == SESSION_VALUE)
        .unwrap_or(false)
}

/// Middleware that rejects requests without an admin session.
pub async fn require_session(request: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let jar = CookieJar::from_headers(request.headers());
    if has_session(&jar) {
        Ok(next.run(request).await)
    } else {
        tracing::warn!("Rejected unauthenticated admin request to {}", request.uri().path());
        Err(StatusCode::UNAUTHORIZED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;
    use axum::http::HeaderMap;

    fn jar_with_cookie(value: &str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, value.parse().unwrap());
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn accepts_valid_session_cookie() {
        let jar = jar_with_cookie("admin_session=authenticated");
        assert!(has_session(&jar));
    }

    #[test]
    fn rejects_wrong_cookie_value() {
        let jar = jar_with_cookie("admin_session=forged");
        assert!(!has_session(&jar));
    }

    #[test]
    fn rejects_missing_cookie() {
        let jar = CookieJar::from_headers(&HeaderMap::new());
        assert!(!has_session(&jar));
    }
}
