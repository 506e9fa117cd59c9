//! Session HTTP Helpers
//!
//! Cookie-based session resolution and the common response envelope of every
//! session-mutating endpoint.

use axum::{
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use super::models::{Effects, SessionSnapshot};
use crate::error::{AppError, AppResult};

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "storefront_session";

/// Body returned by every session endpoint.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// What the operation produced
    pub effects: Effects,

    /// State after the operation
    pub session: SessionSnapshot,
}

/// A request's session id and whether it was just issued.
#[derive(Debug, Clone)]
pub struct SessionId {
    pub id: String,
    pub is_new: bool,
}

impl SessionId {
    /// A fresh server-issued id.
    pub fn issue() -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            is_new: true,
        }
    }
}

/// Value of the session cookie, if the request carries one.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// Reads the session id from the `Cookie` header, or creates a new one.
pub fn resolve_session_id(headers: &HeaderMap) -> SessionId {
    match session_cookie(headers) {
        Some(id) => SessionId { id, is_new: false },
        None => SessionId::issue(),
    }
}

/// Serializes `body`, attaching `Set-Cookie` when the session is new.
pub fn session_response(session_id: &SessionId, body: impl Serialize) -> AppResult<Response> {
    let mut response = Json(body).into_response();

    if session_id.is_new {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, session_id.id
        );
        let value = HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid session cookie: {e}")))?;
        response.headers_mut().insert(header::SET_COOKIE, value);
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_existing_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; storefront_session=abc123"),
        );

        let sid = resolve_session_id(&headers);
        assert_eq!(sid.id, "abc123");
        assert!(!sid.is_new);
    }

    #[test]
    fn test_missing_cookie_issues_new_id() {
        let headers = HeaderMap::new();

        let a = resolve_session_id(&headers);
        let b = resolve_session_id(&headers);
        assert!(a.is_new);
        assert_eq!(a.id.len(), 32);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_new_session_sets_cookie() {
        let sid = SessionId {
            id: "xyz".into(),
            is_new: true,
        };
        let response = session_response(&sid, serde_json::json!({})).expect("response");

        let cookie = response.headers().get(header::SET_COOKIE).expect("cookie");
        assert!(cookie.to_str().unwrap().starts_with("storefront_session=xyz;"));
    }
}
