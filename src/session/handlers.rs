//! REST API handlers for the login and checkout flow
//!
//! This module implements HTTP endpoints for the header auth button, checkout
//! requests, simulated login, order placement and free navigation.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::helpers::{
    resolve_session_id, session_cookie, session_response, SessionId, SessionResponse,
};
use super::machine::Session;
use super::models::{Credentials, Effects, NavigableView};
use crate::error::{AppError, AppResult};
use crate::state::SharedState;

/// Creates routes for session operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/session", get(get_session).post(open_session))
        .route("/session/auth", post(auth_button))
        .route("/session/checkout", post(checkout))
        .route("/session/login", post(login))
        .route("/session/orders", post(place_order))
        .route("/session/navigate", post(navigate))
        .route("/session/contact", post(contact))
        .route("/session/past-orders", post(past_orders))
}

/// Input for the navigate endpoint
#[derive(Debug, Deserialize)]
pub struct NavigateInput {
    /// Target view name, e.g. `order_review`
    pub view: String,
}

/// Applies `op` to the caller's session and answers with its effects and the
/// resulting snapshot.
///
/// Only ids this server issued are accepted; an unknown cookie value gets a
/// fresh id instead of a new entry under the client's choice of key.
pub(crate) fn run_on_session(
    state: &SharedState,
    headers: &HeaderMap,
    op: impl FnOnce(&mut Session) -> Effects,
) -> AppResult<Response> {
    let mut session_id = resolve_session_id(headers);
    if !session_id.is_new && !state.sessions.contains_key(&session_id.id) {
        tracing::debug!(session_id = %session_id.id, "unknown session cookie, issuing a new id");
        session_id = SessionId::issue();
    }
    let body = state.with_session(&session_id.id, |session| {
        let effects = op(session);
        SessionResponse {
            effects,
            session: session.snapshot(),
        }
    });
    session_response(&session_id, body)
}

/// Endpoint: GET /session
/// Read-only: a caller without a live session sees the initial state.
async fn get_session(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let session = session_cookie(&headers)
        .and_then(|id| state.session_snapshot(&id))
        .unwrap_or_else(|| Session::new().snapshot());

    Json(SessionResponse {
        effects: Effects::none(),
        session,
    })
    .into_response()
}

/// Endpoint: POST /session
/// Starts a session (or keeps the caller's live one) and returns its snapshot.
async fn open_session(State(state): State<SharedState>, headers: HeaderMap) -> AppResult<Response> {
    run_on_session(&state, &headers, |_| Effects::none())
}

/// Endpoint: POST /session/auth
/// Header "Sign In" / "Logout" button.
async fn auth_button(State(state): State<SharedState>, headers: HeaderMap) -> AppResult<Response> {
    run_on_session(&state, &headers, Session::auth_button)
}

/// Endpoint: POST /session/checkout
async fn checkout(State(state): State<SharedState>, headers: HeaderMap) -> AppResult<Response> {
    run_on_session(&state, &headers, Session::request_checkout)
}

/// Endpoint: POST /session/login
async fn login(
    State(state): State<SharedState>,
    headers: HeaderMap,
    credentials: Result<Json<Credentials>, JsonRejection>,
) -> AppResult<Response> {
    let Json(credentials) = credentials?;
    run_on_session(&state, &headers, |s| s.login(&credentials))
}

/// Endpoint: POST /session/orders
async fn place_order(State(state): State<SharedState>, headers: HeaderMap) -> AppResult<Response> {
    run_on_session(&state, &headers, Session::place_order)
}

/// Endpoint: POST /session/navigate
/// Only home, order review, contact and about can be opened directly.
async fn navigate(
    State(state): State<SharedState>,
    headers: HeaderMap,
    payload: Result<Json<NavigateInput>, JsonRejection>,
) -> AppResult<Response> {
    let Json(payload) = payload?;
    let view: NavigableView =
        serde_json::from_value(serde_json::Value::String(payload.view.clone())).map_err(|_| {
            AppError::BadRequest(format!("view '{}' cannot be opened directly", payload.view))
        })?;

    run_on_session(&state, &headers, |s| s.navigate(view))
}

/// Endpoint: POST /session/contact
async fn contact(State(state): State<SharedState>, headers: HeaderMap) -> AppResult<Response> {
    run_on_session(&state, &headers, |s| s.send_contact_message())
}

/// Endpoint: POST /session/past-orders
async fn past_orders(State(state): State<SharedState>, headers: HeaderMap) -> AppResult<Response> {
    run_on_session(&state, &headers, |s| s.view_past_orders())
}
