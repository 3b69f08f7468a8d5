//! Login and logout. Login verifies credentials and sets the session
//! cookie; logout revokes the token and clears it.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::json;

use crate::error::AppError;
use crate::identity::{self, LoginRequest};

use super::{clear_session_cookie, parse_cookie, set_session_cookie, AppState, SESSION_COOKIE};

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<serde_json::Value>), AppError> {
    let resp = identity::login(&state.registry, &state.sessions, &payload)?;
    let mut headers = HeaderMap::new();
    headers.insert("Set-Cookie", set_session_cookie(&resp.session.token));
    Ok((headers, Json(json!({ "status": "ok" }))))
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> (HeaderMap, Json<serde_json::Value>) {
    if let Some(token) = parse_cookie(&headers, SESSION_COOKIE) {
        state.sessions.logout(&token);
    }
    let mut h = HeaderMap::new();
    h.insert("Set-Cookie", clear_session_cookie());
    (h, Json(json!({ "status": "ok" })))
}
