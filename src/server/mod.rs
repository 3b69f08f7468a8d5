//!
//! staffbase HTTP server
//! ---------------------
//! Axum-based REST surface. Each handler normalizes its request into the
//! policy core's vocabulary (principal, action, resource kind, optional
//! target), delegates to the matching service, and maps the unified error
//! enum onto status codes. Sessions ride an HttpOnly cookie holding the
//! opaque token issued at login.

use std::net::SocketAddr;

use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use tracing::info;

use crate::error::AppError;
use crate::identity::{self, RequestContext, SessionManager};
use crate::store::{seed, SharedRegistry};

mod accounts;
mod contacts;
mod geo;
mod org;
mod profiles;
mod session;

const SESSION_COOKIE: &str = "staffbase_session";

/// Shared server state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: SharedRegistry,
    pub sessions: SessionManager,
}

impl AppState {
    /// Resolve the request's principal and profile from the session cookie.
    fn context(&self, headers: &HeaderMap) -> RequestContext {
        let token = parse_cookie(headers, SESSION_COOKIE);
        identity::resolve_context(&self.registry, &self.sessions, token.as_deref())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(serde_json::json!({ "error": self }))).into_response()
    }
}

fn parse_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookie = headers.get("cookie").or_else(|| headers.get("Cookie"))?;
    let s = cookie.to_str().ok()?;
    for part in s.split(';') {
        let p = part.trim();
        if let Some(eq) = p.find('=') {
            let (k, v) = p.split_at(eq);
            if k == name {
                return Some(v[1..].to_string());
            }
        }
    }
    None
}

fn set_session_cookie(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!(
        "{}={}; HttpOnly; Secure; SameSite=Strict; Path=/",
        SESSION_COOKIE, token
    ))
    .unwrap_or_else(|_| HeaderValue::from_static(""))
}

fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_str(&format!(
        "{}=deleted; Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly; Secure; SameSite=Strict; Path=/",
        SESSION_COOKIE
    ))
    .unwrap_or_else(|_| HeaderValue::from_static(""))
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(session::login))
        .route("/logout", post(session::logout))
        .route("/accounts", get(accounts::list).post(accounts::create))
        .route(
            "/accounts/{id}",
            get(accounts::retrieve).put(accounts::update).patch(accounts::partial_update),
        )
        .route("/accounts/{id}/activate", patch(accounts::activate))
        .route("/accounts/{id}/deactivate", patch(accounts::deactivate))
        .route("/accounts/{id}/change-password", patch(accounts::change_password))
        .route("/accounts/{id}/change-email", patch(accounts::change_email))
        .route("/accounts/{id}/change-group", patch(accounts::change_group))
        .route(
            "/accounts/{id}/change-password-after-reset",
            patch(accounts::change_password_after_reset),
        )
        .route("/groups", get(accounts::list_groups))
        .route(
            "/password-reset-tokens",
            get(accounts::list_reset_tokens).post(accounts::create_reset_token),
        )
        .route("/profiles", get(profiles::list).post(profiles::create))
        .route(
            "/profiles/{id}",
            get(profiles::retrieve).put(profiles::update).patch(profiles::partial_update),
        )
        .route("/addresses", get(contacts::list_addresses).post(contacts::create_address))
        .route(
            "/addresses/{id}",
            get(contacts::retrieve_address).delete(contacts::destroy_address),
        )
        .route("/phones", get(contacts::list_phones).post(contacts::create_phone))
        .route("/phones/{id}", get(contacts::retrieve_phone).delete(contacts::destroy_phone))
        .route(
            "/extra-emails",
            get(contacts::list_extra_emails).post(contacts::create_extra_email),
        )
        .route(
            "/extra-emails/{id}",
            get(contacts::retrieve_extra_email).delete(contacts::destroy_extra_email),
        )
        .route("/roles", get(org::list_roles).post(org::create_role))
        .route(
            "/roles/{id}",
            get(org::retrieve_role).put(org::update_role).patch(org::partial_update_role),
        )
        .route("/roles/{id}/activate", patch(org::activate_role))
        .route("/roles/{id}/deactivate", patch(org::deactivate_role))
        .route("/departments", get(org::list_departments).post(org::create_department))
        .route(
            "/departments/{id}",
            get(org::retrieve_department)
                .put(org::update_department)
                .patch(org::partial_update_department),
        )
        .route("/departments/{id}/activate", patch(org::activate_department))
        .route("/departments/{id}/deactivate", patch(org::deactivate_department))
        .route("/states", get(geo::list_states))
        .route("/states/{id}", get(geo::retrieve_state))
        .route("/municipalities", get(geo::list_municipalities))
        .route("/municipalities/{id}", get(geo::retrieve_municipality))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "staffbase ok" }))
        .nest("/api/v1", api_router())
        .with_state(state)
}

/// Start the HTTP server: provision the default administrator and reference
/// data, then serve until shutdown.
pub async fn run_with_port(port: u16) -> anyhow::Result<()> {
    let registry = SharedRegistry::new();
    seed::ensure_default_admin(&registry)?;
    seed::seed_reference_data(&registry)?;
    let state = AppState { registry, sessions: SessionManager::default() };
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("staffbase listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub(crate) type ApiResult<T> = Result<Json<T>, AppError>;
