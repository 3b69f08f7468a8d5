//! Account, group and password-reset-token handlers.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::model::{AccountId, AccountView, PasswordResetToken};
use crate::policy::Action;
use crate::service::{accounts, groups, reset};

use super::{ApiResult, AppState};

pub async fn list(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Vec<AccountView>> {
    let ctx = state.context(&headers);
    Ok(Json(accounts::list(&state.registry, &ctx)?))
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<accounts::NewAccount>,
) -> ApiResult<AccountView> {
    let ctx = state.context(&headers);
    Ok(Json(accounts::create(&state.registry, &ctx, payload)?))
}

pub async fn retrieve(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<AccountId>,
) -> ApiResult<AccountView> {
    let ctx = state.context(&headers);
    Ok(Json(accounts::retrieve(&state.registry, &ctx, id)?))
}

pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<AccountId>,
    Json(payload): Json<accounts::EmailChange>,
) -> ApiResult<AccountView> {
    let ctx = state.context(&headers);
    Ok(Json(accounts::update(&state.registry, &ctx, id, Action::Update, payload)?))
}

pub async fn partial_update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<AccountId>,
    Json(payload): Json<accounts::EmailChange>,
) -> ApiResult<AccountView> {
    let ctx = state.context(&headers);
    Ok(Json(accounts::update(&state.registry, &ctx, id, Action::PartialUpdate, payload)?))
}

pub async fn activate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<AccountId>,
) -> ApiResult<AccountView> {
    let ctx = state.context(&headers);
    Ok(Json(accounts::set_active(&state.registry, &ctx, id, true)?))
}

pub async fn deactivate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<AccountId>,
) -> ApiResult<AccountView> {
    let ctx = state.context(&headers);
    let view = accounts::set_active(&state.registry, &ctx, id, false)?;
    // No issued token may outlive a deactivated account.
    state.sessions.revoke_account(id);
    Ok(Json(view))
}

pub async fn change_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<AccountId>,
    Json(payload): Json<accounts::PasswordChange>,
) -> ApiResult<serde_json::Value> {
    let ctx = state.context(&headers);
    accounts::change_password(&state.registry, &ctx, id, payload)?;
    Ok(Json(json!({ "status": "password changed" })))
}

pub async fn change_email(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<AccountId>,
    Json(payload): Json<accounts::EmailChange>,
) -> ApiResult<AccountView> {
    let ctx = state.context(&headers);
    Ok(Json(accounts::change_email(&state.registry, &ctx, id, payload)?))
}

pub async fn change_group(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<AccountId>,
    Json(payload): Json<accounts::GroupChange>,
) -> ApiResult<AccountView> {
    let ctx = state.context(&headers);
    Ok(Json(accounts::change_group(&state.registry, &ctx, id, payload)?))
}

#[derive(Debug, Deserialize)]
pub struct ResetTokenQuery {
    token: String,
}

pub async fn change_password_after_reset(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<AccountId>,
    Query(query): Query<ResetTokenQuery>,
    Json(payload): Json<accounts::PasswordChange>,
) -> ApiResult<serde_json::Value> {
    let ctx = state.context(&headers);
    accounts::change_password_after_reset(&state.registry, &ctx, id, &query.token, payload)?;
    Ok(Json(json!({ "status": "password changed" })))
}

pub async fn list_groups(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<groups::GroupView>> {
    let ctx = state.context(&headers);
    Ok(Json(groups::list(&state.registry, &ctx)?))
}

pub async fn list_reset_tokens(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<PasswordResetToken>> {
    let ctx = state.context(&headers);
    Ok(Json(reset::list(&state.registry, &ctx)?))
}

pub async fn create_reset_token(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<reset::NewResetRequest>,
) -> ApiResult<PasswordResetToken> {
    let ctx = state.context(&headers);
    Ok(Json(reset::create(&state.registry, &ctx, payload)?))
}
