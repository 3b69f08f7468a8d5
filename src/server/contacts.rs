//! Contact-record handlers: addresses, phones and extra e-mails.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde_json::json;

use crate::model::{Address, ContactId, ExtraEmail, Phone};
use crate::service::contacts;

use super::{ApiResult, AppState};

pub async fn list_addresses(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<Address>> {
    let ctx = state.context(&headers);
    Ok(Json(contacts::list_addresses(&state.registry, &ctx)?))
}

pub async fn create_address(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<contacts::NewAddress>,
) -> ApiResult<Address> {
    let ctx = state.context(&headers);
    Ok(Json(contacts::create_address(&state.registry, &ctx, payload)?))
}

pub async fn retrieve_address(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<ContactId>,
) -> ApiResult<Address> {
    let ctx = state.context(&headers);
    Ok(Json(contacts::retrieve_address(&state.registry, &ctx, id)?))
}

pub async fn destroy_address(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<ContactId>,
) -> ApiResult<serde_json::Value> {
    let ctx = state.context(&headers);
    contacts::destroy_address(&state.registry, &ctx, id)?;
    Ok(Json(json!({ "status": "deleted" })))
}

pub async fn list_phones(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Vec<Phone>> {
    let ctx = state.context(&headers);
    Ok(Json(contacts::list_phones(&state.registry, &ctx)?))
}

pub async fn create_phone(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<contacts::NewPhone>,
) -> ApiResult<Phone> {
    let ctx = state.context(&headers);
    Ok(Json(contacts::create_phone(&state.registry, &ctx, payload)?))
}

pub async fn retrieve_phone(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<ContactId>,
) -> ApiResult<Phone> {
    let ctx = state.context(&headers);
    Ok(Json(contacts::retrieve_phone(&state.registry, &ctx, id)?))
}

pub async fn destroy_phone(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<ContactId>,
) -> ApiResult<serde_json::Value> {
    let ctx = state.context(&headers);
    contacts::destroy_phone(&state.registry, &ctx, id)?;
    Ok(Json(json!({ "status": "deleted" })))
}

pub async fn list_extra_emails(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<ExtraEmail>> {
    let ctx = state.context(&headers);
    Ok(Json(contacts::list_extra_emails(&state.registry, &ctx)?))
}

pub async fn create_extra_email(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<contacts::NewExtraEmail>,
) -> ApiResult<ExtraEmail> {
    let ctx = state.context(&headers);
    Ok(Json(contacts::create_extra_email(&state.registry, &ctx, payload)?))
}

pub async fn retrieve_extra_email(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<ContactId>,
) -> ApiResult<ExtraEmail> {
    let ctx = state.context(&headers);
    Ok(Json(contacts::retrieve_extra_email(&state.registry, &ctx, id)?))
}

pub async fn destroy_extra_email(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<ContactId>,
) -> ApiResult<serde_json::Value> {
    let ctx = state.context(&headers);
    contacts::destroy_extra_email(&state.registry, &ctx, id)?;
    Ok(Json(json!({ "status": "deleted" })))
}
