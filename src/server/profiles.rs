//! Profile handlers.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use crate::model::{Profile, ProfileId};
use crate::policy::Action;
use crate::service::profiles;

use super::{ApiResult, AppState};

pub async fn list(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Vec<Profile>> {
    let ctx = state.context(&headers);
    Ok(Json(profiles::list(&state.registry, &ctx)?))
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<profiles::NewProfile>,
) -> ApiResult<Profile> {
    let ctx = state.context(&headers);
    Ok(Json(profiles::create(&state.registry, &ctx, payload)?))
}

pub async fn retrieve(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<ProfileId>,
) -> ApiResult<Profile> {
    let ctx = state.context(&headers);
    Ok(Json(profiles::retrieve(&state.registry, &ctx, id)?))
}

pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<ProfileId>,
    Json(payload): Json<profiles::ProfileUpdate>,
) -> ApiResult<Profile> {
    let ctx = state.context(&headers);
    Ok(Json(profiles::update(&state.registry, &ctx, id, Action::Update, payload)?))
}

pub async fn partial_update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<ProfileId>,
    Json(payload): Json<profiles::ProfileUpdate>,
) -> ApiResult<Profile> {
    let ctx = state.context(&headers);
    Ok(Json(profiles::update(&state.registry, &ctx, id, Action::PartialUpdate, payload)?))
}
