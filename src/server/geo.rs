//! Public reference-data handlers.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use crate::model::{FederalState, Municipality, MunicipalityId, StateId};
use crate::service::geo;

use super::{ApiResult, AppState};

pub async fn list_states(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<FederalState>> {
    let ctx = state.context(&headers);
    Ok(Json(geo::list_states(&state.registry, &ctx)?))
}

pub async fn retrieve_state(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<StateId>,
) -> ApiResult<FederalState> {
    let ctx = state.context(&headers);
    Ok(Json(geo::retrieve_state(&state.registry, &ctx, id)?))
}

pub async fn list_municipalities(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<Municipality>> {
    let ctx = state.context(&headers);
    Ok(Json(geo::list_municipalities(&state.registry, &ctx)?))
}

pub async fn retrieve_municipality(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<MunicipalityId>,
) -> ApiResult<Municipality> {
    let ctx = state.context(&headers);
    Ok(Json(geo::retrieve_municipality(&state.registry, &ctx, id)?))
}
