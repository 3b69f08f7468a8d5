//! Job-role and department handlers, including the activation transitions.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use crate::model::{Department, DepartmentId, JobRole, RoleId};
use crate::policy::Action;
use crate::service::org;

use super::{ApiResult, AppState};

pub async fn list_roles(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Vec<JobRole>> {
    let ctx = state.context(&headers);
    Ok(Json(org::list_roles(&state.registry, &ctx)?))
}

pub async fn create_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<org::NewJobRole>,
) -> ApiResult<JobRole> {
    let ctx = state.context(&headers);
    Ok(Json(org::create_role(&state.registry, &ctx, payload)?))
}

pub async fn retrieve_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<RoleId>,
) -> ApiResult<JobRole> {
    let ctx = state.context(&headers);
    Ok(Json(org::retrieve_role(&state.registry, &ctx, id)?))
}

pub async fn update_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<RoleId>,
    Json(payload): Json<org::JobRoleUpdate>,
) -> ApiResult<JobRole> {
    let ctx = state.context(&headers);
    Ok(Json(org::update_role(&state.registry, &ctx, id, Action::Update, payload)?))
}

pub async fn partial_update_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<RoleId>,
    Json(payload): Json<org::JobRoleUpdate>,
) -> ApiResult<JobRole> {
    let ctx = state.context(&headers);
    Ok(Json(org::update_role(&state.registry, &ctx, id, Action::PartialUpdate, payload)?))
}

pub async fn activate_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<RoleId>,
) -> ApiResult<JobRole> {
    let ctx = state.context(&headers);
    Ok(Json(org::set_role_active(&state.registry, &ctx, id, true)?))
}

pub async fn deactivate_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<RoleId>,
) -> ApiResult<JobRole> {
    let ctx = state.context(&headers);
    Ok(Json(org::set_role_active(&state.registry, &ctx, id, false)?))
}

pub async fn list_departments(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<Department>> {
    let ctx = state.context(&headers);
    Ok(Json(org::list_departments(&state.registry, &ctx)?))
}

pub async fn create_department(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<org::NewDepartment>,
) -> ApiResult<Department> {
    let ctx = state.context(&headers);
    Ok(Json(org::create_department(&state.registry, &ctx, payload)?))
}

pub async fn retrieve_department(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<DepartmentId>,
) -> ApiResult<Department> {
    let ctx = state.context(&headers);
    Ok(Json(org::retrieve_department(&state.registry, &ctx, id)?))
}

pub async fn update_department(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<DepartmentId>,
    Json(payload): Json<org::DepartmentUpdate>,
) -> ApiResult<Department> {
    let ctx = state.context(&headers);
    Ok(Json(org::update_department(&state.registry, &ctx, id, Action::Update, payload)?))
}

pub async fn partial_update_department(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<DepartmentId>,
    Json(payload): Json<org::DepartmentUpdate>,
) -> ApiResult<Department> {
    let ctx = state.context(&headers);
    Ok(Json(org::update_department(&state.registry, &ctx, id, Action::PartialUpdate, payload)?))
}

pub async fn activate_department(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<DepartmentId>,
) -> ApiResult<Department> {
    let ctx = state.context(&headers);
    Ok(Json(org::set_department_active(&state.registry, &ctx, id, true)?))
}

pub async fn deactivate_department(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<DepartmentId>,
) -> ApiResult<Department> {
    let ctx = state.context(&headers);
    Ok(Json(org::set_department_active(&state.registry, &ctx, id, false)?))
}
