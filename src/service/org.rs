//! Job roles and departments. Administrators hold the wildcard statement;
//! collaborators see only the entities their profile actively holds, and the
//! activation transitions stay administrative even for held entities.

use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::error::AppResult;
use crate::identity::RequestContext;
use crate::model::{Department, DepartmentId, JobRole, ProfileId, RoleId};
use crate::policy::{Action, ResourceKind, TargetRef};
use crate::store::SharedRegistry;

use super::gate;

#[derive(Debug, Deserialize)]
pub struct NewJobRole {
    pub name: String,
    pub grade: String,
    pub salary: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct JobRoleUpdate {
    pub name: Option<String>,
    pub grade: Option<String>,
    pub salary: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct NewDepartment {
    pub name: String,
    pub director: ProfileId,
    #[serde(default)]
    pub deputy_director: Option<ProfileId>,
    #[serde(default)]
    pub parent: Option<DepartmentId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DepartmentUpdate {
    pub name: Option<String>,
    pub director: Option<ProfileId>,
    pub deputy_director: Option<ProfileId>,
    pub parent: Option<DepartmentId>,
}

// ----- job roles -----

fn fetch_role(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    id: RoleId,
    action: Action,
) -> AppResult<JobRole> {
    gate::require_eligible(ctx, ResourceKind::JobRole, action)?;
    let role = reg
        .get_job_role(id, gate::scope(ctx, ResourceKind::JobRole))
        .ok_or_else(gate::not_found)?;
    gate::require_object(ctx, ResourceKind::JobRole, action, &TargetRef::unowned())?;
    Ok(role)
}

pub fn list_roles(reg: &SharedRegistry, ctx: &RequestContext) -> AppResult<Vec<JobRole>> {
    gate::require_collection(ctx, ResourceKind::JobRole, Action::List)?;
    Ok(reg.list_job_roles(gate::scope(ctx, ResourceKind::JobRole)))
}

pub fn create_role(reg: &SharedRegistry, ctx: &RequestContext, input: NewJobRole) -> AppResult<JobRole> {
    gate::require_collection(ctx, ResourceKind::JobRole, Action::Create)?;
    let actor = ctx.actor()?;
    let now = Utc::now();
    let role = JobRole {
        id: RoleId::generate(),
        name: input.name,
        grade: input.grade,
        salary: input.salary,
        active: true,
        created_at: now,
        modified_at: now,
        modified_by: actor,
    };
    reg.insert_job_role(role.clone())?;
    info!(role = %role.name, grade = %role.grade, "job role created");
    Ok(role)
}

pub fn retrieve_role(reg: &SharedRegistry, ctx: &RequestContext, id: RoleId) -> AppResult<JobRole> {
    fetch_role(reg, ctx, id, Action::Retrieve)
}

pub fn update_role(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    id: RoleId,
    action: Action,
    input: JobRoleUpdate,
) -> AppResult<JobRole> {
    fetch_role(reg, ctx, id, action)?;
    let updated = reg.update_job_role(id, ctx.actor()?, |r| {
        if let Some(v) = input.name {
            r.name = v;
        }
        if let Some(v) = input.grade {
            r.grade = v;
        }
        if let Some(v) = input.salary {
            r.salary = v;
        }
    })?;
    Ok(updated)
}

pub fn set_role_active(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    id: RoleId,
    active: bool,
) -> AppResult<JobRole> {
    let action = if active { Action::Activate } else { Action::Deactivate };
    fetch_role(reg, ctx, id, action)?;
    let role = reg.set_job_role_active(id, active, ctx.actor()?)?;
    info!(role = %role.name, active, "job role activation changed");
    Ok(role)
}

// ----- departments -----

fn fetch_department(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    id: DepartmentId,
    action: Action,
) -> AppResult<Department> {
    gate::require_eligible(ctx, ResourceKind::Department, action)?;
    let dep = reg
        .get_department(id, gate::scope(ctx, ResourceKind::Department))
        .ok_or_else(gate::not_found)?;
    gate::require_object(ctx, ResourceKind::Department, action, &TargetRef::unowned())?;
    Ok(dep)
}

pub fn list_departments(reg: &SharedRegistry, ctx: &RequestContext) -> AppResult<Vec<Department>> {
    gate::require_collection(ctx, ResourceKind::Department, Action::List)?;
    Ok(reg.list_departments(gate::scope(ctx, ResourceKind::Department)))
}

pub fn create_department(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    input: NewDepartment,
) -> AppResult<Department> {
    gate::require_collection(ctx, ResourceKind::Department, Action::Create)?;
    let actor = ctx.actor()?;
    let now = Utc::now();
    let dep = Department {
        id: DepartmentId::generate(),
        name: input.name,
        director: input.director,
        deputy_director: input.deputy_director,
        parent: input.parent,
        active: true,
        created_at: now,
        modified_at: now,
        modified_by: actor,
    };
    reg.insert_department(dep.clone())?;
    info!(department = %dep.name, "department created");
    Ok(dep)
}

pub fn retrieve_department(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    id: DepartmentId,
) -> AppResult<Department> {
    fetch_department(reg, ctx, id, Action::Retrieve)
}

pub fn update_department(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    id: DepartmentId,
    action: Action,
    input: DepartmentUpdate,
) -> AppResult<Department> {
    fetch_department(reg, ctx, id, action)?;
    let updated = reg.update_department(id, ctx.actor()?, |d| {
        if let Some(v) = input.name {
            d.name = v;
        }
        if let Some(v) = input.director {
            d.director = v;
        }
        if let Some(v) = input.deputy_director {
            d.deputy_director = Some(v);
        }
        if let Some(v) = input.parent {
            d.parent = Some(v);
        }
    })?;
    Ok(updated)
}

pub fn set_department_active(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    id: DepartmentId,
    active: bool,
) -> AppResult<Department> {
    let action = if active { Action::Activate } else { Action::Deactivate };
    fetch_department(reg, ctx, id, action)?;
    let dep = reg.set_department_active(id, active, ctx.actor()?)?;
    info!(department = %dep.name, active, "department activation changed");
    Ok(dep)
}
