//! Profile operations. Administrators manage the whole collection;
//! collaborators reach only their own profile, enforced by the ownership
//! condition and the matching queryset scope.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::identity::RequestContext;
use crate::model::{valid_cpf, AccountId, DepartmentId, MunicipalityId, Profile, ProfileId, RoleId};
use crate::policy::{Action, ResourceKind, TargetRef};
use crate::store::SharedRegistry;

use super::gate;

const KIND: ResourceKind = ResourceKind::Profile;

#[derive(Debug, Deserialize)]
pub struct NewProfile {
    pub account: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub contract_id: String,
    #[serde(default)]
    pub hired_on: Option<NaiveDate>,
    #[serde(default)]
    pub terminated_on: Option<NaiveDate>,
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub bank_branch: String,
    #[serde(default)]
    pub bank_account: String,
    #[serde(default)]
    pub roles: Vec<RoleId>,
    #[serde(default)]
    pub departments: Vec<DepartmentId>,
    #[serde(default)]
    pub workplace_municipalities: Vec<MunicipalityId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub cpf: Option<String>,
    pub contract_id: Option<String>,
    pub hired_on: Option<NaiveDate>,
    pub terminated_on: Option<NaiveDate>,
    pub bank_name: Option<String>,
    pub bank_branch: Option<String>,
    pub bank_account: Option<String>,
    pub active: Option<bool>,
    pub roles: Option<Vec<RoleId>>,
    pub departments: Option<Vec<DepartmentId>>,
    pub workplace_municipalities: Option<Vec<MunicipalityId>>,
}

fn check_names(first: &str, last: &str) -> AppResult<()> {
    if first.trim().is_empty() || last.trim().is_empty() {
        return Err(AppError::user("invalid_name", "first and last name must not be empty"));
    }
    Ok(())
}

fn check_cpf(cpf: &str) -> AppResult<()> {
    if valid_cpf(cpf) {
        Ok(())
    } else {
        Err(AppError::user("invalid_cpf", "CPF must use the 000.000.000-00 format"))
    }
}

fn fetch_for(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    id: ProfileId,
    action: Action,
) -> AppResult<Profile> {
    gate::require_eligible(ctx, KIND, action)?;
    let profile = reg.get_profile(id, gate::scope(ctx, KIND)).ok_or_else(gate::not_found)?;
    gate::require_object(ctx, KIND, action, &TargetRef::owned_by(profile.account))?;
    Ok(profile)
}

pub fn list(reg: &SharedRegistry, ctx: &RequestContext) -> AppResult<Vec<Profile>> {
    gate::require_collection(ctx, KIND, Action::List)?;
    Ok(reg.list_profiles(gate::scope(ctx, KIND)))
}

pub fn create(reg: &SharedRegistry, ctx: &RequestContext, input: NewProfile) -> AppResult<Profile> {
    gate::require_collection(ctx, KIND, Action::Create)?;
    check_names(&input.first_name, &input.last_name)?;
    check_cpf(&input.cpf)?;
    let actor = ctx.actor()?;
    let now = Utc::now();
    let profile = Profile {
        id: ProfileId::generate(),
        account: input.account,
        first_name: input.first_name,
        last_name: input.last_name,
        cpf: input.cpf,
        contract_id: input.contract_id,
        hired_on: input.hired_on,
        terminated_on: input.terminated_on,
        bank_name: input.bank_name,
        bank_branch: input.bank_branch,
        bank_account: input.bank_account,
        active: true,
        roles: input.roles,
        departments: input.departments,
        workplace_municipalities: input.workplace_municipalities,
        created_at: now,
        modified_at: now,
        modified_by: actor,
    };
    reg.insert_profile(profile.clone())?;
    info!(profile = ?profile.id, "profile created");
    Ok(profile)
}

pub fn retrieve(reg: &SharedRegistry, ctx: &RequestContext, id: ProfileId) -> AppResult<Profile> {
    fetch_for(reg, ctx, id, Action::Retrieve)
}

pub fn update(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    id: ProfileId,
    action: Action,
    input: ProfileUpdate,
) -> AppResult<Profile> {
    fetch_for(reg, ctx, id, action)?;
    if let (Some(first), Some(last)) = (&input.first_name, &input.last_name) {
        check_names(first, last)?;
    }
    if let Some(cpf) = &input.cpf {
        check_cpf(cpf)?;
    }
    let updated = reg.update_profile(id, ctx.actor()?, |p| {
        if let Some(v) = input.first_name {
            p.first_name = v;
        }
        if let Some(v) = input.last_name {
            p.last_name = v;
        }
        if let Some(v) = input.cpf {
            p.cpf = v;
        }
        if let Some(v) = input.contract_id {
            p.contract_id = v;
        }
        if let Some(v) = input.hired_on {
            p.hired_on = Some(v);
        }
        if let Some(v) = input.terminated_on {
            p.terminated_on = Some(v);
        }
        if let Some(v) = input.bank_name {
            p.bank_name = v;
        }
        if let Some(v) = input.bank_branch {
            p.bank_branch = v;
        }
        if let Some(v) = input.bank_account {
            p.bank_account = v;
        }
        if let Some(v) = input.active {
            p.active = v;
        }
        if let Some(v) = input.roles {
            p.roles = v;
        }
        if let Some(v) = input.departments {
            p.departments = v;
        }
        if let Some(v) = input.workplace_municipalities {
            p.workplace_municipalities = v;
        }
    })?;
    Ok(updated)
}
