use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::ids::{AccountId, DepartmentId, MunicipalityId, ProfileId, RoleId};

/// Employment profile, one-to-one with an account. Role, department and
/// workplace-municipality links are many-to-many and support concurrent
/// appointments.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: ProfileId,
    pub account: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub contract_id: String,
    pub hired_on: Option<NaiveDate>,
    pub terminated_on: Option<NaiveDate>,
    pub bank_name: String,
    pub bank_branch: String,
    pub bank_account: String,
    pub active: bool,
    pub roles: Vec<RoleId>,
    pub departments: Vec<DepartmentId>,
    pub workplace_municipalities: Vec<MunicipalityId>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub modified_by: AccountId,
}

impl Profile {
    pub fn holds_role(&self, id: RoleId) -> bool {
        self.roles.contains(&id)
    }

    pub fn in_department(&self, id: DepartmentId) -> bool {
        self.departments.contains(&id)
    }
}
