use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ids::{AccountId, DepartmentId, ProfileId, RoleId};

/// Job title and pay grade. (name, grade) is unique; salary must be positive.
#[derive(Debug, Clone, Serialize)]
pub struct JobRole {
    pub id: RoleId,
    pub name: String,
    pub grade: String,
    pub salary: f64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub modified_by: AccountId,
}

/// Organizational unit. Director and deputy must be distinct profiles; the
/// parent chain must stay acyclic.
#[derive(Debug, Clone, Serialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    pub director: ProfileId,
    pub deputy_director: Option<ProfileId>,
    pub parent: Option<DepartmentId>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub modified_by: AccountId,
}
