use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ids::AccountId;

/// Group names required by the project. Created at startup, same as the
/// provisioning command of the original deployment.
pub const ADMINISTRATORS: &str = "Administrators";
pub const COLLABORATORS: &str = "Collaborators";
pub const PROJECT_GROUPS: &[&str] = &[ADMINISTRATORS, COLLABORATORS];

#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: AccountId,
    /// Unique, compared case-insensitively.
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_superuser: bool,
    pub active: bool,
    pub groups: Vec<String>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub modified_by: Option<AccountId>,
}

impl Account {
    pub fn in_group(&self, name: &str) -> bool {
        self.groups.iter().any(|g| g.eq_ignore_ascii_case(name))
    }
}

/// Wire representation: the fields the account endpoints return.
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub id: AccountId,
    pub email: String,
    pub groups: Vec<String>,
    pub last_login: Option<DateTime<Utc>>,
    pub active: bool,
}

impl From<&Account> for AccountView {
    fn from(a: &Account) -> Self {
        AccountView {
            id: a.id,
            email: a.email.clone(),
            groups: a.groups.clone(),
            last_login: a.last_login,
            active: a.active,
        }
    }
}
