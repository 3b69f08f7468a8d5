use serde::{Deserialize, Serialize};

use crate::model::AccountId;

/// Identity attributes of the actor behind one request. Built by the session
/// resolver at the start of the request and immutable afterwards; anonymous
/// requests carry `account: None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Principal {
    pub account: Option<AccountId>,
    #[serde(default)]
    pub superuser: bool,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl Principal {
    pub fn anonymous() -> Self {
        Principal::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.account.is_some()
    }

    /// Group names are compared case-insensitively, same as account records.
    pub fn in_group(&self, name: &str) -> bool {
        self.is_authenticated() && self.groups.iter().any(|g| g.eq_ignore_ascii_case(name))
    }
}
