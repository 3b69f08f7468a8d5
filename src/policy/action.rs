use serde::{Deserialize, Serialize};

/// Fixed action vocabulary. The first six are the generic CRUD verbs; the
/// rest are resource-specific transitions routed through the same gate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    List,
    Create,
    Retrieve,
    Update,
    PartialUpdate,
    Destroy,
    Activate,
    Deactivate,
    ChangePassword,
    ChangeEmail,
    ChangeGroup,
    ChangePasswordAfterReset,
}

impl Action {
    /// Collection-level actions have no concrete target object.
    pub fn is_collection(self) -> bool {
        matches!(self, Action::List | Action::Create)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Create => "create",
            Action::Retrieve => "retrieve",
            Action::Update => "update",
            Action::PartialUpdate => "partial_update",
            Action::Destroy => "destroy",
            Action::Activate => "activate",
            Action::Deactivate => "deactivate",
            Action::ChangePassword => "change_password",
            Action::ChangeEmail => "change_email",
            Action::ChangeGroup => "change_group",
            Action::ChangePasswordAfterReset => "change_password_after_reset",
        }
    }
}

/// Action matcher of a statement: the `"*"` wildcard or an explicit list.
#[derive(Debug, Clone, Copy)]
pub enum ActionSpec {
    Any,
    Only(&'static [Action]),
}

impl ActionSpec {
    pub fn matches(&self, action: Action) -> bool {
        match self {
            ActionSpec::Any => true,
            ActionSpec::Only(list) => list.contains(&action),
        }
    }
}
