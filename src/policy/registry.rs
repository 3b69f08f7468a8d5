//! Static statement sets and capability descriptors, one per resource kind.
//! Defined once at compile time and never mutated; the evaluator and scoper
//! treat them as read-only process-wide constants.

use crate::model::{ADMINISTRATORS, COLLABORATORS};

use super::action::{Action, ActionSpec};
use super::statement::{ConditionKey, Selector, Statement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Profile,
    Address,
    Phone,
    ExtraEmail,
    JobRole,
    Department,
    Account,
    Group,
    PasswordResetToken,
    FederalState,
    Municipality,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Profile => "profile",
            ResourceKind::Address => "address",
            ResourceKind::Phone => "phone",
            ResourceKind::ExtraEmail => "extra_email",
            ResourceKind::JobRole => "job_role",
            ResourceKind::Department => "department",
            ResourceKind::Account => "account",
            ResourceKind::Group => "group",
            ResourceKind::PasswordResetToken => "password_reset_token",
            ResourceKind::FederalState => "federal_state",
            ResourceKind::Municipality => "municipality",
        }
    }
}

/// Capability set and policy of one resource kind. `verbs` is what the
/// resource's surface exposes at all; `statements` is who may invoke them.
/// The two are deliberately separate: a verb can appear in a statement while
/// the surface does not expose it.
#[derive(Debug, Clone, Copy)]
pub struct ResourceDescriptor {
    pub verbs: &'static [Action],
    pub statements: &'static [Statement],
}

const PROFILE_STATEMENTS: &[Statement] = &[
    Statement {
        actions: ActionSpec::Only(&[
            Action::Create,
            Action::List,
            Action::Retrieve,
            Action::Update,
            Action::PartialUpdate,
        ]),
        selector: Selector::Group(ADMINISTRATORS),
        condition: None,
    },
    Statement {
        actions: ActionSpec::Only(&[Action::Retrieve, Action::Update, Action::PartialUpdate]),
        selector: Selector::Group(COLLABORATORS),
        condition: Some(ConditionKey::IsOwner),
    },
];

// Shared by the three contact-data kinds.
const CONTACT_STATEMENTS: &[Statement] = &[
    Statement {
        actions: ActionSpec::Only(&[
            Action::Create,
            Action::List,
            Action::Retrieve,
            Action::Update,
            Action::PartialUpdate,
            Action::Destroy,
        ]),
        selector: Selector::Group(ADMINISTRATORS),
        condition: None,
    },
    Statement {
        actions: ActionSpec::Only(&[Action::Create, Action::List]),
        selector: Selector::Group(COLLABORATORS),
        condition: None,
    },
    Statement {
        actions: ActionSpec::Only(&[
            Action::Retrieve,
            Action::Update,
            Action::PartialUpdate,
            Action::Destroy,
        ]),
        selector: Selector::Group(COLLABORATORS),
        condition: Some(ConditionKey::IsOwner),
    },
];

// Shared by job roles and departments.
const ORG_STATEMENTS: &[Statement] = &[
    Statement {
        actions: ActionSpec::Any,
        selector: Selector::Group(ADMINISTRATORS),
        condition: None,
    },
    Statement {
        actions: ActionSpec::Only(&[Action::List, Action::Retrieve]),
        selector: Selector::Group(COLLABORATORS),
        condition: None,
    },
];

const ACCOUNT_STATEMENTS: &[Statement] = &[
    Statement {
        actions: ActionSpec::Only(&[Action::List, Action::Create]),
        selector: Selector::Group(ADMINISTRATORS),
        condition: None,
    },
    Statement {
        actions: ActionSpec::Only(&[
            Action::Retrieve,
            Action::Update,
            Action::PartialUpdate,
            Action::ChangePassword,
            Action::ChangeEmail,
        ]),
        selector: Selector::Any,
        condition: Some(ConditionKey::IsSelf),
    },
    Statement {
        actions: ActionSpec::Only(&[Action::ChangePasswordAfterReset]),
        selector: Selector::Any,
        condition: None,
    },
    Statement {
        actions: ActionSpec::Only(&[Action::ChangeGroup]),
        selector: Selector::Group(ADMINISTRATORS),
        condition: None,
    },
    // Administrators manage activation of other accounts, never their own.
    Statement {
        actions: ActionSpec::Only(&[Action::Activate, Action::Deactivate]),
        selector: Selector::Group(ADMINISTRATORS),
        condition: Some(ConditionKey::IsOther),
    },
];

const GROUP_STATEMENTS: &[Statement] = &[Statement {
    actions: ActionSpec::Only(&[Action::List]),
    selector: Selector::Group(ADMINISTRATORS),
    condition: None,
}];

const RESET_TOKEN_STATEMENTS: &[Statement] = &[
    Statement {
        actions: ActionSpec::Only(&[Action::Create, Action::Update, Action::PartialUpdate]),
        selector: Selector::Any,
        condition: None,
    },
    // Token inventory is diagnostic; superuser only.
    Statement {
        actions: ActionSpec::Only(&[Action::List]),
        selector: Selector::Admin,
        condition: None,
    },
];

const REFERENCE_STATEMENTS: &[Statement] = &[Statement {
    actions: ActionSpec::Only(&[Action::List, Action::Retrieve]),
    selector: Selector::Any,
    condition: None,
}];

const PROFILE_DESC: ResourceDescriptor = ResourceDescriptor {
    verbs: &[
        Action::Create,
        Action::List,
        Action::Retrieve,
        Action::Update,
        Action::PartialUpdate,
    ],
    statements: PROFILE_STATEMENTS,
};

const ADDRESS_DESC: ResourceDescriptor = ResourceDescriptor {
    verbs: &[Action::Create, Action::List, Action::Retrieve, Action::Destroy],
    statements: CONTACT_STATEMENTS,
};

const PHONE_DESC: ResourceDescriptor = ResourceDescriptor {
    verbs: &[Action::Create, Action::List, Action::Retrieve, Action::Destroy],
    statements: CONTACT_STATEMENTS,
};

const EXTRA_EMAIL_DESC: ResourceDescriptor = ResourceDescriptor {
    verbs: &[Action::Create, Action::List, Action::Retrieve, Action::Destroy],
    statements: CONTACT_STATEMENTS,
};

const JOB_ROLE_DESC: ResourceDescriptor = ResourceDescriptor {
    verbs: &[
        Action::Create,
        Action::List,
        Action::Retrieve,
        Action::Update,
        Action::PartialUpdate,
        Action::Activate,
        Action::Deactivate,
    ],
    statements: ORG_STATEMENTS,
};

const DEPARTMENT_DESC: ResourceDescriptor = ResourceDescriptor {
    verbs: &[
        Action::Create,
        Action::List,
        Action::Retrieve,
        Action::Update,
        Action::PartialUpdate,
        Action::Activate,
        Action::Deactivate,
    ],
    statements: ORG_STATEMENTS,
};

const ACCOUNT_DESC: ResourceDescriptor = ResourceDescriptor {
    verbs: &[
        Action::Create,
        Action::List,
        Action::Retrieve,
        Action::Update,
        Action::PartialUpdate,
        Action::Activate,
        Action::Deactivate,
        Action::ChangePassword,
        Action::ChangeEmail,
        Action::ChangeGroup,
        Action::ChangePasswordAfterReset,
    ],
    statements: ACCOUNT_STATEMENTS,
};

const GROUP_DESC: ResourceDescriptor = ResourceDescriptor {
    verbs: &[Action::List],
    statements: GROUP_STATEMENTS,
};

const RESET_TOKEN_DESC: ResourceDescriptor = ResourceDescriptor {
    verbs: &[Action::Create, Action::List],
    statements: RESET_TOKEN_STATEMENTS,
};

const FEDERAL_STATE_DESC: ResourceDescriptor = ResourceDescriptor {
    verbs: &[Action::List, Action::Retrieve],
    statements: REFERENCE_STATEMENTS,
};

const MUNICIPALITY_DESC: ResourceDescriptor = ResourceDescriptor {
    verbs: &[Action::List, Action::Retrieve],
    statements: REFERENCE_STATEMENTS,
};

pub fn descriptor(kind: ResourceKind) -> &'static ResourceDescriptor {
    match kind {
        ResourceKind::Profile => &PROFILE_DESC,
        ResourceKind::Address => &ADDRESS_DESC,
        ResourceKind::Phone => &PHONE_DESC,
        ResourceKind::ExtraEmail => &EXTRA_EMAIL_DESC,
        ResourceKind::JobRole => &JOB_ROLE_DESC,
        ResourceKind::Department => &DEPARTMENT_DESC,
        ResourceKind::Account => &ACCOUNT_DESC,
        ResourceKind::Group => &GROUP_DESC,
        ResourceKind::PasswordResetToken => &RESET_TOKEN_DESC,
        ResourceKind::FederalState => &FEDERAL_STATE_DESC,
        ResourceKind::Municipality => &MUNICIPALITY_DESC,
    }
}

/// Whether the resource's surface exposes this verb at all.
pub fn supports(kind: ResourceKind, action: Action) -> bool {
    descriptor(kind).verbs.contains(&action)
}
