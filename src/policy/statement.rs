use crate::identity::Principal;
use crate::model::AccountId;

use super::action::{Action, ActionSpec};

/// Who a statement applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// Every principal, anonymous included. Only used for operations that are
    /// explicitly public (reset-token issue/consume, reference data).
    Any,
    /// Superuser-level principals only; stronger than group membership.
    Admin,
    /// Authenticated principals holding the named group.
    Group(&'static str),
}

impl Selector {
    pub fn matches(&self, principal: &Principal) -> bool {
        match self {
            Selector::Any => true,
            Selector::Admin => principal.is_authenticated() && principal.superuser,
            Selector::Group(name) => principal.in_group(name),
        }
    }
}

/// Named condition predicates a statement may carry. Evaluated against a
/// concrete target only; a conditioned statement never matches a
/// collection-level action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKey {
    /// Target's owning account equals the request principal.
    IsOwner,
    /// Target account is the principal's own account.
    IsSelf,
    /// Target account is some other account. Anonymous principals never
    /// satisfy this.
    IsOther,
}

/// Normalized view of a target object: the owning account (via its profile,
/// for owned records) and, when the target is itself an account, that account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetRef {
    pub owner: Option<AccountId>,
    pub account: Option<AccountId>,
}

impl TargetRef {
    /// A record owned by a profile whose linked account is `owner`.
    pub fn owned_by(owner: AccountId) -> Self {
        TargetRef { owner: Some(owner), account: None }
    }

    /// The target is an account itself (it also owns itself).
    pub fn account(id: AccountId) -> Self {
        TargetRef { owner: Some(id), account: Some(id) }
    }

    /// A record with no owning account relation.
    pub fn unowned() -> Self {
        TargetRef { owner: None, account: None }
    }
}

impl ConditionKey {
    pub fn holds(self, principal: &Principal, target: &TargetRef) -> bool {
        match self {
            ConditionKey::IsOwner => target.owner.is_some() && target.owner == principal.account,
            ConditionKey::IsSelf => target.account.is_some() && target.account == principal.account,
            ConditionKey::IsOther => {
                principal.is_authenticated()
                    && target.account.is_some()
                    && target.account != principal.account
            }
        }
    }
}

/// One allow rule: actions + principal selector + optional condition.
/// Statements only ever grant; denial is the absence of a matching grant.
#[derive(Debug, Clone, Copy)]
pub struct Statement {
    pub actions: ActionSpec,
    pub selector: Selector,
    pub condition: Option<ConditionKey>,
}

impl Statement {
    /// Full match against a request. `target` is `None` for collection-level
    /// actions, in which case conditioned statements do not apply.
    pub fn grants(&self, principal: &Principal, action: Action, target: Option<&TargetRef>) -> bool {
        if !self.actions.matches(action) || !self.selector.matches(principal) {
            return false;
        }
        match (self.condition, target) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(cond), Some(t)) => cond.holds(principal, t),
        }
    }

    /// Selector/action match only, with conditions assumed satisfiable. Used
    /// to refuse flat-out ineligible principals before any object fetch.
    pub fn could_grant(&self, principal: &Principal, action: Action) -> bool {
        self.actions.matches(action) && self.selector.matches(principal)
    }
}
