//! Statement evaluation. A pure fold over the resource's statement list:
//! Allow iff at least one statement grants, Deny otherwise. An empty
//! statement list denies everything, superusers included (fail-closed).

use tracing::warn;

use crate::identity::Principal;

use super::action::Action;
use super::registry::{descriptor, ResourceKind};
use super::statement::{Statement, TargetRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allow(self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Evaluate an explicit statement list. `target` is `None` for
/// collection-level actions.
pub fn evaluate_statements(
    principal: &Principal,
    action: Action,
    statements: &[Statement],
    target: Option<&TargetRef>,
) -> Decision {
    if statements.iter().any(|s| s.grants(principal, action, target)) {
        Decision::Allow
    } else {
        Decision::Deny
    }
}

/// Evaluate against the registered statement set of `kind`.
pub fn evaluate(
    principal: &Principal,
    action: Action,
    kind: ResourceKind,
    target: Option<&TargetRef>,
) -> Decision {
    let desc = descriptor(kind);
    if desc.statements.is_empty() {
        // A kind with no statements is a configuration gap, not an open door.
        warn!(
            kind = kind.as_str(),
            action = action.as_str(),
            "no policy statements registered, denying"
        );
        return Decision::Deny;
    }
    evaluate_statements(principal, action, desc.statements, target)
}

/// Selector-level pre-check for object actions: could any statement grant
/// this principal the action on some object of `kind`? Conditions are assumed
/// satisfiable. Runs before the object fetch so ineligible principals are
/// refused without revealing whether the object exists.
pub fn feasible(principal: &Principal, action: Action, kind: ResourceKind) -> Decision {
    let desc = descriptor(kind);
    if desc.statements.iter().any(|s| s.could_grant(principal, action)) {
        Decision::Allow
    } else {
        Decision::Deny
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AccountId, ADMINISTRATORS, COLLABORATORS};
    use crate::policy::action::ActionSpec;
    use crate::policy::statement::{ConditionKey, Selector};

    fn collaborator(id: AccountId) -> Principal {
        Principal {
            account: Some(id),
            superuser: false,
            groups: vec![COLLABORATORS.to_string()],
        }
    }

    fn admin(id: AccountId) -> Principal {
        Principal {
            account: Some(id),
            superuser: false,
            groups: vec![ADMINISTRATORS.to_string()],
        }
    }

    #[test]
    fn empty_statement_list_denies_everyone() {
        let me = AccountId::generate();
        for p in [Principal::anonymous(), collaborator(me), admin(me)] {
            let d = evaluate_statements(&p, Action::List, &[], None);
            assert_eq!(d, Decision::Deny);
        }
    }

    #[test]
    fn conditioned_statement_never_matches_collection_actions() {
        let me = AccountId::generate();
        let stmts = [Statement {
            actions: ActionSpec::Only(&[Action::List, Action::Retrieve]),
            selector: Selector::Group(COLLABORATORS),
            condition: Some(ConditionKey::IsOwner),
        }];
        let p = collaborator(me);
        assert_eq!(evaluate_statements(&p, Action::List, &stmts, None), Decision::Deny);
        let mine = TargetRef::owned_by(me);
        assert_eq!(
            evaluate_statements(&p, Action::Retrieve, &stmts, Some(&mine)),
            Decision::Allow
        );
    }

    #[test]
    fn order_independence_under_permutation() {
        let me = AccountId::generate();
        let other = AccountId::generate();
        let a = Statement {
            actions: ActionSpec::Any,
            selector: Selector::Group(ADMINISTRATORS),
            condition: None,
        };
        let b = Statement {
            actions: ActionSpec::Only(&[Action::Retrieve]),
            selector: Selector::Group(COLLABORATORS),
            condition: Some(ConditionKey::IsOwner),
        };
        let c = Statement {
            actions: ActionSpec::Only(&[Action::Create, Action::List]),
            selector: Selector::Group(COLLABORATORS),
            condition: None,
        };
        let orders: [[Statement; 3]; 6] =
            [[a, b, c], [a, c, b], [b, a, c], [b, c, a], [c, a, b], [c, b, a]];

        let principals = [
            Principal::anonymous(),
            collaborator(me),
            admin(me),
        ];
        let targets = [TargetRef::owned_by(me), TargetRef::owned_by(other)];
        let actions = [Action::List, Action::Create, Action::Retrieve, Action::Destroy];

        for p in &principals {
            for action in actions {
                for t in &targets {
                    let reference = evaluate_statements(p, action, &orders[0], Some(t));
                    for order in &orders[1..] {
                        assert_eq!(
                            evaluate_statements(p, action, order, Some(t)),
                            reference,
                            "order changed the decision for {:?} {:?}",
                            action,
                            t
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn anonymous_satisfies_only_unconditioned_any_statements() {
        let stmts = [
            Statement {
                actions: ActionSpec::Only(&[Action::Create]),
                selector: Selector::Any,
                condition: None,
            },
            Statement {
                actions: ActionSpec::Only(&[Action::Retrieve]),
                selector: Selector::Any,
                condition: Some(ConditionKey::IsSelf),
            },
        ];
        let anon = Principal::anonymous();
        assert_eq!(evaluate_statements(&anon, Action::Create, &stmts, None), Decision::Allow);
        let t = TargetRef::account(AccountId::generate());
        assert_eq!(
            evaluate_statements(&anon, Action::Retrieve, &stmts, Some(&t)),
            Decision::Deny
        );
    }

    #[test]
    fn admin_self_activation_asymmetry() {
        let me = AccountId::generate();
        let other = AccountId::generate();
        let p = admin(me);

        let self_target = TargetRef::account(me);
        let other_target = TargetRef::account(other);
        for action in [Action::Activate, Action::Deactivate] {
            assert_eq!(
                evaluate(&p, action, ResourceKind::Account, Some(&self_target)),
                Decision::Deny
            );
            assert_eq!(
                evaluate(&p, action, ResourceKind::Account, Some(&other_target)),
                Decision::Allow
            );
        }
    }

    #[test]
    fn feasible_ignores_conditions_but_not_selectors() {
        let me = AccountId::generate();
        // A collaborator might own the account object in question, so the
        // self-service statement keeps retrieve feasible.
        assert_eq!(
            feasible(&collaborator(me), Action::Retrieve, ResourceKind::Account),
            Decision::Allow
        );
        // But no statement ever lets a collaborator change groups.
        assert_eq!(
            feasible(&collaborator(me), Action::ChangeGroup, ResourceKind::Account),
            Decision::Deny
        );
        // Anonymous principals match no group-gated statement.
        assert_eq!(
            feasible(&Principal::anonymous(), Action::Retrieve, ResourceKind::Profile),
            Decision::Deny
        );
    }
}
