//! Queryset scoping: one filter per (principal, kind) applied by the store
//! inside a single snapshot read. Must agree with detail-level authorization:
//! a record is in the list scope exactly when the same principal's retrieve
//! of it would succeed.

use crate::identity::Principal;
use crate::model::{ProfileId, ADMINISTRATORS, COLLABORATORS};

use super::registry::ResourceKind;

/// Storage-level filter produced by the scoper. `OwnedBy` restricts a
/// collection to what the given profile is, owns, or actively holds; the
/// store interprets it per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeFilter {
    All,
    OwnedBy(ProfileId),
    Nothing,
}

/// Compute the visibility filter for a principal on a resource kind.
/// `own_profile` is the principal's profile, when one exists.
pub fn scope_for(
    principal: &Principal,
    kind: ResourceKind,
    own_profile: Option<ProfileId>,
) -> ScopeFilter {
    match kind {
        // Public reference data is visible to everyone, anonymous included.
        ResourceKind::FederalState | ResourceKind::Municipality => ScopeFilter::All,

        ResourceKind::Profile
        | ResourceKind::Address
        | ResourceKind::Phone
        | ResourceKind::ExtraEmail
        | ResourceKind::JobRole
        | ResourceKind::Department => {
            if principal.in_group(ADMINISTRATORS) {
                ScopeFilter::All
            } else if principal.in_group(COLLABORATORS) {
                match own_profile {
                    Some(pid) => ScopeFilter::OwnedBy(pid),
                    None => ScopeFilter::Nothing,
                }
            } else {
                ScopeFilter::Nothing
            }
        }

        ResourceKind::Account | ResourceKind::Group => {
            if principal.in_group(ADMINISTRATORS) {
                ScopeFilter::All
            } else {
                ScopeFilter::Nothing
            }
        }

        // Token inventory is a superuser diagnostic.
        ResourceKind::PasswordResetToken => {
            if principal.is_authenticated() && principal.superuser {
                ScopeFilter::All
            } else {
                ScopeFilter::Nothing
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AccountId;

    #[test]
    fn anonymous_sees_reference_data_only() {
        let anon = Principal::anonymous();
        assert_eq!(scope_for(&anon, ResourceKind::Municipality, None), ScopeFilter::All);
        assert_eq!(scope_for(&anon, ResourceKind::Profile, None), ScopeFilter::Nothing);
        assert_eq!(scope_for(&anon, ResourceKind::Phone, None), ScopeFilter::Nothing);
    }

    #[test]
    fn collaborator_without_profile_sees_nothing_scoped() {
        let p = Principal {
            account: Some(AccountId::generate()),
            superuser: false,
            groups: vec![COLLABORATORS.to_string()],
        };
        assert_eq!(scope_for(&p, ResourceKind::Phone, None), ScopeFilter::Nothing);
    }

    #[test]
    fn administrator_sees_all() {
        let p = Principal {
            account: Some(AccountId::generate()),
            superuser: false,
            groups: vec![ADMINISTRATORS.to_string()],
        };
        for kind in [
            ResourceKind::Profile,
            ResourceKind::Address,
            ResourceKind::JobRole,
            ResourceKind::Department,
            ResourceKind::Account,
        ] {
            assert_eq!(scope_for(&p, kind, None), ScopeFilter::All);
        }
        // Superuser flag, not group membership, gates token inventory.
        assert_eq!(
            scope_for(&p, ResourceKind::PasswordResetToken, None),
            ScopeFilter::Nothing
        );
    }
}
