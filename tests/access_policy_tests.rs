//! Access-policy integration tests: the gate's decision mapping across the
//! principal spectrum (anonymous, collaborator, administrator) and the
//! intentional asymmetries.

use anyhow::Result;
use chrono::Utc;

use staffbase::identity::{hash_password, Principal, RequestContext};
use staffbase::model::{Account, AccountId, ADMINISTRATORS, COLLABORATORS};
use staffbase::service::{accounts, groups, org, profiles};
use staffbase::store::SharedRegistry;

fn add_account(
    reg: &SharedRegistry,
    email: &str,
    groups: &[&str],
    superuser: bool,
) -> Result<AccountId> {
    let now = Utc::now();
    let account = Account {
        id: AccountId::generate(),
        email: email.into(),
        password_hash: hash_password("initial-pass")?,
        is_superuser: superuser,
        active: true,
        groups: groups.iter().map(|g| g.to_string()).collect(),
        last_login: None,
        created_at: now,
        modified_at: now,
        modified_by: None,
    };
    let id = account.id;
    reg.insert_account(account)?;
    Ok(id)
}

fn ctx_for(reg: &SharedRegistry, account: AccountId) -> RequestContext {
    let acc = reg.get_account(account).expect("account exists");
    RequestContext {
        principal: Principal {
            account: Some(account),
            superuser: acc.is_superuser,
            groups: acc.groups,
        },
        profile: reg.find_profile_by_account(account),
    }
}

fn new_profile(account: AccountId, first: &str, last: &str) -> profiles::NewProfile {
    profiles::NewProfile {
        account,
        first_name: first.into(),
        last_name: last.into(),
        cpf: "123.456.789-09".into(),
        contract_id: "CT-001".into(),
        hired_on: None,
        terminated_on: None,
        bank_name: String::new(),
        bank_branch: String::new(),
        bank_account: String::new(),
        roles: vec![],
        departments: vec![],
        workplace_municipalities: vec![],
    }
}

#[test]
fn anonymous_profile_list_requires_authentication() -> Result<()> {
    let reg = SharedRegistry::new();
    let anon = RequestContext::anonymous();
    let err = profiles::list(&reg, &anon).unwrap_err();
    assert_eq!(err.http_status(), 401);
    Ok(())
}

#[test]
fn collaborator_cannot_see_another_profile() -> Result<()> {
    let reg = SharedRegistry::new();
    let admin = add_account(&reg, "admin@example.com", &[ADMINISTRATORS], false)?;
    let c1 = add_account(&reg, "c1@example.com", &[COLLABORATORS], false)?;
    let c2 = add_account(&reg, "c2@example.com", &[COLLABORATORS], false)?;
    let admin_ctx = ctx_for(&reg, admin);
    let p1 = profiles::create(&reg, &admin_ctx, new_profile(c1, "Ana", "Silva"))?;
    let p2 = profiles::create(&reg, &admin_ctx, new_profile(c2, "Bia", "Souza"))?;

    let c1_ctx = ctx_for(&reg, c1);
    // Own profile is reachable; the other's is indistinguishable from absent.
    assert!(profiles::retrieve(&reg, &c1_ctx, p1.id).is_ok());
    let err = profiles::retrieve(&reg, &c1_ctx, p2.id).unwrap_err();
    assert_eq!(err.http_status(), 404);

    // The administrator reaches both.
    assert!(profiles::retrieve(&reg, &admin_ctx, p2.id).is_ok());
    Ok(())
}

#[test]
fn collaborator_can_see_but_not_edit_roles() -> Result<()> {
    let reg = SharedRegistry::new();
    let admin = add_account(&reg, "admin@example.com", &[ADMINISTRATORS], false)?;
    let collab = add_account(&reg, "collab@example.com", &[COLLABORATORS], false)?;
    let admin_ctx = ctx_for(&reg, admin);
    let role = org::create_role(
        &reg,
        &admin_ctx,
        org::NewJobRole { name: "Analyst".into(), grade: "I".into(), salary: 4200.0 },
    )?;
    profiles::create(&reg, &admin_ctx, {
        let mut p = new_profile(collab, "Caio", "Lima");
        p.roles = vec![role.id];
        p
    })?;

    let collab_ctx = ctx_for(&reg, collab);
    assert!(org::retrieve_role(&reg, &collab_ctx, role.id).is_ok());
    // Visible but not editable: forbidden, not hidden.
    let err = org::update_role(
        &reg,
        &collab_ctx,
        role.id,
        staffbase::policy::Action::PartialUpdate,
        org::JobRoleUpdate { salary: Some(9000.0), ..Default::default() },
    )
    .unwrap_err();
    assert_eq!(err.http_status(), 403);
    Ok(())
}

#[test]
fn administrator_cannot_toggle_own_account() -> Result<()> {
    let reg = SharedRegistry::new();
    let a1 = add_account(&reg, "a1@example.com", &[ADMINISTRATORS], false)?;
    let a2 = add_account(&reg, "a2@example.com", &[ADMINISTRATORS], false)?;
    let ctx = ctx_for(&reg, a1);

    let err = accounts::set_active(&reg, &ctx, a1, false).unwrap_err();
    assert_eq!(err.http_status(), 403);
    let err = accounts::set_active(&reg, &ctx, a1, true).unwrap_err();
    assert_eq!(err.http_status(), 403);

    // The same actions on another account succeed.
    assert!(accounts::set_active(&reg, &ctx, a2, false).is_ok());
    assert!(accounts::set_active(&reg, &ctx, a2, true).is_ok());
    Ok(())
}

#[test]
fn group_listing_is_administrative() -> Result<()> {
    let reg = SharedRegistry::new();
    let admin = add_account(&reg, "admin@example.com", &[ADMINISTRATORS], false)?;
    let collab = add_account(&reg, "collab@example.com", &[COLLABORATORS], false)?;

    let err = groups::list(&reg, &RequestContext::anonymous()).unwrap_err();
    assert_eq!(err.http_status(), 401);
    let err = groups::list(&reg, &ctx_for(&reg, collab)).unwrap_err();
    assert_eq!(err.http_status(), 403);

    let listing = groups::list(&reg, &ctx_for(&reg, admin))?;
    let names: Vec<&str> = listing.iter().map(|g| g.name.as_str()).collect();
    assert!(names.contains(&ADMINISTRATORS));
    assert!(names.contains(&COLLABORATORS));
    Ok(())
}

#[test]
fn reference_data_is_public() -> Result<()> {
    let reg = SharedRegistry::new();
    staffbase::store::seed::seed_reference_data(&reg)?;
    let anon = RequestContext::anonymous();
    let states = staffbase::service::geo::list_states(&reg, &anon)?;
    assert!(!states.is_empty());
    let first = states[0].id;
    assert!(staffbase::service::geo::retrieve_state(&reg, &anon, first).is_ok());
    Ok(())
}
