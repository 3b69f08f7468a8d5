//! Scope/detail agreement: for every scoped resource kind, a record appears
//! in a principal's list exactly when that principal's detail retrieve of it
//! succeeds. Also covers the membership-scoped visibility flips for job
//! roles and the ownership rules for contact records.

use anyhow::Result;
use chrono::Utc;

use staffbase::identity::{hash_password, Principal, RequestContext};
use staffbase::model::{Account, AccountId, ADMINISTRATORS, COLLABORATORS};
use staffbase::policy::{scope_for, Action, ResourceKind};
use staffbase::service::{contacts, org, profiles};
use staffbase::store::{seed, SharedRegistry};

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

fn new_profile(account: AccountId, first: &str) -> profiles::NewProfile {
    profiles::NewProfile {
        account,
        first_name: first.into(),
        last_name: "Teste".into(),
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

/// Two collaborators with a phone, an address and an extra e-mail each, one
/// shared job role and one department, all created by an administrator.
struct Fixture {
    reg: SharedRegistry,
    admin: RequestContext,
    c1: RequestContext,
    c2: RequestContext,
}

fn fixture() -> Result<Fixture> {
    let reg = SharedRegistry::new();
    seed::seed_reference_data(&reg)?;
    let admin = add_account(&reg, "admin@example.com", &[ADMINISTRATORS], false)?;
    let u1 = add_account(&reg, "c1@example.com", &[COLLABORATORS], false)?;
    let u2 = add_account(&reg, "c2@example.com", &[COLLABORATORS], false)?;
    let admin_ctx = ctx_for(&reg, admin);

    let role = org::create_role(
        &reg,
        &admin_ctx,
        org::NewJobRole { name: "Engineer".into(), grade: "II".into(), salary: 7000.0 },
    )?;
    let p1 = profiles::create(&reg, &admin_ctx, {
        let mut p = new_profile(u1, "Ana");
        p.roles = vec![role.id];
        p
    })?;
    let p2 = profiles::create(&reg, &admin_ctx, new_profile(u2, "Bia"))?;
    let dep = org::create_department(
        &reg,
        &admin_ctx,
        org::NewDepartment {
            name: "Engineering".into(),
            director: p1.id,
            deputy_director: None,
            parent: None,
        },
    )?;
    profiles::update(
        &reg,
        &admin_ctx,
        p1.id,
        Action::PartialUpdate,
        profiles::ProfileUpdate { departments: Some(vec![dep.id]), ..Default::default() },
    )?;

    let municipality = reg.list_municipalities()[0].id;
    for (profile, tag) in [(p1.id, "c1"), (p2.id, "c2")] {
        contacts::create_phone(
            &reg,
            &admin_ctx,
            contacts::NewPhone { profile, number: "(85) 99999-0001".into() },
        )?;
        contacts::create_address(
            &reg,
            &admin_ctx,
            contacts::NewAddress {
                profile,
                is_primary: true,
                street: "Rua A".into(),
                number: "100".into(),
                district: "Centro".into(),
                complement: None,
                municipality,
                postal_code: "60000-000".into(),
            },
        )?;
        contacts::create_extra_email(
            &reg,
            &admin_ctx,
            contacts::NewExtraEmail { profile, email: format!("{tag}@alt.example.com") },
        )?;
    }

    Ok(Fixture {
        admin: ctx_for(&reg, admin),
        c1: ctx_for(&reg, u1),
        c2: ctx_for(&reg, u2),
        reg,
    })
}

#[test]
fn list_and_retrieve_agree_for_every_scoped_kind() -> Result<()> {
    let f = fixture()?;
    let all_ctxs = [&f.admin, &f.c1, &f.c2];

    // The full record inventory, read with the administrator's scope.
    let every_profile = profiles::list(&f.reg, &f.admin)?;
    let every_phone = contacts::list_phones(&f.reg, &f.admin)?;
    let every_address = contacts::list_addresses(&f.reg, &f.admin)?;
    let every_email = contacts::list_extra_emails(&f.reg, &f.admin)?;
    let every_role = org::list_roles(&f.reg, &f.admin)?;
    let every_department = org::list_departments(&f.reg, &f.admin)?;

    for ctx in all_ctxs {
        // Profile listing itself is administrative, so the invariant is
        // checked against the scoper's filter directly: a profile is in a
        // principal's scope exactly when its detail retrieve succeeds.
        let filter = scope_for(&ctx.principal, ResourceKind::Profile, ctx.profile);
        let scoped: Vec<_> = f.reg.list_profiles(filter).iter().map(|p| p.id).collect();
        for p in &every_profile {
            let visible = profiles::retrieve(&f.reg, ctx, p.id).is_ok();
            assert_eq!(scoped.contains(&p.id), visible, "profile scope/detail diverged");
        }

        let listed: Vec<_> = contacts::list_phones(&f.reg, ctx)?.iter().map(|p| p.id).collect();
        for p in &every_phone {
            let visible = contacts::retrieve_phone(&f.reg, ctx, p.id).is_ok();
            assert_eq!(listed.contains(&p.id), visible, "phone scope/detail diverged");
        }

        let listed: Vec<_> =
            contacts::list_addresses(&f.reg, ctx)?.iter().map(|a| a.id).collect();
        for a in &every_address {
            let visible = contacts::retrieve_address(&f.reg, ctx, a.id).is_ok();
            assert_eq!(listed.contains(&a.id), visible, "address scope/detail diverged");
        }

        let listed: Vec<_> =
            contacts::list_extra_emails(&f.reg, ctx)?.iter().map(|e| e.id).collect();
        for e in &every_email {
            let visible = contacts::retrieve_extra_email(&f.reg, ctx, e.id).is_ok();
            assert_eq!(listed.contains(&e.id), visible, "extra e-mail scope/detail diverged");
        }

        let listed: Vec<_> = org::list_roles(&f.reg, ctx)?.iter().map(|r| r.id).collect();
        for r in &every_role {
            let visible = org::retrieve_role(&f.reg, ctx, r.id).is_ok();
            assert_eq!(listed.contains(&r.id), visible, "role scope/detail diverged");
        }

        let listed: Vec<_> = org::list_departments(&f.reg, ctx)?.iter().map(|d| d.id).collect();
        for d in &every_department {
            let visible = org::retrieve_department(&f.reg, ctx, d.id).is_ok();
            assert_eq!(listed.contains(&d.id), visible, "department scope/detail diverged");
        }
    }
    Ok(())
}

#[test]
fn phone_listing_is_ownership_scoped() -> Result<()> {
    let f = fixture()?;
    let c1_profile = f.c1.profile.expect("profile");
    let phones = contacts::list_phones(&f.reg, &f.c1)?;
    assert!(!phones.is_empty());
    assert!(phones.iter().all(|p| p.profile == c1_profile));
    // The administrator sees both collaborators' phones.
    assert!(contacts::list_phones(&f.reg, &f.admin)?.len() > phones.len());
    Ok(())
}

#[test]
fn unheld_role_is_hidden_until_linked() -> Result<()> {
    let f = fixture()?;
    let role = org::create_role(
        &f.reg,
        &f.admin,
        org::NewJobRole { name: "Architect".into(), grade: "III".into(), salary: 9000.0 },
    )?;

    // Active, existing, but not held by c2: absent as far as c2 can tell.
    let err = org::retrieve_role(&f.reg, &f.c2, role.id).unwrap_err();
    assert_eq!(err.http_status(), 404);

    let p2 = f.c2.profile.expect("profile");
    profiles::update(
        &f.reg,
        &f.admin,
        p2,
        Action::PartialUpdate,
        profiles::ProfileUpdate { roles: Some(vec![role.id]), ..Default::default() },
    )?;
    assert!(org::retrieve_role(&f.reg, &f.c2, role.id).is_ok());

    // Deactivating the role removes it from the collaborator's view again.
    org::set_role_active(&f.reg, &f.admin, role.id, false)?;
    let err = org::retrieve_role(&f.reg, &f.c2, role.id).unwrap_err();
    assert_eq!(err.http_status(), 404);
    Ok(())
}

#[test]
fn phone_destroy_follows_ownership() -> Result<()> {
    let f = fixture()?;
    let c1_phone = contacts::list_phones(&f.reg, &f.c1)?[0].id;
    let c2_phone = contacts::list_phones(&f.reg, &f.c2)?[0].id;

    // Another collaborator's record is not even confirmed to exist.
    let err = contacts::destroy_phone(&f.reg, &f.c1, c2_phone).unwrap_err();
    assert_eq!(err.http_status(), 404);

    // Own record deletes fine.
    contacts::destroy_phone(&f.reg, &f.c1, c1_phone)?;
    assert!(contacts::list_phones(&f.reg, &f.c1)?.is_empty());

    // The administrator may delete anyone's.
    contacts::destroy_phone(&f.reg, &f.admin, c2_phone)?;
    Ok(())
}
