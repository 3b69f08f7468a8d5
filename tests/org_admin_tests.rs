//! Administrative data rules: role and department validation, activation
//! transitions, the primary-address constraint and contact format checks.

use anyhow::Result;
use chrono::Utc;

use staffbase::identity::{hash_password, Principal, RequestContext};
use staffbase::model::{Account, AccountId, ADMINISTRATORS};
use staffbase::policy::Action;
use staffbase::service::{contacts, org, profiles};
use staffbase::store::{seed, SharedRegistry};

fn add_admin(reg: &SharedRegistry, email: &str) -> Result<AccountId> {
    let now = Utc::now();
    let account = Account {
        id: AccountId::generate(),
        email: email.into(),
        password_hash: hash_password("admin-pass")?,
        is_superuser: false,
        active: true,
        groups: vec![ADMINISTRATORS.to_string()],
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

#[test]
fn job_role_validation() -> Result<()> {
    let reg = SharedRegistry::new();
    let admin = add_admin(&reg, "admin@example.com")?;
    let ctx = ctx_for(&reg, admin);

    let err = org::create_role(
        &reg,
        &ctx,
        org::NewJobRole { name: "Analyst".into(), grade: "I".into(), salary: 0.0 },
    )
    .unwrap_err();
    assert_eq!(err.http_status(), 400);

    org::create_role(
        &reg,
        &ctx,
        org::NewJobRole { name: "Analyst".into(), grade: "I".into(), salary: 4200.0 },
    )?;
    // Same name is fine at another grade, duplicate pair is not.
    org::create_role(
        &reg,
        &ctx,
        org::NewJobRole { name: "Analyst".into(), grade: "II".into(), salary: 5200.0 },
    )?;
    let err = org::create_role(
        &reg,
        &ctx,
        org::NewJobRole { name: "analyst".into(), grade: "i".into(), salary: 4300.0 },
    )
    .unwrap_err();
    assert_eq!(err.http_status(), 409);
    Ok(())
}

#[test]
fn department_director_and_parent_rules() -> Result<()> {
    let reg = SharedRegistry::new();
    let admin = add_admin(&reg, "admin@example.com")?;
    let ctx = ctx_for(&reg, admin);
    let p1 = profiles::create(&reg, &ctx, new_profile(admin, "Dir"))?;

    // Deputy must differ from director.
    let err = org::create_department(
        &reg,
        &ctx,
        org::NewDepartment {
            name: "Ops".into(),
            director: p1.id,
            deputy_director: Some(p1.id),
            parent: None,
        },
    )
    .unwrap_err();
    assert_eq!(err.http_status(), 400);

    let a = org::create_department(
        &reg,
        &ctx,
        org::NewDepartment { name: "A".into(), director: p1.id, deputy_director: None, parent: None },
    )?;
    let b = org::create_department(
        &reg,
        &ctx,
        org::NewDepartment {
            name: "B".into(),
            director: p1.id,
            deputy_director: None,
            parent: Some(a.id),
        },
    )?;

    // Self-parenting is rejected.
    let err = org::update_department(
        &reg,
        &ctx,
        a.id,
        Action::PartialUpdate,
        org::DepartmentUpdate { parent: Some(a.id), ..Default::default() },
    )
    .unwrap_err();
    assert_eq!(err.http_status(), 400);

    // So is a two-step cycle through the parent chain.
    let err = org::update_department(
        &reg,
        &ctx,
        a.id,
        Action::PartialUpdate,
        org::DepartmentUpdate { parent: Some(b.id), ..Default::default() },
    )
    .unwrap_err();
    assert_eq!(err.http_status(), 400);
    Ok(())
}

#[test]
fn department_activation_transitions_are_idempotent() -> Result<()> {
    let reg = SharedRegistry::new();
    let admin = add_admin(&reg, "admin@example.com")?;
    let ctx = ctx_for(&reg, admin);
    let p1 = profiles::create(&reg, &ctx, new_profile(admin, "Dir"))?;
    let dep = org::create_department(
        &reg,
        &ctx,
        org::NewDepartment { name: "U".into(), director: p1.id, deputy_director: None, parent: None },
    )?;
    assert!(dep.active);

    let dep = org::set_department_active(&reg, &ctx, dep.id, false)?;
    assert!(!dep.active);
    // Repeating the transition is a no-op write, not an error.
    let dep = org::set_department_active(&reg, &ctx, dep.id, false)?;
    assert!(!dep.active);

    let dep = org::set_department_active(&reg, &ctx, dep.id, true)?;
    assert!(dep.active);
    let dep = org::set_department_active(&reg, &ctx, dep.id, true)?;
    assert!(dep.active);
    Ok(())
}

#[test]
fn at_most_one_primary_address_per_profile() -> Result<()> {
    let reg = SharedRegistry::new();
    seed::seed_reference_data(&reg)?;
    let admin = add_admin(&reg, "admin@example.com")?;
    let ctx = ctx_for(&reg, admin);
    let profile = profiles::create(&reg, &ctx, new_profile(admin, "Ana"))?;
    let municipality = reg.list_municipalities()[0].id;

    let addr = |primary: bool| contacts::NewAddress {
        profile: profile.id,
        is_primary: primary,
        street: "Rua A".into(),
        number: "100".into(),
        district: "Centro".into(),
        complement: None,
        municipality,
        postal_code: "60000-000".into(),
    };

    contacts::create_address(&reg, &ctx, addr(true))?;
    let err = contacts::create_address(&reg, &ctx, addr(true)).unwrap_err();
    assert_eq!(err.http_status(), 409);
    // A further non-primary address is fine.
    contacts::create_address(&reg, &ctx, addr(false))?;
    Ok(())
}

#[test]
fn contact_format_validation() -> Result<()> {
    let reg = SharedRegistry::new();
    seed::seed_reference_data(&reg)?;
    let admin = add_admin(&reg, "admin@example.com")?;
    let ctx = ctx_for(&reg, admin);
    let profile = profiles::create(&reg, &ctx, new_profile(admin, "Ana"))?;

    let err = contacts::create_phone(
        &reg,
        &ctx,
        contacts::NewPhone { profile: profile.id, number: "99999-0001".into() },
    )
    .unwrap_err();
    assert_eq!(err.http_status(), 400);

    let err = contacts::create_extra_email(
        &reg,
        &ctx,
        contacts::NewExtraEmail { profile: profile.id, email: "not-an-email".into() },
    )
    .unwrap_err();
    assert_eq!(err.http_status(), 400);

    let municipality = reg.list_municipalities()[0].id;
    let err = contacts::create_address(
        &reg,
        &ctx,
        contacts::NewAddress {
            profile: profile.id,
            is_primary: false,
            street: "Rua A".into(),
            number: "100".into(),
            district: "Centro".into(),
            complement: None,
            municipality,
            postal_code: "600-00".into(),
        },
    )
    .unwrap_err();
    assert_eq!(err.http_status(), 400);
    Ok(())
}

#[test]
fn one_profile_per_account() -> Result<()> {
    let reg = SharedRegistry::new();
    let admin = add_admin(&reg, "admin@example.com")?;
    let ctx = ctx_for(&reg, admin);
    profiles::create(&reg, &ctx, new_profile(admin, "Ana"))?;
    let err = profiles::create(&reg, &ctx, new_profile(admin, "Outra")).unwrap_err();
    assert_eq!(err.http_status(), 409);
    Ok(())
}

#[test]
fn profile_updates_validate_references() -> Result<()> {
    let reg = SharedRegistry::new();
    let admin = add_admin(&reg, "admin@example.com")?;
    let ctx = ctx_for(&reg, admin);
    let profile = profiles::create(&reg, &ctx, new_profile(admin, "Ana"))?;

    let err = profiles::update(
        &reg,
        &ctx,
        profile.id,
        Action::PartialUpdate,
        profiles::ProfileUpdate {
            roles: Some(vec![staffbase::model::RoleId::generate()]),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert_eq!(err.http_status(), 400);

    let err = profiles::update(
        &reg,
        &ctx,
        profile.id,
        Action::PartialUpdate,
        profiles::ProfileUpdate { cpf: Some("12345678909".into()), ..Default::default() },
    )
    .unwrap_err();
    assert_eq!(err.http_status(), 400);
    Ok(())
}
