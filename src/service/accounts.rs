//! Account operations. Listing and creation are administrative; the
//! self-service operations (retrieve, e-mail and password changes) are gated
//! by the is-self condition, and activation transitions carry the inverse
//! condition so an administrator can never flip their own account.

use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::identity::{hash_password, RequestContext};
use crate::model::{valid_email, Account, AccountId, AccountView, PROJECT_GROUPS};
use crate::policy::{Action, ResourceKind, TargetRef};
use crate::store::SharedRegistry;

use super::gate;

const KIND: ResourceKind = ResourceKind::Account;

#[derive(Debug, Deserialize)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub groups: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailChange {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordChange {
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct GroupChange {
    pub groups: Vec<String>,
}

fn check_email(email: &str) -> AppResult<()> {
    if valid_email(email) {
        Ok(())
    } else {
        Err(AppError::user("invalid_email", "malformed e-mail address"))
    }
}

fn check_password(password: &str) -> AppResult<()> {
    if password.len() < 8 {
        Err(AppError::user("weak_password", "password must have at least 8 characters"))
    } else {
        Ok(())
    }
}

fn check_groups(groups: &[String]) -> AppResult<()> {
    for g in groups {
        if !PROJECT_GROUPS.iter().any(|p| p.eq_ignore_ascii_case(g)) {
            return Err(AppError::UserInput {
                code: "unknown_group".into(),
                message: format!("unknown group '{g}'"),
            });
        }
    }
    Ok(())
}

/// Fetch-then-authorize for object-level account actions. Accounts are not
/// visibility-scoped: a visible-but-denied action surfaces as forbidden.
fn fetch_for(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    id: AccountId,
    action: Action,
) -> AppResult<Account> {
    gate::require_eligible(ctx, KIND, action)?;
    let account = reg.get_account(id).ok_or_else(gate::not_found)?;
    gate::require_object(ctx, KIND, action, &TargetRef::account(id))?;
    Ok(account)
}

pub fn list(reg: &SharedRegistry, ctx: &RequestContext) -> AppResult<Vec<AccountView>> {
    gate::require_collection(ctx, KIND, Action::List)?;
    Ok(reg.list_accounts().iter().map(AccountView::from).collect())
}

pub fn create(reg: &SharedRegistry, ctx: &RequestContext, input: NewAccount) -> AppResult<AccountView> {
    gate::require_collection(ctx, KIND, Action::Create)?;
    check_email(&input.email)?;
    check_password(&input.password)?;
    check_groups(&input.groups)?;
    let actor = ctx.actor()?;
    let now = Utc::now();
    let account = Account {
        id: AccountId::generate(),
        email: input.email,
        password_hash: hash_password(&input.password)?,
        is_superuser: false,
        active: true,
        groups: input.groups,
        last_login: None,
        created_at: now,
        modified_at: now,
        modified_by: Some(actor),
    };
    let view = AccountView::from(&account);
    reg.insert_account(account)?;
    info!(email = %view.email, "account created");
    Ok(view)
}

pub fn retrieve(reg: &SharedRegistry, ctx: &RequestContext, id: AccountId) -> AppResult<AccountView> {
    let account = fetch_for(reg, ctx, id, Action::Retrieve)?;
    Ok(AccountView::from(&account))
}

/// Update and partial update both carry the e-mail; the remaining mutable
/// attributes have their own transitions.
pub fn update(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    id: AccountId,
    action: Action,
    input: EmailChange,
) -> AppResult<AccountView> {
    fetch_for(reg, ctx, id, action)?;
    check_email(&input.email)?;
    let account = reg.set_account_email(id, input.email, ctx.actor()?)?;
    Ok(AccountView::from(&account))
}

pub fn change_email(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    id: AccountId,
    input: EmailChange,
) -> AppResult<AccountView> {
    fetch_for(reg, ctx, id, Action::ChangeEmail)?;
    check_email(&input.email)?;
    let account = reg.set_account_email(id, input.email, ctx.actor()?)?;
    Ok(AccountView::from(&account))
}

pub fn change_password(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    id: AccountId,
    input: PasswordChange,
) -> AppResult<()> {
    fetch_for(reg, ctx, id, Action::ChangePassword)?;
    check_password(&input.password)?;
    reg.set_account_password(id, hash_password(&input.password)?, ctx.actor()?)?;
    Ok(())
}

pub fn change_group(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    id: AccountId,
    input: GroupChange,
) -> AppResult<AccountView> {
    fetch_for(reg, ctx, id, Action::ChangeGroup)?;
    check_groups(&input.groups)?;
    let account = reg.set_account_groups(id, input.groups, ctx.actor()?)?;
    Ok(AccountView::from(&account))
}

/// Activate/deactivate transition. Idempotent at the data level; the gate's
/// is-other condition rejects the principal's own account.
pub fn set_active(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    id: AccountId,
    active: bool,
) -> AppResult<AccountView> {
    let action = if active { Action::Activate } else { Action::Deactivate };
    fetch_for(reg, ctx, id, action)?;
    let account = reg.set_account_active(id, active, ctx.actor()?)?;
    info!(email = %account.email, active, "account activation changed");
    Ok(AccountView::from(&account))
}

/// Public completion of the password-reset flow: the token, not the session,
/// is the credential here. Consuming the token deactivates it.
pub fn change_password_after_reset(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    id: AccountId,
    token: &str,
    input: PasswordChange,
) -> AppResult<()> {
    gate::require_eligible(ctx, KIND, Action::ChangePasswordAfterReset)?;
    reg.get_account(id).ok_or_else(gate::not_found)?;
    gate::require_object(ctx, KIND, Action::ChangePasswordAfterReset, &TargetRef::account(id))?;
    check_password(&input.password)?;
    reg.consume_reset_token(id, token, hash_password(&input.password)?)?;
    info!(account = ?id, "password reset completed");
    Ok(())
}
