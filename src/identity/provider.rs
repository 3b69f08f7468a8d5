//! Login and per-request principal resolution against the account registry.

use serde::Deserialize;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::store::SharedRegistry;
use crate::tprintln;

use super::password::verify_password;
use super::principal::Principal;
use super::request_context::RequestContext;
use super::session::{Session, SessionManager};

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub session: Session,
}

/// Verify credentials and issue a session. The same error is returned for an
/// unknown email, a wrong password and an inactive account, so a caller
/// cannot probe which of the three it hit.
pub fn login(reg: &SharedRegistry, sm: &SessionManager, req: &LoginRequest) -> AppResult<LoginResponse> {
    let denied = || AppError::auth("invalid_credentials", "invalid email or password");
    let account = reg.find_account_by_email(&req.email).ok_or_else(denied)?;
    if !account.active || !verify_password(&account.password_hash, &req.password) {
        return Err(denied());
    }
    reg.touch_last_login(account.id);
    let session = sm.issue(account.id);
    info!(account = %account.email, "login");
    Ok(LoginResponse { session })
}

/// Build the principal for one request from a session token. Absent, invalid
/// or expired tokens yield the anonymous principal; so does a token whose
/// account has since been deactivated. Group memberships are read fresh from
/// the account record, not from the session.
pub fn resolve(reg: &SharedRegistry, sm: &SessionManager, token: Option<&str>) -> Principal {
    let Some(token) = token else {
        return Principal::anonymous();
    };
    let Some(account_id) = sm.validate(token) else {
        return Principal::anonymous();
    };
    match reg.get_account(account_id) {
        Some(account) if account.active => Principal {
            account: Some(account.id),
            superuser: account.is_superuser,
            groups: account.groups.clone(),
        },
        _ => {
            tprintln!("resolve: live token for missing/inactive account {:?}", account_id);
            Principal::anonymous()
        }
    }
}

/// Resolve the full request context: the principal plus its own profile,
/// which the queryset scoper keys ownership filters on.
pub fn resolve_context(
    reg: &SharedRegistry,
    sm: &SessionManager,
    token: Option<&str>,
) -> RequestContext {
    let principal = resolve(reg, sm, token);
    let profile = principal.account.and_then(|id| reg.find_profile_by_account(id));
    RequestContext { principal, profile }
}
