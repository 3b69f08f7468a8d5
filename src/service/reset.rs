//! Password-reset token issue and inventory. Issuing is public self-service;
//! delivery of the token is someone else's concern, so the created record
//! (token included) is the response, the way the original API serialized it.
//! The inventory listing is a superuser diagnostic.

use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::identity::{generate_token, RequestContext};
use crate::model::{PasswordResetToken, TokenId};
use crate::policy::{Action, ResourceKind};
use crate::store::SharedRegistry;

use super::gate;

const KIND: ResourceKind = ResourceKind::PasswordResetToken;

#[derive(Debug, Deserialize)]
pub struct NewResetRequest {
    pub email: String,
}

pub fn create(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    input: NewResetRequest,
) -> AppResult<PasswordResetToken> {
    gate::require_collection(ctx, KIND, Action::Create)?;
    let account = reg
        .find_account_by_email(&input.email)
        .ok_or_else(|| AppError::user("unknown_email", "no account with this e-mail"))?;
    let token = PasswordResetToken {
        id: TokenId::generate(),
        account: account.id,
        token: generate_token(),
        active: true,
        created_at: Utc::now(),
    };
    reg.insert_reset_token(token.clone())?;
    info!(account = %account.email, "password-reset token issued");
    Ok(token)
}

pub fn list(reg: &SharedRegistry, ctx: &RequestContext) -> AppResult<Vec<PasswordResetToken>> {
    gate::require_collection(ctx, KIND, Action::List)?;
    Ok(reg.list_reset_tokens())
}
