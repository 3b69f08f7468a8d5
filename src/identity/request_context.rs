use crate::error::{AppError, AppResult};
use crate::model::{AccountId, ProfileId};

use super::principal::Principal;

/// Everything the service layer needs to know about one request's actor: the
/// resolved principal and, when one exists, the profile linked to it.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub principal: Principal,
    pub profile: Option<ProfileId>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        RequestContext::default()
    }

    /// The acting account, for stamping `modified_by` on writes. Mutation
    /// entry points call this, so an anonymous principal can never reach a
    /// write path without tripping here first.
    pub fn actor(&self) -> AppResult<AccountId> {
        self.principal
            .account
            .ok_or_else(|| AppError::auth("authentication_required", "authentication required"))
    }
}
