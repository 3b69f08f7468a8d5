//! Group inventory. The project's groups are fixed; listing reports them
//! with their current membership counts, administrators only.

use serde::Serialize;

use crate::error::AppResult;
use crate::identity::RequestContext;
use crate::model::PROJECT_GROUPS;
use crate::policy::{Action, ResourceKind};
use crate::store::SharedRegistry;

use super::gate;

#[derive(Debug, Serialize)]
pub struct GroupView {
    pub name: String,
    pub members: usize,
}

pub fn list(reg: &SharedRegistry, ctx: &RequestContext) -> AppResult<Vec<GroupView>> {
    gate::require_collection(ctx, ResourceKind::Group, Action::List)?;
    let accounts = reg.list_accounts();
    Ok(PROJECT_GROUPS
        .iter()
        .map(|g| GroupView {
            name: g.to_string(),
            members: accounts.iter().filter(|a| a.in_group(g)).count(),
        })
        .collect())
}
