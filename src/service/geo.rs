//! Brazilian geographic reference data. Public, read-only; the policy gate
//! still runs so the surface stays uniform with every other resource.

use crate::error::AppResult;
use crate::identity::RequestContext;
use crate::model::{FederalState, Municipality, MunicipalityId, StateId};
use crate::policy::{Action, ResourceKind, TargetRef};
use crate::store::SharedRegistry;

use super::gate;

pub fn list_states(reg: &SharedRegistry, ctx: &RequestContext) -> AppResult<Vec<FederalState>> {
    gate::require_collection(ctx, ResourceKind::FederalState, Action::List)?;
    Ok(reg.list_states())
}

pub fn retrieve_state(reg: &SharedRegistry, ctx: &RequestContext, id: StateId) -> AppResult<FederalState> {
    gate::require_eligible(ctx, ResourceKind::FederalState, Action::Retrieve)?;
    let state = reg.get_state(id).ok_or_else(gate::not_found)?;
    gate::require_object(ctx, ResourceKind::FederalState, Action::Retrieve, &TargetRef::unowned())?;
    Ok(state)
}

pub fn list_municipalities(reg: &SharedRegistry, ctx: &RequestContext) -> AppResult<Vec<Municipality>> {
    gate::require_collection(ctx, ResourceKind::Municipality, Action::List)?;
    Ok(reg.list_municipalities())
}

pub fn retrieve_municipality(
    reg: &SharedRegistry,
    ctx: &RequestContext,
    id: MunicipalityId,
) -> AppResult<Municipality> {
    gate::require_eligible(ctx, ResourceKind::Municipality, Action::Retrieve)?;
    let municipality = reg.get_municipality(id).ok_or_else(gate::not_found)?;
    gate::require_object(ctx, ResourceKind::Municipality, Action::Retrieve, &TargetRef::unowned())?;
    Ok(municipality)
}
