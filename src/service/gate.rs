//! The authorization gate the services call before any data access.
//!
//! Collection actions are a single statement evaluation. Object actions run
//! in two phases: an eligibility pre-check that rejects principals no
//! statement could ever grant (before any fetch, so nothing about the
//! object's existence is revealed), then a full evaluation against the
//! fetched target. Visibility-scoped fetches go through the scoper's filter,
//! which makes an out-of-scope object indistinguishable from an absent one.

use crate::error::{AppError, AppResult};
use crate::identity::RequestContext;
use crate::policy::{
    evaluate, feasible, scope_for, supports, Action, Decision, ResourceKind, ScopeFilter, TargetRef,
};

/// Deny mapped to the error taxonomy: anonymous principals get an
/// authentication failure, authenticated ones a forbidden.
fn denied(ctx: &RequestContext) -> AppError {
    if ctx.principal.is_authenticated() {
        AppError::forbidden("forbidden", "you do not have permission to perform this action")
    } else {
        AppError::auth("authentication_required", "authentication required")
    }
}

/// The uniform absence error. Out-of-scope and genuinely missing objects
/// must produce byte-identical failures.
pub fn not_found() -> AppError {
    AppError::not_found("not_found", "not found")
}

/// The visibility filter for this request, keyed on the principal's own
/// profile.
pub fn scope(ctx: &RequestContext, kind: ResourceKind) -> ScopeFilter {
    scope_for(&ctx.principal, kind, ctx.profile)
}

/// Gate a collection-level action (list, create). Conditioned statements do
/// not apply here; they need a concrete target.
pub fn require_collection(ctx: &RequestContext, kind: ResourceKind, action: Action) -> AppResult<()> {
    if !supports(kind, action) {
        return Err(AppError::unsupported("method_not_allowed", "unsupported operation"));
    }
    match evaluate(&ctx.principal, action, kind, None) {
        Decision::Allow => Ok(()),
        Decision::Deny => Err(denied(ctx)),
    }
}

/// Object-action phase one: selector-level eligibility, before the fetch.
pub fn require_eligible(ctx: &RequestContext, kind: ResourceKind, action: Action) -> AppResult<()> {
    if !supports(kind, action) {
        return Err(AppError::unsupported("method_not_allowed", "unsupported operation"));
    }
    match feasible(&ctx.principal, action, kind) {
        Decision::Allow => Ok(()),
        Decision::Deny => Err(denied(ctx)),
    }
}

/// Object-action phase two: full statement evaluation against the target.
pub fn require_object(
    ctx: &RequestContext,
    kind: ResourceKind,
    action: Action,
    target: &TargetRef,
) -> AppResult<()> {
    match evaluate(&ctx.principal, action, kind, Some(target)) {
        Decision::Allow => Ok(()),
        Decision::Deny => Err(denied(ctx)),
    }
}
