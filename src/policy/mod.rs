//! Access-policy engine: declarative allow statements per resource kind,
//! evaluated per request, plus the queryset scoper that narrows collections
//! to what a principal may see.
//!
//! Statements are process-wide constants; evaluation is a pure OR over the
//! matching statements, so statement order never changes a decision. There is
//! no explicit deny: absence of a matching allow is a deny.

pub mod action;
pub mod statement;
pub mod registry;
pub mod evaluator;
pub mod scope;

// Re-exports for a thin public surface
pub use action::{Action, ActionSpec};
pub use statement::{ConditionKey, Selector, Statement, TargetRef};
pub use registry::{descriptor, supports, ResourceDescriptor, ResourceKind};
pub use evaluator::{evaluate, evaluate_statements, feasible, Decision};
pub use scope::{scope_for, ScopeFilter};
