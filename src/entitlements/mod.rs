//! Plan catalog and subscription gating.
//!
//! Entitlements are a static mapping from a closed plan enumeration to
//! immutable records; nothing here reads or writes storage. The gate is
//! consulted before mutating actions, with final enforcement left to the
//! persistence collaborator.

pub mod plan;
pub mod subscription;

pub use plan::{Entitlements, InvalidPlanKind, ListingLimit, PlanKind, TemplateKind};
pub use subscription::{is_active, within_listing_limit};
