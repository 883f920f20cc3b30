//! Subdomain-to-tenant routing.
//!
//! The resolver is a pure string transformation run on every request;
//! whether a resolved label names an onboarded tenant is checked later by
//! the page collaborator against storage.

pub mod account;
pub mod middleware;
pub mod resolver;
pub mod slug;

pub use account::{AgentAccount, SubscriptionStanding};
pub use middleware::rewrite_tenant_request;
pub use resolver::{Resolution, TenantResolver};
pub use slug::{SlugError, TenantSlug};
