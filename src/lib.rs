//! Platform core for the multi-tenant agent website builder.
//!
//! Two concerns live here: resolving which tenant an inbound request is
//! addressed to (subdomain of the primary domain), and gating what a
//! tenant's subscription plan entitles it to. Persistence, auth providers,
//! media storage, payments, and template rendering are external
//! collaborators and stay out of this crate.

pub mod config;
pub mod entitlements;
pub mod error;
pub mod routes;
pub mod telemetry;
pub mod tenancy;
