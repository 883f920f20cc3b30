use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of subscription plans. Ordering follows tier rank so the
/// lowest tier is also `min()`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    Starter,
    Growth,
    Pro,
}

/// Visual templates a tenant site can be composed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Classic,
    Modern,
    Skyline,
    Luxe,
}

/// Cap on concurrently published listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingLimit {
    Limited(u32),
    Unlimited,
}

impl ListingLimit {
    /// True iff one more listing may be created at `current_count`.
    pub fn admits(&self, current_count: u32) -> bool {
        match self {
            ListingLimit::Limited(limit) => current_count < *limit,
            ListingLimit::Unlimited => true,
        }
    }
}

/// Immutable entitlement record for a plan. The table lives in code; a
/// change here ships as a deployment, never a data migration. There is no
/// per-tenant override layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entitlements {
    pub listing_limit: ListingLimit,
    pub templates: &'static [TemplateKind],
    pub priority_support: bool,
    pub exclusive_deals: bool,
    pub marketing_support: bool,
    pub seo_tools: bool,
    pub analytics: bool,
}

impl Entitlements {
    pub fn allows_template(&self, template: TemplateKind) -> bool {
        self.templates.contains(&template)
    }
}

impl PlanKind {
    pub const ALL: [PlanKind; 3] = [PlanKind::Starter, PlanKind::Growth, PlanKind::Pro];

    /// Tier applied to tenants with no active subscription.
    pub fn lowest() -> Self {
        PlanKind::Starter
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanKind::Starter => "starter",
            PlanKind::Growth => "growth",
            PlanKind::Pro => "pro",
        }
    }

    pub fn entitlements(&self) -> Entitlements {
        match self {
            PlanKind::Starter => Entitlements {
                listing_limit: ListingLimit::Limited(25),
                templates: &[TemplateKind::Classic],
                priority_support: false,
                exclusive_deals: false,
                marketing_support: false,
                seo_tools: false,
                analytics: false,
            },
            PlanKind::Growth => Entitlements {
                listing_limit: ListingLimit::Limited(100),
                templates: &[TemplateKind::Classic, TemplateKind::Modern, TemplateKind::Skyline],
                priority_support: true,
                exclusive_deals: false,
                marketing_support: true,
                seo_tools: true,
                analytics: false,
            },
            PlanKind::Pro => Entitlements {
                listing_limit: ListingLimit::Unlimited,
                templates: &[
                    TemplateKind::Classic,
                    TemplateKind::Modern,
                    TemplateKind::Skyline,
                    TemplateKind::Luxe,
                ],
                priority_support: true,
                exclusive_deals: true,
                marketing_support: true,
                seo_tools: true,
                analytics: true,
            },
        }
    }
}

impl fmt::Display for PlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised for plan identifiers outside the closed set. User-facing callers
/// are expected to substitute the lowest tier instead of failing the flow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown plan kind '{0}'")]
pub struct InvalidPlanKind(pub String);

impl FromStr for PlanKind {
    type Err = InvalidPlanKind;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "starter" => Ok(PlanKind::Starter),
            "growth" => Ok(PlanKind::Growth),
            "pro" => Ok(PlanKind::Pro),
            _ => Err(InvalidPlanKind(raw.to_string())),
        }
    }
}
