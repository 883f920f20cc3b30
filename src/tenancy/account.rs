use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::slug::TenantSlug;
use crate::entitlements::{is_active, PlanKind};

/// Tenant record as the platform sees it: slug, assigned plan, and the
/// subscription expiry. Accounts are created at onboarding, updated on
/// purchase or renewal, and never hard-deleted; lapse is a derived state,
/// not a row deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentAccount {
    pub slug: TenantSlug,
    pub plan: Option<PlanKind>,
    pub subscription_expires_at: Option<DateTime<Utc>>,
}

/// Derived subscription standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStanding {
    NeverSubscribed,
    Active,
    Lapsed,
}

impl AgentAccount {
    pub fn onboard(slug: TenantSlug) -> Self {
        Self {
            slug,
            plan: None,
            subscription_expires_at: None,
        }
    }

    /// Record a purchase or renewal, moving the account to (or keeping it
    /// in) the active state until `expires_at`.
    pub fn assign_plan(&mut self, plan: PlanKind, expires_at: DateTime<Utc>) {
        self.plan = Some(plan);
        self.subscription_expires_at = Some(expires_at);
    }

    pub fn standing(&self, now: DateTime<Utc>) -> SubscriptionStanding {
        match self.plan {
            None => SubscriptionStanding::NeverSubscribed,
            Some(_) if is_active(self.subscription_expires_at, now) => {
                SubscriptionStanding::Active
            }
            Some(_) => SubscriptionStanding::Lapsed,
        }
    }

    /// Plan whose entitlements actually apply right now. Lapsed and
    /// never-subscribed accounts fall back to the lowest tier.
    pub fn effective_plan(&self, now: DateTime<Utc>) -> PlanKind {
        match self.standing(now) {
            SubscriptionStanding::Active => self.plan.unwrap_or(PlanKind::lowest()),
            _ => PlanKind::lowest(),
        }
    }
}
