use chrono::{DateTime, Utc};

use super::plan::PlanKind;

/// True iff `expiry` is set and strictly later than `now`. A `None` expiry
/// covers both never-subscribed and lapsed tenants.
pub fn is_active(expiry: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    matches!(expiry, Some(expires_at) if expires_at > now)
}

/// Advisory check evaluated before allowing a new listing. The persistence
/// collaborator must re-check under its own transaction at write time; two
/// concurrent requests can both pass here (check-then-act).
pub fn within_listing_limit(current_count: u32, plan: PlanKind) -> bool {
    plan.entitlements().listing_limit.admits(current_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn null_expiry_is_never_active() {
        assert!(!is_active(None, Utc::now()));
    }

    #[test]
    fn past_expiry_is_inactive() {
        let now = Utc::now();
        assert!(!is_active(Some(now - Duration::seconds(1)), now));
        assert!(!is_active(Some(now), now));
    }

    #[test]
    fn future_expiry_is_active() {
        let now = Utc::now();
        assert!(is_active(Some(now + Duration::seconds(1)), now));
    }

    #[test]
    fn starter_limit_boundary() {
        assert!(within_listing_limit(0, PlanKind::Starter));
        assert!(within_listing_limit(24, PlanKind::Starter));
        assert!(!within_listing_limit(25, PlanKind::Starter));
        assert!(!within_listing_limit(26, PlanKind::Starter));
    }

    #[test]
    fn pro_admits_any_count() {
        assert!(within_listing_limit(0, PlanKind::Pro));
        assert!(within_listing_limit(10_000, PlanKind::Pro));
        assert!(within_listing_limit(u32::MAX, PlanKind::Pro));
    }
}
