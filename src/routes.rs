use std::str::FromStr;
use std::sync::Arc;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower::Layer;

use crate::entitlements::{is_active, within_listing_limit, Entitlements, PlanKind};
use crate::tenancy::{rewrite_tenant_request, TenantResolver, TenantSlug};

/// Platform routes with the tenant-rewrite middleware wrapped around them.
///
/// The middleware must run before routing so that `acme.<primary>/dashboard`
/// matches the `/:slug/*page` route; wrapping the routed set as a fallback
/// service gives the rewrite that position.
pub fn platform_router(resolver: Arc<TenantResolver>) -> Router {
    let routes = Router::new()
        .route("/api/v1/plans", get(plan_catalog))
        .route("/api/v1/plans/:plan", get(plan_detail))
        .route("/api/v1/listings/check", post(listing_check))
        .route("/:slug", get(tenant_home))
        .route("/:slug/*page", get(tenant_page));

    let rewrite = middleware::from_fn_with_state(resolver, rewrite_tenant_request);
    Router::new().fallback_service(rewrite.layer(routes))
}

#[derive(Debug, Serialize)]
pub struct PlanView {
    pub plan: PlanKind,
    pub entitlements: Entitlements,
}

#[derive(Debug, Deserialize)]
pub struct ListingCheckRequest {
    /// Plan identifier as stored for the tenant. Unknown or missing values
    /// degrade to the lowest tier instead of failing the flow.
    #[serde(default)]
    pub plan: Option<String>,
    pub current_count: u32,
    #[serde(default)]
    pub subscription_expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct ListingCheckResponse {
    pub effective_plan: PlanKind,
    pub subscription_active: bool,
    pub entitlements: Entitlements,
    /// Advisory verdict; persistence re-checks at write time.
    pub allowed: bool,
}

/// Routing view returned for a tenant page request. Rendering the actual
/// profile belongs to the template layer; this surface reports which tenant
/// and logical page the request resolved to.
#[derive(Debug, Serialize)]
pub struct SitePageView {
    pub tenant: TenantSlug,
    pub page: String,
}

pub(crate) async fn plan_catalog() -> Json<Vec<PlanView>> {
    let catalog = PlanKind::ALL
        .iter()
        .map(|plan| PlanView {
            plan: *plan,
            entitlements: plan.entitlements(),
        })
        .collect();
    Json(catalog)
}

pub(crate) async fn plan_detail(Path(plan): Path<String>) -> Response {
    match PlanKind::from_str(&plan) {
        Ok(plan) => (
            StatusCode::OK,
            Json(PlanView {
                plan,
                entitlements: plan.entitlements(),
            }),
        )
            .into_response(),
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn listing_check(
    Json(request): Json<ListingCheckRequest>,
) -> Json<ListingCheckResponse> {
    Json(evaluate_listing_check(request, Utc::now()))
}

fn evaluate_listing_check(request: ListingCheckRequest, now: DateTime<Utc>) -> ListingCheckResponse {
    let assigned = request
        .plan
        .as_deref()
        .and_then(|raw| PlanKind::from_str(raw).ok());

    let subscription_active = is_active(request.subscription_expires_at, now);
    let effective_plan = match assigned {
        Some(plan) if subscription_active => plan,
        _ => PlanKind::lowest(),
    };

    ListingCheckResponse {
        effective_plan,
        subscription_active,
        entitlements: effective_plan.entitlements(),
        allowed: within_listing_limit(request.current_count, effective_plan),
    }
}

pub(crate) async fn tenant_home(Path(slug): Path<String>) -> Response {
    serve_site_page(slug, String::new())
}

pub(crate) async fn tenant_page(Path((slug, page)): Path<(String, String)>) -> Response {
    serve_site_page(slug, page)
}

fn serve_site_page(slug: String, page: String) -> Response {
    match TenantSlug::parse(slug) {
        Ok(tenant) => {
            let view = SitePageView {
                tenant,
                page: format!("/{page}"),
            };
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn check(
        plan: Option<&str>,
        current_count: u32,
        expires_in: Option<Duration>,
    ) -> ListingCheckResponse {
        let now = Utc::now();
        evaluate_listing_check(
            ListingCheckRequest {
                plan: plan.map(str::to_string),
                current_count,
                subscription_expires_at: expires_in.map(|delta| now + delta),
            },
            now,
        )
    }

    #[test]
    fn active_pro_subscription_is_never_capped() {
        let response = check(Some("pro"), 5_000, Some(Duration::days(30)));
        assert_eq!(response.effective_plan, PlanKind::Pro);
        assert!(response.subscription_active);
        assert!(response.allowed);
    }

    #[test]
    fn starter_at_limit_is_denied() {
        let response = check(Some("starter"), 25, Some(Duration::days(30)));
        assert_eq!(response.effective_plan, PlanKind::Starter);
        assert!(!response.allowed);
    }

    #[test]
    fn lapsed_subscription_drops_to_lowest_tier() {
        let response = check(Some("pro"), 30, Some(Duration::days(-1)));
        assert_eq!(response.effective_plan, PlanKind::Starter);
        assert!(!response.subscription_active);
        assert!(!response.allowed);
    }

    #[test]
    fn unknown_plan_degrades_to_lowest_tier() {
        let response = check(Some("platinum"), 0, Some(Duration::days(30)));
        assert_eq!(response.effective_plan, PlanKind::Starter);
        assert!(response.allowed);
    }

    #[test]
    fn never_subscribed_tenant_gets_lowest_tier() {
        let response = check(None, 10, None);
        assert_eq!(response.effective_plan, PlanKind::Starter);
        assert!(!response.subscription_active);
        assert!(response.allowed);
    }
}
