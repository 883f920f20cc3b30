//! End-to-end routing scenarios: requests enter through the real router with
//! the tenant-rewrite middleware in place, driven by Host headers the way a
//! browser would send them.

use std::sync::Arc;

use agentsite::routes::platform_router;
use agentsite::tenancy::TenantResolver;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

const PRIMARY_DOMAIN: &str = "youragent.in";

fn build_router() -> Router {
    let resolver = Arc::new(TenantResolver::new(PRIMARY_DOMAIN));
    platform_router(resolver)
}

async fn get(router: Router, host: &str, path: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(path)
                .header("host", host)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    let status = response.status();
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    let payload = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, payload)
}

#[tokio::test]
async fn tenant_subdomain_serves_rewritten_page() {
    let (status, payload) = get(build_router(), "acme.youragent.in", "/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload.get("tenant").and_then(Value::as_str), Some("acme"));
    assert_eq!(
        payload.get("page").and_then(Value::as_str),
        Some("/dashboard")
    );
}

#[tokio::test]
async fn tenant_subdomain_with_port_is_recognized() {
    let (status, payload) = get(build_router(), "acme.youragent.in:8080", "/contact").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload.get("tenant").and_then(Value::as_str), Some("acme"));
}

#[tokio::test]
async fn bare_primary_domain_is_not_rewritten() {
    let (status, _) = get(build_router(), "youragent.in", "/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reserved_labels_are_not_rewritten() {
    for label in ["www", "app", "admin"] {
        let host = format!("{label}.youragent.in");
        let (status, _) = get(build_router(), &host, "/").await;
        assert_eq!(status, StatusCode::NOT_FOUND, "label {label}");
    }
}

#[tokio::test]
async fn api_namespace_bypasses_tenant_resolution() {
    let (status, payload) = get(build_router(), "acme.youragent.in", "/api/v1/plans").await;

    assert_eq!(status, StatusCode::OK);
    assert!(payload.is_array(), "catalog served, not a tenant page");
}

#[tokio::test]
async fn well_known_files_bypass_tenant_resolution() {
    for path in ["/favicon.ico", "/robots.txt", "/sitemap.xml"] {
        let (status, _) = get(build_router(), "acme.youragent.in", path).await;
        // No rewrite means no /:slug match; nothing serves these here.
        assert_eq!(status, StatusCode::NOT_FOUND, "path {path}");
    }
}

#[tokio::test]
async fn foreign_domain_passes_through() {
    let (status, _) = get(build_router(), "acme.example.com", "/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn direct_path_addressing_still_works() {
    let (status, payload) = get(build_router(), "youragent.in", "/acme/listings").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload.get("tenant").and_then(Value::as_str), Some("acme"));
    assert_eq!(
        payload.get("page").and_then(Value::as_str),
        Some("/listings")
    );
}

#[tokio::test]
async fn tenant_root_path_serves_home_page() {
    let (status, payload) = get(build_router(), "acme.youragent.in", "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload.get("tenant").and_then(Value::as_str), Some("acme"));
    assert_eq!(payload.get("page").and_then(Value::as_str), Some("/"));
}

#[tokio::test]
async fn malformed_tenant_label_yields_not_found() {
    // Slugs are lowercase; an uppercase label rewrites but fails validation.
    let (status, payload) = get(build_router(), "Acme.youragent.in", "/home").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(payload.get("error").is_some());
}

#[tokio::test]
async fn nested_subdomain_uses_leftmost_label() {
    let (status, payload) = get(build_router(), "acme.sites.youragent.in", "/about").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload.get("tenant").and_then(Value::as_str), Some("acme"));
    assert_eq!(payload.get("page").and_then(Value::as_str), Some("/about"));
}
