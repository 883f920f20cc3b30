use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::HOST;
use axum::http::Uri;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use super::resolver::{Resolution, TenantResolver};

/// Per-request middleware applying the tenant resolver. When the host
/// carries a non-reserved subdomain the request URI is rewritten in place
/// so downstream routes see `/<label><path>`; everything else flows through
/// untouched. This never fails a request.
pub async fn rewrite_tenant_request(
    State(resolver): State<Arc<TenantResolver>>,
    mut request: Request,
    next: Next,
) -> Response {
    let resolution = {
        let host = request
            .headers()
            .get(HOST)
            .and_then(|value| value.to_str().ok());
        resolver.resolve(host, request.uri().path())
    };

    if let Resolution::Tenant {
        label,
        mut rewritten_path,
    } = resolution
    {
        // A root-path request rewrites to "/<label>/"; the router treats
        // "/<label>" as the tenant home, so drop the trailing slash.
        if rewritten_path.len() > 1 && rewritten_path.ends_with('/') {
            rewritten_path.truncate(rewritten_path.len() - 1);
        }

        let rewritten = match request.uri().query() {
            Some(query) => format!("{rewritten_path}?{query}"),
            None => rewritten_path,
        };
        // An unparseable rewrite degrades to pass-through.
        if let Ok(uri) = rewritten.parse::<Uri>() {
            debug!(tenant = %label, path = %uri, "serving tenant subdomain");
            *request.uri_mut() = uri;
        }
    }

    next.run(request).await
}
