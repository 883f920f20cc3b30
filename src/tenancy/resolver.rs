use serde::Serialize;

/// Subdomain labels that must never be treated as a tenant identifier.
pub const RESERVED_LABELS: [&str; 4] = ["", "www", "app", "admin"];

/// Path prefixes served by the platform itself; requests under these bypass
/// tenant resolution regardless of hostname.
pub const RESERVED_PATH_PREFIXES: [&str; 5] = ["/assets", "/api", "/health", "/ready", "/metrics"];

/// Well-known files that crawlers and browsers request against any host.
pub const RESERVED_FILES: [&str; 3] = ["/favicon.ico", "/robots.txt", "/sitemap.xml"];

/// Maps an inbound request's host header to a tenant label and rewrites the
/// logical path so a single page-template set serves every tenant.
///
/// Resolution is a pure string transformation: no lookup happens here, and
/// whether the label actually names an onboarded tenant is for the page
/// collaborator to decide. Anything the resolver cannot place falls through
/// as a pass-through, never an error.
#[derive(Debug, Clone)]
pub struct TenantResolver {
    primary_domain: String,
}

/// Outcome of resolving one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    /// Serve the request as-is.
    PassThrough,
    /// Serve the request as if the path were `rewritten_path`, on behalf of
    /// the tenant identified by `label`.
    Tenant { label: String, rewritten_path: String },
}

impl Resolution {
    pub fn is_pass_through(&self) -> bool {
        matches!(self, Resolution::PassThrough)
    }
}

impl TenantResolver {
    pub fn new(primary_domain: impl Into<String>) -> Self {
        Self {
            primary_domain: primary_domain.into(),
        }
    }

    pub fn primary_domain(&self) -> &str {
        &self.primary_domain
    }

    /// Resolve a request given its host header (may carry a port) and path.
    pub fn resolve(&self, host: Option<&str>, path: &str) -> Resolution {
        if is_reserved_path(path) {
            return Resolution::PassThrough;
        }

        let Some(host) = host else {
            return Resolution::PassThrough;
        };

        match self.candidate_label(host) {
            Some(label) if !is_reserved_label(&label) => {
                let rewritten_path = format!("/{label}{path}");
                Resolution::Tenant {
                    label,
                    rewritten_path,
                }
            }
            _ => Resolution::PassThrough,
        }
    }

    /// Extract the leftmost subdomain label relative to the primary domain,
    /// or `None` when the host does not belong to it. A host exactly equal
    /// to the primary domain yields the empty label, which is reserved.
    fn candidate_label(&self, host: &str) -> Option<String> {
        let host = strip_port(host);

        if host == self.primary_domain {
            return Some(String::new());
        }

        let remainder = host
            .strip_suffix(self.primary_domain.as_str())?
            .strip_suffix('.')?;

        remainder
            .split('.')
            .next()
            .map(|label| label.to_string())
    }
}

pub fn is_reserved_label(label: &str) -> bool {
    RESERVED_LABELS.contains(&label)
}

pub fn is_reserved_path(path: &str) -> bool {
    RESERVED_PATH_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .map(|rest| rest.is_empty() || rest.starts_with('/'))
            .unwrap_or(false)
    }) || RESERVED_FILES.contains(&path)
}

/// Drop a trailing `:port`. Bracketed IPv6 literals keep their brackets'
/// contents intact.
fn strip_port(host: &str) -> &str {
    if let Some(end) = host.strip_prefix('[').and_then(|rest| rest.find(']')) {
        return &host[1..=end];
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}
