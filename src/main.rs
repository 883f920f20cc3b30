use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use agentsite::config::AppConfig;
use agentsite::entitlements::{ListingLimit, PlanKind};
use agentsite::error::AppError;
use agentsite::routes::platform_router;
use agentsite::telemetry;
use agentsite::tenancy::{Resolution, TenantResolver};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Agent Site Platform",
    about = "Run the multi-tenant agent website platform core from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Resolve a hostname and path the way the request middleware would
    Resolve(ResolveArgs),
    /// Print the entitlement table for one plan or the whole catalog
    Plans(PlansArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct ResolveArgs {
    /// Hostname as it would arrive in the Host header (port allowed)
    #[arg(long)]
    host: String,
    /// Request path
    #[arg(long, default_value = "/")]
    path: String,
    /// Override the configured primary domain
    #[arg(long)]
    primary_domain: Option<String>,
}

#[derive(Args, Debug)]
struct PlansArgs {
    /// Plan name; omit to list the full catalog
    plan: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Resolve(args) => run_resolve(args),
        Command::Plans(args) => run_plans(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let resolver = Arc::new(TenantResolver::new(config.tenancy.primary_domain.clone()));

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(platform_router(resolver))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        primary_domain = %config.tenancy.primary_domain,
        "agent site platform ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_resolve(args: ResolveArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let primary_domain = args
        .primary_domain
        .unwrap_or(config.tenancy.primary_domain);

    let resolver = TenantResolver::new(primary_domain);
    let resolution = resolver.resolve(Some(&args.host), &args.path);

    println!(
        "Resolving {}{} against primary domain {}",
        args.host,
        args.path,
        resolver.primary_domain()
    );
    match &resolution {
        Resolution::PassThrough => println!("Pass-through: request is served unmodified"),
        Resolution::Tenant {
            label,
            rewritten_path,
        } => println!("Tenant '{label}': path rewritten to {rewritten_path}"),
    }

    Ok(())
}

fn run_plans(args: PlansArgs) -> Result<(), AppError> {
    let plans: Vec<PlanKind> = match args.plan {
        Some(raw) => vec![raw.parse::<PlanKind>()?],
        None => PlanKind::ALL.to_vec(),
    };

    for plan in plans {
        render_plan(plan);
    }

    Ok(())
}

fn render_plan(plan: PlanKind) {
    let entitlements = plan.entitlements();
    println!("Plan: {plan}");
    match entitlements.listing_limit {
        ListingLimit::Limited(limit) => println!("- Listings: up to {limit}"),
        ListingLimit::Unlimited => println!("- Listings: unlimited"),
    }

    let templates: Vec<String> = entitlements
        .templates
        .iter()
        .map(|template| format!("{template:?}").to_lowercase())
        .collect();
    println!("- Templates: {}", templates.join(", "));

    for (flag, enabled) in [
        ("Priority support", entitlements.priority_support),
        ("Exclusive deals", entitlements.exclusive_deals),
        ("Marketing support", entitlements.marketing_support),
        ("SEO tools", entitlements.seo_tools),
        ("Analytics", entitlements.analytics),
    ] {
        println!("- {flag}: {}", if enabled { "yes" } else { "no" });
    }
    println!();
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
