use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use academy::auth::InitAdminOutcome;
use academy::config::AppConfig;
use academy::error::AppError;
use academy::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::{debug, info, warn};

use crate::cli::ServeArgs;
use crate::infra::{build_context, AppState, Context};
use crate::routes::with_service_routes;

/// Cadence of the expired-session sweep; independent of request handling.
const SESSION_SWEEP_PERIOD: Duration = Duration::from_secs(15 * 60);

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let context = build_context();
    bootstrap_admin(&config, &context);
    spawn_session_sweep(context.clone());

    let app = with_service_routes(context)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "admissions service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Seed the admin account from the environment when both credentials are
/// configured. Idempotent, so restarts are safe.
fn bootstrap_admin(config: &AppConfig, context: &Context) {
    let Some((username, password)) = config.admin.credentials() else {
        return;
    };

    match context.auth.init_admin(username, password) {
        Ok(InitAdminOutcome::Created(user)) => {
            info!(username = %user.username, "bootstrap admin account created");
        }
        Ok(InitAdminOutcome::AlreadyExists) => {
            info!(%username, "bootstrap admin account already present");
        }
        Err(err) => warn!(error = %err, "admin bootstrap failed"),
    }
}

fn spawn_session_sweep(context: Arc<Context>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_SWEEP_PERIOD);
        // The first tick completes immediately; skip it.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let pruned = context.auth.prune_expired_sessions();
            if pruned > 0 {
                debug!(pruned, "expired admin sessions removed");
            }
        }
    });
}
