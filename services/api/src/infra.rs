use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use academy::auth::{AuthService, MemoryUserRepository};
use academy::intake::{IntakeService, MemoryApplicationRepository};
use academy::ApiContext;
use metrics_exporter_prometheus::PrometheusHandle;

/// Concrete context wiring the in-process stores into the API surface.
pub(crate) type Context = ApiContext<MemoryApplicationRepository, MemoryUserRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn build_context() -> Arc<Context> {
    let applications = IntakeService::new(Arc::new(MemoryApplicationRepository::default()));
    let auth = AuthService::new(Arc::new(MemoryUserRepository::default()));
    Arc::new(ApiContext { applications, auth })
}
