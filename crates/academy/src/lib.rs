//! Application intake and admissions review for the academy's marketing site.
//!
//! The crate is split along the workflow's seams: [`intake`] owns the
//! application schema, validation, record store, and CSV export; [`auth`]
//! owns admin accounts, password hashing, and the session gate. The
//! `academy-api` binary wires both into the HTTP surface via [`api_router`].

pub mod auth;
pub mod config;
pub mod error;
pub mod intake;
pub mod telemetry;

use std::sync::Arc;

use axum::Router;
use tower_cookies::CookieManagerLayer;

use auth::{AuthService, UserRepository};
use intake::{ApplicationRepository, IntakeService};

/// Shared state handed to every API handler.
pub struct ApiContext<R, U> {
    pub applications: IntakeService<R>,
    pub auth: AuthService<U>,
}

/// Assemble the full `/api` router: the public intake endpoint plus the
/// session-gated review and account endpoints. The cookie layer lives here
/// so every consumer of the router gets session handling for free.
pub fn api_router<R, U>(context: Arc<ApiContext<R, U>>) -> Router
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    intake::router::application_router(context.clone())
        .merge(auth::router::auth_router(context))
        .layer(CookieManagerLayer::new())
}
