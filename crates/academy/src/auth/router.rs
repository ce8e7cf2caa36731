use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};
use tracing::error;

use crate::intake::ApplicationRepository;
use crate::ApiContext;

use super::repository::{UserRepository, UserView};
use super::service::{AuthError, AuthService, InitAdminOutcome};
use super::session::SESSION_COOKIE;

/// Router for login, logout, the current-user probe, and the idempotent
/// admin bootstrap endpoint.
pub fn auth_router<R, U>(context: Arc<ApiContext<R, U>>) -> Router
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    Router::new()
        .route("/api/login", post(login_handler::<R, U>))
        .route("/api/logout", post(logout_handler::<R, U>))
        .route("/api/user", get(current_user_handler::<R, U>))
        .route("/api/init-admin", post(init_admin_handler::<R, U>))
        .with_state(context)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CredentialsRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

pub(crate) async fn login_handler<R, U>(
    State(context): State<Arc<ApiContext<R, U>>>,
    cookies: Cookies,
    Json(body): Json<CredentialsRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    match context.auth.login(&body.username, &body.password) {
        Ok((user, token)) => {
            cookies.add(session_cookie(token));
            (
                StatusCode::OK,
                Json(json!({ "success": true, "data": user })),
            )
                .into_response()
        }
        Err(AuthError::InvalidCredentials) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "invalid username or password" })),
        )
            .into_response(),
        Err(other) => internal_error(&other),
    }
}

pub(crate) async fn logout_handler<R, U>(
    State(context): State<Arc<ApiContext<R, U>>>,
    cookies: Cookies,
) -> Response
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    if let Some(cookie) = cookies.get(SESSION_COOKIE) {
        context.auth.logout(cookie.value());
    }

    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    cookies.remove(removal);

    (StatusCode::OK, Json(json!({ "success": true }))).into_response()
}

pub(crate) async fn current_user_handler<R, U>(
    State(context): State<Arc<ApiContext<R, U>>>,
    cookies: Cookies,
) -> Response
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    match require_admin(&context.auth, &cookies) {
        Ok(user) => (
            StatusCode::OK,
            Json(json!({ "success": true, "data": user })),
        )
            .into_response(),
        Err(denied) => denied,
    }
}

pub(crate) async fn init_admin_handler<R, U>(
    State(context): State<Arc<ApiContext<R, U>>>,
    Json(body): Json<CredentialsRequest>,
) -> Response
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    let username = body.username.trim();
    if username.is_empty() || body.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "username and password are required" })),
        )
            .into_response();
    }

    match context.auth.init_admin(username, &body.password) {
        Ok(InitAdminOutcome::Created(user)) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "message": "admin account created",
                "data": user,
            })),
        )
            .into_response(),
        Ok(InitAdminOutcome::AlreadyExists) => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": "admin account already exists" })),
        )
            .into_response(),
        Err(other) => internal_error(&other),
    }
}

/// Resolve the session cookie to an authenticated admin, or produce the 401
/// response the caller returns as-is.
pub(crate) fn require_admin<U>(
    auth: &AuthService<U>,
    cookies: &Cookies,
) -> Result<UserView, Response>
where
    U: UserRepository + 'static,
{
    let Some(cookie) = cookies.get(SESSION_COOKIE) else {
        return Err(unauthenticated());
    };

    match auth.current_user(cookie.value()) {
        Ok(user) => Ok(user),
        Err(AuthError::Unauthorized) => Err(unauthenticated()),
        Err(other) => Err(internal_error(&other)),
    }
}

fn session_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

fn unauthenticated() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "success": false, "message": "authentication required" })),
    )
        .into_response()
}

fn internal_error(err: &AuthError) -> Response {
    error!(error = %err, "authentication operation failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "success": false, "message": "internal server error" })),
    )
        .into_response()
}
