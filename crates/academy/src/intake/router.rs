use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_cookies::Cookies;
use tracing::error;

use crate::auth::router::require_admin;
use crate::auth::UserRepository;
use crate::ApiContext;

use super::domain::{ApplicationId, ReviewUpdate};
use super::repository::{ApplicationRepository, RepositoryError};
use super::service::IntakeError;
use super::validation::ApplicationDraft;

/// Router for the public intake endpoint and the session-gated review
/// surface.
pub fn application_router<R, U>(context: Arc<ApiContext<R, U>>) -> Router
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    Router::new()
        .route(
            "/api/applications",
            post(submit_handler::<R, U>).get(list_handler::<R, U>),
        )
        .route("/api/applications/export", get(export_handler::<R, U>))
        .route("/api/applications/:id", patch(review_handler::<R, U>))
        .with_state(context)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListQuery {
    #[serde(default)]
    q: Option<String>,
}

pub(crate) async fn submit_handler<R, U>(
    State(context): State<Arc<ApiContext<R, U>>>,
    Json(draft): Json<ApplicationDraft>,
) -> Response
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    match context.applications.submit(draft) {
        Ok(record) => (
            StatusCode::CREATED,
            Json(json!({ "success": true, "data": record })),
        )
            .into_response(),
        Err(IntakeError::Validation(invalid)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "message": "validation failed",
                "errors": invalid.errors,
            })),
        )
            .into_response(),
        Err(other) => internal_error(&other),
    }
}

pub(crate) async fn list_handler<R, U>(
    State(context): State<Arc<ApiContext<R, U>>>,
    cookies: Cookies,
    Query(query): Query<ListQuery>,
) -> Response
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    if let Err(denied) = require_admin(&context.auth, &cookies) {
        return denied;
    }

    match context.applications.list(query.q.as_deref()) {
        Ok(records) => (
            StatusCode::OK,
            Json(json!({ "success": true, "data": records })),
        )
            .into_response(),
        Err(other) => internal_error(&other),
    }
}

pub(crate) async fn review_handler<R, U>(
    State(context): State<Arc<ApiContext<R, U>>>,
    cookies: Cookies,
    Path(id): Path<i64>,
    Json(update): Json<ReviewUpdate>,
) -> Response
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    if let Err(denied) = require_admin(&context.auth, &cookies) {
        return denied;
    }

    match context.applications.review(ApplicationId(id), update) {
        Ok(record) => (
            StatusCode::OK,
            Json(json!({ "success": true, "data": record })),
        )
            .into_response(),
        Err(IntakeError::Repository(RepositoryError::NotFound)) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "application not found" })),
        )
            .into_response(),
        Err(other) => internal_error(&other),
    }
}

pub(crate) async fn export_handler<R, U>(
    State(context): State<Arc<ApiContext<R, U>>>,
    cookies: Cookies,
) -> Response
where
    R: ApplicationRepository + 'static,
    U: UserRepository + 'static,
{
    if let Err(denied) = require_admin(&context.auth, &cookies) {
        return denied;
    }

    match context.applications.export_csv() {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"applications.csv\"",
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(other) => internal_error(&other),
    }
}

/// Storage and export failures surface as one opaque 500; the detail stays
/// in the server log.
fn internal_error(err: &IntakeError) -> Response {
    error!(error = %err, "intake operation failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "success": false, "message": "internal server error" })),
    )
        .into_response()
}
