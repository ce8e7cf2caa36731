//! End-to-end specifications for the public intake endpoint and the
//! authenticated application list, driven through the assembled router.

mod common {
    use std::sync::Arc;

    use academy::auth::{AuthService, MemoryUserRepository};
    use academy::intake::{IntakeService, MemoryApplicationRepository};
    use academy::{api_router, ApiContext};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, Response, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    pub(crate) const ADMIN_USER: &str = "admin";
    pub(crate) const ADMIN_PASSWORD: &str = "registrar-rocks-2024";

    pub(crate) fn build_router() -> Router {
        let context = Arc::new(ApiContext {
            applications: IntakeService::new(Arc::new(MemoryApplicationRepository::default())),
            auth: AuthService::new(Arc::new(MemoryUserRepository::default())),
        });
        context
            .auth
            .init_admin(ADMIN_USER, ADMIN_PASSWORD)
            .expect("admin bootstrap succeeds");
        api_router(context)
    }

    pub(crate) fn sample_submission() -> Value {
        json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "jane@x.com",
            "phone": "9999999999",
            "education": "bachelors",
            "course": "python",
            "mode": "online",
            "experience": "beginner",
            "country": "IN",
            "motivation": "I want to move into backend engineering.",
            "terms": true,
        })
    }

    pub(crate) fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).expect("serialize body")))
            .expect("request builds")
    }

    pub(crate) fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header("cookie", cookie);
        }
        builder.body(Body::empty()).expect("request builds")
    }

    pub(crate) async fn body_json(response: Response<Body>) -> Value {
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    /// Log in through the router and return the `sid=...` cookie pair for
    /// follow-up requests.
    pub(crate) async fn login(router: &Router) -> String {
        let response = router
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/login",
                &json!({ "username": ADMIN_USER, "password": ADMIN_PASSWORD }),
            ))
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response
            .headers()
            .get("set-cookie")
            .expect("login sets a session cookie")
            .to_str()
            .expect("cookie is ascii")
            .to_string();
        set_cookie
            .split(';')
            .next()
            .expect("cookie has a name=value pair")
            .to_string()
    }

    pub(crate) fn submit_request(body: &Value) -> Request<Body> {
        json_request("POST", "/api/applications", body)
    }
}

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::*;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn submit_returns_created_with_lifecycle_defaults() {
    let router = build_router();

    let before = Utc::now();
    let response = router
        .clone()
        .oneshot(submit_request(&sample_submission()))
        .await
        .expect("router dispatch");
    let after = Utc::now();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));

    let data = &body["data"];
    assert_eq!(data["firstName"], json!("Jane"));
    assert_eq!(data["email"], json!("jane@x.com"));
    assert_eq!(data["status"], json!("pending"));
    assert_eq!(data["notes"], json!(""));
    assert!(data["id"].is_i64(), "id must be an integer");

    let created_at: DateTime<Utc> = data["createdAt"]
        .as_str()
        .expect("createdAt present")
        .parse()
        .expect("createdAt is a timestamp");
    assert!(created_at >= before && created_at <= after);
}

#[tokio::test]
async fn caller_supplied_lifecycle_fields_are_ignored() {
    let router = build_router();

    let mut submission = sample_submission();
    submission["id"] = json!(9000);
    submission["status"] = json!("enrolled");
    submission["createdAt"] = json!("1999-01-01T00:00:00Z");
    submission["notes"] = json!("pre-approved");

    let response = router
        .clone()
        .oneshot(submit_request(&submission))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["id"], json!(1));
    assert_eq!(body["data"]["status"], json!("pending"));
    assert_eq!(body["data"]["notes"], json!(""));
}

#[tokio::test]
async fn invalid_submission_reports_field_errors_and_stores_nothing() {
    let router = build_router();

    let mut submission = sample_submission();
    submission["email"] = json!("");
    submission["phone"] = json!("123");

    let response = router
        .clone()
        .oneshot(submit_request(&submission))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
    let errors = body["errors"].as_array().expect("errors array");
    let fields: Vec<&str> = errors
        .iter()
        .map(|err| err["field"].as_str().expect("field name"))
        .collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"phone"));

    // The store was untouched: the next valid submission takes id 1.
    let response = router
        .clone()
        .oneshot(submit_request(&sample_submission()))
        .await
        .expect("router dispatch");
    let body = body_json(response).await;
    assert_eq!(body["data"]["id"], json!(1));
}

#[tokio::test]
async fn list_requires_a_session() {
    let router = build_router();

    let response = router
        .clone()
        .oneshot(get_request("/api/applications", None))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn submitted_application_round_trips_through_the_admin_list() {
    let router = build_router();

    let submitted = sample_submission();
    let response = router
        .clone()
        .oneshot(submit_request(&submitted))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::CREATED);

    let cookie = login(&router).await;
    let response = router
        .clone()
        .oneshot(get_request("/api/applications", Some(&cookie)))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let records = body["data"].as_array().expect("data array");
    assert_eq!(records.len(), 1);

    let record = &records[0];
    for (field, value) in submitted.as_object().expect("object") {
        if field == "terms" {
            continue; // consumed by validation, not stored
        }
        assert_eq!(&record[field], value, "field {field} must round-trip");
    }
    assert_eq!(record["status"], json!("pending"));
    assert!(record["id"].is_i64());
    assert!(record["createdAt"].is_string());
}

#[tokio::test]
async fn search_query_narrows_the_list() {
    let router = build_router();

    let mut alice = sample_submission();
    alice["firstName"] = json!("Alice");
    alice["email"] = json!("alice@example.com");
    let mut bob = sample_submission();
    bob["firstName"] = json!("Bob");
    bob["email"] = json!("bob@example.com");

    for submission in [&alice, &bob] {
        let response = router
            .clone()
            .oneshot(submit_request(submission))
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let cookie = login(&router).await;

    let response = router
        .clone()
        .oneshot(get_request("/api/applications?q=ali", Some(&cookie)))
        .await
        .expect("router dispatch");
    let body = body_json(response).await;
    let records = body["data"].as_array().expect("data array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["firstName"], json!("Alice"));

    let response = router
        .clone()
        .oneshot(get_request("/api/applications?q=zzz", Some(&cookie)))
        .await
        .expect("router dispatch");
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().expect("data array").len(), 0);
}

#[tokio::test]
async fn resubmission_of_identical_data_creates_a_new_record() {
    let router = build_router();

    for expected_id in 1..=2 {
        let response = router
            .clone()
            .oneshot(submit_request(&sample_submission()))
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["data"]["id"], json!(expected_id));
    }
}
