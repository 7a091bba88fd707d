//! Route table for the users API.

use axum::{
    body::Body,
    http::Request,
    routing::{get, post},
    Router,
};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::http::request::{request_id, MakeRequestUuid};
use crate::http::server::AppState;
use crate::http::users;

/// Build the axum router: `POST /api/users`, `GET /api/users/{id}` and
/// `GET /api/users`, wrapped in request-id and tracing middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/users", post(users::create_user).get(users::list_users))
        .route("/api/users/{id}", get(users::get_user_by_id))
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id(request),
                )
            }),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::to_bytes,
        http::{header, Method, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::storage::{MemoryStorage, Storage, StorageError};
    use crate::users::{User, UserId};

    fn app() -> Router {
        build_router(AppState {
            storage: Arc::new(MemoryStorage::new()),
        })
    }

    async fn send(app: &Router, method: Method, uri: &str, body: &str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const ADA: &str = r#"{"name":"Ada","email":"ada@example.com","age":36}"#;

    #[tokio::test]
    async fn test_create_returns_201_with_id() {
        let app = app();
        let response = send(&app, Method::POST, "/api/users", ADA).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(json(response).await, serde_json::json!({ "id": 1 }));
    }

    #[tokio::test]
    async fn test_create_empty_body() {
        let app = app();
        let response = send(&app, Method::POST, "/api/users", "").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json(response).await,
            serde_json::json!({ "status": "Error", "error": "empty body" })
        );
    }

    #[tokio::test]
    async fn test_create_malformed_body() {
        let app = app();
        let response = send(&app, Method::POST, "/api/users", "{not json").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json(response).await;
        assert_eq!(body["status"], "Error");
        assert_ne!(body["error"], "empty body");
    }

    #[tokio::test]
    async fn test_create_negative_age() {
        let app = app();
        let response = send(
            &app,
            Method::POST,
            "/api/users",
            r#"{"name":"Ada","email":"ada@example.com","age":-1}"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json(response).await,
            serde_json::json!({ "status": "Error", "error": "field age is invalid" })
        );
    }

    #[tokio::test]
    async fn test_create_lists_every_violation() {
        let app = app();
        let response = send(&app, Method::POST, "/api/users", "{}").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json(response).await["error"],
            "field name is required field, field email is required field, field age is required field"
        );
    }

    #[tokio::test]
    async fn test_get_after_create() {
        let app = app();
        let created = json(send(&app, Method::POST, "/api/users", ADA).await).await;
        let id = created["id"].as_i64().unwrap();

        let response = send(&app, Method::GET, &format!("/api/users/{id}"), "").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json(response).await,
            serde_json::json!({ "id": id, "name": "Ada", "email": "ada@example.com", "age": 36 })
        );
    }

    #[tokio::test]
    async fn test_get_non_numeric_id() {
        let app = app();
        let response = send(&app, Method::GET, "/api/users/abc", "").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json(response).await["status"], "Error");
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_500() {
        let app = app();
        let response = send(&app, Method::GET, "/api/users/99", "").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json(response).await,
            serde_json::json!({ "status": "Error", "error": "no user found with id 99" })
        );
    }

    #[tokio::test]
    async fn test_list_in_id_order() {
        let app = app();
        assert_eq!(
            json(send(&app, Method::GET, "/api/users", "").await).await,
            serde_json::json!([])
        );

        send(&app, Method::POST, "/api/users", ADA).await;
        send(
            &app,
            Method::POST,
            "/api/users",
            r#"{"name":"Grace","email":"grace@example.com","age":45}"#,
        )
        .await;

        let response = send(&app, Method::GET, "/api/users", "").await;
        assert_eq!(response.status(), StatusCode::OK);
        let names: Vec<_> = json(response)
            .await
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["Ada", "Grace"]);
    }

    #[tokio::test]
    async fn test_unmatched_route_falls_through() {
        let app = app();
        let response = send(&app, Method::GET, "/api/other", "").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, Method::DELETE, "/api/users/1", "").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_request_id_is_echoed_or_generated() {
        let app = app();
        let request = Request::builder()
            .uri("/api/users")
            .header("x-request-id", "req-1")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.headers()["x-request-id"], "req-1");

        let response = send(&app, Method::GET, "/api/users", "").await;
        assert!(response.headers().contains_key("x-request-id"));
    }

    struct FailingStorage;

    #[async_trait]
    impl Storage for FailingStorage {
        async fn create_user(&self, _: &str, _: &str, _: i64) -> Result<UserId, StorageError> {
            Err(StorageError::persistence("disk I/O error"))
        }

        async fn get_user_by_id(&self, _: UserId) -> Result<User, StorageError> {
            Err(StorageError::persistence("disk I/O error"))
        }

        async fn get_users(&self) -> Result<Vec<User>, StorageError> {
            Err(StorageError::persistence("disk I/O error"))
        }
    }

    #[tokio::test]
    async fn test_storage_failures_are_500_with_raw_message() {
        let app = build_router(AppState {
            storage: Arc::new(FailingStorage),
        });

        for (method, uri, body) in [
            (Method::POST, "/api/users", ADA),
            (Method::GET, "/api/users/1", ""),
            (Method::GET, "/api/users", ""),
        ] {
            let response = send(&app, method, uri, body).await;
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                json(response).await,
                serde_json::json!({ "status": "Error", "error": "disk I/O error" })
            );
        }
    }
}
