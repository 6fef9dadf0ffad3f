//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use depot_app::ports::{PasswordHasher, Repositories};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the JSON API under `/api` next to a `/health` check.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<P, H>(state: AppState<P, H>) -> Router
where
    P: Repositories,
    H: PasswordHasher,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{BcryptPasswordHasher, TokenConfig, TokenManager};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use depot_adapter_storage_sqlite_sqlx::{Config, SqliteRepositories};
    use depot_domain::user::{NewUser, UserRight};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn test_state() -> AppState<SqliteRepositories, BcryptPasswordHasher> {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        AppState::new(
            db.repositories(),
            BcryptPasswordHasher::with_cost(4),
            TokenManager::new(TokenConfig {
                secret: "router-test".to_string(),
                ttl_secs: 600,
                issuer: "depotd".to_string(),
            }),
        )
    }

    async fn seed(state: &AppState<SqliteRepositories, BcryptPasswordHasher>) {
        state
            .users
            .bootstrap_admin(NewUser {
                username: "root".to_string(),
                email: "root@example.org".to_string(),
                password: "hunter2".to_string(),
                right: UserRight::Guest,
            })
            .await
            .unwrap();
    }

    fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let app = build(test_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_issue_token_for_valid_credentials() {
        let state = test_state().await;
        seed(&state).await;
        let app = build(state);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                &json!({ "username": "root", "password": "hunter2" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
        assert_eq!(body["user"]["right"], "admin");
        assert!(body["user"].get("password").is_none());
    }

    #[tokio::test]
    async fn should_refuse_wrong_password() {
        let state = test_state().await;
        seed(&state).await;
        let app = build(state);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                &json!({ "username": "root", "password": "nope" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn should_require_authentication_for_mutations() {
        let app = build(test_state().await);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/equipment",
                &json!({ "name": "Tent" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"], "authentication required");
    }

    #[tokio::test]
    async fn should_reject_garbage_bearer_token() {
        let app = build(test_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/users")
                    .header(header::AUTHORIZATION, "Bearer not.a.jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn should_answer_bad_request_for_malformed_json_and_ids() {
        let state = test_state().await;
        let app = build(state);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/boxes/abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_answer_not_found_for_missing_store() {
        let app = build(test_state().await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/stores/41")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Store 41 not found");
    }
}
