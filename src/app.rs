use std::net::SocketAddr;

use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use crate::{auth, body, calendar, llm, meals, workouts};

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api/v1",
            Router::new()
                .merge(auth::router())
                .merge(meals::router())
                .merge(workouts::router())
                .merge(body::router())
                .merge(calendar::router())
                .merge(llm::router())
                .route("/health", get(|| async { "ok" })),
        )
        .with_state(state)
        .layer(middleware::from_fn(crate::middleware::pass_through))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!(
                        "http_request",
                        %method,
                        uri = %uri,
                        status = tracing::field::Empty
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router, host: &str, port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        extract::FromRef,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::auth::dto::JwtKeys;

    fn bearer(state: &AppState) -> String {
        let token = JwtKeys::from_ref(state)
            .sign_access(Uuid::new_v4())
            .unwrap();
        format!("Bearer {}", token)
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, auth: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(auth) = auth {
            builder = builder.header("authorization", auth);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn meal(items: Value) -> Value {
        json!({ "mealType": "lunch", "items": items, "date": "2024-06-01" })
    }

    #[tokio::test]
    async fn health_is_public() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn meals_require_a_token() {
        let app = build_app(AppState::fake());
        let (status, _) = send(app, post_json("/api/v1/meals", None, meal(json!([])))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn refresh_token_is_not_an_access_token() {
        let state = AppState::fake();
        let refresh = JwtKeys::from_ref(&state).sign_refresh(Uuid::new_v4()).unwrap();
        let app = build_app(state);
        let auth = format!("Bearer {}", refresh);
        let (status, _) = send(
            app,
            post_json("/api/v1/meals", Some(&auth), meal(json!([]))),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn empty_meal_is_rejected_before_storage() {
        let state = AppState::fake();
        let auth = bearer(&state);
        let app = build_app(state);

        let (status, body) = send(
            app,
            post_json("/api/v1/meals", Some(&auth), meal(json!([]))),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "Ajoutez au moins un aliment");
        assert_eq!(body["fields"][0]["path"], "items");
    }

    #[tokio::test]
    async fn zero_quantity_is_reported_with_its_path() {
        let state = AppState::fake();
        let auth = bearer(&state);
        let app = build_app(state);

        let items = json!([{
            "ingredientId": "a1", "ingredientName": "Rice", "quantity": 0,
            "calories": 200, "protein": 4, "carbs": 44, "fat": 0.5
        }]);
        let (status, body) =
            send(app, post_json("/api/v1/meals", Some(&auth), meal(items))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["fields"][0]["path"], "items.0.quantity");
        assert_eq!(
            body["fields"][0]["message"],
            "La quantité doit être supérieure à 0"
        );
    }

    #[tokio::test]
    async fn sign_up_validates_then_calls_provider() {
        let app = build_app(AppState::fake());
        let (status, body) = send(
            app.clone(),
            post_json(
                "/api/v1/auth/sign-up",
                None,
                json!({ "email": "x", "password": "123456", "confirmPassword": "654321" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["fields"].as_array().map(|a| a.len()), Some(2));

        let (status, body) = send(
            app.clone(),
            post_json(
                "/api/v1/auth/sign-up",
                None,
                json!({ "email": " New@Example.com", "password": "123456" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["email"], "new@example.com");
        assert_eq!(body["accessToken"], "access");

        let (status, body) = send(
            app,
            post_json(
                "/api/v1/auth/sign-up",
                None,
                json!({ "email": "taken@example.com", "password": "123456" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "auth/email-already-in-use");
    }

    #[tokio::test]
    async fn sign_up_without_password_answers_with_field_errors() {
        let app = build_app(AppState::fake());
        let (status, body) = send(
            app,
            post_json("/api/v1/auth/sign-up", None, json!({ "email": "a@b.co" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_failed");
        assert_eq!(body["fields"][0]["path"], "password");
        assert_eq!(body["fields"][0]["message"], crate::validation::REQUIRED);
    }

    #[tokio::test]
    async fn malformed_body_is_a_json_validation_error() {
        let state = AppState::fake();
        let auth = bearer(&state);
        let app = build_app(state);

        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/meals")
            .header("content-type", "application/json")
            .header("authorization", auth)
            .body(Body::from("{\"mealType\": "))
            .unwrap();
        let (status, body) = send(app, req).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_failed");
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn single_item_can_be_checked_before_logging() {
        let state = AppState::fake();
        let auth = bearer(&state);
        let app = build_app(state);

        let item = json!({
            "ingredientId": "a1", "ingredientName": "Rice", "quantity": 150,
            "calories": 200, "protein": 4, "carbs": 44, "fat": 0.5
        });
        let (status, body) = send(
            app.clone(),
            post_json("/api/v1/meals/items/validate", Some(&auth), item),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ingredientName"], "Rice");

        let (status, body) = send(
            app,
            post_json(
                "/api/v1/meals/items/validate",
                Some(&auth),
                json!({ "ingredientId": "", "quantity": -1 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["fields"][0]["path"], "ingredientId");
    }

    #[tokio::test]
    async fn sign_in_failure_uses_auth_error_shape() {
        let app = build_app(AppState::fake());
        let (status, body) = send(
            app,
            post_json(
                "/api/v1/auth/sign-in",
                None,
                json!({ "email": "a@b.co", "password": "whatever" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "auth/invalid-credential");
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn reset_password_is_accepted() {
        let app = build_app(AppState::fake());
        let (status, _) = send(
            app,
            post_json(
                "/api/v1/auth/reset-password",
                None,
                json!({ "email": "someone@example.com" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn assistant_chat_uses_the_chat_client() {
        let state = AppState::fake();
        let auth = bearer(&state);
        let app = build_app(state);

        let (status, body) = send(
            app.clone(),
            post_json("/api/v1/assistant/chat", Some(&auth), json!({ "messages": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "Ajoutez au moins un message");

        let (status, body) = send(
            app,
            post_json(
                "/api/v1/assistant/chat",
                Some(&auth),
                json!({ "messages": [{ "role": "user", "content": "bonjour" }] }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["model"], "fake-model");
        assert_eq!(body["reply"], "echo: bonjour");
    }
}
