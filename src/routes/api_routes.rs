use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::errors::AppError;
use crate::models::{ChatRequest, ErrorBody, Health};
use crate::routes::AppState;

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST `/api/chat`: validate, cap history, forward to the chat service.
pub async fn chat_handler(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return error_response(&AppError::InvalidBody { message: rejection.body_text() });
        }
    };

    match state.chat.chat(request).await {
        Ok(reply) => Json(reply).into_response(),
        Err(err) => error_response(&err),
    }
}

/// ANY `/api/{*path}`: relay to the ERP data service.
pub async fn proxy_handler(
    State(state): State<AppState>,
    method: Method,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path_and_query = match query {
        Some(query) => format!("/api/{path}?{query}"),
        None => format!("/api/{path}"),
    };
    let content_type = headers.get(header::CONTENT_TYPE).cloned();

    match state.erp.forward(method, &path_and_query, content_type, body).await {
        Ok(upstream) => {
            let mut resp = (upstream.status, upstream.body).into_response();
            if let Some(content_type) = upstream.content_type {
                resp.headers_mut().insert(header::CONTENT_TYPE, content_type);
            }
            resp
        }
        Err(err) => error_response(&err),
    }
}

/// GET `/healthz`
pub async fn health_handler() -> impl IntoResponse {
    Json(Health::ok())
}

// ── Helper ────────────────────────────────────────────────────────────────────

fn error_response(err: &AppError) -> Response {
    let status = if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else if err.is_timeout() {
        StatusCode::GATEWAY_TIMEOUT
    } else if err.is_upstream() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, Json(ErrorBody { error: err.to_string() })).into_response()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use mockito::Matcher;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::config::GatewayConfig;
    use crate::routes::{AppState, router};

    fn app(erp: &str, mcp: &str, timeout: Duration) -> Router {
        let config = GatewayConfig {
            erp_api_url: erp.to_string(),
            mcp_api_url: mcp.to_string(),
            upstream_timeout: timeout,
            static_dir: "does-not-exist".into(),
            ..GatewayConfig::default()
        };
        router(AppState::new(&config).unwrap(), &config.static_dir)
    }

    fn chat_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(resp: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Accepts connections and never answers.
    async fn silent_upstream() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn blank_message_is_rejected_without_calling_upstream() {
        let mut server = mockito::Server::new_async().await;
        let upstream = server.mock("POST", "/api/chat").expect(0).create_async().await;

        let app = app(&server.url(), &server.url(), Duration::from_secs(5));
        let resp = app.oneshot(chat_request(json!({ "message": "   " }))).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(resp).await["error"], "Field 'message' cannot be empty");
        upstream.assert_async().await;
    }

    #[tokio::test]
    async fn oversized_message_is_rejected() {
        let server = mockito::Server::new_async().await;
        let app = app(&server.url(), &server.url(), Duration::from_secs(5));
        let resp = app
            .oneshot(chat_request(json!({ "message": "x".repeat(5001) })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_body_is_a_bad_request() {
        let server = mockito::Server::new_async().await;
        let app = app(&server.url(), &server.url(), Duration::from_secs(5));
        let resp = app.oneshot(chat_request(json!({ "text": "hi" }))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(read_json(resp).await["error"].as_str().unwrap().starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn forwards_message_with_capped_history() {
        let history: Vec<Value> = (0..7)
            .map(|i| {
                let role = if i % 2 == 0 { "user" } else { "assistant" };
                json!({ "role": role, "content": format!("t{i}") })
            })
            .collect();
        let most_recent = history[2..].to_vec();

        let mut server = mockito::Server::new_async().await;
        let upstream = server
            .mock("POST", "/api/chat")
            .match_body(Matcher::Json(json!({
                "message": "Revenue in September?",
                "conversation_history": most_recent,
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "response": "2.1 billion VND",
                    "intent": "revenue_query",
                    "dashboard_config": null
                })
                .to_string(),
            )
            .create_async()
            .await;

        let app = app(&server.url(), &server.url(), Duration::from_secs(5));
        let resp = app
            .oneshot(chat_request(json!({
                "message": "Revenue in September?",
                "conversation_history": history,
            })))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_json(resp).await;
        assert_eq!(body["response"], "2.1 billion VND");
        assert_eq!(body["intent"], "revenue_query");
        upstream.assert_async().await;
    }

    #[tokio::test]
    async fn upstream_error_status_is_a_bad_gateway() {
        let mut server = mockito::Server::new_async().await;
        let _upstream = server.mock("POST", "/api/chat").with_status(500).create_async().await;

        let app = app(&server.url(), &server.url(), Duration::from_secs(5));
        let resp = app.oneshot(chat_request(json!({ "message": "hi" }))).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(read_json(resp).await["error"], "MCP service answered with status 500");
    }

    #[tokio::test]
    async fn undecodable_reply_is_a_bad_gateway() {
        let mut server = mockito::Server::new_async().await;
        let _upstream = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let app = app(&server.url(), &server.url(), Duration::from_secs(5));
        let resp = app.oneshot(chat_request(json!({ "message": "hi" }))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn slow_upstream_is_a_gateway_timeout() {
        let mcp = silent_upstream().await;
        let app = app("http://127.0.0.1:9", &mcp, Duration::from_millis(300));
        let resp = app.oneshot(chat_request(json!({ "message": "hi" }))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn unreachable_upstream_is_a_bad_gateway() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let dead = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let app = app(&dead, &dead, Duration::from_secs(5));
        let resp = app.oneshot(chat_request(json!({ "message": "hi" }))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn proxy_relays_query_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let upstream = server
            .mock("GET", "/api/reports/recent")
            .match_query(Matcher::UrlEncoded("days".into(), "30".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"reports":[]}"#)
            .create_async()
            .await;

        let app = app(&server.url(), &server.url(), Duration::from_secs(5));
        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/api/reports/recent?days=30")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "application/json");
        assert_eq!(read_json(resp).await, json!({ "reports": [] }));
        upstream.assert_async().await;
    }

    #[tokio::test]
    async fn proxy_forwards_put_bodies_and_error_statuses() {
        let mut server = mockito::Server::new_async().await;
        let upstream = server
            .mock("PUT", "/api/customers/2")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({ "name": "Binh Tran" })))
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"Customer not found"}"#)
            .create_async()
            .await;

        let app = app(&server.url(), &server.url(), Duration::from_secs(5));
        let resp = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/api/customers/2")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"Binh Tran"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json(resp).await["error"], "Customer not found");
        upstream.assert_async().await;
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = app("http://127.0.0.1:9", "http://127.0.0.1:9", Duration::from_secs(1));
        let resp = app
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(read_json(resp).await["status"], "ok");
    }
}
