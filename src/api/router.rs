use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::chat;
use super::health;
use super::state::AppState;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat::chat))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::encyclopedia::mock::MockEncyclopedia;
    use crate::domain::llm::MockLlmProvider;
    use crate::domain::retrieval::{MockDocumentStore, Passage};
    use crate::domain::workflow::{QaWorkflow, REFUSAL_MESSAGE};

    fn ready_state(provider: MockLlmProvider, store: MockDocumentStore) -> AppState {
        AppState::ready(Arc::new(QaWorkflow::new(
            Arc::new(provider),
            Arc::new(store),
            Arc::new(MockEncyclopedia::new()),
        )))
    }

    fn chat_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_chat_is_unavailable_before_initialization() {
        let app = create_router(AppState::new());

        let response = app
            .oneshot(chat_request(r#"{"message": "Hi"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "System is still initializing");
        assert_eq!(body["error"]["type"], "service_unavailable_error");
    }

    #[tokio::test]
    async fn test_health_is_up_before_initialization() {
        let app = create_router(AppState::new());

        let response = app.oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_ready_flips_once_the_workflow_lands() {
        let state = AppState::new();
        let app = create_router(state.clone());

        let before = app.clone().oneshot(get_request("/ready")).await.unwrap();
        assert_eq!(before.status(), StatusCode::SERVICE_UNAVAILABLE);

        state
            .set_workflow(Arc::new(QaWorkflow::new(
                Arc::new(MockLlmProvider::new()),
                Arc::new(MockDocumentStore::new()),
                Arc::new(MockEncyclopedia::new()),
            )))
            .unwrap();

        let after = app.oneshot(get_request("/ready")).await.unwrap();
        assert_eq!(after.status(), StatusCode::OK);
        assert_eq!(body_json(after).await["status"], "ready");
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected() {
        let app = create_router(ready_state(MockLlmProvider::new(), MockDocumentStore::new()));

        let response = app
            .oneshot(chat_request(r#"{"message": "   "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["param"], "message");
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected_in_the_api_format() {
        let app = create_router(ready_state(MockLlmProvider::new(), MockDocumentStore::new()));

        let response = app
            .oneshot(chat_request(r#"{"message": }"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["type"], "invalid_request_error");
        assert_eq!(body["error"]["code"], "json_parse_error");
    }

    #[tokio::test]
    async fn test_out_of_domain_chat_returns_the_refusal() {
        let app = create_router(ready_state(
            MockLlmProvider::new().with_reply("NO"),
            MockDocumentStore::new(),
        ));

        let response = app
            .oneshot(chat_request(r#"{"message": "Hi"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["answer"], REFUSAL_MESSAGE);
        assert_eq!(body["citations"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_department_chat_answers_with_citations() {
        let store = MockDocumentStore::new().with_results(vec![
            Passage::new("The annual fee is 50,000 rupees.", "prospectus.md").with_page(2),
            Passage::new("Fee waivers exist for merit scholars.", "prospectus.md").with_page(3),
        ]);
        let provider = MockLlmProvider::new()
            .with_reply("YES")
            .with_reply("The annual fee is 50,000 rupees.");

        let app = create_router(ready_state(provider, store));

        let response = app
            .oneshot(chat_request(r#"{"message": "What is the fee structure?"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["answer"], "The annual fee is 50,000 rupees.");

        let citations = body["citations"].as_array().unwrap();
        assert_eq!(citations.len(), 2);
        assert_eq!(citations[0]["source"], "prospectus.md (Page 2)");
        assert!(
            citations[0]["page_content"]
                .as_str()
                .unwrap()
                .ends_with("...")
        );
    }

    #[tokio::test]
    async fn test_workflow_failure_surfaces_as_server_error() {
        let app = create_router(ready_state(
            MockLlmProvider::new().with_error("connection reset"),
            MockDocumentStore::new(),
        ));

        let response = app
            .oneshot(chat_request(r#"{"message": "What is the fee structure?"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"]["type"], "server_error");
    }
}
