//! Chat endpoint handler

use axum::extract::State;
use tracing::info;
use uuid::Uuid;

use super::state::AppState;
use super::types::{ApiError, ChatRequest, ChatResponse, Citation, Json};
use crate::domain::workflow::WorkflowState;

/// POST /chat
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let request_id = Uuid::new_v4().to_string();

    if request.message.trim().is_empty() {
        return Err(ApiError::bad_request("Message cannot be empty").with_param("message"));
    }

    let workflow = state.workflow()?;

    info!(request_id = %request_id, "Processing chat message");

    let result = workflow.run(&request.message).await?;
    let response = build_response(result);

    info!(
        request_id = %request_id,
        citations = response.citations.len(),
        "Chat answered"
    );

    Ok(Json(response))
}

fn build_response(state: WorkflowState) -> ChatResponse {
    let citations = state
        .retrieved_docs
        .iter()
        .map(Citation::from_passage)
        .collect();

    ChatResponse {
        answer: state.answer.unwrap_or_default(),
        citations,
    }
}
