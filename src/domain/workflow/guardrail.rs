use std::sync::Arc;

use tracing::debug;

use super::state::WorkflowState;
use crate::domain::DomainError;
use crate::domain::llm::{CompletionRequest, LlmProvider};

/// Exact refusal returned for out-of-domain questions
pub const REFUSAL_MESSAGE: &str = "I only answer department information.";

const GUARDRAIL_SYSTEM_PROMPT: &str = "You are a strict filter for a University Department chatbot. \
     Your ONLY job is to classify if the question is about the University, \
     Computer Science Department, Admissions, Faculty, Courses, or the Prospectus.\n\
     Rules:\n\
     1. Greetings (Hi, Hello) -> Reply 'NO'\n\
     2. General Knowledge (What is Python?, Who is Obama?) -> Reply 'NO'\n\
     3. Department Questions (Who is the HOD?, Fee structure?) -> Reply 'YES'\n\n\
     Reply strictly with 'YES' or 'NO'.";

/// Outcome of the in-domain classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardrailDecision {
    Approved,
    Refused,
}

/// First stage: classifies whether the question is department-related
#[derive(Debug)]
pub struct GuardrailStage {
    provider: Arc<dyn LlmProvider>,
}

impl GuardrailStage {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Classify the question with a single completion call
    ///
    /// On refusal the returned state carries the fixed refusal answer and no
    /// passages; on approval the state passes through with the answer unset.
    pub async fn classify(
        &self,
        state: WorkflowState,
    ) -> Result<(WorkflowState, GuardrailDecision), DomainError> {
        let request = CompletionRequest::builder()
            .system(GUARDRAIL_SYSTEM_PROMPT)
            .user(&state.question)
            .build();

        let response = self.provider.complete(request).await?;
        let reply = response.content().unwrap_or_default();
        let decision = parse_decision(reply);

        debug!(?decision, reply, "guardrail classified question");

        let next = match decision {
            GuardrailDecision::Refused => WorkflowState {
                question: state.question,
                answer: Some(REFUSAL_MESSAGE.to_string()),
                retrieved_docs: Vec::new(),
            },
            GuardrailDecision::Approved => WorkflowState {
                question: state.question,
                answer: None,
                retrieved_docs: Vec::new(),
            },
        };

        Ok((next, decision))
    }
}

/// Parse the model reply into a decision
///
/// The leading token is compared after normalizing case and surrounding
/// punctuation. Only a clean NO refuses; any other reply counts as an
/// implicit YES, so NONE or UNKNOWN never trip the refusal.
fn parse_decision(reply: &str) -> GuardrailDecision {
    let normalized = reply.trim().to_uppercase();
    let token = normalized
        .split_whitespace()
        .next()
        .unwrap_or("")
        .trim_matches(|c: char| c.is_ascii_punctuation());

    if token == "NO" {
        GuardrailDecision::Refused
    } else {
        GuardrailDecision::Approved
    }
}
