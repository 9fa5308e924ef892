use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;

use super::state::WorkflowState;
use crate::domain::DomainError;
use crate::domain::agent::{AgentTool, GeneralKnowledgeTool, ReasoningAgent, RetrieverTool};
use crate::domain::encyclopedia::Encyclopedia;
use crate::domain::llm::LlmProvider;
use crate::domain::retrieval::DocumentStore;

/// Exact fallback answer when the agent yields no usable text
pub const FALLBACK_ANSWER: &str = "Could not generate answer.";

const AGENT_SYSTEM_PROMPT: &str = "You are a helpful RAG agent. \
     Prefer 'retriever' for department-related questions; do not use 'general-knowledge' \
     for those. Return only the final useful answer.";

/// Third stage: answers the question with the tool-using agent
///
/// The agent is assembled on first use and reused for the lifetime of the
/// stage. Its transcript stays internal; only the final message content
/// becomes the answer.
#[derive(Debug)]
pub struct ResponderStage {
    provider: Arc<dyn LlmProvider>,
    store: Arc<dyn DocumentStore>,
    encyclopedia: Arc<dyn Encyclopedia>,
    max_iterations: usize,
    agent: OnceCell<ReasoningAgent>,
}

impl ResponderStage {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        store: Arc<dyn DocumentStore>,
        encyclopedia: Arc<dyn Encyclopedia>,
        max_iterations: usize,
    ) -> Self {
        Self {
            provider,
            store,
            encyclopedia,
            max_iterations,
            agent: OnceCell::new(),
        }
    }

    fn agent(&self) -> &ReasoningAgent {
        self.agent.get_or_init(|| {
            let tools: Vec<Arc<dyn AgentTool>> = vec![
                Arc::new(RetrieverTool::new(self.store.clone())),
                Arc::new(GeneralKnowledgeTool::new(self.encyclopedia.clone())),
            ];
            ReasoningAgent::new(self.provider.clone(), tools, AGENT_SYSTEM_PROMPT)
                .with_max_iterations(self.max_iterations)
        })
    }

    pub async fn generate(&self, state: WorkflowState) -> Result<WorkflowState, DomainError> {
        let transcript = self.agent().run(&state.question).await?;

        let answer = transcript
            .last()
            .and_then(|message| message.content_text())
            .filter(|content| !content.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| FALLBACK_ANSWER.to_string());

        debug!(turns = transcript.len(), "agent transcript complete");

        Ok(WorkflowState {
            question: state.question,
            answer: Some(answer),
            retrieved_docs: state.retrieved_docs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::encyclopedia::mock::MockEncyclopedia;
    use crate::domain::llm::{CompletionResponse, Message, MockLlmProvider, ToolCall};
    use crate::domain::retrieval::{MockDocumentStore, Passage};

    fn stage_with(provider: Arc<MockLlmProvider>, store: Arc<MockDocumentStore>) -> ResponderStage {
        ResponderStage::new(provider, store, Arc::new(MockEncyclopedia::new()), 8)
    }

    #[tokio::test]
    async fn test_answer_comes_from_final_message() {
        let provider = Arc::new(MockLlmProvider::new().with_reply("Dr. Ahmed is the HOD."));
        let stage = stage_with(provider, Arc::new(MockDocumentStore::new()));

        let passages = vec![Passage::new("Dr. Ahmed heads CS.", "prospectus.md")];
        let mut input = WorkflowState::new("Who is the HOD?");
        input.retrieved_docs = passages.clone();

        let state = stage.generate(input).await.unwrap();

        assert_eq!(state.answer.as_deref(), Some("Dr. Ahmed is the HOD."));
        assert_eq!(state.retrieved_docs, passages);
        assert_eq!(state.question, "Who is the HOD?");
    }

    #[tokio::test]
    async fn test_empty_reply_falls_back() {
        let provider = Arc::new(MockLlmProvider::new().with_reply(""));
        let stage = stage_with(provider, Arc::new(MockDocumentStore::new()));

        let state = stage
            .generate(WorkflowState::new("Who is the HOD?"))
            .await
            .unwrap();

        assert_eq!(state.answer.as_deref(), Some(FALLBACK_ANSWER));
    }

    #[tokio::test]
    async fn test_agent_is_built_lazily_and_once() {
        let provider = Arc::new(MockLlmProvider::new().with_reply("one").with_reply("two"));
        let stage = stage_with(provider, Arc::new(MockDocumentStore::new()));

        assert!(stage.agent.get().is_none());

        stage.generate(WorkflowState::new("first")).await.unwrap();
        let first = stage.agent.get().unwrap() as *const ReasoningAgent;

        stage.generate(WorkflowState::new("second")).await.unwrap();
        let second = stage.agent.get().unwrap() as *const ReasoningAgent;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_agent_can_use_the_retriever_tool() {
        let arguments = serde_json::json!({ "query": "HOD" }).to_string();
        let provider = Arc::new(
            MockLlmProvider::new()
                .with_response(CompletionResponse::new(
                    "id-1".to_string(),
                    "mock-model".to_string(),
                    Message::assistant_tool_calls(vec![ToolCall::new(
                        "call-1",
                        "retriever",
                        arguments,
                    )]),
                ))
                .with_reply("Dr. Ahmed is the HOD."),
        );
        let store = Arc::new(MockDocumentStore::new().with_results(vec![Passage::new(
            "Dr. Ahmed heads the department.",
            "prospectus.md",
        )]));
        let stage = stage_with(provider.clone(), store.clone());

        let state = stage
            .generate(WorkflowState::new("Who is the HOD?"))
            .await
            .unwrap();

        assert_eq!(state.answer.as_deref(), Some("Dr. Ahmed is the HOD."));
        assert_eq!(provider.call_count(), 2);
        assert_eq!(store.retrieve_count(), 1);
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let provider = Arc::new(MockLlmProvider::new().with_error("rate limited"));
        let stage = stage_with(provider, Arc::new(MockDocumentStore::new()));

        let err = stage
            .generate(WorkflowState::new("Who is the HOD?"))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Provider { .. }));
    }
}
