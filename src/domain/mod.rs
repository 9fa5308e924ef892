//! Domain layer - Core business logic and entities

pub mod agent;
pub mod encyclopedia;
pub mod error;
pub mod ingestion;
pub mod llm;
pub mod retrieval;
pub mod workflow;

pub use agent::{AgentTool, GeneralKnowledgeTool, ReasoningAgent, RetrieverTool};
pub use encyclopedia::{ArticleSummary, Encyclopedia};
pub use error::DomainError;
pub use ingestion::{
    Chunk, ChunkMetadata, ChunkingConfig, ChunkingStrategy, DocumentParser, ParsedDocument,
};
pub use llm::{
    CompletionRequest, CompletionRequestBuilder, CompletionResponse, FinishReason, LlmProvider,
    Message, MessageRole, ToolCall, ToolSpec, Usage,
};
pub use retrieval::{DocumentStore, Passage, PassageMetadata};
pub use workflow::{
    FALLBACK_ANSWER, GuardrailDecision, QaWorkflow, REFUSAL_MESSAGE, WorkflowState,
};
