//! LLM provider domain models and traits

mod message;
mod provider;
mod request;
mod response;

pub use message::{Message, MessageRole, ToolCall};
pub use provider::LlmProvider;
pub use request::{CompletionRequest, CompletionRequestBuilder, ToolSpec};
pub use response::{CompletionResponse, FinishReason, Usage};

#[cfg(test)]
pub use provider::mock::MockLlmProvider;
