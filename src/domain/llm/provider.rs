use async_trait::async_trait;
use std::fmt::Debug;

use super::{CompletionRequest, CompletionResponse};
use crate::domain::DomainError;

/// Trait for chat completion providers
///
/// Implementations are stateless per call: the full conversation travels in
/// the request, the provider returns a single assistant turn.
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Send a chat completion request
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
