use std::sync::Arc;

use tracing::debug;

use super::tool::AgentTool;
use crate::domain::DomainError;
use crate::domain::llm::{CompletionRequest, LlmProvider, Message, ToolCall, ToolSpec};

/// Iteration cap when none is configured
pub const DEFAULT_MAX_ITERATIONS: usize = 8;

/// Tool-using reasoning loop over a chat completion provider
///
/// Each iteration sends the transcript plus tool definitions and executes
/// whatever tool calls come back, appending the observations. The loop ends
/// on a reply without tool calls or when the iteration cap is hit; either
/// way the full transcript is returned and the caller reads the final
/// message.
#[derive(Debug)]
pub struct ReasoningAgent {
    provider: Arc<dyn LlmProvider>,
    tools: Vec<Arc<dyn AgentTool>>,
    system_prompt: String,
    max_iterations: usize,
}

impl ReasoningAgent {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        tools: Vec<Arc<dyn AgentTool>>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            tools,
            system_prompt: system_prompt.into(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Run the loop on a single user input and return the transcript
    pub async fn run(&self, input: &str) -> Result<Vec<Message>, DomainError> {
        let specs: Vec<ToolSpec> = self.tools.iter().map(|tool| tool.spec()).collect();
        let mut transcript = vec![
            Message::system(&self.system_prompt),
            Message::user(input),
        ];

        for iteration in 0..self.max_iterations {
            let request = CompletionRequest::builder()
                .messages(transcript.clone())
                .tools(specs.clone())
                .build();

            let response = self.provider.complete(request).await?;
            let reply = response.message;
            transcript.push(reply.clone());

            if !reply.has_tool_calls() {
                debug!(iteration, "agent produced final reply");
                return Ok(transcript);
            }

            for call in &reply.tool_calls {
                debug!(iteration, tool = %call.name, "executing tool call");
                let observation = self.dispatch(call).await?;
                transcript.push(Message::tool(&call.id, observation));
            }
        }

        debug!(
            max_iterations = self.max_iterations,
            "agent hit iteration cap"
        );
        Ok(transcript)
    }

    /// Execute one tool call
    ///
    /// Unknown tools and malformed arguments come back as error observations
    /// so the model can correct itself; collaborator failures abort the run.
    async fn dispatch(&self, call: &ToolCall) -> Result<String, DomainError> {
        let Some(tool) = self.tools.iter().find(|tool| tool.name() == call.name) else {
            return Ok(format!("Error: unknown tool '{}'", call.name));
        };

        match tool.call(&call.arguments).await {
            Ok(observation) => Ok(observation),
            Err(DomainError::Validation { message }) => Ok(format!("Error: {message}")),
            Err(err) => Err(err),
        }
    }
}
