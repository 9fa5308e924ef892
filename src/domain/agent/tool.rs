use std::fmt::Debug;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::DomainError;
use crate::domain::llm::ToolSpec;

/// A tool the reasoning agent can expose to the model
#[async_trait]
pub trait AgentTool: Send + Sync + Debug {
    /// Tool name as advertised to the model
    fn name(&self) -> &'static str;

    /// One-line description advertised to the model
    fn description(&self) -> &'static str;

    /// JSON schema of the arguments object
    fn parameters(&self) -> Value;

    /// Execute with the raw JSON arguments, returning the observation text
    ///
    /// Malformed arguments are a validation error; the agent loop surfaces
    /// those back to the model. Collaborator failures abort the run.
    async fn call(&self, arguments: &str) -> Result<String, DomainError>;

    /// Wire-level definition for the completion request
    fn spec(&self) -> ToolSpec {
        ToolSpec::new(self.name(), self.description(), self.parameters())
    }
}

#[derive(Debug, Deserialize)]
struct QueryArguments {
    query: String,
}

/// Parse the single `query` argument every tool here takes
pub(crate) fn parse_query_argument(arguments: &str) -> Result<String, DomainError> {
    let parsed: QueryArguments = serde_json::from_str(arguments)
        .map_err(|e| DomainError::validation(format!("invalid tool arguments: {e}")))?;
    Ok(parsed.query)
}

/// Schema shared by the single-query tools
pub(crate) fn query_parameters_schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "Search query"
            }
        },
        "required": ["query"]
    })
}
