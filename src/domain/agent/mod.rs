//! Tool-using reasoning agent

mod reasoning;
mod tool;
mod tools;

pub use reasoning::{DEFAULT_MAX_ITERATIONS, ReasoningAgent};
pub use tool::AgentTool;
pub use tools::{GeneralKnowledgeTool, RetrieverTool};
