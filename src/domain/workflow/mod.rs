//! Question-answering workflow: guardrail, retriever and responder stages

mod graph;
mod guardrail;
mod responder;
mod retriever;
mod state;

pub use graph::QaWorkflow;
pub use guardrail::{GuardrailDecision, GuardrailStage, REFUSAL_MESSAGE};
pub use responder::{FALLBACK_ANSWER, ResponderStage};
pub use retriever::RetrieverStage;
pub use state::WorkflowState;
