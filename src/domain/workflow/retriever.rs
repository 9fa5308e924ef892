use std::sync::Arc;

use tracing::debug;

use super::state::WorkflowState;
use crate::domain::DomainError;
use crate::domain::retrieval::DocumentStore;

/// Second stage: fetches candidate passages for the question
///
/// Ranking and result count are the store's policy; the stage records the
/// result as-is, order preserved.
#[derive(Debug)]
pub struct RetrieverStage {
    store: Arc<dyn DocumentStore>,
}

impl RetrieverStage {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn retrieve(&self, state: WorkflowState) -> Result<WorkflowState, DomainError> {
        let passages = self.store.retrieve(&state.question).await?;

        debug!(count = passages.len(), "retrieved passages");

        Ok(WorkflowState {
            question: state.question,
            answer: state.answer,
            retrieved_docs: passages,
        })
    }
}
