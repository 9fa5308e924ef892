//! Application state shared across handlers

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::domain::workflow::QaWorkflow;
use crate::domain::DomainError;

/// Shared state holding the question-answering workflow
///
/// The workflow slot starts empty and is filled once ingestion completes,
/// so requests arriving before that see a not-ready error instead of a
/// half-built pipeline.
#[derive(Clone, Default)]
pub struct AppState {
    workflow: Arc<OnceCell<Arc<QaWorkflow>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State with the workflow already in place
    pub fn ready(workflow: Arc<QaWorkflow>) -> Self {
        let state = Self::new();
        let _ = state.workflow.set(workflow);
        state
    }

    /// Install the workflow; fails if one is already installed
    pub fn set_workflow(&self, workflow: Arc<QaWorkflow>) -> Result<(), DomainError> {
        self.workflow
            .set(workflow)
            .map_err(|_| DomainError::internal("Workflow is already initialized"))
    }

    /// The workflow, or a not-ready error before initialization completes
    pub fn workflow(&self) -> Result<Arc<QaWorkflow>, DomainError> {
        self.workflow
            .get()
            .cloned()
            .ok_or_else(|| DomainError::not_ready("System is still initializing"))
    }

    pub fn is_ready(&self) -> bool {
        self.workflow.get().is_some()
    }
}
