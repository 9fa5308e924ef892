use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;

use super::guardrail::{GuardrailDecision, GuardrailStage};
use super::responder::ResponderStage;
use super::retriever::RetrieverStage;
use super::state::WorkflowState;
use crate::domain::DomainError;
use crate::domain::agent::DEFAULT_MAX_ITERATIONS;
use crate::domain::encyclopedia::Encyclopedia;
use crate::domain::llm::LlmProvider;
use crate::domain::retrieval::DocumentStore;

/// Hard cap on stage transitions per run
const MAX_STAGE_STEPS: usize = 8;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Guardrail,
    Retriever,
    Responder,
    Terminal,
}

#[derive(Debug)]
struct StageGraph {
    guardrail: GuardrailStage,
    retriever: RetrieverStage,
    responder: ResponderStage,
}

/// The question-answering workflow
///
/// Wires the guardrail, retriever and responder stages into a straight-line
/// graph with one conditional branch after the guardrail. The stage graph is
/// compiled lazily on first use and reused across runs; each run gets a
/// fresh state built from its question alone.
#[derive(Debug)]
pub struct QaWorkflow {
    provider: Arc<dyn LlmProvider>,
    store: Arc<dyn DocumentStore>,
    encyclopedia: Arc<dyn Encyclopedia>,
    agent_max_iterations: usize,
    stages: OnceCell<StageGraph>,
}

impl QaWorkflow {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        store: Arc<dyn DocumentStore>,
        encyclopedia: Arc<dyn Encyclopedia>,
    ) -> Self {
        Self {
            provider,
            store,
            encyclopedia,
            agent_max_iterations: DEFAULT_MAX_ITERATIONS,
            stages: OnceCell::new(),
        }
    }

    pub fn with_agent_max_iterations(mut self, max_iterations: usize) -> Self {
        self.agent_max_iterations = max_iterations;
        self
    }

    /// Compile the stage graph ahead of the first run (idempotent)
    pub fn build(&self) {
        self.stages();
    }

    fn stages(&self) -> &StageGraph {
        self.stages.get_or_init(|| StageGraph {
            guardrail: GuardrailStage::new(self.provider.clone()),
            retriever: RetrieverStage::new(self.store.clone()),
            responder: ResponderStage::new(
                self.provider.clone(),
                self.store.clone(),
                self.encyclopedia.clone(),
                self.agent_max_iterations,
            ),
        })
    }

    /// Execute the pipeline for one question and return the final state
    pub async fn run(&self, question: &str) -> Result<WorkflowState, DomainError> {
        let stages = self.stages();
        let mut state = WorkflowState::new(question);
        let mut stage = Stage::Guardrail;
        let mut steps = 0;

        while stage != Stage::Terminal {
            steps += 1;
            if steps > MAX_STAGE_STEPS {
                return Err(DomainError::internal("workflow exceeded stage step cap"));
            }

            debug!(?stage, step = steps, "executing workflow stage");

            stage = match stage {
                Stage::Guardrail => {
                    let (next, decision) = stages.guardrail.classify(state).await?;
                    state = next;
                    match decision {
                        GuardrailDecision::Refused => Stage::Terminal,
                        GuardrailDecision::Approved => Stage::Retriever,
                    }
                }
                Stage::Retriever => {
                    state = stages.retriever.retrieve(state).await?;
                    Stage::Responder
                }
                Stage::Responder => {
                    state = stages.responder.generate(state).await?;
                    Stage::Terminal
                }
                Stage::Terminal => break,
            };
        }

        Ok(state)
    }
}
