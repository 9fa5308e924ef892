use crate::domain::retrieval::Passage;

/// State threaded through one pipeline run
///
/// Every run starts from a fresh record built from the question alone;
/// stages hand back new records rather than mutating in place.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowState {
    /// The user's question, immutable for the duration of the run
    pub question: String,
    /// Final answer, written exactly once by the terminating stage
    pub answer: Option<String>,
    /// Passages fetched by the retriever stage, empty until then
    pub retrieved_docs: Vec<Passage>,
}

impl WorkflowState {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: None,
            retrieved_docs: Vec::new(),
        }
    }
}
