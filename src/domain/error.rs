use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Retrieval error: {message}")]
    Retrieval { message: String },

    #[error("Ingestion error: {message}")]
    Ingestion { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Service not ready: {message}")]
    NotReady { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn retrieval(message: impl Into<String>) -> Self {
        Self::Retrieval {
            message: message.into(),
        }
    }

    pub fn ingestion(message: impl Into<String>) -> Self {
        Self::Ingestion {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn not_ready(message: impl Into<String>) -> Self {
        Self::NotReady {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("Message must not be empty");
        assert_eq!(
            error.to_string(),
            "Validation error: Message must not be empty"
        );
    }

    #[test]
    fn test_provider_error() {
        let error = DomainError::provider("openai", "connection refused");
        assert_eq!(
            error.to_string(),
            "Provider error: openai - connection refused"
        );
    }

    #[test]
    fn test_not_ready_error() {
        let error = DomainError::not_ready("workflow not initialized");
        assert_eq!(
            error.to_string(),
            "Service not ready: workflow not initialized"
        );
    }
}
