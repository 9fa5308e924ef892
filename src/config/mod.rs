//! Application configuration

mod app_config;

pub use app_config::{
    AgentConfig, AppConfig, DocumentsConfig, LlmConfig, LogFormat, LoggingConfig, RetrievalConfig,
    ServerConfig,
};
