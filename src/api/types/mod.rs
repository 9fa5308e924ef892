//! HTTP API types

pub mod chat;
pub mod error;
pub mod json;

pub use chat::{ChatRequest, ChatResponse, Citation};
pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
