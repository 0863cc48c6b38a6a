//! Transport to the remote generation endpoint.
//!
//! The orchestrator talks to a [`ReplyBackend`]; the production implementation posts
//! JSON over HTTP, tests substitute in-memory backends.

mod http;

use crate::error::GenerationError;
use crate::model::GenerationPayload;
use async_trait::async_trait;

pub use http::HttpBackend;

#[async_trait]
pub trait ReplyBackend: Send + Sync {
    /// Issue one generation call. No retries.
    async fn generate(&self, payload: GenerationPayload<'_>) -> Result<String, GenerationError>;
}
