//! Single-request lifecycle.
//!
//! Issues exactly one backend call per submission and maps whatever happens onto a
//! [`GenerationOutcome`]. Serializing submissions is the caller's job.

use crate::engine::ReplyBackend;
use crate::error::{GenerationError, GENERATION_FAILED_MESSAGE};
use crate::model::{GenerationOutcome, GenerationRequest};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct RequestOrchestrator {
    backend: Arc<dyn ReplyBackend>,
    timeout: Option<Duration>,
}

impl RequestOrchestrator {
    pub fn new(backend: Arc<dyn ReplyBackend>, timeout: Option<Duration>) -> Self {
        Self { backend, timeout }
    }

    pub async fn submit(&self, request: &GenerationRequest) -> GenerationOutcome {
        let generation = request.generation();
        let started = Instant::now();
        tracing::debug!(
            generation,
            tone = request.tone().as_wire_str(),
            chars = request.email_content().chars().count(),
            "submitting generation request"
        );

        match self.call(request).await {
            Ok(reply) => {
                tracing::info!(
                    generation,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    reply_chars = reply.chars().count(),
                    "generation succeeded"
                );
                GenerationOutcome::Success { reply }
            }
            Err(e) => {
                tracing::error!(
                    generation,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %e,
                    "generation failed"
                );
                GenerationOutcome::Failure {
                    message: GENERATION_FAILED_MESSAGE.to_string(),
                }
            }
        }
    }

    async fn call(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let fut = self.backend.generate(request.payload());
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .unwrap_or(Err(GenerationError::Timeout(limit))),
            None => fut.await,
        }
    }
}
