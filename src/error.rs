//! Failure taxonomy for reply generation.
//!
//! Every variant collapses into [`GENERATION_FAILED_MESSAGE`] before it reaches the user;
//! the variant itself is only ever written to the log.

use std::time::Duration;
use thiserror::Error;

/// The only generation error text a user ever sees.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate email reply. Please try again.";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to generation endpoint failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("generation endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("generation endpoint did not answer within {}", human(.0))]
    Timeout(Duration),

    #[error("generation endpoint returned an unreadable body: {0}")]
    MalformedBody(#[source] reqwest::Error),
}

fn human(d: &Duration) -> humantime::FormattedDuration {
    humantime::format_duration(*d)
}
