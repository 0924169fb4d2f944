//! The extraction boundary: one collaborator behind retry and rate limiting.

use std::sync::Arc;
use std::thread;

use hours_model::{ProgramContext, RawFacts};
use tracing::{debug, warn};

use crate::collaborator::Collaborator;
use crate::error::{CollaboratorError, ExtractionError};
use crate::rate_limit::RateLimiter;
use crate::response::check_version;
use crate::retry::RetryPolicy;

/// Wraps a collaborator with the retry policy and a shared rate limiter.
///
/// Cloning is cheap; clones share the collaborator and the limiter.
#[derive(Clone)]
pub struct ExtractionAdapter {
    collaborator: Arc<dyn Collaborator>,
    retry: RetryPolicy,
    limiter: Arc<RateLimiter>,
}

impl ExtractionAdapter {
    pub fn new(collaborator: Arc<dyn Collaborator>) -> Self {
        Self {
            collaborator,
            retry: RetryPolicy::default(),
            limiter: Arc::new(RateLimiter::unlimited()),
        }
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn with_rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    pub fn collaborator_name(&self) -> &str {
        self.collaborator.name()
    }

    /// Extract RawFacts for one program's plaintext.
    ///
    /// Whitespace-only text returns empty RawFacts without calling out.
    /// Transient failures are retried with backoff; an unparseable response
    /// fails immediately.
    pub fn extract(
        &self,
        text: &str,
        context: &ProgramContext,
    ) -> Result<RawFacts, ExtractionError> {
        if text.trim().is_empty() {
            return Ok(RawFacts::empty());
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            self.limiter.acquire();
            let result = self
                .collaborator
                .extract(text, context)
                .and_then(check_version);
            let cause = match result {
                Ok(raw) => {
                    debug!(
                        program_id = %context.program_id,
                        attempt,
                        entries = raw.entries.len(),
                        "extraction succeeded"
                    );
                    return Ok(raw);
                }
                Err(cause) => cause,
            };

            if let Some(delay) = cause.retry_after() {
                self.limiter.defer(delay);
            }
            if !cause.is_retryable() || attempt >= self.retry.max_attempts() {
                return Err(self.failure(context, attempt, cause));
            }
            let backoff = self.retry.backoff(attempt);
            warn!(
                program_id = %context.program_id,
                attempt,
                backoff_ms = backoff.as_millis() as u64,
                error = %cause,
                "extraction attempt failed, retrying"
            );
            if !backoff.is_zero() {
                thread::sleep(backoff);
            }
        }
    }

    fn failure(
        &self,
        context: &ProgramContext,
        attempts: u32,
        cause: CollaboratorError,
    ) -> ExtractionError {
        warn!(
            program_id = %context.program_id,
            collaborator = self.collaborator.name(),
            attempts,
            error = %cause,
            "extraction failed"
        );
        ExtractionError {
            program_id: context.program_id.clone(),
            attempts,
            cause,
        }
    }
}
