//! Extraction adapter for plaintext hours.
//!
//! A `Collaborator` turns plaintext into candidate `RawFacts`; the
//! `ExtractionAdapter` wraps one with the empty-input short circuit, bounded
//! retries with exponential backoff and a rate limiter shared across tasks.
//!
//! Collaborators:
//!
//! - **completions**: a fine-tuned Azure OpenAI completions deployment
//! - **plaintext**: deterministic, offline rule-based segmentation
//! - **mock**: canned responses for tests

pub mod adapter;
pub mod collaborator;
pub mod completions;
pub mod error;
pub mod mock;
pub mod plaintext;
pub mod rate_limit;
pub mod response;
pub mod retry;

pub use adapter::ExtractionAdapter;
pub use collaborator::Collaborator;
pub use completions::{CompletionsClient, CompletionsConfig, DEFAULT_API_KEY_ENV};
pub use error::{CollaboratorError, ExtractionError};
pub use mock::MockCollaborator;
pub use plaintext::PlaintextExtractor;
pub use rate_limit::RateLimiter;
pub use retry::RetryPolicy;
