use hours_model::{ProgramContext, RawFacts};

use crate::error::CollaboratorError;

/// Something that can turn plaintext hours into candidate RawFacts.
///
/// Implementations make one attempt per call; retries, backoff and rate
/// limiting belong to `ExtractionAdapter`.
pub trait Collaborator: Send + Sync {
    /// Short name for logs and the run manifest.
    fn name(&self) -> &str;

    fn extract(&self, text: &str, context: &ProgramContext)
    -> Result<RawFacts, CollaboratorError>;
}
