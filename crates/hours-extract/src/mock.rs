//! Canned collaborator for tests and dry runs.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use hours_model::{ProgramContext, RawFacts};

use crate::collaborator::Collaborator;
use crate::error::CollaboratorError;

/// Returns configured responses keyed by input text.
///
/// Scripted failures for a text are returned first, in order, before its
/// response. Unknown texts get empty RawFacts.
#[derive(Default)]
pub struct MockCollaborator {
    responses: HashMap<String, RawFacts>,
    failures: Mutex<HashMap<String, VecDeque<CollaboratorError>>>,
    calls: AtomicUsize,
}

impl MockCollaborator {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_response(mut self, text: impl Into<String>, raw: RawFacts) -> Self {
        self.responses.insert(text.into(), raw);
        self
    }

    #[must_use]
    pub fn with_failures(
        self,
        text: impl Into<String>,
        failures: impl IntoIterator<Item = CollaboratorError>,
    ) -> Self {
        self.failures
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(text.into(), failures.into_iter().collect());
        self
    }

    /// Number of `extract` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Collaborator for MockCollaborator {
    fn name(&self) -> &str {
        "mock"
    }

    fn extract(
        &self,
        text: &str,
        _context: &ProgramContext,
    ) -> Result<RawFacts, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self
            .failures
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get_mut(text)
            .and_then(VecDeque::pop_front);
        if let Some(failure) = scripted {
            return Err(failure);
        }
        Ok(self
            .responses
            .get(text)
            .cloned()
            .unwrap_or_else(RawFacts::empty))
    }
}
