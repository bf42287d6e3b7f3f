use signifier_core::errors::SignifierResult;
use signifier_core::models::Candidate;
use signifier_core::traits::ICandidateSource;

/// Read-only candidate source over a fixed list. Yields active candidates only.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCandidateSource {
    name: String,
    candidates: Vec<Candidate>,
}

impl InMemoryCandidateSource {
    pub fn new(name: impl Into<String>, candidates: Vec<Candidate>) -> Self {
        Self {
            name: name.into(),
            candidates,
        }
    }

    /// Number of stored candidates, active or not.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl FromIterator<Candidate> for InMemoryCandidateSource {
    fn from_iter<T: IntoIterator<Item = Candidate>>(iter: T) -> Self {
        Self::new("in-memory", iter.into_iter().collect())
    }
}

impl ICandidateSource for InMemoryCandidateSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_candidates(&self) -> SignifierResult<Vec<Candidate>> {
        Ok(self
            .candidates
            .iter()
            .filter(|c| c.is_active())
            .cloned()
            .collect())
    }
}
