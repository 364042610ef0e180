use crate::error::{Error, Result};
use crate::index::Posting;
use crate::registry::{DocumentRegistry, TrackingMode};
use crate::tokenizer::{read_text, words, Normalizer};

/// Recounts a term in its source documents and compares against stored postings.
/// Stop words are not filtered during the recount.
#[derive(Debug, Clone, Copy)]
pub struct Verifier<'a> {
    registry: &'a DocumentRegistry,
    normalizer: Normalizer,
}

impl<'a> Verifier<'a> {
    pub fn new(registry: &'a DocumentRegistry, normalizer: Normalizer) -> Result<Self> {
        if registry.mode() != TrackingMode::Verifying {
            return Err(Error::NotRetained);
        }
        Ok(Self { registry, normalizer })
    }

    /// Fails on the first posting whose document cannot be re-read or whose count differs.
    pub fn check_term(&self, term: &str, postings: &[Posting]) -> Result<()> {
        for posting in postings {
            let path = self
                .registry
                .path(posting.doc_id)
                .ok_or(Error::MissingDocument { doc_id: posting.doc_id })?;
            let text = read_text(path)?;
            let actual = words(&text).filter(|raw| self.normalizer.normalize(raw) == term).count() as u32;
            if actual != posting.freq {
                return Err(Error::CountMismatch {
                    term: term.to_string(),
                    doc_id: posting.doc_id,
                    path: path.to_path_buf(),
                    stored: posting.freq,
                    actual,
                });
            }
        }
        Ok(())
    }
}
