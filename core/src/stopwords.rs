use crate::tokenizer::{words, Normalizer};
use std::collections::HashSet;

/// Normalized terms that are neither indexed nor queryable.
#[derive(Debug, Default, Clone)]
pub struct StopWords {
    terms: HashSet<String>,
}

impl StopWords {
    pub fn new() -> Self { Self::default() }

    /// Normalizes every word of `text` and adds the non-empty results. Returns how many were new.
    pub fn extend_from_text(&mut self, text: &str, normalizer: &Normalizer) -> usize {
        let before = self.terms.len();
        for raw in words(text) {
            let term = normalizer.normalize(raw);
            if !term.is_empty() {
                self.terms.insert(term);
            }
        }
        self.terms.len() - before
    }

    pub fn contains(&self, term: &str) -> bool { self.terms.contains(term) }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_words_are_stemmed_like_documents() {
        let mut s = StopWords::new();
        let added = s.extend_from_text("The running, ...", &Normalizer::default());
        assert_eq!(added, 2);
        assert!(s.contains("the"));
        assert!(s.contains("run"));
        assert!(!s.contains("running"));
    }
}
