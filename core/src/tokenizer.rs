use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;
use std::fs;
use std::path::Path;
use std::str::SplitWhitespace;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\p{L}']").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

/// Turns a raw whitespace-delimited word into its index term.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    stemming: bool,
}

impl Default for Normalizer {
    fn default() -> Self { Self { stemming: true } }
}

impl Normalizer {
    pub fn new(stemming: bool) -> Self { Self { stemming } }

    pub fn stemming(&self) -> bool { self.stemming }

    /// NFKC, lowercase, keep only letters and apostrophes, then stem (English Snowball).
    /// An empty result means the word is not indexable.
    pub fn normalize(&self, raw: &str) -> String {
        let lowered = raw.nfkc().collect::<String>().to_lowercase();
        let trimmed = NON_WORD.replace_all(&lowered, "");
        if trimmed.chars().all(|c| c == '\'') {
            return String::new();
        }
        if self.stemming {
            STEMMER.stem(&trimmed).into_owned()
        } else {
            trimmed.into_owned()
        }
    }
}

/// Raw words of a document, split on whitespace.
pub fn words(text: &str) -> SplitWhitespace<'_> { text.split_whitespace() }

/// Reads a whole file as text; invalid UTF-8 is replaced rather than rejected.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| Error::Unreadable { path: path.to_path_buf(), source })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_normalize() {
        let n = Normalizer::default();
        assert_eq!(n.normalize("Running,"), "run");
        assert_eq!(n.normalize("mat."), "mat");
        assert_eq!(n.normalize("--"), "");
        assert_eq!(n.normalize("'"), "");
        assert_eq!(n.normalize("1984"), "");
    }

    #[test]
    fn stemming_can_be_disabled() {
        let n = Normalizer::new(false);
        assert_eq!(n.normalize("Running!"), "running");
    }

    #[test]
    fn words_split_on_any_whitespace() {
        let w: Vec<&str> = words(" a\tb\n\nc  ").collect();
        assert_eq!(w, vec!["a", "b", "c"]);
    }
}
