use crate::backend::TrieBackend;
use crate::error::Error;
use crate::index::{DocId, IndexBackend, Posting};
use crate::registry::{DocumentRegistry, TrackingMode};
use crate::stopwords::StopWords;
use crate::timing::TimingSink;
use crate::tokenizer::{read_text, words, Normalizer};
use crate::verify::Verifier;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub tracking: TrackingMode,
    pub stemming: bool,
    /// When false, query output omits posting lines (lookups and checks still run).
    pub print_postings: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { tracking: TrackingMode::Counting, stemming: true, print_postings: true }
    }
}

/// Result of a single-term query. `Found` borrows the postings straight from the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryOutcome<'a> {
    StopWord { term: String },
    NotFound { term: String },
    Found { term: String, postings: &'a [Posting] },
}

impl<'a> QueryOutcome<'a> {
    pub fn term(&self) -> &str {
        match self {
            Self::StopWord { term } | Self::NotFound { term } | Self::Found { term, .. } => term,
        }
    }

    /// Returned postings; empty for stop words and unknown terms.
    pub fn postings(&self) -> &'a [Posting] {
        match self {
            Self::Found { postings, .. } => *postings,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatabaseInfo {
    pub documents: usize,
    pub stop_words: usize,
    pub terms: usize,
}

/// Maps a signed limit (negative = everything) onto the engine's `Option<usize>`.
pub fn limit_from_signed(limit: i64) -> Option<usize> {
    usize::try_from(limit).ok()
}

/// In-memory inverted index over a set of text documents.
pub struct Database<B: IndexBackend = TrieBackend> {
    index: B,
    registry: DocumentRegistry,
    stop_words: StopWords,
    normalizer: Normalizer,
    print_postings: bool,
    timings: Option<Arc<dyn TimingSink>>,
}

impl<B: IndexBackend> Default for Database<B> {
    fn default() -> Self { Self::new(Config::default()) }
}

impl<B: IndexBackend> Database<B> {
    pub fn new(config: Config) -> Self {
        Self {
            index: B::default(),
            registry: DocumentRegistry::new(config.tracking),
            stop_words: StopWords::new(),
            normalizer: Normalizer::new(config.stemming),
            print_postings: config.print_postings,
            timings: None,
        }
    }

    pub fn with_timings(mut self, sink: Arc<dyn TimingSink>) -> Self {
        self.timings = Some(sink);
        self
    }

    pub fn index(&self) -> &B { &self.index }

    pub fn registry(&self) -> &DocumentRegistry { &self.registry }

    pub fn stop_words(&self) -> &StopWords { &self.stop_words }

    pub fn normalizer(&self) -> &Normalizer { &self.normalizer }

    /// Available only in verifying mode.
    pub fn verifier(&self) -> Option<Verifier<'_>> {
        Verifier::new(&self.registry, self.normalizer).ok()
    }

    fn record(&self, op: &str, arg: impl Display, start: Instant) {
        if let Some(sink) = &self.timings {
            sink.record(op, &arg.to_string(), start.elapsed());
        }
    }

    /// Indexes one document. Returns `None` (and changes nothing) if the file cannot be read.
    pub fn read_doc(&mut self, path: impl AsRef<Path>) -> Option<DocId> {
        let path = path.as_ref();
        let text = match read_text(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(op = "readDoc", path = %path.display(), error = %e, "cannot read document");
                return None;
            }
        };
        let start = Instant::now();
        let doc_id = self.registry.register(path);

        let mut tf_counts: HashMap<String, u32> = HashMap::new();
        for raw in words(&text) {
            let term = self.normalizer.normalize(raw);
            if term.is_empty() || self.stop_words.contains(&term) { continue; }
            *tf_counts.entry(term).or_insert(0) += 1;
        }
        let num_terms = tf_counts.len();
        for (term, freq) in tf_counts {
            self.index.insert_or_append(&term, doc_id, freq);
        }

        debug!(doc_id, num_terms, path = %path.display(), "indexed document");
        self.record("Read Doc", path.display(), start);
        Some(doc_id)
    }

    /// Indexes every path listed in `list`, in order. Returns how many documents were indexed.
    pub fn read_doc_list(&mut self, list: impl AsRef<Path>) -> Option<usize> {
        let list = list.as_ref();
        let text = match read_text(list) {
            Ok(text) => text,
            Err(e) => {
                warn!(op = "readDocList", path = %list.display(), error = %e, "cannot read document list");
                return None;
            }
        };
        let start = Instant::now();
        let indexed = words(&text).filter_map(|doc| self.read_doc(doc)).count();
        self.record("Read DocList", list.display(), start);
        Some(indexed)
    }

    /// Adds the normalized words of `path` to the stop-word set. Postings already
    /// stored for those terms are left in place.
    pub fn read_stop_words(&mut self, path: impl AsRef<Path>) -> Option<usize> {
        let path = path.as_ref();
        match read_text(path) {
            Ok(text) => Some(self.stop_words.extend_from_text(&text, &self.normalizer)),
            Err(e) => {
                warn!(op = "readStopWord", path = %path.display(), error = %e, "cannot read stop words");
                None
            }
        }
    }

    /// Looks up `word` and returns at most `limit` postings in the list's current order.
    pub fn query_word(&self, word: &str, limit: Option<usize>) -> QueryOutcome<'_> {
        let term = self.normalizer.normalize(word);
        if term.is_empty() || self.stop_words.contains(&term) {
            return QueryOutcome::StopWord { term };
        }
        let start = Instant::now();
        let outcome = match self.index.get(&term) {
            Some(list) => {
                let postings = list.top(limit);
                QueryOutcome::Found { term, postings }
            }
            None => QueryOutcome::NotFound { term },
        };
        self.record("Query Word", outcome.term(), start);
        outcome
    }

    /// Queries every word listed in `path`, in order.
    pub fn query_list(&self, path: impl AsRef<Path>, limit: Option<usize>) -> Option<Vec<QueryOutcome<'_>>> {
        let mut outcomes = Vec::new();
        self.each_query(path.as_ref(), limit, |_, outcome| {
            outcomes.push(outcome);
            Ok(())
        })?
        .ok()?;
        Some(outcomes)
    }

    /// Runs `f` on every (raw word, outcome) of a query list file. `None` if the file
    /// cannot be read; otherwise the first error `f` returned, if any.
    fn each_query<'s, F>(&'s self, path: &Path, limit: Option<usize>, mut f: F) -> Option<io::Result<()>>
    where
        F: FnMut(&str, QueryOutcome<'s>) -> io::Result<()>,
    {
        let text = match read_text(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(op = "queryList", path = %path.display(), error = %e, "cannot read query list");
                return None;
            }
        };
        let start = Instant::now();
        let result = words(&text).try_for_each(|word| f(word, self.query_word(word, limit)));
        self.record("Query List", path.display(), start);
        Some(result)
    }

    /// Re-checks `outcome` against the source documents. `None` outside verifying mode
    /// or when there is nothing to check.
    pub fn check(&self, outcome: &QueryOutcome<'_>) -> Option<Result<(), Error>> {
        let QueryOutcome::Found { term, .. } = outcome else { return None };
        let verifier = self.verifier()?;
        let list = self.index.get(term)?;
        let start = Instant::now();
        let result = verifier.check_term(term, list.as_slice());
        if let Err(e) = &result {
            warn!(op = "checkQueryWord", term = %term, error = %e, "verification failed");
        }
        self.record("Check Word", term, start);
        Some(result)
    }

    /// Sorts every postings list by descending frequency, ties by ascending doc id.
    pub fn sort(&mut self) {
        let start = Instant::now();
        self.index.for_each_mut(|_, list| list.sort_by_frequency());
        self.record("Sort", "", start);
    }

    pub fn info(&self) -> DatabaseInfo {
        DatabaseInfo {
            documents: self.registry.len(),
            stop_words: self.stop_words.len(),
            terms: self.index.len(),
        }
    }

    /// Every indexed term, in backend traversal order.
    pub fn terms(&self) -> Vec<String> {
        let mut terms = Vec::with_capacity(self.index.len());
        self.index.for_each(|term, _| terms.push(term.to_string()));
        terms
    }

    pub fn write_query(&self, word: &str, limit: Option<usize>, out: &mut impl Write) -> io::Result<()> {
        let outcome = self.query_word(word, limit);
        self.write_queried(word, &outcome, out)
    }

    fn write_queried(&self, word: &str, outcome: &QueryOutcome<'_>, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "[queryWord] Querying {word}")?;
        self.write_outcome(outcome, out)
    }

    pub fn write_outcome(&self, outcome: &QueryOutcome<'_>, out: &mut impl Write) -> io::Result<()> {
        match outcome {
            QueryOutcome::StopWord { term } => writeln!(out, "[queryWord] Can't Query Stop Word: {term}"),
            QueryOutcome::NotFound { term } => writeln!(out, "[queryWord] Word Not Found: {term}"),
            QueryOutcome::Found { term, postings } => {
                if self.print_postings {
                    for p in postings.iter() {
                        writeln!(out, "{} {}", p.doc_id, p.freq)?;
                    }
                }
                match self.check(outcome) {
                    Some(Ok(())) => writeln!(out, "[queryWord] Check Passed: {term}"),
                    Some(Err(_)) => writeln!(out, "[queryWord] Check Failed: {term}"),
                    None => Ok(()),
                }
            }
        }
    }

    /// Writes every query of the list file; an unreadable list writes nothing.
    pub fn write_query_list(&self, path: impl AsRef<Path>, limit: Option<usize>, out: &mut impl Write) -> io::Result<()> {
        self.each_query(path.as_ref(), limit, |word, outcome| self.write_queried(word, &outcome, &mut *out))
            .unwrap_or(Ok(()))
    }

    pub fn write_info(&self, out: &mut impl Write) -> io::Result<()> {
        let info = self.info();
        writeln!(out, "[Info] Documents: {}", info.documents)?;
        writeln!(out, "[Info] Stop Words: {}", info.stop_words)?;
        writeln!(out)
    }

    pub fn write_terms(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "[Info] Terms: ")?;
        let mut count = 0usize;
        let mut result = Ok(());
        self.index.for_each(|term, _| {
            if result.is_ok() {
                result = writeln!(out, "{term}");
                count += 1;
            }
        });
        result?;
        writeln!(out, "[Info] Terms Count: {count}")
    }
}
