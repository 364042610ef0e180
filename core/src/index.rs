use serde::Serialize;
use std::cmp::Ordering;

pub type DocId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub freq: u32, // occurrences of the term in doc_id, always >= 1
}

impl Posting {
    pub fn new(doc_id: DocId, freq: u32) -> Self { Self { doc_id, freq } }
}

/// Postings of a single term, in insertion order until [`PostingList::sort_by_frequency`] is called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingList {
    postings: Vec<Posting>,
}

impl PostingList {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, posting: Posting) { self.postings.push(posting); }

    pub fn len(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }

    pub fn as_slice(&self) -> &[Posting] { &self.postings }

    pub fn iter(&self) -> std::slice::Iter<'_, Posting> { self.postings.iter() }

    /// The first `limit` postings in current order; `None` means the whole list.
    pub fn top(&self, limit: Option<usize>) -> &[Posting] {
        match limit {
            Some(n) => &self.postings[..n.min(self.postings.len())],
            None => &self.postings,
        }
    }

    /// Descending frequency, ties by ascending doc id.
    pub fn sort_by_frequency(&mut self) {
        self.postings.sort_unstable_by(by_frequency);
    }
}

fn by_frequency(a: &Posting, b: &Posting) -> Ordering {
    b.freq.cmp(&a.freq).then(a.doc_id.cmp(&b.doc_id))
}

impl From<Vec<Posting>> for PostingList {
    fn from(postings: Vec<Posting>) -> Self { Self { postings } }
}

impl<'a> IntoIterator for &'a PostingList {
    type Item = &'a Posting;
    type IntoIter = std::slice::Iter<'a, Posting>;
    fn into_iter(self) -> Self::IntoIter { self.postings.iter() }
}

/// Term -> postings storage shared by every backend variant.
///
/// Callers never insert the same `(term, doc_id)` pair twice; ingestion aggregates
/// counts per document before calling [`IndexBackend::insert_or_append`].
pub trait IndexBackend: Default {
    /// Short name used in logs.
    const NAME: &'static str;

    fn get(&self, term: &str) -> Option<&PostingList>;

    /// Creates the term's list on first use, otherwise appends to it.
    fn insert_or_append(&mut self, term: &str, doc_id: DocId, freq: u32);

    /// Visits every term once. Order depends on the backend.
    fn for_each<'a, F>(&'a self, f: F)
    where
        F: FnMut(&str, &'a PostingList);

    fn for_each_mut<F>(&mut self, f: F)
    where
        F: FnMut(&str, &mut PostingList);

    /// Number of distinct terms.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool { self.len() == 0 }
}
