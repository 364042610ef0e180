use crate::index::{DocId, IndexBackend, Posting, PostingList};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default)]
pub struct BTreeBackend {
    terms: BTreeMap<String, PostingList>,
}

impl IndexBackend for BTreeBackend {
    const NAME: &'static str = "btree";

    fn get(&self, term: &str) -> Option<&PostingList> { self.terms.get(term) }

    fn insert_or_append(&mut self, term: &str, doc_id: DocId, freq: u32) {
        match self.terms.get_mut(term) {
            Some(list) => list.push(Posting::new(doc_id, freq)),
            None => {
                self.terms.insert(term.to_string(), vec![Posting::new(doc_id, freq)].into());
            }
        }
    }

    fn for_each<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(&str, &'a PostingList),
    {
        for (term, list) in &self.terms {
            f(term.as_str(), list);
        }
    }

    fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, &mut PostingList),
    {
        for (term, list) in self.terms.iter_mut() {
            f(term.as_str(), list);
        }
    }

    fn len(&self) -> usize { self.terms.len() }
}

#[derive(Debug, Default)]
pub struct HashBackend {
    terms: HashMap<String, PostingList>,
}

impl IndexBackend for HashBackend {
    const NAME: &'static str = "hash";

    fn get(&self, term: &str) -> Option<&PostingList> { self.terms.get(term) }

    fn insert_or_append(&mut self, term: &str, doc_id: DocId, freq: u32) {
        // avoid allocating the key when the term already exists
        match self.terms.get_mut(term) {
            Some(list) => list.push(Posting::new(doc_id, freq)),
            None => {
                self.terms.insert(term.to_string(), vec![Posting::new(doc_id, freq)].into());
            }
        }
    }

    fn for_each<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(&str, &'a PostingList),
    {
        for (term, list) in &self.terms {
            f(term.as_str(), list);
        }
    }

    fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, &mut PostingList),
    {
        for (term, list) in self.terms.iter_mut() {
            f(term.as_str(), list);
        }
    }

    fn len(&self) -> usize { self.terms.len() }
}
