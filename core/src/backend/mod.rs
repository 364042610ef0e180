//! Interchangeable term -> postings stores.
//!
//! - [`BTreeBackend`]: ordered map, terms traverse in ascending byte order.
//! - [`HashBackend`]: hash map, traversal order unspecified.
//! - [`TrieBackend`]: compressed radix trie, ascending order, shared prefixes stored once.

mod map;
mod trie;

pub use self::map::{BTreeBackend, HashBackend};
pub use self::trie::TrieBackend;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{IndexBackend, Posting};

    fn contract<B: IndexBackend>() {
        let mut b = B::default();
        assert!(b.is_empty());
        assert!(b.get("cat").is_none());

        b.insert_or_append("cat", 0, 2);
        b.insert_or_append("car", 0, 1);
        b.insert_or_append("cat", 3, 5);

        assert_eq!(b.len(), 2);
        assert_eq!(b.get("cat").unwrap().as_slice(), &[Posting::new(0, 2), Posting::new(3, 5)]);
        assert_eq!(b.get("car").unwrap().as_slice(), &[Posting::new(0, 1)]);
        assert!(b.get("ca").is_none());
        assert!(b.get("cats").is_none());

        let mut seen = Vec::new();
        b.for_each(|t, l| seen.push((t.to_string(), l.len())));
        seen.sort();
        assert_eq!(seen, vec![("car".to_string(), 1), ("cat".to_string(), 2)]);

        b.for_each_mut(|_, l| l.sort_by_frequency());
        assert_eq!(b.get("cat").unwrap().as_slice()[0], Posting::new(3, 5));
    }

    #[test]
    fn btree_honours_contract() { contract::<BTreeBackend>(); }

    #[test]
    fn hash_honours_contract() { contract::<HashBackend>(); }

    #[test]
    fn trie_honours_contract() { contract::<TrieBackend>(); }
}
