use crate::index::{DocId, IndexBackend, Posting, PostingList};

/// Radix trie keyed by term. Each edge carries a label of one or more chars,
/// siblings never share a first char and are kept sorted by label, so a
/// depth-first walk yields terms in ascending byte order.
#[derive(Debug, Default)]
pub struct TrieBackend {
    root: Node,
    terms: usize,
}

#[derive(Debug, Default)]
struct Node {
    label: String,
    postings: Option<PostingList>,
    children: Vec<Node>,
}

impl Node {
    fn leaf(label: &str, posting: Posting) -> Self {
        Self { label: label.to_string(), postings: Some(vec![posting].into()), children: Vec::new() }
    }

    fn first_char(&self) -> Option<char> { self.label.chars().next() }

    fn child(&self, c: char) -> Result<usize, usize> {
        self.children.binary_search_by(|n| n.first_char().cmp(&Some(c)))
    }

    /// Moves everything below byte offset `at` of the label into a new single child.
    fn split(&mut self, at: usize) {
        let tail = Node {
            label: self.label[at..].to_string(),
            postings: self.postings.take(),
            children: std::mem::take(&mut self.children),
        };
        self.label.truncate(at);
        self.children.push(tail);
    }

    fn walk<'a, F>(&'a self, key: &mut String, f: &mut F)
    where
        F: FnMut(&str, &'a PostingList),
    {
        let mark = key.len();
        key.push_str(&self.label);
        if let Some(list) = &self.postings {
            f(key.as_str(), list);
        }
        for child in &self.children {
            child.walk(key, f);
        }
        key.truncate(mark);
    }

    fn walk_mut<F>(&mut self, key: &mut String, f: &mut F)
    where
        F: FnMut(&str, &mut PostingList),
    {
        let mark = key.len();
        key.push_str(&self.label);
        if let Some(list) = &mut self.postings {
            f(key.as_str(), list);
        }
        for child in &mut self.children {
            child.walk_mut(key, f);
        }
        key.truncate(mark);
    }

    #[cfg(test)]
    fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }
}

/// Byte length of the longest common prefix, always on a char boundary of both.
fn common_prefix(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .take_while(|((_, x), y)| x == y)
        .last()
        .map_or(0, |((i, c), _)| i + c.len_utf8())
}

impl IndexBackend for TrieBackend {
    const NAME: &'static str = "trie";

    fn get(&self, term: &str) -> Option<&PostingList> {
        let mut node = &self.root;
        let mut rest = term;
        while let Some(c) = rest.chars().next() {
            let child = &node.children[node.child(c).ok()?];
            rest = rest.strip_prefix(child.label.as_str())?;
            node = child;
        }
        node.postings.as_ref()
    }

    fn insert_or_append(&mut self, term: &str, doc_id: DocId, freq: u32) {
        let posting = Posting::new(doc_id, freq);
        let mut node = &mut self.root;
        let mut rest = term;
        while let Some(c) = rest.chars().next() {
            match node.child(c) {
                Err(pos) => {
                    node.children.insert(pos, Node::leaf(rest, posting));
                    self.terms += 1;
                    return;
                }
                Ok(pos) => {
                    let child = &mut node.children[pos];
                    let shared = common_prefix(&child.label, rest);
                    if shared < child.label.len() {
                        child.split(shared);
                    }
                    rest = &rest[shared..];
                    node = child;
                }
            }
        }
        if let Some(list) = &mut node.postings {
            list.push(posting);
            return;
        }
        node.postings = Some(vec![posting].into());
        self.terms += 1;
    }

    fn for_each<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(&str, &'a PostingList),
    {
        self.root.walk(&mut String::new(), &mut f);
    }

    fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, &mut PostingList),
    {
        self.root.walk_mut(&mut String::new(), &mut f);
    }

    fn len(&self) -> usize { self.terms }
}
