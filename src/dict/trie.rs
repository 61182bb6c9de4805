//! Prefix Tree over Lowercase Words
//!
//! Arena representation: all nodes live in one `Vec`, children are integer
//! indices into it. This keeps the hot lookup path free of pointer chasing
//! and makes the whole structure serializable as a flat array.

use serde::{Deserialize, Serialize};

/// Minimum length for a word to be admitted into the dictionary.
pub const MIN_WORD_LEN: usize = 3;

/// Index of a node within the trie arena.
pub type NodeId = u32;

/// The arena index of the root node.
pub const ROOT: NodeId = 0;

/// A single trie node: sorted `(letter, child)` pairs plus a terminal flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Node {
    /// Children sorted by letter, so lookup is a binary search.
    children: Vec<(u8, NodeId)>,
    /// A complete dictionary word ends at this node.
    terminal: bool,
}

/// Prefix tree over lowercase alphabetic words of length ≥ [`MIN_WORD_LEN`].
///
/// Built once from a word source, then immutable for the lifetime of a
/// solving session. Every root→terminal path spells a dictionary word; no
/// terminal exists for words shorter than [`MIN_WORD_LEN`] or containing
/// non-alphabetic characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trie {
    nodes: Vec<Node>,
    word_count: usize,
}

impl Trie {
    /// Create an empty trie (root node only).
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            word_count: 0,
        }
    }

    /// Build a trie from a word source.
    ///
    /// Candidates that are empty, contain a non-alphabetic character, or are
    /// shorter than [`MIN_WORD_LEN`] are skipped silently. Duplicate
    /// insertions are idempotent.
    pub fn build<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for word in words {
            trie.insert(word.as_ref());
        }
        trie
    }

    /// Whether a candidate word is admissible under the ingestion rules.
    pub fn is_candidate(word: &str) -> bool {
        word.len() >= MIN_WORD_LEN && word.chars().all(|c| c.is_ascii_alphabetic())
    }

    /// Insert a single word. Returns `true` if the word was admitted
    /// (whether or not it was already present).
    pub fn insert(&mut self, word: &str) -> bool {
        if !Self::is_candidate(word) {
            return false;
        }

        let mut node = ROOT;
        for letter in word.bytes().map(|b| b.to_ascii_lowercase()) {
            node = match self.child(node, letter) {
                Some(next) => next,
                None => self.add_child(node, letter),
            };
        }

        let end = &mut self.nodes[node as usize];
        if !end.terminal {
            end.terminal = true;
            self.word_count += 1;
        }
        true
    }

    fn add_child(&mut self, parent: NodeId, letter: u8) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(Node::default());
        let children = &mut self.nodes[parent as usize].children;
        let slot = children.partition_point(|&(l, _)| l < letter);
        children.insert(slot, (letter, id));
        id
    }

    /// Look up the child of `node` reached by `letter`.
    #[inline]
    pub fn child(&self, node: NodeId, letter: u8) -> Option<NodeId> {
        let children = &self.nodes[node as usize].children;
        children
            .binary_search_by_key(&letter, |&(l, _)| l)
            .ok()
            .map(|slot| children[slot].1)
    }

    /// Whether a complete dictionary word ends at `node`.
    #[inline]
    pub fn is_terminal(&self, node: NodeId) -> bool {
        self.nodes[node as usize].terminal
    }

    /// Whether the trie contains `word` exactly.
    pub fn contains(&self, word: &str) -> bool {
        let mut node = ROOT;
        for letter in word.bytes().map(|b| b.to_ascii_lowercase()) {
            match self.child(node, letter) {
                Some(next) => node = next,
                None => return false,
            }
        }
        self.is_terminal(node)
    }

    /// Number of distinct words in the trie.
    pub fn len(&self) -> usize {
        self.word_count
    }

    /// Whether the trie holds no words.
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Number of arena nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}
