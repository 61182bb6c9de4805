//! Dictionary trie and word-list compiler
//!
//! The trie is compiled once from a newline-delimited word list and then
//! reloaded verbatim for each solving session.

pub mod lexicon;
pub mod trie;

pub use lexicon::{CompileStats, DictionaryFile};
pub use trie::{Trie, MIN_WORD_LEN};
