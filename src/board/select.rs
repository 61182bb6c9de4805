//! Result Ranking and Truncation
//!
//! Imposes a strict total order on enumerated words so downstream gesture
//! sequencing (and test assertions) are reproducible.

use crate::board::search::WordFind;

/// Default cap on the number of words handed to the gesture sequencer.
pub const DEFAULT_LIMIT: usize = 500;

/// Sort by descending word length, ties broken by ascending lexical order,
/// then truncate to the first `limit` entries.
pub fn rank_and_limit(mut finds: Vec<WordFind>, limit: usize) -> Vec<WordFind> {
    finds.sort_by(|a, b| {
        b.word
            .len()
            .cmp(&a.word.len())
            .then_with(|| a.word.cmp(&b.word))
    });
    finds.truncate(limit);
    finds
}
