//! Board model, path enumeration, and result ranking
//!
//! The board is an R×C grid of single letters with 8-directional adjacency.
//! Enumeration walks the board and the dictionary trie simultaneously and
//! records every word reachable as a simple path.

pub mod grid;
pub mod search;
pub mod select;

pub use grid::{Board, Cell};
pub use search::{find_words, WordFind};
pub use select::{rank_and_limit, DEFAULT_LIMIT};
