//! Path Enumeration
//!
//! Depth-first search that walks the board and the dictionary trie
//! simultaneously, enumerating every dictionary word reachable as a simple
//! path (no repeated cell). Only the first path discovered per word is
//! retained; later paths for the same word are discarded.

use crate::board::grid::{Board, Cell};
use crate::dict::trie::{self, Trie};
use serde::Serialize;
use std::collections::HashSet;

/// A word found on the board, with the cell path that spells it.
///
/// Invariant: the word's letters, read along `path`, exactly match the board
/// letters in order, and `path` contains no repeated cell.
#[derive(Debug, Clone, Serialize)]
pub struct WordFind {
    pub word: String,
    pub path: Vec<Cell>,
}

/// Enumerate every dictionary word present on the board.
///
/// Starts an independent DFS from every cell; each search thread of the
/// recursion carries the current trie node, accumulated word and path, and a
/// visited set scoped to the current path (unmarked on return, so a cell may
/// participate in multiple disjoint words). A board with no valid words
/// yields an empty result, not an error.
pub fn find_words(board: &Board, trie: &Trie) -> Vec<WordFind> {
    let mut walker = Walker {
        board,
        trie,
        visited: vec![false; board.rows() * board.cols()],
        word: String::new(),
        path: Vec::with_capacity(board.rows() * board.cols()),
        seen: HashSet::new(),
        finds: Vec::new(),
    };

    for cell in board.cells() {
        walker.descend(cell, trie::ROOT);
    }

    tracing::debug!(
        words = walker.finds.len(),
        "enumerated {}x{} board",
        board.rows(),
        board.cols()
    );
    walker.finds
}

struct Walker<'a> {
    board: &'a Board,
    trie: &'a Trie,
    visited: Vec<bool>,
    word: String,
    path: Vec<Cell>,
    seen: HashSet<String>,
    finds: Vec<WordFind>,
}

impl Walker<'_> {
    fn descend(&mut self, cell: Cell, node: trie::NodeId) {
        let letter = self.board.letter(cell);
        let Some(next) = self.trie.child(node, letter) else {
            return;
        };

        let slot = cell.index(self.board.cols());
        self.visited[slot] = true;
        self.word.push(letter as char);
        self.path.push(cell);

        if self.trie.is_terminal(next)
            && self.word.len() >= trie::MIN_WORD_LEN
            && !self.seen.contains(&self.word)
        {
            self.seen.insert(self.word.clone());
            self.finds.push(WordFind {
                word: self.word.clone(),
                path: self.path.clone(),
            });
        }

        let neighbors: Vec<Cell> = self.board.neighbors(cell).collect();
        for neighbor in neighbors {
            if !self.visited[neighbor.index(self.board.cols())] {
                self.descend(neighbor, next);
            }
        }

        // Unmark on return: the cell may legitimately appear in other words.
        self.visited[slot] = false;
        self.word.pop();
        self.path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(board: &str, words: &[&str]) -> Vec<WordFind> {
        let trie = Trie::build(words.iter().copied());
        let board = Board::parse(board, 4, 4).unwrap();
        find_words(&board, &trie)
    }

    fn words_of(finds: &[WordFind]) -> Vec<&str> {
        finds.iter().map(|f| f.word.as_str()).collect()
    }

    #[test]
    fn test_finds_adjacent_word() {
        // t(0,1) h(0,2) e(0,3) on this layout
        let finds = find("otherandeeatxyzq", &["the"]);
        assert_eq!(words_of(&finds), vec!["the"]);
        let path = &finds[0].path;
        assert_eq!(path.len(), 3);
        let board = Board::parse("otherandeeatxyzq", 4, 4).unwrap();
        let spelled: String = path.iter().map(|&c| board.letter(c) as char).collect();
        assert_eq!(spelled, "the");
    }

    #[test]
    fn test_paths_are_simple_and_adjacent() {
        let finds = find(
            "otherandeeatxyzq",
            &["the", "hand", "rand", "eat", "oar", "aye", "eye", "tan"],
        );
        assert_eq!(finds.len(), 8);
        let board = Board::parse("otherandeeatxyzq", 4, 4).unwrap();
        for f in &finds {
            let mut distinct = HashSet::new();
            assert!(f.path.iter().all(|&c| distinct.insert(c)), "{} repeats a cell", f.word);
            for pair in f.path.windows(2) {
                assert!(
                    board.neighbors(pair[0]).any(|n| n == pair[1]),
                    "{} path not adjacent",
                    f.word
                );
            }
            let spelled: String = f.path.iter().map(|&c| board.letter(c) as char).collect();
            assert_eq!(spelled, f.word);
        }
    }

    #[test]
    fn test_word_not_on_board() {
        let finds = find("otherandeeatxyzq", &["queen"]);
        assert!(finds.is_empty());
    }

    #[test]
    fn test_non_adjacent_letters_do_not_spell() {
        // t, o, e all appear, but no o has an adjacent e
        let finds = find("otherandeeatxyzq", &["toe"]);
        assert!(finds.is_empty());
    }

    #[test]
    fn test_cell_reused_across_words() {
        // "hat" and "rat" both pass through a(1,1) and t(0,1)
        let finds = find("otherandeeatxyzq", &["hat", "rat"]);
        let found = words_of(&finds);
        assert!(found.contains(&"hat"));
        assert!(found.contains(&"rat"));
    }

    #[test]
    fn test_first_discovery_wins() {
        // Two distinct paths can spell "tee"; exactly one result is kept.
        let finds = find("teetxxxxxxxxxxxx", &["tee"]);
        assert_eq!(finds.iter().filter(|f| f.word == "tee").count(), 1);
    }

    #[test]
    fn test_idempotent_across_runs() {
        let trie = Trie::build(["the", "her", "hero", "rand"]);
        let board = Board::parse("otherandeeatxyzq", 4, 4).unwrap();
        let a: Vec<String> = find_words(&board, &trie).into_iter().map(|f| f.word).collect();
        let b: Vec<String> = find_words(&board, &trie).into_iter().map(|f| f.word).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_board_vocabulary() {
        let finds = find("qqqqqqqqqqqqqqqq", &["the"]);
        assert!(finds.is_empty());
    }
}
