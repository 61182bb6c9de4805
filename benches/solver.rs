//! Criterion benchmarks for the solve hot path
//!
//! Covers: trie construction and full-board path enumeration against a
//! synthetic dictionary large enough to exercise deep trie branches.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gridpilot::board::grid::Board;
use gridpilot::board::search::find_words;
use gridpilot::board::select::rank_and_limit;
use gridpilot::dict::trie::Trie;

/// Deterministic syllable soup standing in for a real word list.
fn make_word_list(count: usize) -> Vec<String> {
    const ONSETS: [&str; 8] = ["t", "th", "h", "r", "n", "d", "st", "gr"];
    const NUCLEI: [&str; 6] = ["a", "e", "o", "ea", "ee", "an"];
    const CODAS: [&str; 7] = ["t", "nd", "r", "te", "d", "n", "ther"];

    let mut words = Vec::with_capacity(count);
    let mut i = 0usize;
    while words.len() < count {
        let onset = ONSETS[i % ONSETS.len()];
        let nucleus = NUCLEI[(i / ONSETS.len()) % NUCLEI.len()];
        let coda = CODAS[(i / (ONSETS.len() * NUCLEI.len())) % CODAS.len()];
        let extra = NUCLEI[i % NUCLEI.len()];
        words.push(format!("{onset}{nucleus}{coda}"));
        words.push(format!("{onset}{nucleus}{coda}{extra}"));
        i += 1;
    }
    words.truncate(count);
    words
}

fn make_trie(count: usize) -> Trie {
    Trie::build(make_word_list(count))
}

// ---------------------------------------------------------------------------
// Trie benchmarks
// ---------------------------------------------------------------------------

fn bench_trie_build(c: &mut Criterion) {
    let words = make_word_list(10_000);
    c.bench_function("trie_build_10k", |b| {
        b.iter(|| Trie::build(black_box(&words).iter().map(String::as_str)))
    });
}

fn bench_trie_lookup(c: &mut Criterion) {
    let trie = make_trie(10_000);
    c.bench_function("trie_contains", |b| {
        b.iter(|| black_box(&trie).contains(black_box("theather")))
    });
}

// ---------------------------------------------------------------------------
// Enumeration benchmarks
// ---------------------------------------------------------------------------

fn bench_find_words_dense(c: &mut Criterion) {
    let trie = make_trie(10_000);
    // A vowel-heavy board keeps many trie branches alive.
    let board = Board::parse("theandeareathern", 4, 4).unwrap();
    c.bench_function("find_words_dense_4x4", |b| {
        b.iter(|| find_words(black_box(&board), black_box(&trie)))
    });
}

fn bench_find_words_sparse(c: &mut Criterion) {
    let trie = make_trie(10_000);
    // Mostly dead letters, so pruning dominates.
    let board = Board::parse("qqzzqqzzqqthzzqq", 4, 4).unwrap();
    c.bench_function("find_words_sparse_4x4", |b| {
        b.iter(|| find_words(black_box(&board), black_box(&trie)))
    });
}

fn bench_solve_and_rank(c: &mut Criterion) {
    let trie = make_trie(10_000);
    let board = Board::parse("theandeareathern", 4, 4).unwrap();
    c.bench_function("solve_and_rank_4x4", |b| {
        b.iter(|| {
            let finds = find_words(black_box(&board), black_box(&trie));
            rank_and_limit(finds, 500)
        })
    });
}

criterion_group!(
    benches,
    bench_trie_build,
    bench_trie_lookup,
    bench_find_words_dense,
    bench_find_words_sparse,
    bench_solve_and_rank
);
criterion_main!(benches);
