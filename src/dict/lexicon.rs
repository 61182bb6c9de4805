//! Word-List Compilation and Dictionary Persistence
//!
//! Turns a newline-delimited word list into a compiled [`Trie`] and wraps it
//! in a versioned on-disk file so solving sessions can reload it verbatim.

use crate::dict::trie::Trie;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader};
use std::path::Path;
use uuid::Uuid;

/// Current dictionary file format version
pub const CURRENT_FORMAT_VERSION: &str = "1.0";

/// Counters for one compilation pass over a word list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileStats {
    /// Words admitted into the trie (duplicates counted once).
    pub ingested: usize,
    /// Lines skipped because they were empty after trimming.
    pub skipped_empty: usize,
    /// Lines skipped for containing a non-alphabetic character.
    pub skipped_non_alpha: usize,
    /// Lines skipped for being shorter than the minimum word length.
    pub skipped_short: usize,
}

impl CompileStats {
    /// Total lines that did not make it into the trie.
    pub fn skipped(&self) -> usize {
        self.skipped_empty + self.skipped_non_alpha + self.skipped_short
    }
}

/// Dictionary file metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryMetadata {
    /// Unique dictionary ID
    pub id: Uuid,
    /// Label of the word list this dictionary was compiled from
    pub source: String,
    /// Compilation time
    pub built_at: DateTime<Utc>,
    /// Number of distinct words
    pub word_count: usize,
    /// Version of the dictionary file format
    pub format_version: String,
}

impl Default for DictionaryMetadata {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            source: String::new(),
            built_at: Utc::now(),
            word_count: 0,
            format_version: CURRENT_FORMAT_VERSION.to_string(),
        }
    }
}

/// A compiled dictionary: metadata header plus the trie itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryFile {
    /// Dictionary metadata
    pub metadata: DictionaryMetadata,
    /// The compiled prefix tree
    pub trie: Trie,
}

impl DictionaryFile {
    /// Wrap a compiled trie with fresh metadata.
    pub fn new(trie: Trie, source: impl Into<String>) -> Self {
        Self {
            metadata: DictionaryMetadata {
                source: source.into(),
                word_count: trie.len(),
                ..Default::default()
            },
            trie,
        }
    }

    /// Save the dictionary to a file (compact JSON; these get large).
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a dictionary from a file.
    ///
    /// Logs a warning if the file was saved with a different format version,
    /// but still attempts to deserialize it.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let dict: DictionaryFile = serde_json::from_str(&content)?;
        if dict.metadata.format_version != CURRENT_FORMAT_VERSION {
            tracing::warn!(
                source = %dict.metadata.source,
                found = %dict.metadata.format_version,
                expected = CURRENT_FORMAT_VERSION,
                "Dictionary has different format version"
            );
        }
        if dict.trie.is_empty() {
            return Err(crate::Error::Dictionary(format!(
                "dictionary {} contains no words",
                path.display()
            )));
        }
        Ok(dict)
    }
}

/// Compile a newline-delimited word list file into a trie.
///
/// One word per line; lines are trimmed and lowercased. Empty lines, lines
/// with non-alphabetic characters, and words shorter than
/// [`crate::dict::MIN_WORD_LEN`] are skipped and counted.
pub fn compile_word_list(path: &Path) -> crate::Result<(Trie, CompileStats)> {
    let file = std::fs::File::open(path)?;
    let reader = BufReader::new(file);

    let mut trie = Trie::new();
    let mut stats = CompileStats::default();

    for line in reader.lines() {
        let word = line?.trim().to_lowercase();
        if word.is_empty() {
            stats.skipped_empty += 1;
        } else if !word.chars().all(|c| c.is_ascii_alphabetic()) {
            stats.skipped_non_alpha += 1;
        } else if !trie.insert(&word) {
            stats.skipped_short += 1;
        } else {
            stats.ingested += 1;
        }
    }

    tracing::info!(
        ingested = stats.ingested,
        skipped = stats.skipped(),
        nodes = trie.node_count(),
        "compiled word list {}",
        path.display()
    );
    Ok((trie, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_word_list(dir: &TempDir, lines: &str) -> std::path::PathBuf {
        let path = dir.path().join("words.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(lines.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_compile_skip_rules() {
        let dir = TempDir::new().unwrap();
        let path = write_word_list(&dir, "the\nat\n\nhello-world\nOther\nhand\n");
        let (trie, stats) = compile_word_list(&path).unwrap();

        assert_eq!(stats.ingested, 3);
        assert_eq!(stats.skipped_empty, 1);
        assert_eq!(stats.skipped_non_alpha, 1);
        assert_eq!(stats.skipped_short, 1);
        assert!(trie.contains("other"));
        assert!(trie.contains("hand"));
    }

    #[test]
    fn test_compile_counts_duplicates_once() {
        let dir = TempDir::new().unwrap();
        let path = write_word_list(&dir, "the\nthe\nTHE\n");
        let (trie, _) = compile_word_list(&path).unwrap();
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_dictionary_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let trie = Trie::build(["the", "other"]);
        let dict = DictionaryFile::new(trie, "unit-test");
        let path = dir.path().join("dictionary.json");
        dict.save(&path).unwrap();

        let loaded = DictionaryFile::load(&path).unwrap();
        assert_eq!(loaded.metadata.word_count, 2);
        assert_eq!(loaded.metadata.source, "unit-test");
        assert!(loaded.trie.contains("other"));
    }

    #[test]
    fn test_load_rejects_empty_dictionary() {
        let dir = TempDir::new().unwrap();
        let dict = DictionaryFile::new(Trie::new(), "empty");
        let path = dir.path().join("dictionary.json");
        dict.save(&path).unwrap();

        assert!(matches!(
            DictionaryFile::load(&path),
            Err(crate::Error::Dictionary(_))
        ));
    }
}
