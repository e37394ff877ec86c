//! Word-frequency counting over text sources, backed by `ChainHashMap`.
//!
//! Tokens are case-folded alphanumeric/apostrophe runs; counts accumulate
//! in a chained table under the position-weighted hasher so bucket
//! placement is reproducible run to run. Results rank by count descending
//! with a stable tie-break: words with equal counts keep their
//! enumeration order.

use crate::chain_hash_map::ChainHashMap;
use crate::hashers::WeightedSumBuildHasher;
use log::debug;
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Matches word tokens: alphanumeric runs that may carry interior
/// apostrophes (`alice`, `don't`, `x`). Leftmost-first alternation, so a
/// multi-character run wins over a lone word character.
const WORD_PATTERN: &str = r"\w[\w']*\w|\w";

/// Bucket count used when none is given. Sized for a book-length corpus
/// without resizing; growth stays explicit via the table's API.
pub const DEFAULT_CAPACITY: usize = 2500;

/// Errors from reading a text source.
#[derive(Debug, Error)]
pub enum WordCountError {
    #[error("failed to read text source: {0}")]
    Io(#[from] io::Error),
}

/// Accumulates case-insensitive word counts from lines of text.
pub struct WordCounter {
    pattern: Regex,
    counts: ChainHashMap<String, u64, WeightedSumBuildHasher>,
}

impl WordCounter {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a counter whose table has `capacity` buckets.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pattern: Regex::new(WORD_PATTERN).expect("word pattern is valid"),
            counts: ChainHashMap::with_capacity_and_hasher(capacity, WeightedSumBuildHasher),
        }
    }

    /// Tokenize one line and fold each case-lowered word into the counts.
    pub fn add_line(&mut self, line: &str) {
        for m in self.pattern.find_iter(line) {
            let word = m.as_str().to_lowercase();
            match self.counts.get_mut(word.as_str()) {
                Some(count) => *count += 1,
                None => {
                    self.counts.put(word, 1);
                }
            }
        }
    }

    /// Consume a reader line by line.
    pub fn add_reader<R: BufRead>(&mut self, reader: R) -> Result<(), WordCountError> {
        for line in reader.lines() {
            self.add_line(&line?);
        }
        Ok(())
    }

    /// Number of distinct words seen so far.
    pub fn distinct_words(&self) -> usize {
        self.counts.len()
    }

    /// Occurrences of `word` (case-sensitive over the folded form).
    pub fn count_of(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// All (word, count) pairs sorted by count descending, truncated to
    /// `number`. The sort is stable, so ties keep their prior relative
    /// order.
    pub fn top_words(&self, number: usize) -> Vec<(String, u64)> {
        let mut ranked: Vec<(String, u64)> = self
            .counts
            .iter()
            .map(|(word, &count)| (word.clone(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(number);
        ranked
    }
}

impl Default for WordCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Count case-insensitive word occurrences in the file at `source` and
/// return the top `number` (word, count) pairs, most frequent first.
pub fn top_words(source: &Path, number: usize) -> Result<Vec<(String, u64)>, WordCountError> {
    let file = File::open(source)?;
    let mut counter = WordCounter::new();
    counter.add_reader(BufReader::new(file))?;
    debug!(
        "counted {} distinct words in {}",
        counter.distinct_words(),
        source.display()
    );
    Ok(counter.top_words(number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Invariant: tokenization is case-insensitive and strips punctuation
    /// outside word runs.
    #[test]
    fn case_folding_merges_variants() {
        let mut counter = WordCounter::new();
        counter.add_line("the The THE the.");
        assert_eq!(counter.top_words(10), vec![("the".to_string(), 4)]);
    }

    /// Invariant: interior apostrophes stay inside a token; leading and
    /// trailing ones do not.
    #[test]
    fn apostrophes_bind_interior_only() {
        let mut counter = WordCounter::new();
        counter.add_line("don't Don't 'quoted'");
        assert_eq!(counter.count_of("don't"), 2);
        assert_eq!(counter.count_of("quoted"), 1);
        assert_eq!(counter.count_of("'quoted'"), 0);
    }

    /// Invariant: a lone word character is a token of its own.
    #[test]
    fn single_character_words_count() {
        let mut counter = WordCounter::new();
        counter.add_line("a b a");
        assert_eq!(counter.count_of("a"), 2);
        assert_eq!(counter.count_of("b"), 1);
    }

    /// Invariant: ranking is by count descending and truncated to the
    /// requested number.
    #[test]
    fn top_words_ranks_and_truncates() {
        let mut counter = WordCounter::new();
        counter.add_line("red red red blue blue green");
        let top = counter.top_words(2);
        assert_eq!(
            top,
            vec![("red".to_string(), 3), ("blue".to_string(), 2)]
        );
        assert_eq!(counter.top_words(10).len(), 3);
        assert!(counter.top_words(0).is_empty());
    }

    /// Invariant: the sort is stable, so equal counts keep their
    /// enumeration order; higher counts still rank first.
    #[test]
    fn equal_counts_keep_enumeration_order() {
        let mut counter = WordCounter::new();
        counter.add_line("red blue red blue green green green");
        // red and blue tie at 2; enumeration saw red first, and the
        // stable sort must not swap them.
        assert_eq!(
            counter.top_words(3),
            vec![
                ("green".to_string(), 3),
                ("red".to_string(), 2),
                ("blue".to_string(), 2),
            ]
        );
    }

    /// Invariant: `add_reader` folds every line of the stream.
    #[test]
    fn reader_accumulates_across_lines() {
        let text = "It was the best of times,\nit was the worst of times.\n";
        let mut counter = WordCounter::new();
        counter.add_reader(Cursor::new(text)).unwrap();
        assert_eq!(counter.count_of("it"), 2);
        assert_eq!(counter.count_of("was"), 2);
        assert_eq!(counter.count_of("times"), 2);
        assert_eq!(counter.count_of("best"), 1);
        assert_eq!(counter.distinct_words(), 7);
    }

    /// Invariant: reading a missing file surfaces an `Io` error rather
    /// than panicking.
    #[test]
    fn missing_file_is_an_io_error() {
        let err = top_words(Path::new("definitely/not/here.txt"), 5).unwrap_err();
        assert!(matches!(err, WordCountError::Io(_)));
    }
}
