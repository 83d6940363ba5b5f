//! # Word dictionary
//!
//! ## Overview
//!
//! A multiset of words with prefix lookup, used as the source of completion
//! candidates. Words are reference-counted so that deleting one occurrence of a
//! word that appears several times in a document doesn't make it vanish from
//! suggestions. Keywords are marked per-entry and are never evicted, no matter
//! how many times they are removed.
use radix_trie::{Trie, TrieCommon};

use crate::util::completion_keys;

/// A single dictionary entry.
#[derive(Debug, Default, Eq, PartialEq)]
struct WordEntry {
    /// Number of occurrences contributing to this entry.
    count: usize,

    /// Whether this word came from the mode's keyword list.
    keyword: bool,
}

/// Tracks known words and serves prefix queries over them.
///
/// Membership invariant: an entry exists iff its occurrence count is positive or
/// it is a keyword. Words starting with a decimal digit are never members;
/// [add_word](Dictionary::add_word) and [remove_word](Dictionary::remove_word)
/// both ignore them.
#[derive(Default)]
pub struct Dictionary {
    trie: Trie<String, WordEntry>,
}

fn excluded(word: &str) -> bool {
    match word.chars().next() {
        None => true,
        Some(c) => c.is_ascii_digit(),
    }
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Dictionary::default()
    }

    /// Whether this dictionary contains zero words.
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// Increment the occurrence count for a `word`.
    ///
    /// Empty and numeric-leading words are ignored.
    pub fn add_word(&mut self, word: &str) {
        if excluded(word) {
            return;
        }

        if let Some(entry) = self.trie.get_mut(word) {
            entry.count += 1;
        } else {
            self.trie.insert(word.to_string(), WordEntry { count: 1, keyword: false });
        }
    }

    /// Mark a `word` as a keyword, making it a permanent member.
    ///
    /// Keywords survive any number of [remove_word](Dictionary::remove_word)
    /// calls; their occurrence count still tracks appearances in the document.
    pub fn add_keyword(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }

        if let Some(entry) = self.trie.get_mut(word) {
            entry.keyword = true;
        } else {
            self.trie.insert(word.to_string(), WordEntry { count: 0, keyword: true });
        }
    }

    /// Decrement the occurrence count for a `word`.
    ///
    /// The entry is evicted once its count reaches zero, unless it is a keyword.
    /// Removing an absent or zero-count word is a no-op.
    pub fn remove_word(&mut self, word: &str) {
        if excluded(word) {
            return;
        }

        let Some(entry) = self.trie.get_mut(word) else {
            return;
        };

        if entry.count > 0 {
            entry.count -= 1;
        }

        if entry.count == 0 && !entry.keyword {
            self.trie.remove(word);
        }
    }

    /// Get every member word starting with `prefix`, in lexicographic order.
    ///
    /// The ordering is the trie's natural byte order and is stable; the result
    /// is capped at an internal maximum.
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        completion_keys(&self.trie, prefix)
    }

    /// The occurrence count recorded for a `word`.
    pub fn count(&self, word: &str) -> usize {
        self.trie.get(word).map(|e| e.count).unwrap_or(0)
    }

    /// Whether a `word` is currently a member.
    pub fn contains(&self, word: &str) -> bool {
        self.trie.get(word).is_some()
    }
}
