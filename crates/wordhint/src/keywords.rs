//! # Keyword lists
//!
//! ## Overview
//!
//! Per-mode keyword vocabularies. Modes are an open enumeration supplied by the
//! embedding application; the engine only requires that the mode requested at
//! session construction has a registered list.
use std::collections::HashMap;

/// Maps mode identifiers onto their fixed keyword vocabularies.
#[derive(Default)]
pub struct KeywordRegistry {
    modes: HashMap<String, Vec<String>>,
}

impl KeywordRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        KeywordRegistry::default()
    }

    /// Register the keyword list for a mode, replacing any previous list.
    pub fn define<M, W>(&mut self, mode: M, words: impl IntoIterator<Item = W>)
    where
        M: Into<String>,
        W: Into<String>,
    {
        let words = words.into_iter().map(Into::into).collect();

        self.modes.insert(mode.into(), words);
    }

    /// Get the keyword list registered for a mode.
    pub fn get(&self, mode: &str) -> Option<&[String]> {
        self.modes.get(mode).map(Vec::as_slice)
    }
}
