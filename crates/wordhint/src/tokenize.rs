//! # Word extraction
//!
//! ## Overview
//!
//! A tokenizer that splits text into maximal runs of word characters, as
//! determined by a caller-supplied classifier. It works identically on whole
//! documents and on arbitrary substrings; callers tokenizing a subrange are
//! expected to pick line-aligned ranges so that words clipped at the boundary
//! are acceptable.
use std::str::CharIndices;

/// The default word-character classifier: alphanumerics and underscores.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Iterator over the words within a piece of text.
///
/// Yields `(word, start_offset)` pairs, where the offset is the byte position of
/// the word's first character within the tokenized text.
pub struct Tokens<'a, F>
where
    F: Fn(char) -> bool,
{
    text: &'a str,
    chars: CharIndices<'a>,
    is_word_char: F,
}

impl<'a, F> Iterator for Tokens<'a, F>
where
    F: Fn(char) -> bool,
{
    type Item = (&'a str, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let mut start = None;

        while let Some((i, c)) = self.chars.next() {
            match start {
                None if (self.is_word_char)(c) => {
                    start = Some(i);
                },
                Some(s) if !(self.is_word_char)(c) => {
                    return Some((&self.text[s..i], s));
                },
                _ => continue,
            }
        }

        // A word still open at end of input is emitted as-is.
        start.map(|s| (&self.text[s..], s))
    }
}

/// Tokenize `text` into maximal word runs using the given classifier.
pub fn tokenize<F>(text: &str, is_word_char: F) -> Tokens<'_, F>
where
    F: Fn(char) -> bool,
{
    Tokens { text, chars: text.char_indices(), is_word_char }
}
