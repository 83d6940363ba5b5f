//! # wordhint
//!
//! ## Overview
//!
//! This crate implements an inline word-completion engine for text editors: as the
//! user types, it offers a single completion drawn from the words already present
//! in the document plus a fixed, mode-specific keyword list.
//!
//! The engine is split into a [Dictionary](dictionary::Dictionary) that tracks
//! word occurrence counts with prefix lookup, a [tokenizer](tokenize::tokenize)
//! that extracts words from arbitrary text ranges, and a
//! [Session](session::Session) state machine that reacts to editor events and
//! decides when a hint is shown, what its text is, and how it is accepted or
//! dismissed.
//!
//! The engine never touches an editing surface directly. Embedders implement
//! [EditorHost](host::EditorHost) and forward edit, key, and cursor events to the
//! [Session](session::Session); the crate ships a [ropey]-backed
//! [TextHost](host::TextHost) for headless use and testing.
//!
//! ## Examples
//!
//! ```
//! use wordhint::cursor::Cursor;
//! use wordhint::host::TextHost;
//! use wordhint::keywords::KeywordRegistry;
//! use wordhint::session::Session;
//!
//! let mut registry = KeywordRegistry::new();
//! registry.define("javascript", ["function", "let"]);
//!
//! let mut host = TextHost::new("let fooBar = 1;\n");
//! let mut session = Session::new("javascript", &registry).unwrap();
//! session.start(&mut host);
//!
//! // Typing "let foo" offers the rest of "fooBar" at the cursor.
//! host.edit(&mut session, Cursor::new(1, 0), Cursor::new(1, 0), "let foo");
//! assert_eq!(session.hint().map(|(text, _)| text), Some("Bar"));
//! ```

// Require docs for public APIs, and disable the more annoying clippy lints.
#![deny(missing_docs)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::match_like_matches_macro)]
#![allow(clippy::needless_return)]

#[macro_use]
mod util;

pub mod cursor;
pub mod dictionary;
pub mod errors;
pub mod host;
pub mod keywords;
pub mod session;
pub mod tokenize;

pub use crossterm;
