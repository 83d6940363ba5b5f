//! # Completion sessions
//!
//! ## Overview
//!
//! A [Session] owns the [Dictionary] for one document and reacts to the events
//! its [EditorHost] delivers. It is either *idle* (no hint rendered) or
//! *hinted* (a suffix is rendered at an anchor position), and moves between the
//! two as edits, cursor motion, and key presses arrive.
//!
//! All processing is synchronous: the removal, addition, and hint recompute for
//! one edit complete before the next event is observed. The host must deliver
//! the pre-mutation notification for an edit strictly before the post-mutation
//! one.
use crossterm::event::{KeyCode, KeyEvent};
use tracing::{debug, trace};

use crate::cursor::Cursor;
use crate::dictionary::Dictionary;
use crate::errors::{SessionError, SessionResult};
use crate::host::{EditEvent, EditOrigin, EditorHost};
use crate::keywords::KeywordRegistry;
use crate::tokenize::{is_word_char, tokenize};

/// What the host should do with a key press after the session has seen it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyDisposition {
    /// The key was consumed; its default action must not run.
    Consumed,

    /// The key was not consumed; its default action proceeds normally.
    PassThrough,
}

struct ActiveHint {
    text: String,
    anchor: Cursor,
}

/// Decides when an inline completion hint is shown, what its text is, and how
/// it is accepted or dismissed.
pub struct Session {
    dictionary: Dictionary,
    keywords: Vec<String>,
    is_word_char: Box<dyn Fn(char) -> bool + Send + Sync>,
    cursor: Cursor,
    hint: Option<ActiveHint>,
    attached: bool,
}

impl Session {
    /// Create a session for the given mode.
    ///
    /// Fails fast when the mode has no registered keyword list; the engine
    /// never silently runs with zero keywords.
    pub fn new(mode: &str, registry: &KeywordRegistry) -> SessionResult<Self> {
        let keywords = registry
            .get(mode)
            .ok_or_else(|| SessionError::UnknownMode(mode.to_string()))?
            .to_vec();

        Ok(Session {
            dictionary: Dictionary::new(),
            keywords,
            is_word_char: Box::new(is_word_char),
            cursor: Cursor::default(),
            hint: None,
            attached: false,
        })
    }

    /// Replace the word-character classifier used for tokenizing and for
    /// finding the fragment left of the cursor.
    pub fn with_classifier<F>(mut self, classifier: F) -> Self
    where
        F: Fn(char) -> bool + Send + Sync + 'static,
    {
        self.is_word_char = Box::new(classifier);
        self
    }

    /// The dictionary backing this session.
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// The currently displayed hint and its anchor, if any.
    pub fn hint(&self) -> Option<(&str, &Cursor)> {
        self.hint.as_ref().map(|h| (h.text.as_str(), &h.anchor))
    }

    /// Attach to a host: seed the dictionary from its current text and begin
    /// reacting to events.
    pub fn start<H: EditorHost>(&mut self, host: &mut H) {
        self.attached = true;
        self.reset(host);
    }

    /// Detach from the host, clearing any rendered hint.
    ///
    /// Events arriving while detached are ignored.
    pub fn stop<H: EditorHost>(&mut self, host: &mut H) {
        self.dismiss(host);
        self.attached = false;
    }

    /// Rebuild the dictionary from the host's full text plus the mode keywords.
    pub fn reset<H: EditorHost>(&mut self, host: &mut H) {
        self.dismiss(host);
        self.dictionary = Dictionary::new();

        let text = host.text();
        self.add_words(&text);

        let Session { dictionary, keywords, .. } = self;

        for word in keywords.iter() {
            dictionary.add_keyword(word);
        }

        self.cursor = host.cursor();

        debug!(keywords = self.keywords.len(), "dictionary rebuilt from document");
    }

    /// Handle the pre-mutation notification for an edit by forgetting the words
    /// on the lines the old range spans.
    pub fn on_before_change<H: EditorHost>(&mut self, host: &H, ev: &EditEvent) {
        if !self.attached {
            return;
        }

        let old = host.lines(ev.from.line(), ev.to.line());
        self.remove_words(&old);
    }

    /// Handle the post-mutation notification for an edit: learn the words the
    /// new range spans and recompute the hint at the host's cursor.
    ///
    /// A [SetValue](EditOrigin::SetValue) origin means the content was
    /// wholesale replaced, and triggers a [reset](Session::reset) instead of an
    /// incremental update.
    pub fn on_change<H: EditorHost>(&mut self, host: &mut H, ev: &EditEvent) {
        if !self.attached {
            return;
        }

        if ev.origin == EditOrigin::SetValue {
            self.reset(host);
        } else {
            let new = host.lines(ev.from.line(), ev.to.line());
            self.add_words(&new);
        }

        self.cursor = host.cursor();
        self.recompute_hint(host);
    }

    /// Record cursor motion, clearing the hint when the new position has moved
    /// away from the anchor in both line and column.
    ///
    /// A move that keeps either coordinate leaves an active hint in place.
    pub fn on_cursor_move<H: EditorHost>(&mut self, host: &mut H, cursor: Cursor) {
        if !self.attached {
            return;
        }

        if let Some(hint) = &self.hint {
            let anchor = &hint.anchor;

            if cursor.line() != anchor.line() && cursor.column() != anchor.column() {
                self.dismiss(host);
            }
        }

        self.cursor = cursor;
    }

    /// Handle a key press.
    ///
    /// While a hint is displayed, Tab, Enter, and Right accept it and consume
    /// the key; any other key dismisses the hint and passes through. Without a
    /// hint every key passes through untouched.
    pub fn on_key<H: EditorHost>(&mut self, host: &mut H, key: &KeyEvent) -> KeyDisposition {
        if !self.attached || self.hint.is_none() {
            return KeyDisposition::PassThrough;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Enter | KeyCode::Right => {
                self.accept(host);

                KeyDisposition::Consumed
            },
            _ => {
                self.dismiss(host);

                KeyDisposition::PassThrough
            },
        }
    }

    /// Accept the current hint, inserting its text at the anchor.
    ///
    /// The dictionary is updated exactly as if the host had delivered the edit
    /// events for the insert itself. Does nothing while idle.
    pub fn accept<H: EditorHost>(&mut self, host: &mut H) {
        let Some(active) = self.hint.take() else {
            return;
        };

        host.clear_hint();
        debug!(hint = %active.text, "hint accepted");

        // Hint text never contains a line break, so the insert stays on the
        // anchor's line.
        let line = active.anchor.line();
        let old = host.lines(line, line);
        self.remove_words(&old);

        host.insert(&active.anchor, &active.text, EditOrigin::Hint);

        let new = host.lines(line, line);
        self.add_words(&new);

        self.cursor = host.cursor();
        self.recompute_hint(host);
    }

    /// Dismiss the current hint, if any. Idempotent.
    pub fn dismiss<H: EditorHost>(&mut self, host: &mut H) {
        if self.hint.take().is_some() {
            host.clear_hint();
            trace!("hint cleared");
        }
    }

    fn add_words(&mut self, text: &str) {
        let is_word_char = &*self.is_word_char;
        let dictionary = &mut self.dictionary;

        for (word, _) in tokenize(text, |c| is_word_char(c)) {
            dictionary.add_word(word);
        }
    }

    fn remove_words(&mut self, text: &str) {
        let is_word_char = &*self.is_word_char;
        let dictionary = &mut self.dictionary;

        for (word, _) in tokenize(text, |c| is_word_char(c)) {
            dictionary.remove_word(word);
        }
    }

    /// Recompute the hint for the word fragment left of the recorded cursor.
    fn recompute_hint<H: EditorHost>(&mut self, host: &mut H) {
        self.dismiss(host);

        let line = host.line(self.cursor.line());
        let before: Vec<char> = line.chars().take(self.cursor.column()).collect();

        let mut start = before.len();
        while start > 0 && (self.is_word_char)(before[start - 1]) {
            start -= 1;
        }

        let fragment: String = before[start..].iter().collect();

        if fragment.is_empty() {
            return;
        }

        let matches = self.dictionary.words_with_prefix(&fragment);

        // The fragment itself may be a member; a hint must be a strictly
        // longer word.
        let Some(word) = matches.iter().find(|w| w.len() > fragment.len()) else {
            return;
        };

        let suffix = &word[fragment.len()..];

        host.show_hint(&self.cursor, suffix);
        trace!(hint = %suffix, "showing hint");

        self.hint = Some(ActiveHint {
            text: suffix.to_string(),
            anchor: self.cursor.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crossterm::event::KeyModifiers;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use crate::host::TextHost;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mkhost(doc: &str) -> (TextHost, Session) {
        let mut registry = KeywordRegistry::new();
        registry.define("javascript", ["function", "if", "let", "return", "var"]);

        let mut session = Session::new("javascript", &registry).unwrap();
        let mut host = TextHost::new(doc);
        session.start(&mut host);

        return (host, session);
    }

    #[test]
    fn test_unknown_mode_fails_fast() {
        let registry = KeywordRegistry::new();

        match Session::new("zig", &registry) {
            Err(SessionError::UnknownMode(mode)) => assert_eq!(mode, "zig"),
            res => panic!("expected UnknownMode, got {:?}", res.is_ok()),
        }
    }

    #[test]
    fn test_reset_seeds_dictionary() {
        let (_, session) = mkhost("let fooBar = 1; let fooBaz = 2;\n");
        let dict = session.dictionary();

        assert_eq!(dict.count("fooBar"), 1);
        assert_eq!(dict.count("fooBaz"), 1);
        assert_eq!(dict.count("let"), 2);

        // Numeric tokens are never members.
        assert!(!dict.contains("1"));
        assert!(!dict.contains("2"));

        // Keywords are members even with zero occurrences.
        assert!(dict.contains("return"));
        assert_eq!(dict.count("return"), 0);

        // No hint is shown on attach.
        assert_eq!(session.hint(), None);
    }

    #[test]
    fn test_hint_after_typing() {
        let (mut host, mut session) = mkhost("let fooBar = 1; let fooBaz = 2;\n");

        host.edit(&mut session, Cursor::new(1, 0), Cursor::new(1, 0), "let foo");

        // First match in lexicographic order is fooBar; the hint is its suffix.
        let anchor = Cursor::new(1, 7);
        assert_eq!(session.hint(), Some(("Bar", &anchor)));
        assert_eq!(host.hint(), Some((&anchor, "Bar")));
    }

    #[test]
    fn test_empty_fragment_no_hint() {
        let (mut host, mut session) = mkhost("let fooBar = 1;\n");

        host.edit(&mut session, Cursor::new(1, 0), Cursor::new(1, 0), "foo ");

        assert_eq!(session.hint(), None);
        assert_eq!(host.hint(), None);
    }

    #[test]
    fn test_no_match_no_hint() {
        let (mut host, mut session) = mkhost("let fooBar = 1;\n");

        host.edit(&mut session, Cursor::new(1, 0), Cursor::new(1, 0), "xyz");

        assert_eq!(session.hint(), None);
    }

    #[test]
    fn test_numeric_fragment_never_completes() {
        let (mut host, mut session) = mkhost("42 4foo\n");

        host.edit(&mut session, Cursor::new(1, 0), Cursor::new(1, 0), "4");

        assert_eq!(session.hint(), None);
    }

    #[test]
    fn test_accept_inserts_missing_suffix() {
        let (mut host, mut session) = mkhost("function foo() {}\n");

        host.edit(&mut session, Cursor::new(1, 0), Cursor::new(1, 0), "fun");
        assert_eq!(session.hint().map(|(h, _)| h), Some("ction"));

        let res = session.on_key(&mut host, &key(KeyCode::Tab));
        assert_eq!(res, KeyDisposition::Consumed);

        // The buffer now holds the full word and the session is idle.
        assert_eq!(host.line(1), "function");
        assert_eq!(session.hint(), None);
        assert_eq!(host.hint(), None);

        // The completed word was learned like any other edit.
        assert_eq!(session.dictionary().count("function"), 2);
        assert!(!session.dictionary().contains("fun"));
    }

    #[test]
    fn test_accept_with_right_arrow() {
        let (mut host, mut session) = mkhost("pressure\n");

        host.edit(&mut session, Cursor::new(1, 0), Cursor::new(1, 0), "press");

        let res = session.on_key(&mut host, &key(KeyCode::Right));
        assert_eq!(res, KeyDisposition::Consumed);
        assert_eq!(host.line(1), "pressure");
    }

    #[test]
    fn test_other_key_dismisses() {
        let (mut host, mut session) = mkhost("pressure\n");

        host.edit(&mut session, Cursor::new(1, 0), Cursor::new(1, 0), "press");
        assert!(session.hint().is_some());

        let res = session.on_key(&mut host, &key(KeyCode::Char('x')));
        assert_eq!(res, KeyDisposition::PassThrough);
        assert_eq!(session.hint(), None);
        assert_eq!(host.hint(), None);

        // The dismissed key's edit was not performed by the session.
        assert_eq!(host.line(1), "press");
    }

    #[test]
    fn test_keys_pass_through_while_idle() {
        let (mut host, mut session) = mkhost("pressure\n");

        assert_eq!(session.on_key(&mut host, &key(KeyCode::Tab)), KeyDisposition::PassThrough);
        assert_eq!(host.text(), "pressure\n");
    }

    #[test]
    fn test_accept_noop_while_idle() {
        let (mut host, mut session) = mkhost("pressure\n");

        session.accept(&mut host);
        assert_eq!(host.text(), "pressure\n");
        assert_eq!(session.hint(), None);
    }

    #[test]
    fn test_dismiss_idempotent() {
        let (mut host, mut session) = mkhost("pressure\n");

        session.dismiss(&mut host);
        session.dismiss(&mut host);
        assert_eq!(session.hint(), None);
    }

    #[test]
    fn test_cursor_move_dismissal() {
        let (mut host, mut session) = mkhost("let fooBar = 1;\n");

        host.edit(&mut session, Cursor::new(1, 0), Cursor::new(1, 0), "let foo");
        assert!(session.hint().is_some());

        // Moving within the anchor's line keeps the hint.
        session.on_cursor_move(&mut host, Cursor::new(1, 2));
        assert!(session.hint().is_some());

        // So does a move that keeps the anchor's column.
        session.on_cursor_move(&mut host, Cursor::new(0, 7));
        assert!(session.hint().is_some());

        // Moving away in both line and column clears it.
        session.on_cursor_move(&mut host, Cursor::new(0, 0));
        assert_eq!(session.hint(), None);
        assert_eq!(host.hint(), None);
    }

    #[test]
    fn test_keyword_removal_exemption() {
        let (mut host, mut session) = mkhost("if x\n");

        assert_eq!(session.dictionary().count("if"), 1);

        // Delete the typed "if x"; the keyword must survive.
        host.edit(&mut session, Cursor::new(0, 0), Cursor::new(0, 4), "");

        let dict = session.dictionary();
        assert!(dict.contains("if"));
        assert_eq!(dict.count("if"), 0);
        assert!(dict.words_with_prefix("i").contains(&"if".to_string()));
        assert!(!dict.contains("x"));
    }

    #[test]
    fn test_multiset_survives_partial_delete() {
        let (mut host, mut session) = mkhost("foo foo\n");

        assert_eq!(session.dictionary().count("foo"), 2);

        // Deleting one occurrence leaves the other.
        host.edit(&mut session, Cursor::new(0, 3), Cursor::new(0, 7), "");

        assert_eq!(host.line(0), "foo");
        assert_eq!(session.dictionary().count("foo"), 1);
        assert!(session.dictionary().contains("foo"));
    }

    #[test]
    fn test_set_value_resets() {
        let (mut host, mut session) = mkhost("alpha beta\n");

        host.set_value(&mut session, "gamma delta\n");

        let dict = session.dictionary();
        assert!(!dict.contains("alpha"));
        assert!(!dict.contains("beta"));
        assert_eq!(dict.count("gamma"), 1);
        assert_eq!(dict.count("delta"), 1);

        // Keywords are reseeded.
        assert!(dict.contains("function"));
    }

    #[test]
    fn test_stop_releases_hint_and_events() {
        let (mut host, mut session) = mkhost("pressure\n");

        host.edit(&mut session, Cursor::new(1, 0), Cursor::new(1, 0), "press");
        assert!(host.hint().is_some());

        session.stop(&mut host);
        assert_eq!(host.hint(), None);

        // Events after stop are ignored.
        host.edit(&mut session, Cursor::new(1, 5), Cursor::new(1, 5), " zzz");
        assert!(!session.dictionary().contains("zzz"));
        assert_eq!(session.hint(), None);
    }

    #[test]
    fn test_incremental_matches_reset() {
        let pool = ["alpha", "beta", "gamma", "delta", "if", "let", "press"];
        let mut rng = StdRng::seed_from_u64(0x77_6f_72_64);

        let doc = "alpha beta\n".repeat(6);
        let (mut host, mut session) = mkhost(&doc);

        for _ in 0..60 {
            let y = rng.gen_range(0..6);
            let picks = rng.gen_range(0..4);
            let line: Vec<&str> =
                (0..picks).map(|_| pool[rng.gen_range(0..pool.len())]).collect();
            let line = line.join(" ");

            let len = host.line(y).chars().count();
            host.edit(&mut session, Cursor::new(y, 0), Cursor::new(y, len), &line);
        }

        // A session freshly seeded from the final text must agree with the
        // incrementally maintained one, membership and counts both.
        let (_, fresh) = mkhost(&host.text());

        let incremental = session.dictionary().words_with_prefix("");
        let reseeded = fresh.dictionary().words_with_prefix("");
        assert_eq!(incremental, reseeded);

        for word in &incremental {
            assert_eq!(
                session.dictionary().count(word),
                fresh.dictionary().count(word),
                "count mismatch for {word:?}",
            );
        }
    }
}
