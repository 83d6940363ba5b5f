//! # Editor collaborators
//!
//! ## Overview
//!
//! The engine never talks to an editing surface directly. Embedders implement
//! [EditorHost] over their buffer and overlay machinery, and forward edit, key,
//! and cursor events to a [Session](crate::session::Session).
//!
//! [TextHost] is a [ropey]-backed reference implementation for headless use:
//! it applies line/column edits to an in-memory buffer and delivers the
//! before/after event pair to a session in the order the contract requires.
use ropey::Rope;

use crate::cursor::Cursor;
use crate::session::Session;

/// Why a change to the buffer happened.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EditOrigin {
    /// An ordinary edit made by the user.
    Typing,

    /// The buffer content was wholesale replaced.
    SetValue,

    /// Text inserted by the engine when a hint was accepted.
    Hint,
}

/// A change to the buffer, described by the whole-line range it affects.
///
/// For a pre-mutation notification, `from..to` is the range being replaced; for
/// a post-mutation notification, it is the range the new text occupies.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EditEvent {
    /// Start of the affected range.
    pub from: Cursor,

    /// End of the affected range.
    pub to: Cursor,

    /// The cause of this change.
    pub origin: EditOrigin,
}

/// The surface a [Session](crate::session::Session) drives.
///
/// Hosts must deliver [Session::on_before_change](crate::session::Session::on_before_change)
/// strictly before the matching
/// [Session::on_change](crate::session::Session::on_change) for the same edit,
/// including edits caused by [insert](EditorHost::insert).
pub trait EditorHost {
    /// Get the full text of the buffer.
    fn text(&self) -> String;

    /// Get the text of the whole lines `first` through `last`, inclusive.
    fn lines(&self, first: usize, last: usize) -> String;

    /// Get the text of a single line, without its line ending.
    fn line(&self, line: usize) -> String;

    /// Get the current cursor position.
    fn cursor(&self) -> Cursor;

    /// Render the inline hint widget at the given position.
    fn show_hint(&mut self, anchor: &Cursor, text: &str);

    /// Remove any currently rendered hint widget.
    fn clear_hint(&mut self);

    /// Insert literal text at the given position, leaving the cursor at the end
    /// of the inserted text.
    ///
    /// The origin tag distinguishes engine-driven inserts from user typing.
    fn insert(&mut self, at: &Cursor, text: &str, origin: EditOrigin);
}

/// An in-memory [EditorHost] with no rendering surface.
pub struct TextHost {
    text: Rope,
    cursor: Cursor,
    hint: Option<(Cursor, String)>,
}

impl TextHost {
    /// Create a new host holding the given text.
    pub fn new(text: &str) -> Self {
        TextHost {
            text: Rope::from_str(text),
            cursor: Cursor::default(),
            hint: None,
        }
    }

    /// Move the cursor without notifying a session.
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    /// The currently rendered hint, if any.
    pub fn hint(&self) -> Option<(&Cursor, &str)> {
        self.hint.as_ref().map(|(c, s)| (c, s.as_str()))
    }

    /// Replace `from..to` with `text`, delivering the pre- and post-mutation
    /// events to `session` in order.
    pub fn edit(&mut self, session: &mut Session, from: Cursor, to: Cursor, text: &str) {
        let ev = EditEvent {
            from: from.clone(),
            to: to.clone(),
            origin: EditOrigin::Typing,
        };
        session.on_before_change(self, &ev);

        let end = self.replace(&from, &to, text);

        let ev = EditEvent { from, to: end, origin: EditOrigin::Typing };
        session.on_change(self, &ev);
    }

    /// Replace the entire buffer content, notifying `session` so that it
    /// rebuilds its dictionary.
    pub fn set_value(&mut self, session: &mut Session, text: &str) {
        self.text = Rope::from_str(text);
        self.cursor = Cursor::default();
        self.hint = None;

        let last = self.text.len_lines().saturating_sub(1);
        let end = Cursor::new(last, self.text.line(last).len_chars());
        let ev = EditEvent {
            from: Cursor::default(),
            to: end,
            origin: EditOrigin::SetValue,
        };
        session.on_change(self, &ev);
    }

    fn cursor_to_char(&self, cursor: &Cursor) -> usize {
        self.text.line_to_char(cursor.line()) + cursor.column()
    }

    fn end_of_insert(from: &Cursor, text: &str) -> Cursor {
        let breaks = text.matches('\n').count();

        if breaks == 0 {
            Cursor::new(from.line(), from.column() + text.chars().count())
        } else {
            let tail = text.rsplit('\n').next().unwrap_or("");

            Cursor::new(from.line() + breaks, tail.chars().count())
        }
    }

    fn replace(&mut self, from: &Cursor, to: &Cursor, text: &str) -> Cursor {
        let start = self.cursor_to_char(from);
        let end = self.cursor_to_char(to);

        self.text.remove(start..end);
        self.text.insert(start, text);

        let end = Self::end_of_insert(from, text);
        self.cursor = end.clone();

        return end;
    }
}

impl EditorHost for TextHost {
    fn text(&self) -> String {
        self.text.to_string()
    }

    fn lines(&self, first: usize, last: usize) -> String {
        let start = self.text.line_to_char(first);
        let end = if last + 1 < self.text.len_lines() {
            self.text.line_to_char(last + 1)
        } else {
            self.text.len_chars()
        };

        self.text.slice(start..end).to_string()
    }

    fn line(&self, line: usize) -> String {
        let line = self.text.line(line).to_string();

        line.trim_end_matches(['\n', '\r']).to_string()
    }

    fn cursor(&self) -> Cursor {
        self.cursor.clone()
    }

    fn show_hint(&mut self, anchor: &Cursor, text: &str) {
        self.hint = Some((anchor.clone(), text.to_string()));
    }

    fn clear_hint(&mut self) {
        self.hint = None;
    }

    fn insert(&mut self, at: &Cursor, text: &str, _: EditOrigin) {
        self.replace(at, at, text);
    }
}
