//! # Buffer positions
//!
//! ## Overview
//!
//! Line and column positions within a document, used for hint anchors and for
//! describing the ranges affected by edits.
use std::cmp::{Ord, Ordering, PartialOrd};

/// Represents a movable point within a document.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Cursor {
    pub(crate) y: usize,
    pub(crate) x: usize,
}

impl Cursor {
    /// Create a new cursor.
    pub fn new(line: usize, column: usize) -> Cursor {
        Cursor { y: line, x: column }
    }

    /// Get the line that this cursor is on.
    pub fn line(&self) -> usize {
        self.y
    }

    /// Get the column that this cursor is on.
    pub fn column(&self) -> usize {
        self.x
    }

    /// Set the line for this cursor.
    pub fn set_line(&mut self, line: usize) {
        self.y = line;
    }

    /// Set the column for this cursor.
    pub fn set_column(&mut self, column: usize) {
        self.x = column;
    }
}

impl PartialOrd for Cursor {
    fn partial_cmp(&self, other: &Cursor) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cursor {
    fn cmp(&self, other: &Cursor) -> Ordering {
        let row = self.y.cmp(&other.y);
        let col = self.x.cmp(&other.x);

        row.then(col)
    }
}
