//! In-memory counterpart of the browser's history stack.
//!
//! Navigation pushes entries without any server round-trip; `back` and
//! `forward` move the cursor the way popstate does.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebHistory {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl WebHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `location`, discarding any forward entries.
    pub fn push(&mut self, location: &str) {
        let next = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(next);
        self.entries.push(location.to_string());
        self.cursor = Some(next);
    }

    /// Replace the current entry, or push when the history is empty.
    pub fn replace(&mut self, location: &str) {
        match self.cursor {
            Some(c) => self.entries[c] = location.to_string(),
            None => self.push(location),
        }
    }

    pub fn back(&mut self) -> Option<&str> {
        let c = self.cursor.filter(|&c| c > 0)?;
        self.cursor = Some(c - 1);
        self.current()
    }

    pub fn forward(&mut self) -> Option<&str> {
        let c = self.cursor.filter(|&c| c + 1 < self.entries.len())?;
        self.cursor = Some(c + 1);
        self.current()
    }

    pub fn current(&self) -> Option<&str> {
        self.cursor.map(|c| self.entries[c].as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
