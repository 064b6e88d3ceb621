//! Command history and prompt recall.

use std::collections::VecDeque;

/// Previously entered lines, most recent first, capped at a fixed length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<String>,
    limit: usize,
}

impl History {
    /// An empty history holding at most `limit` entries (at least one).
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Rebuild from a most-recent-first list, dropping whatever exceeds the
    /// limit.
    pub fn from_entries(entries: Vec<String>, limit: usize) -> Self {
        let mut history = Self::new(limit);
        history.entries = entries.into();
        history.entries.truncate(history.limit);
        history
    }

    /// Record a line as the most recent entry. The oldest entry is dropped
    /// once the cap is reached.
    pub fn push(&mut self, line: &str) {
        self.entries.push_front(line.to_string());
        self.entries.truncate(self.limit);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Entry `index` steps back (0 = most recent).
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Entries, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// The `count` most recent entries, oldest first.
    pub fn recent(&self, count: usize) -> Vec<&str> {
        let mut lines: Vec<&str> = self.iter().take(count).collect();
        lines.reverse();
        lines
    }

    /// Most-recent-first copy for persistence.
    pub fn to_vec(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }
}

/// Position while walking history with the arrow keys.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HistoryCursor {
    index: Option<usize>,
}

impl HistoryCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step toward older entries. Stays on the oldest once reached.
    /// `None` when the history is empty.
    pub fn older<'h>(&mut self, history: &'h History) -> Option<&'h str> {
        if history.is_empty() {
            return None;
        }
        let next = match self.index {
            None => 0,
            Some(i) => (i + 1).min(history.len() - 1),
        };
        self.index = Some(next);
        history.get(next)
    }

    /// Step toward newer entries. Past the most recent entry the prompt is
    /// blank (`Some("")`). `None` when not browsing.
    pub fn newer<'h>(&mut self, history: &'h History) -> Option<&'h str> {
        match self.index {
            None => None,
            Some(0) => {
                self.index = None;
                Some("")
            },
            Some(i) => {
                let next = (i - 1).min(history.len().saturating_sub(1));
                self.index = Some(next);
                history.get(next).or(Some(""))
            },
        }
    }

    /// Forget the position (after a line is submitted).
    pub fn reset(&mut self) {
        self.index = None;
    }

    pub fn position(&self) -> Option<usize> {
        self.index
    }
}
