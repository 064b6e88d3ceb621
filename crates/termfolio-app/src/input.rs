//! Line preprocessing for a line-buffered console.
//!
//! Without raw mode the arrow keys arrive as escape sequences inside the
//! submitted line, and Tab arrives as a literal tab. Lines made only of
//! arrow sequences walk the history, `!!` and `!-N` recall earlier lines,
//! and a trailing tab asks for completions.

use termfolio_terminal::{History, HistoryCursor};

const UP: &str = "\x1b[A";
const DOWN: &str = "\x1b[B";

/// What a submitted line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Run the line as typed.
    Line(String),
    /// Run a line taken from history.
    Recall(String),
    /// List command names starting with the prefix.
    Complete(String),
    /// Recall pointed past the recorded history. Holds what was asked
    /// for, or `history` for arrow keys.
    NoEvent(String),
}

/// Classify one submitted line against the current history.
pub fn interpret(raw: &str, history: &History) -> Input {
    if let Some(partial) = raw.strip_suffix('\t') {
        return Input::Complete(partial.trim().to_string());
    }

    let trimmed = raw.trim();
    let mut label = trimmed;
    let recalled = if trimmed == "!!" {
        recall(history, 1)
    } else if let Some(n) = trimmed.strip_prefix("!-") {
        match n.parse::<usize>() {
            Ok(n) if n > 0 && n <= history.len() => recall(history, n),
            _ => None,
        }
    } else if let Some(steps) = arrow_steps(trimmed) {
        label = "history";
        walk(history, &steps)
    } else {
        return Input::Line(raw.to_string());
    };

    match recalled {
        Some(line) if !line.is_empty() => Input::Recall(line.to_string()),
        _ => Input::NoEvent(label.to_string()),
    }
}

fn recall(history: &History, back: usize) -> Option<&str> {
    let mut cursor = HistoryCursor::new();
    let mut line = None;
    for _ in 0..back {
        line = cursor.older(history);
    }
    line
}

fn walk<'h>(history: &'h History, steps: &[bool]) -> Option<&'h str> {
    let mut cursor = HistoryCursor::new();
    let mut line = None;
    for &up in steps {
        line = if up {
            cursor.older(history)
        } else {
            cursor.newer(history)
        };
    }
    line
}

/// `true` for each up arrow, `false` for each down arrow. `None` unless the
/// line holds arrow sequences and nothing else.
fn arrow_steps(mut line: &str) -> Option<Vec<bool>> {
    let mut steps = Vec::new();
    while !line.is_empty() {
        if let Some(rest) = line.strip_prefix(UP) {
            steps.push(true);
            line = rest;
        } else if let Some(rest) = line.strip_prefix(DOWN) {
            steps.push(false);
            line = rest;
        } else {
            return None;
        }
    }
    (!steps.is_empty()).then_some(steps)
}
