use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::fmt::{self, Display, Formatter};

/// A command recorded in the history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Position of the command since the history was created or cleared,
    /// starting at 1
    pub id: usize,
    /// The input line, trimmed
    pub command: String,
    /// What the command printed: its value, or the error message
    pub result: String,
    /// When the command finished
    pub timestamp: DateTime<Local>,
}

impl Display for HistoryEntry {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        write!(
            fmt,
            "{:3}. [{}] {} -> {}",
            self.id,
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.command,
            self.result
        )
    }
}

/// Bounded in-memory history of the commands, oldest first
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    max_len: usize,
    next_id: usize,
}

impl History {
    /// Create an history keeping at most `max_len` commands
    pub fn new(max_len: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_len.min(1024)),
            max_len,
            next_id: 1,
        }
    }

    /// Record `command` and its `result` now, dropping the oldest entry when
    /// full
    pub fn push(&mut self, command: impl Into<String>, result: impl Into<String>) {
        if self.max_len == 0 {
            return;
        }
        if self.entries.len() == self.max_len {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            id: self.next_id,
            command: command.into(),
            result: result.into(),
            timestamp: Local::now(),
        });
        self.next_id += 1;
    }

    /// Get the last `limit` entries, oldest first
    pub fn recent(&self, limit: usize) -> Vec<HistoryEntry> {
        let skip = self.entries.len().saturating_sub(limit);
        self.entries.iter().skip(skip).cloned().collect()
    }

    /// Get the entries containing `term`, ignoring case
    pub fn search(&self, term: &str) -> Vec<HistoryEntry> {
        let term = term.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.command.to_lowercase().contains(&term))
            .cloned()
            .collect()
    }

    /// Get the most recent entry
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Remove all entries, returning how many there were
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.next_id = 1;
        count
    }

    /// Number of entries kept
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no command is recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::History;
    use chrono::Local;

    fn commands(history: &[super::HistoryEntry]) -> Vec<&str> {
        history.iter().map(|entry| entry.command.as_str()).collect()
    }

    #[test]
    fn bounded() {
        let mut history = History::new(3);
        for command in &["a = 1", "b = 2", "a + b", "a * b"] {
            history.push(*command, "");
        }
        assert_eq!(history.len(), 3);
        assert_eq!(commands(&history.recent(10)), vec!["b = 2", "a + b", "a * b"]);
        assert_eq!(commands(&history.recent(2)), vec!["a + b", "a * b"]);
        assert_eq!(history.recent(10)[0].id, 2);
        assert_eq!(history.last().map(|entry| entry.id), Some(4));
    }

    #[test]
    fn search_ignores_case() {
        let mut history = History::new(10);
        history.push("Total = 100", "Total = 100");
        history.push("discount = total * 0.1", "discount = 10");
        history.push("2 + 2", "4");
        assert_eq!(
            commands(&history.search("TOTAL")),
            vec!["Total = 100", "discount = total * 0.1"]
        );
        assert!(history.search("missing").is_empty());
    }

    #[test]
    fn clear_restarts_ids() {
        let mut history = History::new(10);
        history.push("1 + 1", "2");
        history.push("2 + 2", "4");
        assert_eq!(history.clear(), 2);
        assert!(history.is_empty());
        history.push("3 + 3", "6");
        assert_eq!(history.recent(1)[0].id, 1);
    }

    #[test]
    fn disabled() {
        let mut history = History::new(0);
        history.push("1 + 1", "2");
        assert!(history.is_empty());
    }

    #[test]
    fn entries_carry_result_and_time() {
        let before = Local::now();
        let mut history = History::new(10);
        history.push("5 / 0", "DivisionByZero: division by zero");
        history.push("2 ^ 10", "1024");
        let after = Local::now();

        let entries = history.recent(10);
        assert_eq!(entries[0].result, "DivisionByZero: division by zero");
        assert_eq!(entries[1].result, "1024");
        for entry in &entries {
            assert!(before <= entry.timestamp && entry.timestamp <= after);
        }
        assert!(entries[0].timestamp <= entries[1].timestamp);

        let line = entries[1].to_string();
        let stamp = entries[1].timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
        assert_eq!(line, format!("  2. [{}] 2 ^ 10 -> 1024", stamp));
    }
}
