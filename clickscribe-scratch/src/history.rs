/// Capped linear undo/redo history
///
/// Snapshots the full buffer text after each recorded edit. Recording after
/// an undo discards the redo tail; recording an unchanged text is a no-op.
/// When the cap is exceeded the oldest snapshot is dropped, so very long
/// sessions keep a bounded memory footprint at the cost of the deepest undo
/// steps.

/// Default number of snapshots kept
pub const DEFAULT_HISTORY_CAP: usize = 100;

/// Linear snapshot history with a fixed capacity
#[derive(Debug, Clone)]
pub struct EditHistory {
    snapshots: Vec<String>,
    index: usize,
    cap: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAP)
    }
}

impl EditHistory {
    /// Creates a history holding at most `cap` snapshots
    ///
    /// The history always starts with a single empty snapshot; a cap below 2
    /// is raised to 2 so at least one undo step exists.
    pub fn new(cap: usize) -> Self {
        Self {
            snapshots: vec![String::new()],
            index: 0,
            cap: cap.max(2),
        }
    }

    /// The snapshot the buffer currently shows
    pub fn current(&self) -> &str {
        &self.snapshots[self.index]
    }

    /// Records a new snapshot
    ///
    /// No-op when `text` equals the current snapshot. Otherwise drops any
    /// redo tail, appends, and evicts the oldest snapshot past the cap.
    pub fn record(&mut self, text: &str) {
        if text == self.current() {
            return;
        }

        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(text.to_string());

        if self.snapshots.len() > self.cap {
            self.snapshots.remove(0);
        }
        self.index = self.snapshots.len() - 1;
    }

    /// Steps back one snapshot, returning it; `None` at the oldest snapshot
    pub fn undo(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    /// Steps forward one snapshot, returning it; `None` at the newest
    pub fn redo(&mut self) -> Option<&str> {
        if self.index + 1 >= self.snapshots.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    /// Whether an undo step is available
    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    /// Whether a redo step is available
    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Clears back to a single empty snapshot
    pub fn reset(&mut self) {
        self.snapshots.clear();
        self.snapshots.push(String::new());
        self.index = 0;
    }

    /// Number of snapshots currently held
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false: the initial empty snapshot is never removed
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_empty_snapshot() {
        let history = EditHistory::default();
        assert_eq!(history.current(), "");
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_and_undo_redo() {
        let mut history = EditHistory::default();
        history.record("a");
        history.record("ab");

        assert_eq!(history.undo(), Some("a"));
        assert_eq!(history.undo(), Some(""));
        assert_eq!(history.undo(), None);

        assert_eq!(history.redo(), Some("a"));
        assert_eq!(history.redo(), Some("ab"));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_record_unchanged_is_noop() {
        let mut history = EditHistory::default();
        history.record("a");
        history.record("a");

        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_record_after_undo_truncates_redo_tail() {
        let mut history = EditHistory::default();
        history.record("a");
        history.record("ab");
        history.undo();

        history.record("ax");
        assert!(!history.can_redo());
        assert_eq!(history.current(), "ax");
        assert_eq!(history.undo(), Some("a"));
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut history = EditHistory::new(3);
        history.record("a");
        history.record("b");
        history.record("c"); // evicts the initial ""

        assert_eq!(history.len(), 3);
        assert_eq!(history.undo(), Some("b"));
        assert_eq!(history.undo(), Some("a"));
        assert_eq!(history.undo(), None, "empty snapshot was evicted");
    }

    #[test]
    fn test_tiny_cap_is_raised() {
        let mut history = EditHistory::new(0);
        history.record("a");
        assert_eq!(history.undo(), Some(""));
    }

    #[test]
    fn test_reset() {
        let mut history = EditHistory::default();
        history.record("a");
        history.record("b");
        history.reset();

        assert_eq!(history.current(), "");
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
    }
}
