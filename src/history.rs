use std::collections::VecDeque;

/// Number of checkpoints kept before the oldest one is evicted
pub const DEFAULT_CAPACITY: usize = 50;

/// Bounded, linear undo/redo log of whole-surface checkpoints.
///
/// The log is never empty: it is created from an initial checkpoint and
/// `position` always indexes a valid entry. Pushing after an undo drops the
/// redo branch, so the history is a line rather than a tree.
#[derive(Debug, Clone)]
pub struct History<T> {
    /// Checkpoints, oldest first
    entries: VecDeque<T>,
    /// Index of the checkpoint currently shown
    position: usize,
    /// Maximum number of checkpoints kept
    capacity: usize,
}

impl<T> History<T> {
    /// Creates a history holding only `initial`, with the default capacity
    pub fn init(initial: T) -> Self {
        Self::with_capacity(initial, DEFAULT_CAPACITY)
    }

    /// Creates a history holding only `initial`. A capacity of zero is
    /// treated as one since the initial entry must always be kept.
    pub fn with_capacity(initial: T, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut entries = VecDeque::with_capacity(capacity);
        entries.push_back(initial);
        Self {
            entries,
            position: 0,
            capacity,
        }
    }

    /// Records a new checkpoint after the current one.
    ///
    /// Everything after `position` is discarded first. If the log then
    /// exceeds its capacity the oldest checkpoint is evicted.
    pub fn push(&mut self, entry: T) {
        self.entries.truncate(self.position + 1);
        self.entries.push_back(entry);
        self.position = self.entries.len() - 1;

        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            self.position -= 1;
        }
    }

    /// Steps back one checkpoint and returns it, or `None` at the oldest entry
    pub fn undo(&mut self) -> Option<&T> {
        if self.position == 0 {
            return None;
        }
        self.position -= 1;
        self.entries.get(self.position)
    }

    /// Steps forward one checkpoint and returns it, or `None` at the newest entry
    pub fn redo(&mut self) -> Option<&T> {
        if self.position + 1 >= self.entries.len() {
            return None;
        }
        self.position += 1;
        self.entries.get(self.position)
    }

    /// The checkpoint at `position`
    pub fn current(&self) -> &T {
        // position < len holds for every reachable state
        &self.entries[self.position]
    }

    pub fn can_undo(&self) -> bool {
        self.position > 0
    }

    pub fn can_redo(&self) -> bool {
        self.position + 1 < self.entries.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True only for a history with no entries, which `init` never builds
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates checkpoints from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}
