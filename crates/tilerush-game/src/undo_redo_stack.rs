use std::{collections::VecDeque, num::NonZero};

/// Bounded linear history with a cursor.
///
/// Pushing after an undo discards the redo branch; pushing at capacity drops the
/// oldest entry.
#[derive(Debug, Clone)]
pub(crate) struct UndoRedoStack<T> {
    stack: VecDeque<T>,
    capacity: NonZero<usize>,
    cursor: usize,
}

impl<T> UndoRedoStack<T> {
    #[must_use]
    pub(crate) fn new(capacity: NonZero<usize>) -> Self {
        Self {
            stack: VecDeque::new(),
            capacity,
            cursor: 0,
        }
    }

    /// Creates a stack whose only entry is `root`.
    #[must_use]
    pub(crate) fn with_root(capacity: NonZero<usize>, root: T) -> Self {
        let mut stack = Self::new(capacity);
        stack.push(root);
        stack
    }

    pub(crate) fn push(&mut self, item: T) {
        if self.stack.is_empty() {
            self.stack.push_back(item);
            self.cursor = 0;
            return;
        }

        self.stack.truncate(self.cursor + 1);

        if self.stack.len() == self.capacity.get() {
            self.stack.pop_front();
            self.cursor = self.cursor.saturating_sub(1);
        }

        self.stack.push_back(item);
        self.cursor = self.stack.len() - 1;
    }

    #[must_use]
    pub(crate) fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub(crate) fn undo(&mut self) -> bool {
        if self.can_undo() {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub(crate) fn can_redo(&self) -> bool {
        self.cursor + 1 < self.stack.len()
    }

    pub(crate) fn redo(&mut self) -> bool {
        if self.can_redo() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Replaces the whole history with `root`.
    pub(crate) fn reset(&mut self, root: T) {
        self.stack.clear();
        self.stack.push_back(root);
        self.cursor = 0;
    }

    #[must_use]
    pub(crate) fn current(&self) -> Option<&T> {
        self.stack.get(self.cursor)
    }
}
