//! Linear undo/redo history of full-buffer snapshots.
//!
//! DESIGN
//! ======
//! Every completed edit (initial load, stroke, fill) stores a deep copy of the
//! whole raster. Undo and redo only move a cursor and hand back the snapshot
//! the caller should restore; the history never touches the live buffer.
//!
//! Pushing while the cursor is behind the tail discards every snapshot after
//! the cursor, so there is never more than one redo branch.
//!
//! TRADE-OFFS
//! ==========
//! Memory is O(snapshots x width x height). An optional limit turns the list
//! into a ring: the oldest snapshot is dropped and the cursor re-based, which
//! keeps undo/redo exact for everything still retained.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;
use std::sync::Arc;

use crate::pixels::{PixelBuffer, PixelBufferError};

/// An immutable copy of a buffer's pixels at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    data: Arc<[u8]>,
}

impl Snapshot {
    /// Deep-copy the buffer's current contents.
    #[must_use]
    pub fn capture(buffer: &PixelBuffer) -> Self {
        Self { width: buffer.width(), height: buffer.height(), data: Arc::from(buffer.as_bytes()) }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Copy this snapshot back into `buffer`.
    ///
    /// Returns `false` and leaves the buffer untouched if the dimensions differ.
    #[must_use]
    pub fn restore_into(&self, buffer: &mut PixelBuffer) -> bool {
        if buffer.width() != self.width || buffer.height() != self.height {
            return false;
        }
        buffer.copy_from(&self.data)
    }

    /// A standalone buffer holding this snapshot's pixels.
    ///
    /// # Errors
    ///
    /// Propagates [`PixelBufferError`]; cannot occur for a snapshot taken by [`Snapshot::capture`].
    pub fn to_buffer(&self) -> Result<PixelBuffer, PixelBufferError> {
        PixelBuffer::from_rgba(self.width, self.height, self.data.to_vec())
    }

    fn memory_size(&self) -> usize {
        self.data.len()
    }
}

/// Ordered snapshots plus a cursor marking the current one.
#[derive(Debug, Default)]
pub struct History {
    snapshots: VecDeque<Snapshot>,
    cursor: Option<usize>,
    limit: Option<usize>,
}

impl History {
    /// An empty, unbounded history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty history that keeps at most `limit` snapshots.
    ///
    /// A limit of zero is treated as one: the current state is always retained.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self { limit: Some(limit.max(1)), ..Self::default() }
    }

    /// Record a new current state, discarding any redoable snapshots.
    pub fn push(&mut self, snapshot: Snapshot) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.snapshots.truncate(keep);
        self.snapshots.push_back(snapshot);

        if let Some(limit) = self.limit {
            while self.snapshots.len() > limit {
                self.snapshots.pop_front();
            }
        }
        self.cursor = self.snapshots.len().checked_sub(1);
    }

    /// Step back one snapshot and return it for restoring. `None` at the start.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        let cursor = self.cursor.filter(|&c| c > 0)?;
        self.cursor = Some(cursor - 1);
        self.snapshots.get(cursor - 1)
    }

    /// Step forward one snapshot and return it for restoring. `None` at the tail.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let next = self.cursor? + 1;
        if next >= self.snapshots.len() {
            return None;
        }
        self.cursor = Some(next);
        self.snapshots.get(next)
    }

    /// Jump to the oldest retained snapshot without discarding anything after it.
    pub fn reset_to_start(&mut self) -> Option<&Snapshot> {
        if self.snapshots.is_empty() {
            return None;
        }
        self.cursor = Some(0);
        self.snapshots.front()
    }

    /// Drop every snapshot.
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = None;
    }

    /// The snapshot at the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&Snapshot> {
        self.snapshots.get(self.cursor?)
    }

    /// Index of the current snapshot, `None` when empty.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.snapshots.len())
    }

    /// Bytes held by all retained snapshots.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.snapshots.iter().map(Snapshot::memory_size).sum()
    }
}
