//! Snapshot-based undo/redo over the scene.
//!
//! Every undoable editor operation calls [`History::snapshot`] with the
//! scene as it stands *before* the mutation — the state undo must restore.
//! The first undo after a mutation stashes the live scene at the tail so a
//! later redo can come back to it. Deep copies are cheap at this scale;
//! scenes are a few dozen shapes, not thousands (a stated non-goal).

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use tracing::trace;

use crate::doc::Scene;

/// Ordered scene snapshots plus a cursor.
///
/// `cursor` counts committed snapshots: it equals `entries.len()` while the
/// live scene is ahead of history, and indexes into `entries` after an undo.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<Scene>,
    cursor: usize,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of snapshots currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been snapshotted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether an undo would do anything.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether a redo would do anything.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Record `scene` as the state to restore when the upcoming mutation is
    /// undone. Discards any redo entries beyond the cursor.
    pub fn snapshot(&mut self, scene: &Scene) {
        self.entries.truncate(self.cursor);
        self.entries.push(scene.clone());
        self.cursor = self.entries.len();
        trace!(depth = self.cursor, "history snapshot");
    }

    /// Step back one snapshot, returning the scene to install. `live` is the
    /// current scene; it is stashed on the first undo so redo can restore
    /// it. Returns `None` (a no-op) at the start of history.
    pub fn undo(&mut self, live: &Scene) -> Option<Scene> {
        if self.cursor == 0 {
            return None;
        }
        if self.cursor == self.entries.len() {
            self.entries.push(live.clone());
        }
        self.cursor -= 1;
        trace!(cursor = self.cursor, "history undo");
        Some(self.entries[self.cursor].clone())
    }

    /// Step forward one snapshot, returning the scene to install. Returns
    /// `None` (a no-op) at the end of history.
    pub fn redo(&mut self) -> Option<Scene> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        trace!(cursor = self.cursor, "history redo");
        Some(self.entries[self.cursor].clone())
    }

    /// Drop all snapshots, e.g. after loading a project from disk.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}
