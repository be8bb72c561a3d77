//! Single-shot deferred actions.
//!
//! Some commits wait for the next frame (for example moving keyboard focus
//! into a calendar that has just opened). At most one such action is in
//! flight: scheduling a new one cancels the pending one, and the host runs a
//! task by id so a superseded id is simply ignored.

use tracing::trace;

/// Handle of a scheduled task, returned to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Holds at most one pending action of type `T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredTask<T> {
    next_id: u64,
    pending: Option<(TaskId, T)>,
}

impl<T> Default for DeferredTask<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            pending: None,
        }
    }
}

impl<T> DeferredTask<T> {
    /// Schedules `action`, cancelling whatever was pending.
    pub fn schedule(&mut self, action: T) -> TaskId {
        self.cancel();
        let id = TaskId(self.next_id);
        self.next_id += 1;
        trace!("scheduled deferred task {}", id.0);
        self.pending = Some((id, action));
        id
    }

    /// Drops the pending action; returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.pending.take();
        if let Some((id, _)) = &cancelled {
            trace!("cancelled deferred task {}", id.0);
        }
        cancelled.is_some()
    }

    /// Takes the action if `id` is still the pending task.
    pub fn take(&mut self, id: TaskId) -> Option<T> {
        match &self.pending {
            Some((pending, _)) if *pending == id => self.pending.take().map(|(_, action)| action),
            _ => None,
        }
    }

    pub fn pending_id(&self) -> Option<TaskId> {
        self.pending.as_ref().map(|(id, _)| *id)
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
