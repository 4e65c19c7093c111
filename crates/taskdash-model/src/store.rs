use std::collections::BTreeSet;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::TaskError;
use crate::persist::{decode_tasks, encode_tasks};
use crate::seed::seed_tasks;
use crate::storage::{KeyValueStore, TASKS_KEY};
use crate::task::{Status, Task, TaskDraft, TaskId};

/// Ordered task list mirrored to a [`KeyValueStore`] after every mutation.
///
/// The store owns its backend; front ends hold the store and pass it by
/// reference to the view and mutation code.
#[derive(Debug)]
pub struct TaskStore<S> {
    tasks: Vec<Task>,
    storage: S,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Loads the persisted list. Missing, unreadable or malformed data falls
    /// back to the seed tasks.
    #[tracing::instrument(skip(storage))]
    pub fn open(storage: S) -> Self {
        let tasks = match load_tasks(&storage) {
            Ok(Some(tasks)) => {
                info!(count = tasks.len(), "loaded stored tasks");
                tasks
            }
            Ok(None) => {
                info!("no stored tasks; starting from seed data");
                seed_tasks()
            }
            Err(err) => {
                warn!(error = %err, "discarding stored tasks; starting from seed data");
                seed_tasks()
            }
        };

        Self { tasks, storage }
    }

    /// Wraps an explicit list without touching the backend until the first
    /// mutation.
    pub fn with_tasks(storage: S, tasks: Vec<Task>) -> Self {
        Self { tasks, storage }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    #[tracing::instrument(skip(self, draft), fields(title = %draft.title))]
    pub fn create(&mut self, draft: TaskDraft) -> Result<&Task, TaskError> {
        draft.validate()?;

        let id = self.next_id();
        self.tasks.push(Task::from_draft(id, draft));
        debug!(id, count = self.tasks.len(), "task created");
        self.persist();

        let idx = self.tasks.len() - 1;
        Ok(&self.tasks[idx])
    }

    #[tracing::instrument(skip(self, draft))]
    pub fn update(&mut self, id: TaskId, draft: TaskDraft) -> Result<&Task, TaskError> {
        draft.validate()?;

        let idx = self.position(id)?;
        self.tasks[idx].apply(draft);
        debug!(id, "task updated");
        self.persist();

        Ok(&self.tasks[idx])
    }

    #[tracing::instrument(skip(self))]
    pub fn delete(&mut self, id: TaskId) -> Result<Task, TaskError> {
        let idx = self.position(id)?;
        let removed = self.tasks.remove(idx);
        debug!(id, count = self.tasks.len(), "task deleted");
        self.persist();

        Ok(removed)
    }

    #[tracing::instrument(skip(self))]
    pub fn toggle_status(&mut self, id: TaskId) -> Result<Status, TaskError> {
        let idx = self.position(id)?;
        let next = self.tasks[idx].status.toggled();
        self.tasks[idx].status = next;
        debug!(id, status = %next, "task status toggled");
        self.persist();

        Ok(next)
    }

    /// Writes the whole list. Failures are logged and otherwise ignored.
    #[tracing::instrument(skip(self), fields(count = self.tasks.len()))]
    pub fn persist(&mut self) {
        let payload = match encode_tasks(&self.tasks) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "failed to encode tasks; not persisted");
                return;
            }
        };

        if let Err(err) = self.storage.set(TASKS_KEY, &payload) {
            warn!(error = %err, "failed to persist tasks");
        }
    }

    fn position(&self, id: TaskId) -> Result<usize, TaskError> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(TaskError::NotFound(id))
    }

    /// Millisecond timestamp, bumped past the largest id in use.
    fn next_id(&self) -> TaskId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let used: BTreeSet<TaskId> = self.tasks.iter().map(|task| task.id).collect();
        unused_id(&used, now)
    }
}

/// `now` unless something at or past it is taken, then one past the
/// largest id. When that would overflow, the lowest free id.
pub(crate) fn unused_id(used: &BTreeSet<TaskId>, now: TaskId) -> TaskId {
    let Some(&max) = used.last() else {
        return now;
    };
    match max.checked_add(1) {
        Some(floor) => now.max(floor),
        None => {
            let free = (0..=TaskId::MAX)
                .find(|id| !used.contains(id))
                .unwrap_or_default();
            warn!(id = free, "id space exhausted at the top; reusing a free id");
            free
        }
    }
}

/// `Ok(None)` when nothing is stored under the tasks key.
pub fn load_tasks<S: KeyValueStore + ?Sized>(
    storage: &S,
) -> Result<Option<Vec<Task>>, TaskError> {
    let Some(raw) = storage.get(TASKS_KEY)? else {
        return Ok(None);
    };

    decode_tasks(&raw)
        .map(Some)
        .map_err(|source| TaskError::MalformedPersistedData {
            key: TASKS_KEY.to_string(),
            source,
        })
}
