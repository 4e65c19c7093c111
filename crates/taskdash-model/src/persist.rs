//! JSON layout of the persisted task list.
//!
//! Records look like
//! `{"id":1,"title":"..","description":"..","dueDate":"2026-02-10","status":"In Progress"}`.
//! An absent due date is written as `""`. Reading is lenient about status
//! spelling and bad dates; those are normalized instead of failing the load.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::store::unused_id;
use crate::task::{Status, Task, TaskId};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredTask {
    id: TaskId,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default, rename = "dueDate")]
    due_date: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl From<&Task> for StoredTask {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: Some(format_date(task.due_date)),
            status: Some(task.status.as_str().to_string()),
        }
    }
}

impl StoredTask {
    fn into_task(self) -> Task {
        let status = match self.status.as_deref() {
            None => Status::Todo,
            Some(raw) => Status::parse_lenient(raw).unwrap_or_else(|| {
                warn!(id = self.id, status = raw, "unknown stored status; using Todo");
                Status::Todo
            }),
        };

        let due_date = match self.due_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match parse_date(raw) {
                Some(date) => Some(date),
                None => {
                    warn!(id = self.id, due = raw, "unparseable stored due date; dropping it");
                    None
                }
            },
        };

        Task {
            id: self.id,
            title: self.title,
            description: self.description,
            due_date,
            status,
        }
    }
}

pub fn encode_tasks(tasks: &[Task]) -> Result<String, serde_json::Error> {
    let stored: Vec<StoredTask> = tasks.iter().map(StoredTask::from).collect();
    serde_json::to_string(&stored)
}

/// Repeated ids are renumbered past the largest one so every loaded task
/// stays addressable.
pub fn decode_tasks(raw: &str) -> Result<Vec<Task>, serde_json::Error> {
    let stored: Vec<StoredTask> = serde_json::from_str(raw)?;
    let mut tasks: Vec<Task> = stored.into_iter().map(StoredTask::into_task).collect();

    let mut used: BTreeSet<TaskId> = tasks.iter().map(|task| task.id).collect();
    let mut seen = BTreeSet::new();
    for task in &mut tasks {
        if seen.insert(task.id) {
            continue;
        }
        let fresh = unused_id(&used, 0);
        warn!(id = task.id, new_id = fresh, "duplicate stored id; renumbering");
        used.insert(fresh);
        seen.insert(fresh);
        task.id = fresh;
    }

    Ok(tasks)
}

/// Parses an ISO 8601 date-only string.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}
