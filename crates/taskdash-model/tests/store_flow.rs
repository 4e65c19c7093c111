use chrono::NaiveDate;
use taskdash_model::error::StorageError;
use taskdash_model::seed::seed_tasks;
use taskdash_model::store::load_tasks;
use taskdash_model::view::{filter_tasks, is_overdue};
use taskdash_model::{
    DateMode, KeyValueStore, MemoryStorage, Status, StatusFilter, TASKS_KEY, Task, TaskDraft,
    TaskError, TaskQuery, TaskStore,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn scenario_tasks() -> Vec<Task> {
    vec![
        Task {
            id: 1,
            title: "A".to_string(),
            description: String::new(),
            due_date: Some(date(2026, 1, 1)),
            status: Status::Todo,
        },
        Task {
            id: 2,
            title: "B".to_string(),
            description: String::new(),
            due_date: Some(date(2026, 3, 1)),
            status: Status::Done,
        },
    ]
}

fn ids(tasks: &[&Task]) -> Vec<u64> {
    tasks.iter().map(|t| t.id).collect()
}

#[derive(Default)]
struct BrokenStorage;

impl KeyValueStore for BrokenStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::read(key, "quota exceeded"))
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::write(key, "quota exceeded"))
    }
}

#[test]
fn empty_storage_starts_from_seed_data() {
    let store = TaskStore::open(MemoryStorage::new());
    assert_eq!(store.tasks(), seed_tasks().as_slice());
    assert_eq!(store.storage().raw(TASKS_KEY), None);
}

#[test]
fn malformed_storage_falls_back_to_seed_data() {
    let storage = MemoryStorage::new().with_entry(TASKS_KEY, "[{oops");
    assert!(matches!(
        load_tasks(&storage),
        Err(TaskError::MalformedPersistedData { .. })
    ));

    let store = TaskStore::open(storage);
    assert_eq!(store.len(), 5);
}

#[test]
fn unreadable_storage_falls_back_and_writes_are_ignored() {
    let mut store = TaskStore::open(BrokenStorage);
    assert_eq!(store.len(), 5);

    let id = store
        .create(TaskDraft::new("still works"))
        .expect("create despite write failure")
        .id;
    assert_eq!(store.get(id).map(|t| t.title.as_str()), Some("still works"));
}

#[test]
fn stored_empty_list_stays_empty() {
    let store = TaskStore::open(MemoryStorage::new().with_entry(TASKS_KEY, "[]"));
    assert!(store.is_empty());
}

#[test]
fn create_then_delete_restores_content() {
    let mut store = TaskStore::with_tasks(MemoryStorage::new(), scenario_tasks());
    let before = store.tasks().to_vec();

    let id = store
        .create(
            TaskDraft::new("temporary")
                .with_description("gone soon")
                .with_due_date(Some(date(2026, 5, 5))),
        )
        .expect("create")
        .id;
    assert_eq!(store.tasks().last().map(|t| t.id), Some(id));
    assert_eq!(store.tasks().last().map(|t| t.status), Some(Status::Todo));

    let removed = store.delete(id).expect("delete");
    assert_eq!(removed.title, "temporary");
    assert_eq!(store.tasks(), before.as_slice());

    let reloaded = load_tasks(store.storage()).expect("load").expect("stored");
    assert_eq!(reloaded, before);
}

#[test]
fn toggle_round_trips_todo_and_done_but_not_in_progress() {
    let mut tasks = scenario_tasks();
    tasks.push(Task {
        id: 3,
        title: "C".to_string(),
        description: String::new(),
        due_date: None,
        status: Status::InProgress,
    });
    let mut store = TaskStore::with_tasks(MemoryStorage::new(), tasks);

    for id in [1, 2] {
        let original = store.get(id).expect("task").status;
        store.toggle_status(id).expect("toggle");
        assert_ne!(store.get(id).expect("task").status, original);
        store.toggle_status(id).expect("toggle");
        assert_eq!(store.get(id).expect("task").status, original);
    }

    assert_eq!(store.toggle_status(3).expect("toggle"), Status::Done);
    assert_eq!(store.toggle_status(3).expect("toggle"), Status::Todo);
}

#[test]
fn unknown_ids_are_reported_and_leave_storage_alone() {
    let mut store = TaskStore::with_tasks(MemoryStorage::new(), scenario_tasks());

    assert!(matches!(store.delete(99), Err(TaskError::NotFound(99))));
    assert!(matches!(store.toggle_status(99), Err(TaskError::NotFound(99))));
    assert!(matches!(
        store.update(99, TaskDraft::new("x")),
        Err(TaskError::NotFound(99))
    ));

    assert_eq!(store.tasks(), scenario_tasks().as_slice());
    assert_eq!(store.storage().raw(TASKS_KEY), None);
}

#[test]
fn empty_title_is_rejected_without_mutation() {
    let mut store = TaskStore::with_tasks(MemoryStorage::new(), scenario_tasks());

    assert!(matches!(
        store.create(TaskDraft::new("  ")),
        Err(TaskError::EmptyTitle)
    ));
    assert!(matches!(
        store.update(1, TaskDraft::new("")),
        Err(TaskError::EmptyTitle)
    ));
    assert_eq!(store.tasks(), scenario_tasks().as_slice());
    assert_eq!(store.storage().raw(TASKS_KEY), None);
}

#[test]
fn update_replaces_fields_in_place() {
    let mut store = TaskStore::with_tasks(MemoryStorage::new(), scenario_tasks());
    store
        .update(
            1,
            TaskDraft::new("A2")
                .with_description("more")
                .with_status(Status::InProgress),
        )
        .expect("update");

    let first = &store.tasks()[0];
    assert_eq!(first.id, 1);
    assert_eq!(first.title, "A2");
    assert_eq!(first.due_date, None);
    assert_eq!(first.status, Status::InProgress);
}

#[test]
fn persisted_list_reloads_identically() {
    let mut store = TaskStore::with_tasks(MemoryStorage::new(), seed_tasks());
    store
        .create(TaskDraft::new("Ünïcode tïtle").with_description("with \"quotes\""))
        .expect("create");
    let expected = store.tasks().to_vec();

    let reopened = TaskStore::open(store.into_storage());
    assert_eq!(reopened.tasks(), expected.as_slice());
}

#[test]
fn empty_query_is_identity() {
    let tasks = seed_tasks();
    let out = filter_tasks(&tasks, &TaskQuery::default());
    assert_eq!(out.len(), tasks.len());
    assert!(out.iter().zip(tasks.iter()).all(|(a, b)| *a == b));
}

#[test]
fn status_scenario() {
    let tasks = scenario_tasks();
    let query = TaskQuery {
        status: StatusFilter::Todo,
        ..TaskQuery::default()
    };
    assert_eq!(ids(&filter_tasks(&tasks, &query)), vec![1]);
}

#[test]
fn on_or_after_scenario() {
    let tasks = scenario_tasks();
    let query = TaskQuery {
        due: Some(date(2026, 2, 1)),
        mode: DateMode::OnOrAfter,
        ..TaskQuery::default()
    };
    assert_eq!(ids(&filter_tasks(&tasks, &query)), vec![2]);
}

#[test]
fn narrowing_never_grows_results() {
    let tasks = seed_tasks();
    let base = TaskQuery {
        search: "a".to_string(),
        ..TaskQuery::default()
    };
    let base_ids = ids(&filter_tasks(&tasks, &base));

    let narrowed = [
        TaskQuery {
            search: "api".to_string(),
            ..base.clone()
        },
        TaskQuery {
            status: StatusFilter::Todo,
            ..base.clone()
        },
        TaskQuery {
            due: Some(date(2026, 2, 12)),
            mode: DateMode::OnOrBefore,
            ..base.clone()
        },
    ];

    for query in narrowed {
        let subset = ids(&filter_tasks(&tasks, &query));
        assert!(subset.len() <= base_ids.len());
        assert!(subset.iter().all(|id| base_ids.contains(id)));
    }
}

#[test]
fn overdue_depends_on_status() {
    let today = date(2026, 10, 19);
    let mut task = Task {
        id: 1,
        title: "late".to_string(),
        description: String::new(),
        due_date: Some(date(2026, 1, 1)),
        status: Status::Todo,
    };
    assert!(is_overdue(&task, today));

    task.status = Status::Done;
    assert!(!is_overdue(&task, today));

    task.status = Status::Todo;
    task.due_date = None;
    assert!(!is_overdue(&task, today));
}

#[test]
fn duplicate_stored_ids_load_as_distinct_tasks() {
    let raw = r#"[{"id":7,"title":"first","dueDate":"","status":"Todo"},{"id":7,"title":"second","dueDate":"","status":"Todo"}]"#;
    let mut store = TaskStore::open(MemoryStorage::new().with_entry(TASKS_KEY, raw));

    let ids: Vec<u64> = store.tasks().iter().map(|t| t.id).collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);

    let removed = store.delete(ids[1]).expect("delete second");
    assert_eq!(removed.title, "second");
    assert_eq!(store.get(7).map(|t| t.title.as_str()), Some("first"));
}

#[test]
fn stored_top_id_does_not_repeat() {
    let raw = format!(r#"[{{"id":{},"title":"far"}}]"#, u64::MAX);
    let mut store = TaskStore::open(MemoryStorage::new().with_entry(TASKS_KEY, &raw));

    let id = store.create(TaskDraft::new("next")).expect("create").id;
    assert_ne!(id, u64::MAX);
    assert_eq!(store.delete(id).expect("delete").title, "next");
    assert_eq!(store.len(), 1);
}
