use chrono::NaiveDate;
use taskdash_core::cli::{AddArgs, Command, EditArgs, ListArgs, ThemeChoice};
use taskdash_core::commands::{DELETE_CONFIRMATION, EMPTY_TITLE_ALERT, dispatch};
use taskdash_core::config::Config;
use taskdash_core::datastore::FileStorage;
use taskdash_core::prompt::Prompter;
use taskdash_core::render::Renderer;
use taskdash_model::{
    DateMode, KeyValueStore, Status, StatusFilter, TASKS_KEY, THEME_KEY, TaskStore, Theme,
};
use tempfile::tempdir;

#[derive(Default)]
struct ScriptedPrompter {
    answer: bool,
    confirms: Vec<String>,
    alerts: Vec<String>,
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, message: &str) -> bool {
        self.confirms.push(message.to_string());
        self.answer
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 14).expect("valid date")
}

fn quiet_config() -> Config {
    let mut cfg = Config::defaults();
    cfg.apply_overrides(vec![("color".to_string(), "off".to_string())]);
    cfg
}

fn run(
    store: &mut TaskStore<FileStorage>,
    cfg: &Config,
    prompter: &mut ScriptedPrompter,
    command: Command,
) -> anyhow::Result<String> {
    let mut renderer = Renderer::with_writer(cfg, Vec::new())?;
    dispatch(store, cfg, &mut renderer, prompter, command, today())?;
    Ok(String::from_utf8(renderer.into_inner()).expect("utf8 output"))
}

#[test]
fn first_run_seeds_and_lists_everything() {
    let temp = tempdir().expect("tempdir");
    let storage = FileStorage::open(temp.path()).expect("open storage");
    let mut store = TaskStore::open(storage);
    let cfg = quiet_config();
    let mut prompter = ScriptedPrompter::default();

    let out = run(&mut store, &cfg, &mut prompter, Command::default()).expect("list");
    assert!(out.contains("Design System Implementation"));
    assert!(out.contains("Documentation Update"));
    assert!(out.contains("5 total tasks"));
    assert!(!out.contains("shown"));
    // 2026-02-10 is before 2026-02-14 and still in progress.
    assert!(out.contains("Design System Implementation (overdue)"));
}

#[test]
fn add_edit_toggle_delete_persist_to_disk() {
    let temp = tempdir().expect("tempdir");
    let cfg = quiet_config();
    let mut prompter = ScriptedPrompter {
        answer: true,
        ..ScriptedPrompter::default()
    };

    let mut store = TaskStore::open(FileStorage::open(temp.path()).expect("open"));
    let out = run(
        &mut store,
        &cfg,
        &mut prompter,
        Command::Add(AddArgs {
            title: "Write release notes".to_string(),
            description: "for 0.1".to_string(),
            due: Some("tomorrow".to_string()),
            status: Status::Todo,
        }),
    )
    .expect("add");
    assert!(out.starts_with("Created task "));

    let id = store.tasks().last().expect("new task").id;
    assert_eq!(
        store.get(id).and_then(|t| t.due_date),
        NaiveDate::from_ymd_opt(2026, 2, 15)
    );

    run(
        &mut store,
        &cfg,
        &mut prompter,
        Command::Edit(EditArgs {
            id,
            title: None,
            description: Some("for 0.2".to_string()),
            due: None,
            clear_due: true,
            status: Some(Status::InProgress),
        }),
    )
    .expect("edit");
    run(&mut store, &cfg, &mut prompter, Command::Toggle { id }).expect("toggle");

    let reopened = TaskStore::open(FileStorage::open(temp.path()).expect("reopen"));
    let task = reopened.get(id).expect("persisted task");
    assert_eq!(task.title, "Write release notes");
    assert_eq!(task.description, "for 0.2");
    assert_eq!(task.due_date, None);
    assert_eq!(task.status, Status::Done);

    let out = run(
        &mut store,
        &cfg,
        &mut prompter,
        Command::Delete { id, yes: false },
    )
    .expect("delete");
    assert!(out.contains("Deleted task"));
    assert_eq!(prompter.confirms, vec![DELETE_CONFIRMATION.to_string()]);

    let reopened = TaskStore::open(FileStorage::open(temp.path()).expect("reopen"));
    assert!(reopened.get(id).is_none());
    assert_eq!(reopened.len(), 5);
}

#[test]
fn declined_confirmation_keeps_the_task() {
    let temp = tempdir().expect("tempdir");
    let cfg = quiet_config();
    let mut prompter = ScriptedPrompter::default();
    let mut store = TaskStore::open(FileStorage::open(temp.path()).expect("open"));

    let out = run(
        &mut store,
        &cfg,
        &mut prompter,
        Command::Delete { id: 2, yes: false },
    )
    .expect("delete");
    assert!(out.contains("Task not deleted."));
    assert!(store.get(2).is_some());
    assert_eq!(store.storage().get(TASKS_KEY).expect("read"), None);
}

#[test]
fn confirm_off_skips_the_prompt() {
    let temp = tempdir().expect("tempdir");
    let mut cfg = quiet_config();
    cfg.apply_overrides(vec![("rc.confirm".to_string(), "off".to_string())]);
    let mut prompter = ScriptedPrompter::default();
    let mut store = TaskStore::open(FileStorage::open(temp.path()).expect("open"));

    run(
        &mut store,
        &cfg,
        &mut prompter,
        Command::Delete { id: 2, yes: false },
    )
    .expect("delete");
    assert!(prompter.confirms.is_empty());
    assert!(store.get(2).is_none());
}

#[test]
fn misspelled_confirm_setting_refuses_to_delete() {
    let temp = tempdir().expect("tempdir");
    let mut cfg = quiet_config();
    cfg.apply_overrides(vec![("confirm".to_string(), "enabled".to_string())]);
    let mut prompter = ScriptedPrompter::default();
    let mut store = TaskStore::open(FileStorage::open(temp.path()).expect("open"));

    let err = run(
        &mut store,
        &cfg,
        &mut prompter,
        Command::Delete { id: 1, yes: false },
    )
    .expect_err("invalid confirm value");
    assert!(err.to_string().contains("invalid confirm setting"));
    assert!(prompter.confirms.is_empty());
    assert!(store.get(1).is_some());
}

#[test]
fn empty_title_alerts_and_changes_nothing() {
    let temp = tempdir().expect("tempdir");
    let cfg = quiet_config();
    let mut prompter = ScriptedPrompter::default();
    let mut store = TaskStore::open(FileStorage::open(temp.path()).expect("open"));

    run(
        &mut store,
        &cfg,
        &mut prompter,
        Command::Add(AddArgs {
            title: "   ".to_string(),
            description: String::new(),
            due: None,
            status: Status::Todo,
        }),
    )
    .expect("add");

    assert_eq!(prompter.alerts, vec![EMPTY_TITLE_ALERT.to_string()]);
    assert_eq!(store.len(), 5);
    assert_eq!(store.storage().get(TASKS_KEY).expect("read"), None);
}

#[test]
fn unknown_ids_are_errors() {
    let temp = tempdir().expect("tempdir");
    let cfg = quiet_config();
    let mut prompter = ScriptedPrompter::default();
    let mut store = TaskStore::open(FileStorage::open(temp.path()).expect("open"));

    for command in [
        Command::Toggle { id: 404 },
        Command::Info { id: 404 },
        Command::Delete { id: 404, yes: true },
    ] {
        let err = run(&mut store, &cfg, &mut prompter, command).expect_err("unknown id");
        assert!(err.to_string().contains("task 404 not found"));
    }
}

#[test]
fn filtered_list_reports_shown_count() {
    let temp = tempdir().expect("tempdir");
    let cfg = quiet_config();
    let mut prompter = ScriptedPrompter::default();
    let mut store = TaskStore::open(FileStorage::open(temp.path()).expect("open"));

    let out = run(
        &mut store,
        &cfg,
        &mut prompter,
        Command::List(ListArgs {
            search: String::new(),
            status: Some(StatusFilter::Todo),
            due: Some("2026-02-15".to_string()),
            mode: Some(DateMode::OnOrAfter),
        }),
    )
    .expect("list");
    assert!(out.contains("API Integration"));
    assert!(out.contains("Performance Optimization"));
    assert!(!out.contains("Documentation Update"));
    assert!(out.contains("5 total tasks • 2 shown"));

    let out = run(
        &mut store,
        &cfg,
        &mut prompter,
        Command::List(ListArgs {
            search: "no such words".to_string(),
            ..ListArgs::default()
        }),
    )
    .expect("list");
    assert!(out.contains("No tasks match your search or filters."));
    assert!(out.contains("5 total tasks • 0 shown"));
}

#[test]
fn theme_defaults_dark_and_toggles() {
    let temp = tempdir().expect("tempdir");
    let cfg = quiet_config();
    let mut prompter = ScriptedPrompter::default();
    let mut store = TaskStore::open(FileStorage::open(temp.path()).expect("open"));

    let out = run(&mut store, &cfg, &mut prompter, Command::Theme { choice: None })
        .expect("theme");
    assert_eq!(out.trim(), "dark");

    run(
        &mut store,
        &cfg,
        &mut prompter,
        Command::Theme {
            choice: Some(ThemeChoice::Toggle),
        },
    )
    .expect("toggle theme");
    assert_eq!(
        store.storage().get(THEME_KEY).expect("read").as_deref(),
        Some("light")
    );
    assert_eq!(Theme::load(store.storage()), Theme::Light);
}

#[test]
fn export_prints_the_browser_layout() {
    let temp = tempdir().expect("tempdir");
    let cfg = quiet_config();
    let mut prompter = ScriptedPrompter::default();
    let mut store = TaskStore::open(FileStorage::open(temp.path()).expect("open"));

    let out = run(&mut store, &cfg, &mut prompter, Command::Export).expect("export");
    let parsed: serde_json::Value = serde_json::from_str(out.trim()).expect("json");
    assert_eq!(parsed[0]["id"], 1);
    assert_eq!(parsed[0]["dueDate"], "2026-02-10");
    assert_eq!(parsed[0]["status"], "In Progress");
}
