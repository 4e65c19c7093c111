use std::io::Write;

use anyhow::Context;
use chrono::NaiveDate;
use taskdash_model::persist::encode_tasks;
use taskdash_model::{
    KeyValueStore, StatusFilter, TaskDraft, TaskError, TaskId, TaskQuery, TaskStore, Theme,
    ViewSummary,
};
use tracing::{debug, info, instrument};

use crate::cli::{AddArgs, Command, EditArgs, ListArgs, ThemeChoice};
use crate::config::Config;
use crate::datetime::parse_date_expr;
use crate::prompt::Prompter;
use crate::render::Renderer;

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this task?";
pub const EMPTY_TITLE_ALERT: &str = "Please enter a task title";

#[instrument(skip(store, cfg, renderer, prompter, command, today))]
pub fn dispatch<S, W, P>(
    store: &mut TaskStore<S>,
    cfg: &Config,
    renderer: &mut Renderer<W>,
    prompter: &mut P,
    command: Command,
    today: NaiveDate,
) -> anyhow::Result<()>
where
    S: KeyValueStore,
    W: Write,
    P: Prompter,
{
    debug!(?command, %today, "dispatching command");

    match command {
        Command::List(args) => cmd_list(store, cfg, renderer, &args, today),
        Command::Add(args) => cmd_add(store, renderer, prompter, args, today),
        Command::Edit(args) => cmd_edit(store, renderer, prompter, args, today),
        Command::Delete { id, yes } => cmd_delete(store, cfg, renderer, prompter, id, yes),
        Command::Toggle { id } => cmd_toggle(store, renderer, id),
        Command::Info { id } => cmd_info(store, renderer, id, today),
        Command::Theme { choice } => cmd_theme(store, renderer, choice),
        Command::Export => cmd_export(store, renderer),
    }
}

/// Resolves the `list` flags into a query; the date mode falls back to
/// the configured default.
pub fn build_query(cfg: &Config, args: &ListArgs, today: NaiveDate) -> anyhow::Result<TaskQuery> {
    let due = args
        .due
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse_date_expr(raw, today))
        .transpose()?;
    let mode = match args.mode {
        Some(mode) => mode,
        None => cfg.default_date_mode()?,
    };

    Ok(TaskQuery {
        search: args.search.clone(),
        status: args.status.unwrap_or(StatusFilter::Any),
        due,
        mode,
    })
}

#[instrument(skip(store, cfg, renderer, args, today))]
fn cmd_list<S: KeyValueStore, W: Write>(
    store: &TaskStore<S>,
    cfg: &Config,
    renderer: &mut Renderer<W>,
    args: &ListArgs,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let query = build_query(cfg, args, today)?;
    let shown = query.apply(store.tasks());
    let summary = ViewSummary::new(store.len(), shown.len(), &query);
    debug!(?query, shown = shown.len(), total = store.len(), "filtered tasks");

    if !shown.is_empty() {
        renderer.print_task_table(&shown, today)?;
    }
    renderer.print_summary(&summary)?;
    Ok(())
}

#[instrument(skip(store, renderer, prompter, args, today))]
fn cmd_add<S: KeyValueStore, W: Write, P: Prompter>(
    store: &mut TaskStore<S>,
    renderer: &mut Renderer<W>,
    prompter: &mut P,
    args: AddArgs,
    today: NaiveDate,
) -> anyhow::Result<()> {
    info!("command add");

    let due_date = args
        .due
        .as_deref()
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse_date_expr(raw, today))
        .transpose()?;
    let draft = TaskDraft::new(args.title)
        .with_description(args.description)
        .with_due_date(due_date)
        .with_status(args.status);

    match store.create(draft) {
        Ok(task) => {
            let id = task.id;
            renderer.print_line(&format!("Created task {id}."))
        }
        Err(TaskError::EmptyTitle) => {
            prompter.alert(EMPTY_TITLE_ALERT);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

#[instrument(skip(store, renderer, prompter, args, today), fields(id = args.id))]
fn cmd_edit<S: KeyValueStore, W: Write, P: Prompter>(
    store: &mut TaskStore<S>,
    renderer: &mut Renderer<W>,
    prompter: &mut P,
    args: EditArgs,
    today: NaiveDate,
) -> anyhow::Result<()> {
    info!("command edit");

    let current = store.get(args.id).ok_or(TaskError::NotFound(args.id))?;
    let mut draft = current.to_draft();

    if let Some(title) = args.title {
        draft.title = title;
    }
    if let Some(description) = args.description {
        draft.description = description;
    }
    if args.clear_due {
        draft.due_date = None;
    } else if let Some(raw) = args.due.as_deref() {
        draft.due_date = if raw.trim().is_empty() {
            None
        } else {
            Some(parse_date_expr(raw, today)?)
        };
    }
    if let Some(status) = args.status {
        draft.status = status;
    }

    match store.update(args.id, draft) {
        Ok(task) => {
            let id = task.id;
            renderer.print_line(&format!("Modified task {id}."))
        }
        Err(TaskError::EmptyTitle) => {
            prompter.alert(EMPTY_TITLE_ALERT);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

#[instrument(skip(store, cfg, renderer, prompter))]
fn cmd_delete<S: KeyValueStore, W: Write, P: Prompter>(
    store: &mut TaskStore<S>,
    cfg: &Config,
    renderer: &mut Renderer<W>,
    prompter: &mut P,
    id: TaskId,
    yes: bool,
) -> anyhow::Result<()> {
    info!("command delete");

    if store.get(id).is_none() {
        return Err(TaskError::NotFound(id).into());
    }

    let ask = !yes && cfg.get_bool("confirm")?.unwrap_or(true);
    if ask && !prompter.confirm(DELETE_CONFIRMATION) {
        info!(id, "deletion canceled");
        return renderer.print_line("Task not deleted.");
    }

    let removed = store.delete(id)?;
    renderer.print_line(&format!("Deleted task {} '{}'.", removed.id, removed.title))
}

#[instrument(skip(store, renderer))]
fn cmd_toggle<S: KeyValueStore, W: Write>(
    store: &mut TaskStore<S>,
    renderer: &mut Renderer<W>,
    id: TaskId,
) -> anyhow::Result<()> {
    info!("command toggle");

    let status = store.toggle_status(id)?;
    renderer.print_line(&format!("Task {id} is now {status}."))
}

#[instrument(skip(store, renderer, today))]
fn cmd_info<S: KeyValueStore, W: Write>(
    store: &TaskStore<S>,
    renderer: &mut Renderer<W>,
    id: TaskId,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let task = store.get(id).ok_or(TaskError::NotFound(id))?;
    renderer.print_task_info(task, today)
}

#[instrument(skip(store, renderer))]
fn cmd_theme<S: KeyValueStore, W: Write>(
    store: &mut TaskStore<S>,
    renderer: &mut Renderer<W>,
    choice: Option<ThemeChoice>,
) -> anyhow::Result<()> {
    let current = Theme::load(store.storage());
    let next = match choice {
        None => return renderer.print_line(current.as_str()),
        Some(ThemeChoice::Dark) => Theme::Dark,
        Some(ThemeChoice::Light) => Theme::Light,
        Some(ThemeChoice::Toggle) => current.toggled(),
    };

    if next == current {
        debug!(theme = %next, "theme already set");
    }
    next.save(store.storage_mut());
    renderer.print_line(&format!("Theme set to {next}."))
}

#[instrument(skip(store, renderer))]
fn cmd_export<S: KeyValueStore, W: Write>(
    store: &TaskStore<S>,
    renderer: &mut Renderer<W>,
) -> anyhow::Result<()> {
    let payload = encode_tasks(store.tasks()).context("failed to encode tasks")?;
    renderer.print_line(&payload)
}
