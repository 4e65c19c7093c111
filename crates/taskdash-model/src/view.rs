use std::str::FromStr;

use chrono::NaiveDate;
use tracing::trace;

use crate::error::ParseValueError;
use crate::task::{
  Status,
  Task
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default,
)]
pub enum StatusFilter {
  #[default]
  Any,
  Todo,
  InProgress,
  Done
}

impl StatusFilter {
  pub fn matches(
    self,
    status: Status
  ) -> bool {
    match self {
      | Self::Any => true,
      | Self::Todo => {
        status == Status::Todo
      }
      | Self::InProgress => {
        status == Status::InProgress
      }
      | Self::Done => {
        status == Status::Done
      }
    }
  }

  /// Value used by the web UI's
  /// `<select>`.
  pub fn as_str(self) -> &'static str {
    match self {
      | Self::Any => "all",
      | Self::Todo => "Todo",
      | Self::InProgress => {
        "In Progress"
      }
      | Self::Done => "Done"
    }
  }
}

impl From<Status> for StatusFilter {
  fn from(status: Status) -> Self {
    match status {
      | Status::Todo => Self::Todo,
      | Status::InProgress => {
        Self::InProgress
      }
      | Status::Done => Self::Done
    }
  }
}

impl FromStr for StatusFilter {
  type Err = ParseValueError;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    if trimmed.eq_ignore_ascii_case("any")
      || trimmed
        .eq_ignore_ascii_case("all")
    {
      return Ok(Self::Any);
    }

    Status::parse_lenient(trimmed)
      .map(Self::from)
      .ok_or_else(|| ParseValueError {
        kind:     "status filter",
        value:    s.to_string(),
        expected: "any, todo, \
                   in-progress, done"
      })
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default,
)]
pub enum DateMode {
  #[default]
  ExactMatch,
  OnOrBefore,
  OnOrAfter
}

impl DateMode {
  pub fn as_str(self) -> &'static str {
    match self {
      | Self::ExactMatch => "exact",
      | Self::OnOrBefore => "before",
      | Self::OnOrAfter => "after"
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      | Self::ExactMatch => {
        "Exact Date"
      }
      | Self::OnOrBefore => {
        "On or Before"
      }
      | Self::OnOrAfter => {
        "On or After"
      }
    }
  }

  pub fn accepts(
    self,
    task_date: NaiveDate,
    filter_date: NaiveDate
  ) -> bool {
    match self {
      | Self::ExactMatch => {
        task_date == filter_date
      }
      | Self::OnOrBefore => {
        task_date <= filter_date
      }
      | Self::OnOrAfter => {
        task_date >= filter_date
      }
    }
  }
}

impl FromStr for DateMode {
  type Err = ParseValueError;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "exact" | "on" => {
        Ok(Self::ExactMatch)
      }
      | "before" | "on-or-before" => {
        Ok(Self::OnOrBefore)
      }
      | "after" | "on-or-after" => {
        Ok(Self::OnOrAfter)
      }
      | _ => Err(ParseValueError {
        kind:     "date mode",
        value:    s.to_string(),
        expected: "exact, before, after"
      })
    }
  }
}

/// Search text, status and due-date
/// criteria for the task table.
#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub struct TaskQuery {
  pub search: String,
  pub status: StatusFilter,
  pub due:    Option<NaiveDate>,
  pub mode:   DateMode
}

impl TaskQuery {
  pub fn matches(
    &self,
    task: &Task
  ) -> bool {
    let ok = self.matches_search(task)
      && self.status.matches(task.status)
      && self.matches_due(task);
    trace!(
      id = task.id,
      ok,
      "evaluated task query"
    );
    ok
  }

  /// Passing tasks in their original
  /// order. Never reorders or copies.
  pub fn apply<'a>(
    &self,
    tasks: &'a [Task]
  ) -> Vec<&'a Task> {
    tasks
      .iter()
      .filter(|task| self.matches(task))
      .collect()
  }

  /// True when any criterion can narrow
  /// the list. The date mode alone does
  /// not count.
  pub fn is_active(&self) -> bool {
    !self.search.is_empty()
      || self.status != StatusFilter::Any
      || self.due.is_some()
  }

  pub fn clear(&mut self) {
    *self = Self::default();
  }

  fn matches_search(
    &self,
    task: &Task
  ) -> bool {
    if self.search.is_empty() {
      return true;
    }

    let needle =
      self.search.to_lowercase();
    task
      .title
      .to_lowercase()
      .contains(&needle)
      || task
        .description
        .to_lowercase()
        .contains(&needle)
  }

  fn matches_due(
    &self,
    task: &Task
  ) -> bool {
    let Some(filter_date) = self.due
    else {
      return true;
    };

    match task.due_date {
      | Some(task_date) => self
        .mode
        .accepts(task_date, filter_date),
      | None => false
    }
  }
}

pub fn filter_tasks<'a>(
  tasks: &'a [Task],
  query: &TaskQuery
) -> Vec<&'a Task> {
  query.apply(tasks)
}

/// Not done, has a due date, and that
/// date is strictly before `today`.
pub fn is_overdue(
  task: &Task,
  today: NaiveDate
) -> bool {
  task.status != Status::Done
    && task
      .due_date
      .is_some_and(|due| due < today)
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum RowCategory {
  Done,
  Overdue,
  InProgress,
  Todo
}

impl RowCategory {
  /// Done > Overdue > InProgress >
  /// Todo.
  pub fn of(
    task: &Task,
    today: NaiveDate
  ) -> Self {
    if task.status == Status::Done {
      Self::Done
    } else if is_overdue(task, today) {
      Self::Overdue
    } else if task.status
      == Status::InProgress
    {
      Self::InProgress
    } else {
      Self::Todo
    }
  }

  pub fn css_class(
    self
  ) -> &'static str {
    match self {
      | Self::Done => "row-done",
      | Self::Overdue => "row-overdue",
      | Self::InProgress => {
        "row-in-progress"
      }
      | Self::Todo => ""
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      | Self::Done => "done",
      | Self::Overdue => "overdue",
      | Self::InProgress => {
        "in-progress"
      }
      | Self::Todo => "todo"
    }
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct ViewSummary {
  pub total:    usize,
  pub shown:    usize,
  pub filtered: bool
}

impl ViewSummary {
  pub fn new(
    total: usize,
    shown: usize,
    query: &TaskQuery
  ) -> Self {
    Self {
      total,
      shown,
      filtered: query.is_active()
    }
  }

  /// `5 total tasks • 2 shown`
  pub fn label(&self) -> String {
    let plural = if self.total == 1 {
      ""
    } else {
      "s"
    };
    let mut out = format!(
      "{} total task{plural}",
      self.total
    );
    if self.filtered {
      out.push_str(&format!(
        " • {} shown",
        self.shown
      ));
    }
    out
  }

  /// Headline and hint for an empty
  /// table.
  pub fn empty_message(
    &self
  ) -> (&'static str, &'static str) {
    if self.filtered {
      (
        "No tasks match your search or \
         filters.",
        "Try adjusting your search or \
         filter criteria."
      )
    } else {
      (
        "No tasks available.",
        "Add a task to get started."
      )
    }
  }
}
