use chrono::NaiveDate;
use taskdash_model::persist::{
  format_date,
  parse_date
};
use taskdash_model::view::is_overdue;
use taskdash_model::{
  DateMode,
  RowCategory,
  Status,
  StatusFilter,
  Task,
  TaskId,
  TaskQuery,
  ViewSummary
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  TargetCast,
  classes,
  function_component,
  html,
  use_state
};

use super::DELETE_CONFIRMATION;

const STATUS_OPTIONS: [(StatusFilter, &str);
  4] = [
  (StatusFilter::Any, "All Statuses"),
  (StatusFilter::Todo, "Todo"),
  (
    StatusFilter::InProgress,
    "In Progress"
  ),
  (StatusFilter::Done, "Done")
];

const MODE_OPTIONS: [DateMode; 3] = [
  DateMode::ExactMatch,
  DateMode::OnOrBefore,
  DateMode::OnOrAfter
];

#[derive(Properties, PartialEq)]
pub struct TaskTableProps {
  pub tasks:     Vec<Task>,
  pub today:     NaiveDate,
  pub on_edit:   Callback<TaskId>,
  pub on_delete: Callback<TaskId>,
  pub on_toggle: Callback<TaskId>
}

#[function_component(TaskTable)]
pub fn task_table(
  props: &TaskTableProps
) -> Html {
  let query =
    use_state(TaskQuery::default);

  let shown = query.apply(&props.tasks);
  let summary = ViewSummary::new(
    props.tasks.len(),
    shown.len(),
    &query
  );

  let on_search = {
    let query = query.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        let mut next = (*query).clone();
        next.search = input.value();
        query.set(next);
      }
    )
  };

  let on_clear_search = {
    let query = query.clone();
    Callback::from(move |_: MouseEvent| {
      let mut next = (*query).clone();
      next.search.clear();
      query.set(next);
    })
  };

  let on_status = {
    let query = query.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let select: web_sys::HtmlSelectElement =
          e.target_unchecked_into();
        let mut next = (*query).clone();
        next.status = select
          .value()
          .parse()
          .unwrap_or_default();
        query.set(next);
      }
    )
  };

  let on_mode = {
    let query = query.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let select: web_sys::HtmlSelectElement =
          e.target_unchecked_into();
        let mut next = (*query).clone();
        next.mode = select
          .value()
          .parse()
          .unwrap_or_default();
        query.set(next);
      }
    )
  };

  let on_due = {
    let query = query.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        let mut next = (*query).clone();
        next.due = parse_date(&input.value());
        query.set(next);
      }
    )
  };

  let on_clear_filters = {
    let query = query.clone();
    Callback::from(move |_: MouseEvent| {
      let mut next = (*query).clone();
      next.clear();
      query.set(next);
    })
  };

  let rows = shown.iter().map(|task| {
    render_row(task, props)
  });

  let body = if shown.is_empty() {
    let (headline, hint) =
      summary.empty_message();
    html! {
        <div class="empty-state">
            <p class="empty-text">{ headline }</p>
            <p class="empty-subtext">{ hint }</p>
        </div>
    }
  } else {
    html! {
        <div class="table-responsive">
            <table class="task-table">
                <thead>
                    <tr>
                        <th class="col-check"></th>
                        <th>{ "Title" }</th>
                        <th>{ "Description" }</th>
                        <th>{ "Due Date" }</th>
                        <th>{ "Status" }</th>
                        <th>{ "Actions" }</th>
                    </tr>
                </thead>
                <tbody>{ for rows }</tbody>
            </table>
        </div>
    }
  };

  html! {
      <div class="task-table-card">
          <div class="task-table-header">
              <div class="table-title-row">
                  <div>
                      <h2 class="table-title">{ "Tasks" }</h2>
                      <p class="table-subtitle">{ summary.label() }</p>
                  </div>
                  {
                      if summary.filtered {
                          html! {
                              <button type="button" class="clear-filters-btn" onclick={on_clear_filters}>
                                  { "Clear All" }
                              </button>
                          }
                      } else {
                          html! {}
                      }
                  }
              </div>
              <div class="status-legend">
                  <span class="legend-item"><span class="legend-color legend-green"></span>{ "Completed" }</span>
                  <span class="legend-item"><span class="legend-color legend-amber"></span>{ "In Progress" }</span>
                  <span class="legend-item"><span class="legend-color legend-red"></span>{ "Overdue" }</span>
              </div>
              <div class="search-container">
                  <input
                      type="text"
                      class="search-input"
                      placeholder="Search tasks by title or description..."
                      value={query.search.clone()}
                      oninput={on_search}
                  />
                  {
                      if query.search.is_empty() {
                          html! {}
                      } else {
                          html! {
                              <button type="button" class="search-clear-btn" onclick={on_clear_search}>{ "✕" }</button>
                          }
                      }
                  }
              </div>
              <div class="filters-container">
                  <div class="filter-group">
                      <label for="filterStatus" class="filter-label">{ "Status" }</label>
                      <select id="filterStatus" class="filter-select" onchange={on_status}>
                          {
                              for STATUS_OPTIONS.iter().map(|(value, label)| html! {
                                  <option value={value.as_str()} selected={*value == query.status}>
                                      { *label }
                                  </option>
                              })
                          }
                      </select>
                  </div>
                  <div class="filter-group">
                      <label for="filterDateType" class="filter-label">{ "Date Filter" }</label>
                      <select id="filterDateType" class="filter-select" onchange={on_mode}>
                          {
                              for MODE_OPTIONS.iter().map(|mode| html! {
                                  <option value={mode.as_str()} selected={*mode == query.mode}>
                                      { mode.label() }
                                  </option>
                              })
                          }
                      </select>
                  </div>
                  <div class="filter-group">
                      <label for="filterDate" class="filter-label">{ "Due Date" }</label>
                      <input
                          id="filterDate"
                          type="date"
                          class="filter-input"
                          value={format_date(query.due)}
                          onchange={on_due}
                      />
                  </div>
              </div>
          </div>
          { body }
      </div>
  }
}

fn render_row(
  task: &Task,
  props: &TaskTableProps
) -> Html {
  let id = task.id;
  let category =
    RowCategory::of(task, props.today);
  let done = task.status == Status::Done;
  let text_class =
    done.then_some("text-done");
  let due = match task.due_date {
    | Some(_) => format_date(task.due_date),
    | None => "-".to_string()
  };

  let on_toggle = {
    let on_toggle =
      props.on_toggle.clone();
    Callback::from(move |_: MouseEvent| {
      on_toggle.emit(id)
    })
  };
  let on_edit = {
    let on_edit = props.on_edit.clone();
    Callback::from(move |_: MouseEvent| {
      on_edit.emit(id)
    })
  };
  let on_delete = {
    let on_delete =
      props.on_delete.clone();
    Callback::from(move |_: MouseEvent| {
      if gloo::dialogs::confirm(
        DELETE_CONFIRMATION
      ) {
        on_delete.emit(id);
      } else {
        tracing::info!(
          id,
          "task deletion canceled"
        );
      }
    })
  };

  html! {
      <tr key={id.to_string()} class={category.css_class()}>
          <td>
              <button
                  type="button"
                  class={if done { "btn-check btn-check-done" } else { "btn-check btn-check-todo" }}
                  title={if done { "Mark as incomplete" } else { "Mark as done" }}
                  onclick={on_toggle}
              >
                  { if done { "✓" } else { "" } }
              </button>
          </td>
          <td>
              <span class={classes!("task-title", text_class)}>{ &task.title }</span>
              {
                  if is_overdue(task, props.today) {
                      html! { <span class="text-overdue">{ "Overdue" }</span> }
                  } else {
                      html! {}
                  }
              }
          </td>
          <td><span class={classes!("task-description", text_class)}>{ &task.description }</span></td>
          <td><span class={classes!("task-due", text_class)}>{ due }</span></td>
          <td><span class={classes!("badge", task.status.badge_class())}>{ task.status.as_str() }</span></td>
          <td>
              <div class="icon-btn-group">
                  <button type="button" class="btn-edit" onclick={on_edit}>{ "Edit" }</button>
                  <button type="button" class="btn-delete" onclick={on_delete}>{ "Delete" }</button>
              </div>
          </td>
      </tr>
  }
}
