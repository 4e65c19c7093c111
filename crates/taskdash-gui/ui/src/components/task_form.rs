use taskdash_model::persist::{
  format_date,
  parse_date
};
use taskdash_model::{
  Status,
  Task,
  TaskDraft
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  TargetCast,
  function_component,
  html,
  use_effect_with,
  use_state
};

use super::EMPTY_TITLE_ALERT;

#[derive(Clone, PartialEq, Default)]
struct FormFields {
  title:       String,
  description: String,
  due:         String,
  status:      Status
}

impl FormFields {
  fn from_task(task: Option<&Task>) -> Self {
    match task {
      | Some(task) => Self {
        title:       task.title.clone(),
        description: task
          .description
          .clone(),
        due:         format_date(
          task.due_date
        ),
        status:      task.status
      },
      | None => Self::default()
    }
  }

  fn to_draft(&self) -> TaskDraft {
    TaskDraft::new(self.title.clone())
      .with_description(
        self.description.clone()
      )
      .with_due_date(parse_date(&self.due))
      .with_status(self.status)
  }
}

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
  pub editing:   Option<Task>,
  pub on_submit: Callback<TaskDraft>,
  pub on_cancel: Callback<()>
}

#[function_component(TaskForm)]
pub fn task_form(
  props: &TaskFormProps
) -> Html {
  let fields = {
    let editing = props.editing.clone();
    use_state(move || {
      FormFields::from_task(
        editing.as_ref()
      )
    })
  };

  {
    let fields = fields.clone();
    use_effect_with(
      props.editing.clone(),
      move |editing| {
        fields.set(FormFields::from_task(
          editing.as_ref()
        ));
        || ()
      }
    );
  }

  let on_title = {
    let fields = fields.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        let mut next = (*fields).clone();
        next.title = input.value();
        fields.set(next);
      }
    )
  };

  let on_description = {
    let fields = fields.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlTextAreaElement =
          e.target_unchecked_into();
        let mut next = (*fields).clone();
        next.description = input.value();
        fields.set(next);
      }
    )
  };

  let on_due = {
    let fields = fields.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        let mut next = (*fields).clone();
        next.due = input.value();
        fields.set(next);
      }
    )
  };

  let on_status = {
    let fields = fields.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let select: web_sys::HtmlSelectElement =
          e.target_unchecked_into();
        let mut next = (*fields).clone();
        next.status =
          Status::parse_lenient(
            &select.value()
          )
          .unwrap_or_default();
        fields.set(next);
      }
    )
  };

  let on_submit = {
    let fields = fields.clone();
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |e: web_sys::SubmitEvent| {
        e.prevent_default();
        if fields.title.trim().is_empty()
        {
          gloo::dialogs::alert(
            EMPTY_TITLE_ALERT
          );
          return;
        }
        on_submit.emit(fields.to_draft());
        fields.set(FormFields::default());
      }
    )
  };

  let on_close = {
    let on_cancel =
      props.on_cancel.clone();
    Callback::from(move |_: MouseEvent| {
      on_cancel.emit(())
    })
  };

  let editing = props.editing.is_some();
  let (heading, subheading, action) =
    if editing {
      (
        "Edit Task",
        "Update the task details below",
        "Update Task"
      )
    } else {
      (
        "Add New Task",
        "Create a new task by filling \
         out the form",
        "Add Task"
      )
    };

  html! {
      <div class="task-form-card">
          <div class="task-form-header">
              <div>
                  <h2 class="task-form-title">{ heading }</h2>
                  <p class="task-form-subtitle">{ subheading }</p>
              </div>
              <button type="button" class="close-btn" onclick={on_close.clone()}>{ "✕" }</button>
          </div>
          <form class="task-form" onsubmit={on_submit}>
              <div class="form-group">
                  <label for="title" class="form-label">
                      { "Title " }<span class="required-star">{ "*" }</span>
                  </label>
                  <input
                      id="title"
                      type="text"
                      class="form-input"
                      placeholder="Enter task title"
                      value={fields.title.clone()}
                      oninput={on_title}
                  />
              </div>
              <div class="form-group">
                  <label for="description" class="form-label">{ "Description" }</label>
                  <textarea
                      id="description"
                      class="form-textarea"
                      rows="3"
                      placeholder="Enter task description"
                      value={fields.description.clone()}
                      oninput={on_description}
                  />
              </div>
              <div class="form-row">
                  <div class="form-group">
                      <label for="dueDate" class="form-label">{ "Due Date" }</label>
                      <input
                          id="dueDate"
                          type="date"
                          class="form-input"
                          value={fields.due.clone()}
                          onchange={on_due}
                      />
                  </div>
                  <div class="form-group">
                      <label for="status" class="form-label">{ "Status" }</label>
                      <select id="status" class="form-select" onchange={on_status}>
                          {
                              for Status::ALL.iter().map(|status| html! {
                                  <option
                                      value={status.as_str()}
                                      selected={*status == fields.status}
                                  >
                                      { status.as_str() }
                                  </option>
                              })
                          }
                      </select>
                  </div>
              </div>
              <div class="form-actions">
                  <button type="button" class="btn-secondary" onclick={on_close}>{ "Cancel" }</button>
                  <button type="submit" class="btn-primary">{ action }</button>
              </div>
          </form>
      </div>
  }
}
