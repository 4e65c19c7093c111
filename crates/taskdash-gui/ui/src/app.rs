use std::cell::RefCell;
use std::rc::Rc;

use taskdash_model::{
  Task,
  TaskDraft,
  TaskError,
  TaskId,
  TaskStore,
  Theme
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  function_component,
  html,
  use_effect_with,
  use_mut_ref,
  use_state
};

use crate::components::{
  EMPTY_TITLE_ALERT,
  Navbar,
  TaskForm,
  TaskTable
};
use crate::storage::LocalStorage;

type SharedStore =
  Rc<RefCell<TaskStore<LocalStorage>>>;

#[derive(Clone, PartialEq)]
enum FormMode {
  Closed,
  Add,
  Edit(Task)
}

impl FormMode {
  fn editing_id(&self) -> Option<TaskId> {
    match self {
      | Self::Edit(task) => Some(task.id),
      | _ => None
    }
  }
}

#[function_component(App)]
pub fn app() -> Html {
  let store: SharedStore = use_mut_ref(
    || TaskStore::open(LocalStorage)
  );
  let tasks = {
    let store = store.clone();
    use_state(move || {
      store.borrow().tasks().to_vec()
    })
  };
  let theme =
    use_state(|| Theme::load(&LocalStorage));
  let form = use_state(|| FormMode::Closed);
  let today =
    chrono::Local::now().date_naive();

  {
    use_effect_with(*theme, move |theme| {
      apply_theme(*theme);
      theme.save(&mut LocalStorage);
      tracing::debug!(
        theme = %theme,
        "applied theme"
      );
      || ()
    });
  }

  let refresh = {
    let store = store.clone();
    let tasks = tasks.clone();
    move || {
      tasks.set(
        store.borrow().tasks().to_vec()
      );
    }
  };

  let on_toggle_theme = {
    let theme = theme.clone();
    Callback::from(move |_: MouseEvent| {
      theme.set((*theme).toggled());
    })
  };

  let on_open_form = {
    let form = form.clone();
    Callback::from(move |_: MouseEvent| {
      form.set(FormMode::Add);
    })
  };

  let on_cancel = {
    let form = form.clone();
    Callback::from(move |()| {
      form.set(FormMode::Closed);
    })
  };

  let on_submit = {
    let store = store.clone();
    let form = form.clone();
    let refresh = refresh.clone();
    Callback::from(
      move |draft: TaskDraft| {
        let result = match &*form {
          | FormMode::Edit(task) => store
            .borrow_mut()
            .update(task.id, draft)
            .map(|_| ()),
          | _ => store
            .borrow_mut()
            .create(draft)
            .map(|_| ())
        };

        match result {
          | Ok(()) => {
            refresh();
            form.set(FormMode::Closed);
          }
          | Err(TaskError::EmptyTitle) => {
            gloo::dialogs::alert(
              EMPTY_TITLE_ALERT
            );
          }
          | Err(err) => {
            tracing::warn!(
              %err,
              "task submit ignored"
            );
            refresh();
            form.set(FormMode::Closed);
          }
        }
      }
    )
  };

  let on_edit = {
    let store = store.clone();
    let form = form.clone();
    Callback::from(move |id: TaskId| {
      let task =
        store.borrow().get(id).cloned();
      match task {
        | Some(task) => {
          form.set(FormMode::Edit(task))
        }
        | None => tracing::warn!(
          id,
          "edit requested for unknown \
           task"
        )
      }
    })
  };

  let on_delete = {
    let store = store.clone();
    let form = form.clone();
    let refresh = refresh.clone();
    Callback::from(move |id: TaskId| {
      let deleted =
        store.borrow_mut().delete(id);
      if let Err(err) = deleted {
        tracing::warn!(
          %err,
          "delete ignored"
        );
        return;
      }
      if form.editing_id() == Some(id) {
        form.set(FormMode::Closed);
      }
      refresh();
    })
  };

  let on_toggle_status = {
    let store = store.clone();
    Callback::from(move |id: TaskId| {
      let toggled = store
        .borrow_mut()
        .toggle_status(id);
      match toggled {
        | Ok(status) => {
          tracing::debug!(
            id,
            %status,
            "toggled task"
          );
          refresh();
        }
        | Err(err) => tracing::warn!(
          %err,
          "toggle ignored"
        )
      }
    })
  };

  let modal = match &*form {
    | FormMode::Closed => html! {},
    | mode => {
      let editing = match mode {
        | FormMode::Edit(task) => {
          Some(task.clone())
        }
        | _ => None
      };
      let on_backdrop = {
        let on_cancel = on_cancel.clone();
        Callback::from(
          move |_: MouseEvent| {
            on_cancel.emit(())
          }
        )
      };
      html! {
          <div class="modal-overlay">
              <div class="modal-backdrop" onclick={on_backdrop}></div>
              <div class="modal-container">
                  <TaskForm
                      editing={editing}
                      on_submit={on_submit}
                      on_cancel={on_cancel}
                  />
              </div>
          </div>
      }
    }
  };

  html! {
      <div class="app-container">
          <Navbar theme={*theme} on_toggle={on_toggle_theme} />
          <main class="main-content">
              <div class="page-header">
                  <div>
                      <h1 class="page-title">{ "Dashboard" }</h1>
                      <p class="page-subtitle">{ "Manage your projects and tasks efficiently" }</p>
                  </div>
                  <button type="button" class="btn-add-task" onclick={on_open_form}>
                      { "+ Add Task" }
                  </button>
              </div>
              <TaskTable
                  tasks={(*tasks).clone()}
                  today={today}
                  on_edit={on_edit}
                  on_delete={on_delete}
                  on_toggle={on_toggle_status}
              />
          </main>
          <footer class="app-footer">
              <p class="copyright">{ "© 2026 Task Manager. All rights reserved." }</p>
          </footer>
          { modal }
      </div>
  }
}

fn apply_theme(theme: Theme) {
  let Some(root) = web_sys::window()
    .and_then(|window| window.document())
    .and_then(|document| {
      document.document_element()
    })
  else {
    return;
  };

  let applied = if theme.is_dark() {
    root.set_attribute("data-theme", "dark")
  } else {
    root.remove_attribute("data-theme")
  };
  if let Err(err) = applied {
    tracing::warn!(
      error = ?err,
      "failed to apply theme"
    );
  }
}
