mod navbar;
mod task_form;
mod task_table;

pub use navbar::Navbar;
pub use task_form::TaskForm;
pub use task_table::TaskTable;

pub const EMPTY_TITLE_ALERT: &str = "Please enter a task title";
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this task?";
