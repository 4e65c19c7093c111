pub mod error;
pub mod persist;
pub mod seed;
pub mod storage;
pub mod store;
pub mod task;
pub mod theme;
pub mod view;

pub use error::{ParseValueError, StorageError, TaskError};
pub use storage::{KeyValueStore, MemoryStorage, TASKS_KEY, THEME_KEY};
pub use store::TaskStore;
pub use task::{Status, Task, TaskDraft, TaskId};
pub use theme::Theme;
pub use view::{DateMode, RowCategory, StatusFilter, TaskQuery, ViewSummary};
