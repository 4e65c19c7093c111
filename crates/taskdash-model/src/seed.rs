use chrono::NaiveDate;

use crate::task::{Status, Task, TaskId};

/// Sample tasks shown on first launch or when stored data is unusable.
pub fn seed_tasks() -> Vec<Task> {
    vec![
        sample(
            1,
            "Design System Implementation",
            "Create a comprehensive design system with reusable components and tokens",
            10,
            Status::InProgress,
        ),
        sample(
            2,
            "API Integration",
            "Integrate third-party REST APIs for payment processing and notifications",
            15,
            Status::Todo,
        ),
        sample(
            3,
            "User Authentication Module",
            "Implement secure login, registration, and password recovery flows",
            8,
            Status::Done,
        ),
        sample(
            4,
            "Performance Optimization",
            "Optimize bundle size and implement lazy loading for better performance",
            20,
            Status::Todo,
        ),
        sample(
            5,
            "Documentation Update",
            "Update technical documentation and API reference guides",
            12,
            Status::InProgress,
        ),
    ]
}

fn sample(id: TaskId, title: &str, description: &str, feb_day: u32, status: Status) -> Task {
    Task {
        id,
        title: title.to_string(),
        description: description.to_string(),
        due_date: NaiveDate::from_ymd_opt(2026, 2, feb_day),
        status,
    }
}
