// SPDX-License-Identifier: MIT

use serde::Deserialize;

pub const DEFAULT_PRIORITY: i32 = 1;

/// A task as returned by the tasks endpoint, reduced to the fields the report needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub content: String,
    /// `YYYY-MM-DD`, `None` when the task has no due date.
    pub due_date: Option<String>,
    pub is_completed: bool,
    pub priority: i32,
}

impl Task {
    pub fn new(id: &str, content: &str) -> Self {
        Self {
            id: id.to_string(),
            content: content.to_string(),
            due_date: None,
            is_completed: false,
            priority: DEFAULT_PRIORITY,
        }
    }

    pub fn with_due(mut self, date: &str) -> Self {
        self.due_date = Some(date.to_string());
        self
    }
}

pub(crate) mod wire {
    use super::*;

    #[derive(Deserialize, Debug, Clone)]
    pub struct Due {
        pub date: Option<String>,
    }

    #[derive(Deserialize, Debug, Clone)]
    pub struct Task {
        pub id: String,
        pub content: String,
        pub due: Option<Due>,
        pub is_completed: Option<bool>,
        pub priority: Option<i32>,
    }

    impl From<Task> for super::Task {
        fn from(t: Task) -> Self {
            Self {
                id: t.id,
                content: t.content,
                due_date: t.due.and_then(|d| d.date).filter(|d| !d.is_empty()),
                is_completed: t.is_completed.unwrap_or(false),
                priority: t.priority.unwrap_or(DEFAULT_PRIORITY),
            }
        }
    }
}
