// SPDX-License-Identifier: MIT

use crate::task::Task;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The current local date as `YYYY-MM-DD`.
///
/// Due dates use the same zero padded fixed width form, so plain string
/// ordering matches chronological ordering.
pub fn today() -> String {
    chrono::Local::now().format(DATE_FORMAT).to_string()
}

/// A task without a due date is always due, otherwise it's due today or overdue.
pub fn is_due(t: &Task, today: &str) -> bool {
    match t.due_date.as_deref() {
        None | Some("") => true,
        Some(d) => d <= today,
    }
}

pub fn due_tasks(tasks: Vec<Task>, today: &str) -> Vec<Task> {
    tasks.into_iter().filter(|t| is_due(t, today)).collect()
}
