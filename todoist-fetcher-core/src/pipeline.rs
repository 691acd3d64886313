// SPDX-License-Identifier: MIT

use crate::{
    Error,
    client::TaskSource,
    filter,
    task::Task,
};

/// Fetches the tasks matching `filter_expr` and keeps those due on or before `today`.
#[tracing::instrument(level = "info", target = "pipeline", skip(source))]
pub async fn due_tasks<S: TaskSource + ?Sized>(source: &S, filter_expr: &str, today: &str) -> Result<Vec<Task>, Error> {
    let tasks = source.tasks(filter_expr).await?;
    let fetched = tasks.len();

    let tasks = filter::due_tasks(tasks, today);
    tracing::info!(target:"pipeline", fetched=fetched, due=tasks.len(), "Filter tasks");

    Ok(tasks)
}
