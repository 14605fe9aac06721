//! Bounded fan-out of per-file tasks with a join barrier.
//!
//! Both the scan and the download phase launch one Tokio task per file and
//! wait for every task before moving on. A semaphore permit is acquired
//! before each spawn, so at most `concurrency` tasks run at once; the permit
//! is released when the task finishes (RAII). A failing or panicking task
//! never cancels its siblings.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

/// A per-file task that did not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    /// File the task was working on.
    pub file_name: String,
    /// Rendered error message.
    pub message: String,
}

impl TaskFailure {
    /// Creates a failure record for `file_name`.
    pub fn new(file_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file_name, self.message)
    }
}

/// Joins failure messages into one report.
#[must_use]
pub fn concat_failures(failures: &[TaskFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Aborts spawned tasks if the fan-out itself is dropped before joining.
struct AbortOnDrop(Vec<AbortHandle>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        for handle in &self.0 {
            handle.abort();
        }
    }
}

/// Runs every task with at most `concurrency` in flight and waits for all.
///
/// Each task is labelled with the file it works on. Results come back in
/// input order; an `Err` carries the task's error message, or a panic note
/// if the task panicked. Dropping the returned future (for example when a
/// request deadline fires) aborts the tasks still running.
pub async fn run_bounded<T, E, Fut>(
    concurrency: usize,
    tasks: Vec<(String, Fut)>,
) -> Vec<Result<T, TaskFailure>>
where
    T: Send + 'static,
    E: fmt::Display + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut handles = Vec::with_capacity(tasks.len());
    let mut guard = AbortOnDrop(Vec::with_capacity(tasks.len()));

    for (file_name, task) in tasks {
        // Blocks here once the concurrency limit is reached
        let permit = match Arc::clone(&semaphore).acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => {
                handles.push((file_name, None));
                continue;
            }
        };

        let handle = tokio::spawn(async move {
            let _permit = permit;
            task.await
        });
        guard.0.push(handle.abort_handle());
        handles.push((file_name, Some(handle)));
    }

    debug!(task_count = handles.len(), "waiting for tasks to complete");

    let mut results = Vec::with_capacity(handles.len());
    for (file_name, handle) in handles {
        let result = match handle {
            Some(handle) => match handle.await {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(e)) => Err(TaskFailure::new(file_name, e.to_string())),
                Err(join_error) => {
                    warn!(file_name = %file_name, error = %join_error, "task panicked");
                    Err(TaskFailure::new(
                        file_name,
                        format!("task aborted: {join_error}"),
                    ))
                }
            },
            None => Err(TaskFailure::new(file_name, "concurrency limiter closed")),
        };
        results.push(result);
    }
    drop(guard);
    results
}
