//! Task execution: one worker thread per task.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;

use crate::hasher::{self, TaskError};
use crate::task::{FileTask, TaskOutcome, Verdict};

use super::Coordinator;

impl Coordinator {
    /// Start every task in registry order. Outstanding is incremented
    /// before each spawn so the all-finished notification cannot fire
    /// early. No bound is placed on simultaneously running tasks; one can
    /// be added later without changing the observable contract.
    pub fn start_all(self: &Arc<Self>) {
        tracing::info!(tasks = self.tasks.len(), "starting all tasks");
        for index in 0..self.tasks.len() {
            self.outstanding.fetch_add(1, Ordering::SeqCst);
            let coordinator = Arc::clone(self);
            thread::spawn(move || run_task(coordinator, index));
        }
    }
}

fn run_task(coordinator: Arc<Coordinator>, index: usize) {
    let task = &coordinator.tasks()[index];
    let outcome = execute(&coordinator, task);
    task.finish(outcome);
    coordinator.task_finished(index);
}

fn execute(coordinator: &Coordinator, task: &FileTask) -> TaskOutcome {
    let enabled: Vec<_> = coordinator
        .algorithms()
        .iter()
        .filter(|a| a.enabled)
        .cloned()
        .collect();

    let result = hasher::digest_file(task.path(), &enabled, coordinator.cancel_flag(), |chunk| {
        coordinator.report_progress(chunk)
    });

    match result {
        Ok(digests) => {
            let verdict = match task.expected_hash() {
                None => Verdict::NoExpected,
                Some(expected) => digests
                    .iter()
                    .find(|d| d.bytes.as_slice() == expected)
                    .map(|d| Verdict::Match(d.algorithm))
                    .unwrap_or(Verdict::Mismatch),
            };
            TaskOutcome::Hashed { digests, verdict }
        }
        Err(TaskError::Cancelled) => TaskOutcome::Cancelled,
        Err(err) => {
            tracing::debug!(file = task.display_name(), error = %err, "task failed");
            TaskOutcome::Failed(err.to_string())
        }
    }
}
