//! One file queued for digesting and verification.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::hasher::Digest;

/// Verification verdict for a finished task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The expected hash matched the named algorithm's digest.
    Match(&'static str),
    /// An expected hash was known and matched no enabled algorithm.
    Mismatch,
    /// No expected hash was found; digests were computed only.
    NoExpected,
}

/// Final state recorded by a task's worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Hashed {
        digests: Vec<Digest>,
        verdict: Verdict,
    },
    Cancelled,
    Failed(String),
}

#[derive(Debug)]
enum TaskState {
    Pending,
    Finished(TaskOutcome),
}

/// One file to process. Created during population and never moved or
/// removed afterwards; callbacks identify tasks by registry index. The
/// completion state is written exactly once, by the task's own worker.
#[derive(Debug)]
pub struct FileTask {
    path: PathBuf,
    display_name: String,
    size: u64,
    expected_hash: Option<Vec<u8>>,
    state: Mutex<TaskState>,
}

impl FileTask {
    pub(crate) fn new(
        path: PathBuf,
        display_name: String,
        size: u64,
        expected_hash: Option<Vec<u8>>,
    ) -> Self {
        Self {
            path,
            display_name,
            size,
            expected_hash,
            state: Mutex::new(TaskState::Pending),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Declared byte size at registration time (0 when unreadable).
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn expected_hash(&self) -> Option<&[u8]> {
        self.expected_hash.as_deref()
    }

    pub fn is_finished(&self) -> bool {
        matches!(*self.state.lock().unwrap(), TaskState::Finished(_))
    }

    /// Snapshot of the recorded outcome, if the task has finished.
    pub fn outcome(&self) -> Option<TaskOutcome> {
        match &*self.state.lock().unwrap() {
            TaskState::Pending => None,
            TaskState::Finished(outcome) => Some(outcome.clone()),
        }
    }

    pub(crate) fn finish(&self, outcome: TaskOutcome) {
        let mut state = self.state.lock().unwrap();
        debug_assert!(matches!(*state, TaskState::Pending), "task finished twice");
        *state = TaskState::Finished(outcome);
    }
}
