//! Session coordinator: task registry, execution, progress and lifecycle.
//!
//! One `Coordinator` is one orchestration run: populate it from user
//! inputs, wrap it in an `Arc`, `start_all`, and receive notifications
//! through a registered listener. Workers hold `Arc` clones and identify
//! tasks by registry index; the registry itself is frozen before any
//! worker starts, so iteration needs no locking.

mod populate;
mod run;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex};

use crate::hasher::HashAlgorithm;
use crate::task::FileTask;

/// Scale for quantized progress: listeners see values in
/// `[0, PROGRESS_RESOLUTION]`, so notification volume is bounded no matter
/// how finely workers report.
pub const PROGRESS_RESOLUTION: u64 = 1000;

/// Receiver for session notifications. Exactly one listener may be
/// registered at a time, and it must unregister before becoming invalid.
pub trait SessionListener: Send {
    /// A task finished (success, failure, and cancellation alike).
    fn file_finished(&self, index: usize, task: &FileTask);
    /// Quantized overall progress changed.
    fn progress(&self, part: u64);
    /// Every task has finished. Delivered exactly once per session.
    fn all_files_finished(&self);
}

/// Condvar paired with an empty mutex. Decrementers take the lock before
/// notifying, so a waiter that checks its atomic under the lock cannot miss
/// a wakeup.
#[derive(Default)]
struct Gate {
    lock: Mutex<()>,
    cv: Condvar,
}

impl Gate {
    fn notify(&self) {
        let _guard = self.lock.lock().unwrap();
        self.cv.notify_all();
    }

    fn wait_until(&self, done: impl Fn() -> bool) {
        let mut guard = self.lock.lock().unwrap();
        while !done() {
            guard = self.cv.wait(guard).unwrap();
        }
    }
}

pub struct Coordinator {
    base: PathBuf,
    algorithms: Vec<HashAlgorithm>,
    tasks: Vec<FileTask>,
    size_total: u64,
    progressed: AtomicU64,
    outstanding: AtomicUsize,
    cancelled: AtomicBool,
    listener: Mutex<Option<Box<dyn SessionListener>>>,
    references: AtomicUsize,
    gate: Gate,
}

impl Coordinator {
    pub fn tasks(&self) -> &[FileTask] {
        &self.tasks
    }

    /// Sum of declared sizes, fixed once population finishes.
    pub fn size_total(&self) -> u64 {
        self.size_total
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub(crate) fn cancel_flag(&self) -> &AtomicBool {
        &self.cancelled
    }

    pub(crate) fn algorithms(&self) -> &[HashAlgorithm] {
        &self.algorithms
    }

    /// Register the session listener. Registering while one is already set
    /// is a contract violation.
    pub fn register_listener(&self, listener: Box<dyn SessionListener>) {
        let references = self.references.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(references, "listener registered");
        let mut guard = self.listener.lock().unwrap();
        debug_assert!(guard.is_none(), "a listener is already registered");
        *guard = Some(listener);
    }

    /// Clear the listener; no notification reaches it afterwards.
    pub fn unregister_listener(&self) {
        {
            let mut guard = self.listener.lock().unwrap();
            debug_assert!(guard.is_some(), "no listener registered");
            *guard = None;
        }
        let references = self.references.fetch_sub(1, Ordering::SeqCst) - 1;
        tracing::debug!(references, "listener unregistered");
        self.gate.notify();
    }

    /// Request cancellation of all running tasks. Workers poll the flag at
    /// chunk boundaries, so stopping is prompt but not instantaneous. With
    /// `wait`, blocks until the last completion callback has fired.
    pub fn cancel(&self, wait: bool) {
        self.cancelled.store(true, Ordering::Relaxed);
        tracing::info!(wait, "cancellation requested");
        if wait {
            self.gate
                .wait_until(|| self.outstanding.load(Ordering::SeqCst) == 0);
        }
    }

    /// Accumulate `delta` processed bytes and notify the listener when the
    /// quantized fraction changes. Disabled entirely for zero total size:
    /// a percentage of nothing is undefined.
    pub(crate) fn report_progress(&self, delta: u64) {
        if self.size_total == 0 {
            return;
        }
        let old = self.progressed.fetch_add(delta, Ordering::Relaxed);
        let new = old + delta;
        let old_part = old * PROGRESS_RESOLUTION / self.size_total;
        let new_part = new * PROGRESS_RESOLUTION / self.size_total;
        if old_part != new_part {
            let guard = self.listener.lock().unwrap();
            if let Some(listener) = guard.as_ref() {
                listener.progress(new_part.min(PROGRESS_RESOLUTION));
            }
        }
    }

    /// Block until the reference count reaches zero. Teardown must not
    /// release session state while a listener is still registered: a late
    /// notification would touch freed state.
    fn drain_references(&self) {
        self.gate
            .wait_until(|| self.references.load(Ordering::SeqCst) == 0);
    }

    /// Completion path for one task: decrement outstanding under the
    /// listener lock, notify per-task, and exactly once notify all-finished
    /// when the count reaches zero.
    pub(crate) fn task_finished(&self, index: usize) {
        {
            let guard = self.listener.lock().unwrap();
            let left = self.outstanding.fetch_sub(1, Ordering::SeqCst) - 1;
            tracing::debug!(
                file = self.tasks[index].display_name(),
                outstanding = left,
                "task finished"
            );
            if let Some(listener) = guard.as_ref() {
                listener.file_finished(index, &self.tasks[index]);
                if left == 0 {
                    listener.all_files_finished();
                }
            }
        }
        self.gate.notify();
    }
}

impl Drop for Coordinator {
    /// Cancel outstanding work, then wait for the reference count to drain.
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
        self.drain_references();
    }
}
