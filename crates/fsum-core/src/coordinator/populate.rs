//! Session population: expansion, sum-file detection, task registration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize};
use std::sync::Mutex;

use crate::expand;
use crate::hasher::HashAlgorithm;
use crate::resolve;
use crate::sumfile;
use crate::task::FileTask;

use super::{Coordinator, Gate};

impl Coordinator {
    /// Build a session from user-selected paths. Directories are expanded
    /// to their transitive files, a single checksum-list input derives a
    /// task batch, and every remaining file gets its expected hash resolved
    /// from sidecars.
    ///
    /// `base` anchors display names: tasks under it show relative names,
    /// everything else shows the full canonical path.
    pub fn new(
        inputs: Vec<PathBuf>,
        base: PathBuf,
        algorithms: Vec<HashAlgorithm>,
        sumfile_max_bytes: u64,
    ) -> Self {
        let base = fs::canonicalize(&base).unwrap_or(base);
        let mut coordinator = Coordinator {
            base,
            algorithms,
            tasks: Vec::new(),
            size_total: 0,
            progressed: AtomicU64::new(0),
            outstanding: AtomicUsize::new(0),
            cancelled: AtomicBool::new(false),
            listener: Mutex::new(None),
            references: AtomicUsize::new(0),
            gate: Gate::default(),
        };
        coordinator.populate(inputs, sumfile_max_bytes);
        coordinator
    }

    fn populate(&mut self, mut inputs: Vec<PathBuf>, sumfile_max_bytes: u64) {
        expand::expand_paths(&mut inputs);

        if inputs.len() == 1 && !inputs[0].is_dir() {
            self.try_sumfile_batch(&inputs[0], sumfile_max_bytes);
        }

        for path in &inputs {
            let expected = resolve::expected_hash_for(path, &self.algorithms);
            self.add_file(path.clone(), expected);
        }
        tracing::info!(
            tasks = self.tasks.len(),
            total_bytes = self.size_total,
            "session populated"
        );
    }

    /// A single input that parses as a checksum list derives one task per
    /// named record, expected hash already known. The caller registers the
    /// list file itself afterwards through the ordinary resolver path, so
    /// its own digest gets computed too.
    fn try_sumfile_batch(&mut self, path: &Path, sumfile_max_bytes: u64) {
        let entries = sumfile::parse_sum_file(path, sumfile_max_bytes);
        if entries.is_empty() {
            return;
        }
        tracing::debug!(
            records = entries.len(),
            list = %path.display(),
            "single input is a checksum list"
        );
        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        for entry in entries {
            // No filename means no target when the list is the main input.
            if entry.filename.is_empty() {
                continue;
            }
            self.add_file(dir.join(&entry.filename), Some(entry.hash));
        }
    }

    /// Register one file in arrival order. Display name is the remainder
    /// after the base prefix when the canonical path starts with it, else
    /// the full canonical path; a ".."-relative name would only confuse.
    fn add_file(&mut self, path: PathBuf, expected_hash: Option<Vec<u8>>) {
        let canonical = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        let display_name = match canonical.strip_prefix(&self.base) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.display().to_string(),
            _ => canonical.display().to_string(),
        };
        // Declared size; directories (phantom entries from a failed
        // enumeration) and unreadable files count as zero.
        let size = fs::metadata(&path)
            .ok()
            .filter(|m| m.is_file())
            .map(|m| m.len())
            .unwrap_or(0);
        self.size_total += size;
        self.tasks
            .push(FileTask::new(path, display_name, size, expected_hash));
    }
}
