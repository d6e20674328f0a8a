//! Console reporting: a channel-backed listener plus line formatting.

use std::sync::mpsc::Sender;

use fsum_core::coordinator::SessionListener;
use fsum_core::task::{FileTask, TaskOutcome, Verdict};

/// Session notifications forwarded to the printing loop on the main thread;
/// worker threads never write to the console directly.
pub enum CliEvent {
    Progress(u64),
    Finished {
        name: String,
        outcome: Option<TaskOutcome>,
    },
    AllFinished,
}

pub struct ConsoleListener {
    tx: Sender<CliEvent>,
}

impl ConsoleListener {
    pub fn new(tx: Sender<CliEvent>) -> Self {
        Self { tx }
    }
}

impl SessionListener for ConsoleListener {
    fn file_finished(&self, _index: usize, task: &FileTask) {
        let _ = self.tx.send(CliEvent::Finished {
            name: task.display_name().to_string(),
            outcome: task.outcome(),
        });
    }

    fn progress(&self, part: u64) {
        let _ = self.tx.send(CliEvent::Progress(part));
    }

    fn all_files_finished(&self) {
        let _ = self.tx.send(CliEvent::AllFinished);
    }
}

/// Print one line for a finished task; returns whether it counts as a
/// success for the exit code.
pub fn print_outcome(name: &str, outcome: Option<&TaskOutcome>) -> bool {
    match outcome {
        Some(TaskOutcome::Hashed { digests, verdict }) => match verdict {
            Verdict::Match(algorithm) => {
                println!("{name}: OK ({algorithm})");
                true
            }
            Verdict::Mismatch => {
                println!("{name}: FAILED (checksum mismatch)");
                false
            }
            Verdict::NoExpected => {
                for digest in digests {
                    println!("{name}: {} {}", digest.algorithm, digest.to_hex());
                }
                true
            }
        },
        Some(TaskOutcome::Cancelled) => {
            println!("{name}: cancelled");
            false
        }
        Some(TaskOutcome::Failed(err)) => {
            println!("{name}: error: {err}");
            false
        }
        None => {
            println!("{name}: not finished");
            false
        }
    }
}
