//! Input expansion: directories become their transitive regular files.

use std::fs;
use std::path::PathBuf;

/// Expand every directory in `paths` into its children, in place.
///
/// Children are appended to the end of the list and scanned in the same
/// pass, so nesting of any depth is flattened. A directory whose contents
/// cannot be enumerated is LEFT IN THE LIST on purpose: it later fails to
/// open as a file and surfaces a per-task error, instead of aborting the
/// whole batch. Downstream sees a misleading "cannot open" for it; that
/// quirk is part of the contract (see the expansion tests).
pub fn expand_paths(paths: &mut Vec<PathBuf>) {
    let mut i = 0;
    while i < paths.len() {
        if !paths[i].is_dir() {
            i += 1;
            continue;
        }
        match fs::read_dir(&paths[i]) {
            Ok(iter) => {
                let mut failed = false;
                for entry in iter {
                    match entry {
                        Ok(e) => paths.push(e.path()),
                        Err(err) => {
                            tracing::debug!(
                                dir = %paths[i].display(),
                                error = %err,
                                "enumeration failed mid-stream, keeping directory entry"
                            );
                            failed = true;
                            break;
                        }
                    }
                }
                if failed {
                    i += 1;
                } else {
                    paths.remove(i);
                }
            }
            Err(err) => {
                tracing::debug!(
                    dir = %paths[i].display(),
                    error = %err,
                    "cannot enumerate directory, keeping it as a file entry"
                );
                i += 1;
            }
        }
    }
}
