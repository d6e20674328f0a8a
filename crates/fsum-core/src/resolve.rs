//! Expected-hash discovery from sidecar checksum files.
//!
//! For a file `F`, a sidecar is `F.<ext>` for one of an algorithm's
//! recognized extensions. Algorithms are tried in registration order and
//! the first accepted record wins. A sidecar is only honored when it holds
//! exactly one record; everything that cannot be verified is silently "no
//! expected hash".

use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::hasher::HashAlgorithm;
use crate::identity;
use crate::sumfile::{self, SUMFILE_MAX_BYTES};

fn sidecar_candidate(path: &Path, ext: &str) -> PathBuf {
    let mut os = OsString::from(path.as_os_str());
    os.push(".");
    os.push(ext);
    PathBuf::from(os)
}

/// Search sidecar checksum files for `path` and return the expected hash of
/// the first record that legitimately applies to it.
///
/// A record with an empty filename is accepted unconditionally (single
/// anonymous-subject convention). A record naming a file is accepted only
/// when that name, resolved against the ORIGINAL file's directory, opens a
/// file identity-equal to `path`. Name or content equality never
/// substitutes for identity.
pub fn expected_hash_for(path: &Path, algorithms: &[HashAlgorithm]) -> Option<Vec<u8>> {
    let file = File::open(path).ok()?;
    let dir = path.parent().unwrap_or_else(|| Path::new(""));

    for algo in algorithms.iter().filter(|a| a.enabled) {
        // Probe by opening, not by existence: an extension that exists but
        // cannot be opened must not mask a later readable one. The handle
        // is reused for the parse.
        let Some((sidecar, handle)) = algo
            .extensions
            .iter()
            .map(|ext| sidecar_candidate(path, ext))
            .find_map(|candidate| {
                File::open(&candidate).ok().map(|f| (candidate, f))
            })
        else {
            continue;
        };

        let mut entries = sumfile::parse_open_sum_file(&handle, SUMFILE_MAX_BYTES);
        if entries.len() != 1 {
            continue;
        }
        let entry = entries.remove(0);

        if entry.filename.is_empty() {
            return Some(entry.hash);
        }

        let named = dir.join(&entry.filename);
        let Ok(named_file) = File::open(&named) else {
            continue;
        };
        if identity::same_file(&named_file, &file) {
            return Some(entry.hash);
        }
        tracing::debug!(
            sidecar = %sidecar.display(),
            named = %named.display(),
            "sidecar record names a different file, ignoring"
        );
    }
    None
}
