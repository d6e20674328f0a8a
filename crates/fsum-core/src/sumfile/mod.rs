//! Checksum-list ("sum file") reading.
//!
//! A sum file maps relative filenames to expected hashes, one record per
//! line. An empty filename is a sentinel: the record names no specific file
//! and applies to the sum file's own subject. Any read or parse failure
//! yields no entries; it is never surfaced as an error.

mod parse;

pub use parse::parse_sum_text;

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Built-in cap for sum-file candidates. Anything larger is never a
/// checksum list; without the cap, single-input self-detection would slurp
/// arbitrarily large binaries.
pub const SUMFILE_MAX_BYTES: u64 = 4 * 1024 * 1024;

/// One record from a checksum list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SumFileEntry {
    /// Relative filename from the record; empty means the record names no
    /// specific file.
    pub filename: String,
    /// Expected hash bytes, algorithm unknown at this point.
    pub hash: Vec<u8>,
}

/// Parse `path` as a checksum list, returning no entries on any failure:
/// unreadable, not a regular file, larger than `max_bytes`, not UTF-8, or
/// malformed.
pub fn parse_sum_file(path: &Path, max_bytes: u64) -> Vec<SumFileEntry> {
    match File::open(path) {
        Ok(file) => parse_open_sum_file(&file, max_bytes),
        Err(_) => Vec::new(),
    }
}

/// Parse an already-opened checksum list, same failure policy as
/// [`parse_sum_file`]. Callers that probe for a sidecar with `File::open`
/// reuse the handle here instead of reopening by path.
pub fn parse_open_sum_file(file: &File, max_bytes: u64) -> Vec<SumFileEntry> {
    let Ok(meta) = file.metadata() else {
        return Vec::new();
    };
    if !meta.is_file() || meta.len() > max_bytes {
        return Vec::new();
    }
    let mut text = String::new();
    if (&mut &*file).read_to_string(&mut text).is_err() {
        return Vec::new();
    }
    parse_sum_text(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_records_from_disk() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "d2d2d2d2d2d2d2d2  a.txt").unwrap();
        writeln!(f, "e3e3e3e3e3e3e3e3 *b.bin").unwrap();
        f.flush().unwrap();
        let entries = parse_sum_file(f.path(), SUMFILE_MAX_BYTES);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].filename, "a.txt");
        assert_eq!(entries[1].filename, "b.bin");
    }

    #[test]
    fn open_handle_reads_records() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "d2d2d2d2d2d2d2d2  a.txt").unwrap();
        f.flush().unwrap();
        let opened = File::open(f.path()).unwrap();
        let entries = parse_open_sum_file(&opened, SUMFILE_MAX_BYTES);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].filename, "a.txt");
    }

    #[test]
    fn oversized_candidate_is_rejected() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "d2d2d2d2d2d2d2d2  a.txt").unwrap();
        f.flush().unwrap();
        assert!(parse_sum_file(f.path(), 4).is_empty());
    }

    #[test]
    fn non_utf8_content_is_rejected() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&[0xff, 0xfe, 0x00, 0x01, 0x80]).unwrap();
        f.flush().unwrap();
        assert!(parse_sum_file(f.path(), SUMFILE_MAX_BYTES).is_empty());
    }

    #[test]
    fn missing_file_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(parse_sum_file(&dir.path().join("absent"), SUMFILE_MAX_BYTES).is_empty());
    }
}
