//! File identity: whether two handles denote the same on-disk object.
//!
//! Identity is device + inode from file metadata, never path strings or
//! content. A stale sidecar record surviving a rename must not match a
//! different file that happens to carry the old name.

use std::fs::File;
use std::io;
use std::os::unix::fs::MetadataExt;

/// Durable identity of an open file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileIdentity {
    pub dev: u64,
    pub ino: u64,
}

impl FileIdentity {
    pub fn of(file: &File) -> io::Result<Self> {
        let meta = file.metadata()?;
        Ok(Self {
            dev: meta.dev(),
            ino: meta.ino(),
        })
    }
}

/// Whether `a` and `b` denote the identical on-disk object. When identity
/// cannot be determined the answer is `false` (fail closed).
pub fn same_file(a: &File, b: &File) -> bool {
    match (FileIdentity::of(a), FileIdentity::of(b)) {
        (Ok(ia), Ok(ib)) => ia == ib,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn same_path_opened_twice_is_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f");
        fs::write(&path, b"x").unwrap();
        let a = File::open(&path).unwrap();
        let b = File::open(&path).unwrap();
        assert!(same_file(&a, &b));
    }

    #[test]
    fn hard_link_is_identical() {
        let dir = tempfile::tempdir().unwrap();
        let original = dir.path().join("f");
        let link = dir.path().join("g");
        fs::write(&original, b"x").unwrap();
        fs::hard_link(&original, &link).unwrap();
        let a = File::open(&original).unwrap();
        let b = File::open(&link).unwrap();
        assert!(same_file(&a, &b));
    }

    #[test]
    fn distinct_files_with_equal_content_differ() {
        let dir = tempfile::tempdir().unwrap();
        let p1 = dir.path().join("f");
        let p2 = dir.path().join("g");
        fs::write(&p1, b"same").unwrap();
        fs::write(&p2, b"same").unwrap();
        let a = File::open(&p1).unwrap();
        let b = File::open(&p2).unwrap();
        assert!(!same_file(&a, &b));
    }
}
