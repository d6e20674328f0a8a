//! Streaming digest of one file across several algorithms in a single pass.
//!
//! Reads in chunks to keep memory use bounded; every chunk updates all
//! requested algorithms, reports its size through the progress callback,
//! and rechecks the cancellation flag.

use sha2::{Digest as _, Sha256, Sha512};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

use super::{DigestKind, HashAlgorithm};

const BUF_SIZE: usize = 64 * 1024;

/// Error local to one task's digest run. Never crosses task boundaries.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("open: {0}")]
    Open(#[source] std::io::Error),
    #[error("read: {0}")]
    Read(#[source] std::io::Error),
    #[error("cancelled")]
    Cancelled,
}

/// One finalized digest, tagged with the algorithm that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub algorithm: &'static str,
    pub bytes: Vec<u8>,
}

impl Digest {
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

enum DigestState {
    Sha256(Sha256),
    Sha512(Sha512),
    Blake3(blake3::Hasher),
}

impl DigestState {
    fn new(kind: DigestKind) -> Self {
        match kind {
            DigestKind::Sha256 => DigestState::Sha256(Sha256::new()),
            DigestKind::Sha512 => DigestState::Sha512(Sha512::new()),
            DigestKind::Blake3 => DigestState::Blake3(blake3::Hasher::new()),
        }
    }

    fn update(&mut self, buf: &[u8]) {
        match self {
            DigestState::Sha256(h) => h.update(buf),
            DigestState::Sha512(h) => h.update(buf),
            DigestState::Blake3(h) => {
                h.update(buf);
            }
        }
    }

    fn finalize(self) -> Vec<u8> {
        match self {
            DigestState::Sha256(h) => h.finalize().to_vec(),
            DigestState::Sha512(h) => h.finalize().to_vec(),
            DigestState::Blake3(h) => h.finalize().as_bytes().to_vec(),
        }
    }
}

/// Digest `path` with every algorithm in `algorithms`, reading the file once.
///
/// `on_chunk` receives the byte count of each chunk read; `cancel` is polled
/// between chunks, so stopping is prompt but not instantaneous.
pub fn digest_file<F: FnMut(u64)>(
    path: &Path,
    algorithms: &[HashAlgorithm],
    cancel: &AtomicBool,
    mut on_chunk: F,
) -> Result<Vec<Digest>, TaskError> {
    let mut file = File::open(path).map_err(TaskError::Open)?;
    let mut states: Vec<(&'static str, DigestState)> = algorithms
        .iter()
        .map(|a| (a.name, DigestState::new(a.kind)))
        .collect();

    let mut buf = [0u8; BUF_SIZE];
    loop {
        if cancel.load(Ordering::Relaxed) {
            return Err(TaskError::Cancelled);
        }
        let n = file.read(&mut buf).map_err(TaskError::Read)?;
        if n == 0 {
            break;
        }
        for (_, state) in &mut states {
            state.update(&buf[..n]);
        }
        on_chunk(n as u64);
    }

    Ok(states
        .into_iter()
        .map(|(algorithm, state)| Digest {
            algorithm,
            bytes: state.finalize(),
        })
        .collect())
}
