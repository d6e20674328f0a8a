//! Hash algorithm registry and streaming digest engine.
//!
//! Registration order below is a contract: the sidecar resolver tries
//! algorithms in this order and the first accepted record wins. Config can
//! only toggle the `enabled` flag, never reorder.

mod digest;

pub use digest::{digest_file, Digest, TaskError};

use crate::config::FsumConfig;

/// Digest primitive backing an algorithm descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestKind {
    Sha256,
    Sha512,
    Blake3,
}

/// One registered hash algorithm: its digest primitive plus the sidecar
/// filename extensions it is recognized under, in lookup order.
#[derive(Debug, Clone)]
pub struct HashAlgorithm {
    pub name: &'static str,
    pub kind: DigestKind,
    pub extensions: &'static [&'static str],
    pub enabled: bool,
}

const REGISTRY: &[(&str, DigestKind, &[&str])] = &[
    ("sha256", DigestKind::Sha256, &["sha256", "sha256sum"]),
    ("sha512", DigestKind::Sha512, &["sha512", "sha512sum"]),
    ("blake3", DigestKind::Blake3, &["blake3", "b3"]),
];

/// Build the algorithm registry with enabled flags applied from config.
pub fn registry(cfg: &FsumConfig) -> Vec<HashAlgorithm> {
    REGISTRY
        .iter()
        .map(|&(name, kind, extensions)| HashAlgorithm {
            name,
            kind,
            extensions,
            enabled: cfg.enabled_algorithms.iter().any(|n| n == name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_order_is_fixed() {
        let cfg = FsumConfig::default();
        let algos = registry(&cfg);
        let names: Vec<_> = algos.iter().map(|a| a.name).collect();
        assert_eq!(names, ["sha256", "sha512", "blake3"]);
        assert!(algos.iter().all(|a| a.enabled));
    }

    #[test]
    fn config_toggles_enabled_without_reordering() {
        let cfg = FsumConfig {
            enabled_algorithms: vec!["blake3".to_string(), "sha256".to_string()],
            sumfile_max_bytes: None,
        };
        let algos = registry(&cfg);
        assert_eq!(algos[0].name, "sha256");
        assert!(algos[0].enabled);
        assert_eq!(algos[1].name, "sha512");
        assert!(!algos[1].enabled);
        assert_eq!(algos[2].name, "blake3");
        assert!(algos[2].enabled);
    }

    #[test]
    fn unknown_names_enable_nothing() {
        let cfg = FsumConfig {
            enabled_algorithms: vec!["md5".to_string()],
            sumfile_max_bytes: None,
        };
        assert!(registry(&cfg).iter().all(|a| !a.enabled));
    }
}
