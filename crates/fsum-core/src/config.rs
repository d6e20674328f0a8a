use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/fsum/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FsumConfig {
    /// Hash algorithms enabled for digesting and sidecar discovery. Names
    /// must match the registry ("sha256", "sha512", "blake3"). Priority
    /// between enabled algorithms is fixed by the registry order, not by
    /// the order of this list.
    pub enabled_algorithms: Vec<String>,
    /// Upper bound in bytes for a file to be considered as a checksum list
    /// (None = built-in default). Larger inputs are treated as ordinary files.
    #[serde(default)]
    pub sumfile_max_bytes: Option<u64>,
}

impl Default for FsumConfig {
    fn default() -> Self {
        Self {
            enabled_algorithms: vec![
                "sha256".to_string(),
                "sha512".to_string(),
                "blake3".to_string(),
            ],
            sumfile_max_bytes: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fsum")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FsumConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FsumConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FsumConfig = toml::from_str(&data)?;
    Ok(cfg)
}
