//! Harness configuration stored in `harness.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::io::source::write_atomic;

/// Default location of the configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "harness.toml";

/// Harness configuration (TOML).
///
/// Missing fields default to a layout rooted at `exercises/`. Relative paths
/// are resolved against the directory containing the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HarnessConfig {
    /// Directory scanned for `<id>Runner.toml` descriptors.
    pub descriptor_dir: PathBuf,

    /// Directory holding compiled user implementations (`<id>.wasm`).
    pub artifact_dir: PathBuf,

    /// Directory holding user source files (`<id>.<source_extension>`).
    pub code_dir: PathBuf,

    /// Extension of user source files, without the dot.
    pub source_extension: String,

    /// Completion ledger file.
    pub ledger_path: PathBuf,

    /// Fixed RNG seed for reproducible evaluations. Unset means entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            descriptor_dir: PathBuf::from("exercises/descriptors"),
            artifact_dir: PathBuf::from("exercises/build"),
            code_dir: PathBuf::from("exercises/code"),
            source_extension: "rs".to_string(),
            ledger_path: PathBuf::from("exercises/settings/data.dat"),
            seed: None,
        }
    }
}

impl HarnessConfig {
    /// Config with every directory placed under `root`.
    pub fn rooted_at(root: &Path) -> Self {
        Self::default().resolve(root)
    }

    pub fn validate(&self) -> Result<()> {
        for (label, path) in [
            ("descriptor_dir", &self.descriptor_dir),
            ("artifact_dir", &self.artifact_dir),
            ("code_dir", &self.code_dir),
            ("ledger_path", &self.ledger_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(anyhow!("{label} must be non-empty"));
            }
        }
        let extension = self.source_extension.trim();
        if extension.is_empty() || extension.starts_with('.') {
            return Err(anyhow!("source_extension must be non-empty and have no leading dot"));
        }
        Ok(())
    }

    /// Make relative paths absolute against `base`.
    fn resolve(mut self, base: &Path) -> Self {
        for path in [
            &mut self.descriptor_dir,
            &mut self.artifact_dir,
            &mut self.code_dir,
            &mut self.ledger_path,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns defaults resolved against the file's directory.
pub fn load_config(path: &Path) -> Result<HarnessConfig> {
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    if !path.exists() {
        let cfg = HarnessConfig::default().resolve(base);
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: HarnessConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg.resolve(base))
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &HarnessConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, buf.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_defaults_under_config_dir() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, HarnessConfig::rooted_at(temp.path()));
        assert!(cfg.descriptor_dir.starts_with(temp.path()));
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("harness.toml");
        let cfg = HarnessConfig::rooted_at(temp.path());
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("harness.toml");
        std::fs::write(&path, "seed = 42\nsource_extension = \"wat\"\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.source_extension, "wat");
        assert_eq!(cfg.code_dir, temp.path().join("exercises/code"));
    }

    #[test]
    fn rejects_dotted_extension() {
        let cfg = HarnessConfig {
            source_extension: ".rs".to_string(),
            ..HarnessConfig::default()
        };
        let err = cfg.validate().expect_err("invalid");
        assert!(err.to_string().contains("source_extension"));
    }
}
