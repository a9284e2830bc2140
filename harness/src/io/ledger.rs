//! Completion ledger: a pipe-delimited file of hashed exercise ids.
//!
//! Ids are stored as SHA-256 hex digests, e.g. `|3f2a…|9c01…|`.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::io::source::write_atomic;

/// Deterministic ledger key for an exercise id.
pub fn ledger_key(id: &str) -> String {
    hex::encode(Sha256::digest(id.as_bytes()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    path: PathBuf,
    keys: BTreeSet<String>,
}

impl Ledger {
    /// Load the ledger at `path`. A missing file is an empty ledger.
    pub fn load(path: &Path) -> Result<Self> {
        let keys = if path.exists() {
            let contents =
                fs::read_to_string(path).with_context(|| format!("read ledger {}", path.display()))?;
            contents
                .split('|')
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_string)
                .collect()
        } else {
            BTreeSet::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            keys,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, id: &str) -> bool {
        self.keys.contains(&ledger_key(id))
    }

    /// Mark `id` complete or incomplete. Returns true if the ledger changed.
    pub fn record(&mut self, id: &str, complete: bool) -> bool {
        let key = ledger_key(id);
        if complete {
            self.keys.insert(key)
        } else {
            self.keys.remove(&key)
        }
    }

    /// Rewrite the ledger file.
    pub fn save(&self) -> Result<()> {
        let mut buf = String::from("|");
        for key in &self.keys {
            buf.push_str(key);
            buf.push('|');
        }
        buf.push('\n');
        write_atomic(&self.path, buf.as_bytes())?;
        debug!(path = %self.path.display(), entries = self.keys.len(), "ledger saved");
        Ok(())
    }
}
