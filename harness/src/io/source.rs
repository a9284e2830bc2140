//! Reading and writing user source files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Read a user source file. Returns `None` when the file does not exist.
pub fn read_source(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    Ok(Some(String::from_utf8_lossy(&contents).into_owned()))
}

/// Write `contents` to `path` via a sibling temp file and rename.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let mut tmp_name = path
        .file_name()
        .with_context(|| format!("path missing file name {}", path.display()))?
        .to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = parent.join(tmp_name);
    fs::write(&tmp_path, contents).with_context(|| format!("write temp {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_is_none() {
        let temp = tempfile::tempdir().expect("tempdir");
        let read = read_source(&temp.path().join("HasTriple.rs")).expect("read");
        assert_eq!(read, None);
    }

    #[test]
    fn write_atomic_creates_parents_and_replaces() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("code").join("HasTriple.rs");
        write_atomic(&path, b"first").expect("write");
        write_atomic(&path, b"second").expect("rewrite");
        assert_eq!(read_source(&path).expect("read").as_deref(), Some("second"));
        assert!(!temp.path().join("code").join("HasTriple.rs.tmp").exists());
    }
}
