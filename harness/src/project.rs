//! A discovered exercise bound to the user's code and completion state.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::warn;

use crate::io::descriptor::Descriptor;
use crate::io::source::{read_source, write_atomic};
use crate::runners::Runner;

/// Identity of a project: exercise id plus user source location.
///
/// Two projects with the same key are the same project, whatever their
/// descriptor, code, or completion state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectKey {
    pub id: String,
    pub source_path: PathBuf,
}

#[derive(Clone)]
pub struct Project {
    id: String,
    source_path: PathBuf,
    artifact_path: PathBuf,
    properties: Descriptor,
    runner: Arc<dyn Runner>,
    complete: bool,
}

impl Project {
    pub fn new(
        id: impl Into<String>,
        source_path: PathBuf,
        artifact_path: PathBuf,
        properties: Descriptor,
        runner: Arc<dyn Runner>,
        complete: bool,
    ) -> Self {
        Self {
            id: id.into(),
            source_path,
            artifact_path,
            properties,
            runner,
            complete,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Where the user's source is persisted.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Where the user's compiled implementation is expected.
    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    pub fn properties(&self) -> &Descriptor {
        &self.properties
    }

    pub fn runner(&self) -> &Arc<dyn Runner> {
        &self.runner
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub(crate) fn set_complete(&mut self, complete: bool) {
        self.complete = complete;
    }

    pub fn key(&self) -> ProjectKey {
        ProjectKey {
            id: self.id.clone(),
            source_path: self.source_path.clone(),
        }
    }

    /// Orders projects by category rank, then id.
    pub fn sort_name(&self) -> (u8, &str) {
        (self.properties.category.rank(), &self.id)
    }

    /// The user's saved code, or the skeleton if nothing was saved.
    ///
    /// Read from disk on every call so edits made since discovery are visible.
    pub fn current_code(&self) -> String {
        match read_source(&self.source_path) {
            Ok(Some(code)) => code,
            Ok(None) => self.properties.skeleton.clone(),
            Err(err) => {
                warn!(id = %self.id, error = %format!("{err:#}"), "falling back to skeleton");
                self.properties.skeleton.clone()
            }
        }
    }

    /// Persist user code. Code does not need to build to be saved.
    ///
    /// Returns `false` if the write failed.
    pub fn save(&self, code: &str) -> bool {
        match write_atomic(&self.source_path, code.as_bytes()) {
            Ok(()) => true,
            Err(err) => {
                warn!(id = %self.id, error = %format!("{err:#}"), "saving code failed");
                false
            }
        }
    }
}

impl PartialEq for Project {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.source_path == other.source_path
    }
}

impl Eq for Project {}

impl Hash for Project {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.source_path.hash(state);
    }
}

impl fmt::Debug for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("id", &self.id)
            .field("source_path", &self.source_path)
            .field("artifact_path", &self.artifact_path)
            .field("category", &self.properties.category)
            .field("complete", &self.complete)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
