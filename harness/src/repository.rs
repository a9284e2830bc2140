//! Discovery and ownership of the exercise collection.
//!
//! The repository is an owned value. `rescan`, `reload`, and `set_complete`
//! take `&mut self`, so an evaluation holding a `&Project` cannot overlap a
//! rescan of the same repository.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, info, instrument, warn};

use crate::io::config::HarnessConfig;
use crate::io::descriptor::{DESCRIPTOR_SUFFIX, Descriptor, exercise_id};
use crate::io::ledger::Ledger;
use crate::project::{Project, ProjectKey};
use crate::runners::RunnerCatalog;

pub struct ProjectRepository {
    config: HarnessConfig,
    catalog: RunnerCatalog,
    ledger: Ledger,
    projects: BTreeMap<String, Project>,
}

impl ProjectRepository {
    /// Scan the descriptor directory and build the collection.
    pub fn discover(config: HarnessConfig, catalog: RunnerCatalog) -> Result<Self> {
        config.validate()?;
        let ledger = Ledger::load(&config.ledger_path)?;
        let mut repository = Self {
            config,
            catalog,
            ledger,
            projects: BTreeMap::new(),
        };
        repository.projects = repository.scan()?;
        Ok(repository)
    }

    /// Drop every project and rebuild from disk, re-reading the ledger.
    ///
    /// Returns the number of projects found.
    pub fn rescan(&mut self) -> Result<usize> {
        self.ledger = Ledger::load(&self.config.ledger_path)?;
        self.projects = self.scan()?;
        Ok(self.projects.len())
    }

    /// Rebuild a single project from its descriptor and replace the entry.
    pub fn reload(&mut self, id: &str) -> Result<&Project> {
        let descriptor_path = self
            .config
            .descriptor_dir
            .join(format!("{id}{DESCRIPTOR_SUFFIX}"));
        let project = self.build(id, &descriptor_path)?;
        debug!(id, "project reloaded");
        self.projects.insert(id.to_string(), project);
        self.projects
            .get(id)
            .ok_or_else(|| anyhow!("project {id} missing after reload"))
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.get(id)
    }

    pub fn contains(&self, key: &ProjectKey) -> bool {
        self.projects
            .get(&key.id)
            .is_some_and(|project| project.source_path() == key.source_path)
    }

    /// Projects ordered by category, then id.
    pub fn projects(&self) -> Vec<&Project> {
        let mut projects: Vec<&Project> = self.projects.values().collect();
        projects.sort_by(|left, right| left.sort_name().cmp(&right.sort_name()));
        projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Update a project's completion flag and persist it to the ledger.
    ///
    /// Returns true if the ledger changed. Nothing changes in memory unless
    /// the ledger file was written.
    pub fn set_complete(&mut self, id: &str, complete: bool) -> Result<bool> {
        if !self.projects.contains_key(id) {
            bail!("unknown project {id}");
        }
        let mut ledger = self.ledger.clone();
        let changed = ledger.record(id, complete);
        if changed {
            ledger.save().context("save ledger")?;
            self.ledger = ledger;
            info!(id, complete, "completion recorded");
        }
        if let Some(project) = self.projects.get_mut(id) {
            project.set_complete(complete);
        }
        Ok(changed)
    }

    #[instrument(skip_all, fields(dir = %self.config.descriptor_dir.display()))]
    fn scan(&self) -> Result<BTreeMap<String, Project>> {
        let dir = &self.config.descriptor_dir;
        let mut projects = BTreeMap::new();
        if !dir.exists() {
            warn!("descriptor directory missing");
            return Ok(projects);
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))? {
            let entry = entry.context("read descriptor entry")?;
            paths.push(entry.path());
        }
        paths.sort();

        for path in paths {
            let Some(id) = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(exercise_id)
            else {
                continue;
            };
            match self.build(id, &path) {
                Ok(project) => {
                    projects.insert(id.to_string(), project);
                }
                Err(err) => warn!(id, error = %format!("{err:#}"), "skipping exercise"),
            }
        }

        info!(count = projects.len(), "exercises discovered");
        Ok(projects)
    }

    fn build(&self, id: &str, descriptor_path: &Path) -> Result<Project> {
        let properties = Descriptor::load(descriptor_path)?;
        let runner = self
            .catalog
            .get(id)
            .ok_or_else(|| anyhow!("no runner registered for {id}"))?;
        let source_path = self
            .config
            .code_dir
            .join(format!("{id}.{}", self.config.source_extension));
        let artifact_path = self.config.artifact_dir.join(format!("{id}.wasm"));
        let complete = self.ledger.contains(id);
        Ok(Project::new(
            id,
            source_path,
            artifact_path,
            properties,
            runner,
            complete,
        ))
    }
}
