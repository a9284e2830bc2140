//! Per-exercise runners and the catalog that resolves them by id.
//!
//! A [`Runner`] generates inputs, invokes the user implementation, computes a
//! trusted reference answer for each input, and returns one [`CaseResult`]
//! per case. Runners hold no state between calls.

pub mod has_triple;

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::rngs::StdRng;
use tracing::warn;

use crate::core::case_result::CaseResult;
use crate::error::Result;
use crate::loader::{Implementation, Signature};

pub use has_triple::HasTriple;

/// Generator and verifier for one exercise.
pub trait Runner: Send + Sync {
    /// Exercise id this runner evaluates (e.g. `HasTriple`).
    fn id(&self) -> &'static str;

    /// Operation the user implementation must export.
    fn signature(&self) -> Signature;

    /// Run every case, stopping at the first failure.
    fn try_results(
        &self,
        implementation: &dyn Implementation,
        rng: &mut StdRng,
    ) -> Result<Vec<CaseResult>>;

    /// Run every case. Any failure yields an empty sequence, which callers
    /// read as "could not evaluate". Partial results are never returned.
    fn results(&self, implementation: &dyn Implementation, rng: &mut StdRng) -> Vec<CaseResult> {
        match self.try_results(implementation, rng) {
            Ok(results) => results,
            Err(err) => {
                warn!(runner = self.id(), error = %err, "evaluation aborted");
                Vec::new()
            }
        }
    }
}

/// Runners keyed by exercise id.
#[derive(Clone, Default)]
pub struct RunnerCatalog {
    runners: BTreeMap<&'static str, Arc<dyn Runner>>,
}

impl RunnerCatalog {
    /// Catalog with every runner shipped in this crate.
    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        catalog.register(Arc::new(HasTriple));
        catalog
    }

    /// Insert a runner, replacing any previous runner with the same id.
    pub fn register(&mut self, runner: Arc<dyn Runner>) -> Option<Arc<dyn Runner>> {
        self.runners.insert(runner.id(), runner)
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn Runner>> {
        self.runners.get(id).cloned()
    }
}
