//! Evaluation orchestration.
//!
//! Coordinates loading the user's artifact, running the exercise's runner,
//! tallying results, and recording completion.

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::core::case_result::CaseResult;
use crate::core::tally::{Tally, Verdict};
use crate::error::HarnessError;
use crate::loader::Loader;
use crate::project::Project;
use crate::repository::ProjectRepository;

/// Outcome of evaluating one project.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub id: String,
    pub results: Vec<CaseResult>,
    pub tally: Tally,
    pub verdict: Verdict,
}

/// RNG for an evaluation: seeded when `seed` is set, entropy otherwise.
pub fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Load the project's artifact and run its runner, keeping the failure cause.
pub fn try_evaluate(
    project: &Project,
    loader: &Loader,
    rng: &mut StdRng,
) -> std::result::Result<Vec<CaseResult>, HarnessError> {
    let implementation = loader.load(project.artifact_path())?;
    project.runner().try_results(&implementation, rng)
}

/// Load and evaluate a project. Any failure, including a missing or malformed
/// artifact, yields an empty result sequence.
#[instrument(skip_all, fields(id = %project.id()))]
pub fn evaluate(project: &Project, loader: &Loader, rng: &mut StdRng) -> Vec<CaseResult> {
    match try_evaluate(project, loader, rng) {
        Ok(results) => results,
        Err(err) => {
            warn!(error = %err, "could not evaluate");
            Vec::new()
        }
    }
}

/// Evaluate a project by id and mark it complete in the ledger when every
/// case passes. A failing run never clears an earlier completion, and a
/// ledger write failure is logged without discarding the results.
pub fn evaluate_and_record(
    repository: &mut ProjectRepository,
    id: &str,
    loader: &Loader,
    rng: &mut StdRng,
) -> Result<Evaluation> {
    let project = repository
        .get(id)
        .with_context(|| format!("unknown exercise {id}"))?;
    let results = evaluate(project, loader, rng);
    let tally = Tally::of(&results);
    let verdict = tally.verdict();
    info!(id, passed = tally.passed, total = tally.total, ?verdict, "evaluation finished");

    if verdict == Verdict::Complete {
        if let Err(err) = repository.set_complete(id, true) {
            warn!(id, error = %format!("{err:#}"), "completion not recorded");
        }
    }

    Ok(Evaluation {
        id: id.to_string(),
        results,
        tally,
        verdict,
    })
}
