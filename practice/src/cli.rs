//! CLI command implementations.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use harness::core::tally::Verdict;
use harness::evaluate::{evaluate_and_record, rng_for};
use harness::exit_codes;
use harness::io::config::HarnessConfig;
use harness::loader::Loader;
use harness::project::Project;
use harness::repository::ProjectRepository;
use harness::runners::RunnerCatalog;
use tracing::debug;

fn open(config: HarnessConfig) -> Result<ProjectRepository> {
    ProjectRepository::discover(config, RunnerCatalog::builtin()).context("discover exercises")
}

fn find<'a>(repository: &'a ProjectRepository, id: &str) -> Result<&'a Project> {
    match repository.get(id) {
        Some(project) => Ok(project),
        None => bail!("exercise {} not found", id),
    }
}

/// List all discovered exercises.
pub fn list_exercises(config: HarnessConfig) -> Result<i32> {
    let repository = open(config)?;
    for project in repository.projects() {
        let mark = if project.is_complete() { "x" } else { " " };
        println!(
            "[{}] {:<12} {}",
            mark,
            project.properties().category,
            project.id()
        );
    }
    Ok(exit_codes::OK)
}

/// Show an exercise's metadata and prompt.
pub fn show_exercise(config: HarnessConfig, id: &str) -> Result<i32> {
    let repository = open(config)?;
    let project = find(&repository, id)?;
    let signature = project.runner().signature();
    println!("exercise: {}", project.id());
    println!("category: {}", project.properties().category);
    println!("complete: {}", project.is_complete());
    println!("operation: {}", signature.name);
    println!("source: {}", project.source_path().display());
    println!("artifact: {}", project.artifact_path().display());
    println!("ledger: {}", repository.ledger().path().display());
    println!();
    println!("{}", project.properties().prompt.trim());
    Ok(exit_codes::OK)
}

/// Print the code the user would resume from.
pub fn print_code(config: HarnessConfig, id: &str) -> Result<i32> {
    let repository = open(config)?;
    let project = find(&repository, id)?;
    print!("{}", project.current_code());
    Ok(exit_codes::OK)
}

/// Save `file` as the user source for `id`.
pub fn save_code(config: HarnessConfig, id: &str, file: &Path) -> Result<i32> {
    let repository = open(config)?;
    let project = find(&repository, id)?;
    let code = fs::read_to_string(file).with_context(|| format!("read {}", file.display()))?;
    if !project.save(&code) {
        bail!("could not save code to {}", project.source_path().display());
    }
    println!("save: exercise={} path={}", id, project.source_path().display());
    Ok(exit_codes::OK)
}

/// Evaluate an exercise and print each case.
pub fn run_exercise(config: HarnessConfig, id: &str, seed: Option<u64>, json: bool) -> Result<i32> {
    let mut repository = open(config)?;
    let seed = seed.or(repository.config().seed);
    debug!(id, ?seed, "running exercise");
    let mut rng = rng_for(seed);
    let evaluation = evaluate_and_record(&mut repository, id, &Loader::new(), &mut rng)?;

    if json {
        let payload = serde_json::to_string_pretty(&evaluation).context("serialize evaluation")?;
        println!("{payload}");
    } else {
        for (index, result) in evaluation.results.iter().enumerate() {
            println!(
                "case {:>2}: {} input={} expected={} actual={}",
                index + 1,
                if result.passed() { "pass" } else { "FAIL" },
                result.input(),
                result.expected(),
                result.actual()
            );
        }
        println!(
            "run: exercise={} passed={}/{} verdict={:?}",
            id, evaluation.tally.passed, evaluation.tally.total, evaluation.verdict
        );
    }

    Ok(match evaluation.verdict {
        Verdict::Complete => exit_codes::OK,
        Verdict::Failed => exit_codes::FAILED,
        Verdict::Unevaluated => exit_codes::UNEVALUATED,
    })
}
