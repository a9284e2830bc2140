//! End-to-end scenarios over a temporary exercise layout.
//!
//! These tests drive discovery, evaluation, ledger updates, and rescans the
//! way the CLI does, using text-format modules as compiled artifacts.

use std::sync::Arc;

use harness::core::tally::Verdict;
use harness::evaluate::{evaluate, evaluate_and_record, rng_for};
use harness::io::descriptor::Category;
use harness::loader::Loader;
use harness::repository::ProjectRepository;
use harness::runners::RunnerCatalog;
use harness::runners::has_triple::{CASES, LENGTH, VALUE_BOUND};
use harness::test_support::{
    Fixture, HAS_TRIPLE_WAT, NamedRunner, TRAPPING_WAT, WRONG_SIGNATURE_WAT,
};

/// Lifecycle: broken artifact → no results → fixed artifact → full pass →
/// ledger updated → rescan keeps completion.
#[test]
fn fixing_the_artifact_completes_the_exercise() {
    let fixture = Fixture::new().expect("fixture");
    fixture
        .add_exercise("HasTriple", Category::Beginner, "fn has_triple() {}")
        .expect("exercise");
    fixture
        .write_artifact("HasTriple", WRONG_SIGNATURE_WAT)
        .expect("artifact");
    let loader = Loader::new();
    let mut repository = fixture.repository().expect("discover");

    let first = evaluate_and_record(&mut repository, "HasTriple", &loader, &mut rng_for(None))
        .expect("first run");
    assert!(first.results.is_empty());
    assert_eq!(first.verdict, Verdict::Unevaluated);
    assert!(!repository.get("HasTriple").expect("project").is_complete());

    // Same loader, same path: the rebuilt artifact must be picked up.
    fixture
        .write_artifact("HasTriple", HAS_TRIPLE_WAT)
        .expect("rebuild");
    let second = evaluate_and_record(&mut repository, "HasTriple", &loader, &mut rng_for(None))
        .expect("second run");
    assert_eq!(second.results.len(), CASES);
    assert!(second.results.iter().all(|result| result.passed()));
    assert_eq!(second.verdict, Verdict::Complete);

    repository.rescan().expect("rescan");
    assert!(repository.get("HasTriple").expect("project").is_complete());
}

#[test]
fn every_rendered_input_is_in_domain() {
    let fixture = Fixture::new().expect("fixture");
    fixture
        .add_exercise("HasTriple", Category::Beginner, "")
        .expect("exercise");
    fixture
        .write_artifact("HasTriple", HAS_TRIPLE_WAT)
        .expect("artifact");
    let repository = fixture.repository().expect("discover");
    let project = repository.get("HasTriple").expect("project");
    let loader = Loader::new();

    for _ in 0..5 {
        let results = evaluate(project, &loader, &mut rng_for(None));
        assert_eq!(results.len(), CASES);
        for result in &results {
            let input = result
                .input()
                .trim_start_matches('[')
                .trim_end_matches(']');
            let values: Vec<i32> = input
                .split(", ")
                .map(|item| item.parse().expect("int"))
                .collect();
            assert_eq!(values.len(), LENGTH);
            assert!(values.iter().all(|value| (0..VALUE_BOUND).contains(value)));
        }
    }
}

#[test]
fn trapping_implementation_yields_no_partial_results() {
    let fixture = Fixture::new().expect("fixture");
    fixture
        .add_exercise("HasTriple", Category::Beginner, "")
        .expect("exercise");
    fixture
        .write_artifact("HasTriple", TRAPPING_WAT)
        .expect("artifact");
    let repository = fixture.repository().expect("discover");
    let project = repository.get("HasTriple").expect("project");

    let results = evaluate(project, &Loader::new(), &mut rng_for(Some(11)));
    assert!(results.is_empty());
}

/// Editing the user's source and rescanning changes `current_code` and leaves
/// other exercises' completion flags alone.
#[test]
fn rescan_sees_edits_and_keeps_other_completion() {
    let fixture = Fixture::new().expect("fixture");
    fixture
        .add_exercise("HasTriple", Category::Beginner, "skeleton")
        .expect("exercise");
    fixture
        .add_exercise("Other", Category::Intermediate, "")
        .expect("exercise");
    let mut catalog = RunnerCatalog::builtin();
    catalog.register(Arc::new(NamedRunner("Other")));
    let mut repository =
        ProjectRepository::discover(fixture.config.clone(), catalog).expect("discover");
    assert_eq!(repository.len(), 2);
    assert_eq!(
        repository.get("HasTriple").expect("project").current_code(),
        "skeleton"
    );

    fixture
        .write_source("HasTriple", "first edit")
        .expect("source");
    // Lazy read: visible even before a rescan.
    assert_eq!(
        repository.get("HasTriple").expect("project").current_code(),
        "first edit"
    );

    assert!(repository.set_complete("Other", true).expect("complete"));
    fixture
        .write_source("HasTriple", "second edit")
        .expect("source");
    assert_eq!(repository.rescan().expect("rescan"), 2);

    let other = repository.get("Other").expect("other");
    assert!(other.is_complete());
    let project = repository.get("HasTriple").expect("project");
    assert_eq!(project.current_code(), "second edit");
    assert!(!project.is_complete());
}

/// Identity is `(id, source_path)`: a reload with a different descriptor is
/// still the same project. This weak equality is intentional.
#[test]
fn reloaded_project_keeps_identity() {
    let fixture = Fixture::new().expect("fixture");
    fixture
        .add_exercise("HasTriple", Category::Beginner, "old")
        .expect("exercise");
    let mut repository = fixture.repository().expect("discover");
    let before = repository.get("HasTriple").expect("project").clone();

    fixture
        .add_exercise("HasTriple", Category::Challenging, "new")
        .expect("rewrite");
    let after = repository.reload("HasTriple").expect("reload");

    assert_ne!(before.properties(), after.properties());
    assert_eq!(&before, after);
}
