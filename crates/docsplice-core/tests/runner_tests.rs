//! Tests for running the pipeline over a tree

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use docsplice_core::{Error, FileStatus, Operation, Runner, Settings};
use docsplice_test_utils::{StubGenerator, TestProject, sources};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn project() -> TestProject {
    let project = TestProject::new();
    project.write("pkg/a.py", sources::DOCUMENTED);
    project.write("pkg/b.py", sources::DOCUMENTED);
    project.write("pkg/broken.py", sources::SYNTAX_ERROR);
    project.write("pkg/__pycache__/cached.py", sources::DOCUMENTED);
    project.write("README.txt", "not python\n");
    project
}

#[rstest]
#[case(1)]
#[case(4)]
fn test_strip_tree_continues_past_failures(#[case] workers: usize) {
    let project = project();

    let report = Runner::new(Settings::default(), Operation::Strip)
        .with_workers(workers)
        .run(project.root())
        .unwrap();

    assert_eq!(report.files.len(), 3);
    assert_eq!(report.modified(), 2);
    assert_eq!(report.failed(), 1);
    assert!(report.has_failures());
    assert!(!report.cancelled);

    project.assert_file_eq("pkg/a.py", sources::UNDOCUMENTED);
    project.assert_file_eq("pkg/b.py", sources::UNDOCUMENTED);
    project.assert_file_eq("pkg/__pycache__/cached.py", sources::DOCUMENTED);
    project.assert_file_eq("pkg/broken.py", sources::SYNTAX_ERROR);
}

#[test]
fn test_embed_tree_with_stub_generator() {
    let project = TestProject::new();
    project.write("greetings.py", sources::UNDOCUMENTED);
    project.write("more/greetings.py", sources::UNDOCUMENTED);
    let generator = Arc::new(StubGenerator::new());

    let report = Runner::new(Settings::default(), Operation::Embed { replace: false })
        .with_generator(generator.clone())
        .run(project.root())
        .unwrap();

    assert_eq!(report.modified(), 2);
    assert_eq!(report.inserted_lines(), 2 * 15);
    assert_eq!(generator.requests().len(), 10);
    project.assert_file_eq("greetings.py", sources::EMBEDDED);
    project.assert_file_eq("more/greetings.py", sources::EMBEDDED);
}

#[test]
fn test_embed_requires_a_generator() {
    let project = project();
    let result = Runner::new(Settings::default(), Operation::Embed { replace: true })
        .run(project.root());
    assert!(matches!(result, Err(Error::MissingGenerator)));
}

#[test]
fn test_single_file_target() {
    let project = project();

    let report = Runner::new(Settings::default(), Operation::Strip)
        .dry_run(true)
        .run(&project.path("pkg/a.py"))
        .unwrap();

    assert_eq!(report.files.len(), 1);
    assert_eq!(report.files[0].status, FileStatus::WouldModify);
    project.assert_file_eq("pkg/a.py", sources::DOCUMENTED);
}

#[test]
fn test_cancelled_before_start_touches_nothing() {
    let project = project();
    let cancel = Arc::new(AtomicBool::new(true));

    let report = Runner::new(Settings::default(), Operation::Strip)
        .with_cancel(cancel)
        .run(project.root())
        .unwrap();

    assert!(report.cancelled);
    assert!(report.files.iter().all(|f| f.status == FileStatus::Cancelled));
    project.assert_file_eq("pkg/a.py", sources::DOCUMENTED);
}

#[test]
fn test_missing_target_is_an_error() {
    let project = TestProject::new();
    let result =
        Runner::new(Settings::default(), Operation::Strip).run(&project.path("does-not-exist"));
    assert!(matches!(result, Err(Error::Fs(_))));
}
