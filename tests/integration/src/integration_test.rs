//! Cross-crate tests: real parsing, real files, the worker pool, and the
//! external generator program.

use std::sync::Arc;

use docsplice_blocks::{BlockKind, Dialect, DocumentationSplicer, SourceUnit};
use docsplice_core::{FileStatus, Operation, Runner, Settings};
use docsplice_test_utils::{StubGenerator, TestProject, sources};
use pretty_assertions::assert_eq;

/// A package big enough that several workers are busy at once.
fn package(project: &TestProject, files: usize) {
    for i in 0..files {
        project.write(&format!("pkg/mod_{i:02}.py"), sources::DOCUMENTED);
    }
    project.write("pkg/node_modules/vendored.py", sources::DOCUMENTED);
    project.write("pkg/build/generated.py", sources::DOCUMENTED);
}

/// Every block of `spliced` sits where a fresh parse of its text puts it.
fn assert_positions_match_fresh_parse(spliced: &SourceUnit) {
    let fresh =
        docsplice_python::extract(&spliced.to_text(), spliced.name(), &Dialect::python()).unwrap();
    assert_eq!(spliced.blocks().len(), fresh.unit.blocks().len());
    for (block, parsed) in spliced.blocks().iter().zip(fresh.unit.blocks()) {
        assert_eq!(block.name(), parsed.name());
        assert_eq!(block.declaration_start(), parsed.declaration_start(), "{}", block.name());
        assert_eq!(block.position(), parsed.position(), "{}", block.name());
        assert_eq!(
            block.documentation().map(|d| d.position()),
            parsed.documentation().map(|d| d.position()),
            "{}",
            block.name()
        );
    }
}

#[test]
fn test_strip_then_embed_round_trip_over_tree() {
    let project = TestProject::new();
    package(&project, 12);

    let stripped = Runner::new(Settings::default(), Operation::Strip)
        .with_workers(3)
        .run(project.root())
        .unwrap();
    assert_eq!(stripped.files.len(), 12);
    assert_eq!(stripped.removed_lines(), 12 * 7);

    let generator = Arc::new(StubGenerator::new());
    let embedded = Runner::new(Settings::default(), Operation::Embed { replace: false })
        .with_workers(3)
        .with_generator(generator.clone())
        .run(project.root())
        .unwrap();
    assert_eq!(embedded.modified(), 12);
    assert_eq!(generator.requests().len(), 12 * 5);

    for i in 0..12 {
        let text = project.read(&format!("pkg/mod_{i:02}.py"));
        let expected = sources::EMBEDDED.replace("greetings.py", &format!("mod_{i:02}.py"));
        assert_eq!(text, expected);
    }
    project.assert_file_eq("pkg/node_modules/vendored.py", sources::DOCUMENTED);
    project.assert_file_eq("pkg/build/generated.py", sources::DOCUMENTED);
}

#[test]
fn test_embed_is_idempotent() {
    let project = TestProject::new();
    project.write("greetings.py", sources::UNDOCUMENTED);
    let runner = Runner::new(Settings::default(), Operation::Embed { replace: false })
        .with_generator(Arc::new(StubGenerator::new()));

    runner.run(project.root()).unwrap();
    let second = runner.run(project.root()).unwrap();

    assert_eq!(second.files[0].status, FileStatus::Unchanged);
    project.assert_file_eq("greetings.py", sources::EMBEDDED);
}

#[test]
fn test_spliced_positions_match_a_fresh_extraction() {
    let splicer = DocumentationSplicer::new(Dialect::python());
    let mut extraction =
        docsplice_python::extract(sources::DOCUMENTED, "m.py", &Dialect::python()).unwrap();

    splicer.remove_documentation(&mut extraction.unit);
    assert_positions_match_fresh_parse(&extraction.unit);

    splicer.embed_documentation(&mut extraction.unit, &StubGenerator::new());
    assert_positions_match_fresh_parse(&extraction.unit);
}

#[test]
fn test_code_lines_survive_strip() {
    let mut extraction =
        docsplice_python::extract(sources::DOCUMENTED, "m.py", &Dialect::python()).unwrap();
    DocumentationSplicer::default().remove_documentation(&mut extraction.unit);

    assert_eq!(extraction.unit.to_text(), sources::UNDOCUMENTED);
    let kinds: Vec<BlockKind> = extraction.unit.blocks().iter().map(|b| b.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            BlockKind::Module,
            BlockKind::Function,
            BlockKind::Class,
            BlockKind::Function,
            BlockKind::Function
        ]
    );
}

#[test]
fn test_config_file_drives_the_walk() {
    let project = TestProject::new();
    project.write("keep/a.py", sources::DOCUMENTED);
    project.write("skip/b.py", sources::DOCUMENTED);
    project.write_config("workers = 2\nignored_dirs = [\"skip\"]\n");

    let settings = Settings::load(project.root(), None).unwrap();
    let report = Runner::new(settings, Operation::Strip).run(project.root()).unwrap();

    assert_eq!(report.files.len(), 1);
    project.assert_file_eq("keep/a.py", sources::UNDOCUMENTED);
    project.assert_file_eq("skip/b.py", sources::DOCUMENTED);
}

#[cfg(unix)]
mod external_generator {
    use super::*;
    use pretty_assertions::assert_eq;
    use docsplice_agent::{CommandGenerator, GeneratorConfig};
    use std::os::unix::fs::PermissionsExt;

    fn script(project: &TestProject, body: &str) -> String {
        let path = project.write("bin/generate.sh", &format!("#!/bin/sh\n{body}\n"));
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.display().to_string()
    }

    #[test]
    fn test_generator_sees_block_payload() {
        let project = TestProject::new();
        project.write("src/greetings.py", sources::UNDOCUMENTED);
        let log = project.path("requests.jsonl");
        let command = script(
            &project,
            &format!(
                "cat >> '{log}'\necho >> '{log}'\necho 'Generated.'",
                log = log.display()
            ),
        );
        let generator = CommandGenerator::new(GeneratorConfig {
            command: Some(command),
            ..GeneratorConfig::default()
        })
        .unwrap();

        let report = Runner::new(Settings::default(), Operation::Embed { replace: false })
            .with_workers(1)
            .with_generator(Arc::new(generator))
            .run(&project.path("src"))
            .unwrap();
        assert_eq!(report.modified(), 1);

        let requests: Vec<serde_json::Value> = project
            .read("requests.jsonl")
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        let names: Vec<&str> = requests
            .iter()
            .map(|r| r["block"]["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["greet", "__init__", "Greeter", "greet", "greetings.py"]);
        assert_eq!(requests[4]["block"]["max_line_length"], 0);
        assert_eq!(requests[2]["block"]["kind"], "class");
        assert_eq!(requests[0]["messages"][0]["role"], "system");
    }

    #[test]
    fn test_failing_generator_leaves_file_partial() {
        let project = TestProject::new();
        project.write("greetings.py", sources::UNDOCUMENTED);
        let command = script(&project, "cat > /dev/null\necho nope >&2\nexit 1");
        let generator = CommandGenerator::new(GeneratorConfig {
            command: Some(command),
            retries: 0,
            ..GeneratorConfig::default()
        })
        .unwrap();

        let report = Runner::new(Settings::default(), Operation::Embed { replace: false })
            .with_generator(Arc::new(generator))
            .run(project.root())
            .unwrap();

        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].status, FileStatus::Unchanged);
        assert_eq!(report.partial(), 1);
        assert_eq!(report.files[0].splice.failures.len(), 5);
        project.assert_file_eq("greetings.py", sources::UNDOCUMENTED);
    }
}
