use docsplice_fs::{ConfigStore, Error, Format};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[derive(Debug, Deserialize, PartialEq)]
struct TestConfig {
    name: String,
    workers: usize,
}

#[rstest]
#[case("docsplice.toml", "name = \"test\"\nworkers = 3\n")]
#[case("docsplice.json", r#"{"name": "test", "workers": 3}"#)]
#[case("docsplice.yaml", "name: test\nworkers: 3\n")]
#[case("docsplice.yml", "name: test\nworkers: 3\n")]
fn test_load_each_format(#[case] file_name: &str, #[case] content: &str) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(file_name);
    fs::write(&path, content).unwrap();

    let config: TestConfig = ConfigStore::new().load(&path).unwrap();

    assert_eq!(
        config,
        TestConfig {
            name: "test".into(),
            workers: 3
        }
    );
}

#[test]
fn test_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("docsplice.ini");
    fs::write(&path, "name=x").unwrap();

    let result: Result<TestConfig, _> = ConfigStore::new().load(&path);

    assert!(matches!(result, Err(Error::UnsupportedFormat { extension }) if extension == "ini"));
}

#[test]
fn test_parse_error_names_format() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("docsplice.json");
    fs::write(&path, "{ not json").unwrap();

    let result: Result<TestConfig, _> = ConfigStore::new().load(&path);

    assert!(matches!(result, Err(Error::ConfigParse { format, .. }) if format == "JSON"));
}

#[test]
fn test_discover_prefers_toml() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("docsplice.yaml"), "").unwrap();
    fs::write(temp.path().join("docsplice.toml"), "").unwrap();

    let found = ConfigStore::discover(temp.path(), "docsplice").unwrap();

    assert_eq!(found, temp.path().join("docsplice.toml"));
    assert_eq!(ConfigStore::discover(temp.path(), "other"), None);
}

#[test]
fn test_format_from_path_is_case_insensitive() {
    assert_eq!(Format::from_path(Path::new("A.TOML")).unwrap(), Format::Toml);
    assert_eq!(Format::from_path(Path::new("a.Yml")).unwrap(), Format::Yaml);
}
