//! Integration tests that run the statdoc binary

use std::path::Path;
use std::process::Command;

fn statdoc_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_statdoc"))
}

fn fixtures_dir() -> &'static Path {
    Path::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../statdoc-core/tests/fixtures/project"
    ))
}

#[test]
fn test_writes_readme_into_docs_dir() {
    let temp = tempfile::tempdir().unwrap();
    let docs = temp.path().join("docs");

    let output = statdoc_bin()
        .arg("--code-dir")
        .arg(fixtures_dir())
        .arg("--docs-dir")
        .arg(&docs)
        .output()
        .expect("Failed to run statdoc");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "Command should succeed: {stderr}");
    assert!(stderr.contains("Scanning"), "Should log progress to stderr");

    let readme = std::fs::read_to_string(docs.join("README.md")).expect("README.md written");
    assert!(readme.starts_with("% Cohort Analysis\n% Jane Doe\n% Version 2.1\n"));
    assert!(readme.contains("# Code files used for project"));
    assert!(readme.contains("* macros/date_macros.sas\n"));
    assert!(readme.contains("\n# Cleaning\n\n1.1:13 Remove claims without a patient id\n"));
    assert!(readme.contains("s2.2:6 "));
    assert!(!readme.contains("Temporary dataset"));
}

#[test]
fn test_custom_output_file_name() {
    let temp = tempfile::tempdir().unwrap();

    let output = statdoc_bin()
        .arg("--code-dir")
        .arg(fixtures_dir())
        .arg("--docs-dir")
        .arg(temp.path())
        .arg("-o")
        .arg("index.md")
        .output()
        .expect("Failed to run statdoc");

    assert!(output.status.success());
    assert!(temp.path().join("index.md").exists());
    assert!(!temp.path().join("README.md").exists());
}

#[test]
fn test_stdout_json() {
    let output = statdoc_bin()
        .arg("--code-dir")
        .arg(fixtures_dir())
        .arg("--stdout")
        .arg("-f")
        .arg("json")
        .output()
        .expect("Failed to run statdoc");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"groups\""), "Should output JSON");
    assert!(stdout.contains("Cohort Analysis"));
}

#[test]
fn test_config_file() {
    let temp = tempfile::tempdir().unwrap();
    let config_path = temp.path().join("statdoc.json");
    std::fs::write(
        &config_path,
        format!(
            r#"{{ "code_dir": "{}", "docs_dir": "{}" }}"#,
            fixtures_dir().display(),
            temp.path().join("out").display()
        ),
    )
    .unwrap();

    let output = statdoc_bin()
        .arg("-c")
        .arg(&config_path)
        .output()
        .expect("Failed to run statdoc");

    assert!(output.status.success());
    assert!(temp.path().join("out/README.md").exists());
}

#[test]
fn test_missing_code_dir_fails() {
    let output = statdoc_bin().output().expect("Failed to run statdoc");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "Should print usage");
    assert!(stderr.contains("Invalid code directory path"));
}

#[test]
fn test_unknown_format_fails() {
    let output = statdoc_bin()
        .arg("--code-dir")
        .arg(fixtures_dir())
        .arg("-f")
        .arg("html")
        .output()
        .expect("Failed to run statdoc");

    assert!(!output.status.success());
}
