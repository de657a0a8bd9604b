//! statdoc library - Generate project documentation from SAS and Stata comments
//!
//! This library exposes the generation pipeline behind the `statdoc` binary
//! for testing and embedding purposes.

pub mod config;
pub mod logging;
pub mod output;

use config::Config;
use eyre::{Result, WrapErr};
use output::{OutputFormat, render};
use statdoc_core::{Documentation, Sources, WalkSources};
use std::path::Path;
use tracing::{debug, info};

/// Documentation built from a code directory, with its rendering
pub struct Generated {
    pub documentation: Documentation,
    pub rendered: String,
    /// Files skipped while extracting
    pub warnings: Vec<String>,
}

/// Walk the configured code directory and assemble its documentation
pub fn build_documentation(config: &Config) -> Result<(Documentation, Vec<String>)> {
    let code_dir = config.code_dir()?;
    let dialects = config.dialects();

    info!(code_dir = %code_dir.display(), recursive = config.recursive(), "scanning");

    let result = WalkSources::new(&code_dir, dialects.clone())
        .recursive(config.recursive())
        .skip_failures(config.keep_going())
        .extract()?;

    debug!(
        files = result.files.len(),
        comments = result.len(),
        includes = result.includes.len(),
        "extraction finished"
    );

    let documentation = Documentation::assemble(&result, &dialects)
        .wrap_err_with(|| format!("Failed to document {}", code_dir.display()))?;

    Ok((documentation, result.warnings))
}

/// Build and render the documentation for `config`
pub fn generate(config: &Config, format: OutputFormat) -> Result<Generated> {
    let (documentation, warnings) = build_documentation(config)?;
    let rendered = render(&documentation, format)?;
    Ok(Generated {
        documentation,
        rendered,
        warnings,
    })
}

/// Write `content` to `path`, creating parent directories and replacing any
/// existing file
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content).wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = content.len(), "wrote documentation");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("load.sas"),
            "/** @main :title cohort */\n**@main Load raw data;\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("skip.txt"), "**@main not code;\n").unwrap();
        dir
    }

    fn config_for(dir: &Path) -> Config {
        Config {
            code_dir: Some(dir.to_string_lossy().into_owned()),
            docs_dir: Some(dir.join("docs").to_string_lossy().into_owned()),
            ..Config::default()
        }
    }

    #[test]
    fn test_generate_markdown() {
        let dir = project();
        let generated = generate(&config_for(dir.path()), OutputFormat::Markdown).unwrap();

        assert!(generated.rendered.starts_with("% Cohort\n"));
        assert!(generated.rendered.contains("\n# Main\n\n1.1:2 Load raw data\n"));
        assert_eq!(generated.documentation.files.len(), 1);
        assert!(generated.warnings.is_empty());
    }

    #[test]
    fn test_missing_code_dir() {
        assert!(generate(&Config::default(), OutputFormat::Markdown).is_err());
    }

    #[test]
    fn test_directory_without_comments() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("plain.sas"), "data x; run;\n").unwrap();
        assert!(generate(&config_for(dir.path()), OutputFormat::Markdown).is_err());
    }

    #[test]
    fn test_write_output_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs/nested/README.md");

        write_output(&path, "first").unwrap();
        write_output(&path, "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }
}
