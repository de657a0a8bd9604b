//! Configuration for statdoc
//!
//! Every setting can come from a JSON file passed with `-c`, and every CLI flag
//! overrides the file. Unset values fall back to the defaults below.

use eyre::{Result, WrapErr};
use facet::Facet;
use statdoc_core::{Dialects, PRIMARY_EXTENSION, SECONDARY_EXTENSION};
use std::path::{Path, PathBuf};

/// Default directory for generated documentation
pub const DEFAULT_DOCS_DIR: &str = "docs";

/// Default name of the generated markdown file
pub const DEFAULT_OUTPUT_FILE: &str = "README.md";

/// Root configuration for statdoc
#[derive(Debug, Clone, Default, PartialEq, Facet)]
pub struct Config {
    /// Directory containing the SAS / Stata code
    #[facet(default)]
    pub code_dir: Option<String>,

    /// Directory the documentation is written to
    #[facet(default)]
    pub docs_dir: Option<String>,

    /// File name of the generated document, inside `docs_dir`
    #[facet(default)]
    pub output_file: Option<String>,

    /// Extension of the primary dialect (default: `sas`)
    #[facet(default)]
    pub primary_extension: Option<String>,

    /// Extension of the secondary dialect (default: `do`)
    #[facet(default)]
    pub secondary_extension: Option<String>,

    /// Walk subdirectories of `code_dir`
    #[facet(default)]
    pub recursive: Option<bool>,

    /// Skip files that fail to read or parse instead of aborting
    #[facet(default)]
    pub keep_going: Option<bool>,
}

impl Config {
    /// Parse a configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        facet_json::from_str(json).map_err(|e| eyre::eyre!("Failed to parse config JSON: {e}"))
    }

    /// Load a configuration from a local file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json(&content)
            .wrap_err_with(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// The code directory, which is required
    pub fn code_dir(&self) -> Result<PathBuf> {
        match self.code_dir.as_deref() {
            Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
            _ => eyre::bail!("Invalid code directory path. Please enter a valid path."),
        }
    }

    pub fn docs_dir(&self) -> Result<PathBuf> {
        match self.docs_dir.as_deref() {
            None => Ok(PathBuf::from(DEFAULT_DOCS_DIR)),
            Some("") => eyre::bail!("Docs directory name is invalid"),
            Some(dir) => Ok(PathBuf::from(dir)),
        }
    }

    pub fn output_file(&self) -> &str {
        self.output_file.as_deref().unwrap_or(DEFAULT_OUTPUT_FILE)
    }

    /// Where the rendered document is written
    pub fn output_path(&self) -> Result<PathBuf> {
        Ok(self.docs_dir()?.join(self.output_file()))
    }

    pub fn dialects(&self) -> Dialects {
        Dialects::new(
            self.primary_extension
                .as_deref()
                .unwrap_or(PRIMARY_EXTENSION),
            self.secondary_extension
                .as_deref()
                .unwrap_or(SECONDARY_EXTENSION),
        )
    }

    pub fn recursive(&self) -> bool {
        self.recursive.unwrap_or(false)
    }

    pub fn keep_going(&self) -> bool {
        self.keep_going.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.code_dir().is_err());
        assert_eq!(config.docs_dir().unwrap(), PathBuf::from("docs"));
        assert_eq!(
            config.output_path().unwrap(),
            PathBuf::from("docs/README.md")
        );
        assert_eq!(config.dialects(), Dialects::new("sas", "do"));
        assert!(!config.recursive());
        assert!(!config.keep_going());
    }

    #[test]
    fn test_empty_docs_dir_rejected() {
        let config = Config {
            docs_dir: Some(String::new()),
            ..Config::default()
        };
        assert!(config.docs_dir().is_err());
    }

    #[test]
    fn test_from_json() {
        let config = Config::from_json(
            r#"{
                "code_dir": "analysis",
                "output_file": "index.md",
                "secondary_extension": ".ado",
                "recursive": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.code_dir().unwrap(), PathBuf::from("analysis"));
        assert_eq!(config.output_file(), "index.md");
        assert_eq!(config.dialects(), Dialects::new("sas", "ado"));
        assert!(config.recursive());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(Config::from_json("{ not json").is_err());
    }
}
