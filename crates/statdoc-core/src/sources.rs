//! Source providers for comment extraction

use crate::lexer::{CommentRecord, Extraction, IncludeRecord};
use eyre::{Result, WrapErr};
use facet::Facet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default extension of the primary dialect (SAS)
pub const PRIMARY_EXTENSION: &str = "sas";

/// Default extension of the secondary dialect (Stata)
pub const SECONDARY_EXTENSION: &str = "do";

/// The two accepted file extensions, without leading dots
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct Dialects {
    pub primary: String,
    pub secondary: String,
}

impl Default for Dialects {
    fn default() -> Self {
        Self::new(PRIMARY_EXTENSION, SECONDARY_EXTENSION)
    }
}

impl Dialects {
    /// Create from two extensions; a leading `.` is ignored
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        let strip = |ext: String| ext.trim_start_matches('.').to_string();
        Self {
            primary: strip(primary.into()),
            secondary: strip(secondary.into()),
        }
    }

    /// Check if a file has one of the accepted extensions
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.primary || ext == self.secondary)
    }

    /// Check if a file belongs to the secondary dialect
    pub fn is_secondary(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.secondary)
    }
}

/// A file that yielded at least one comment
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct SourceFile {
    /// 1-based position among files with comments
    pub order: usize,
    pub path: PathBuf,
}

/// Result of extracting comments from many files
#[derive(Debug, Default, Facet)]
pub struct ExtractionResult {
    pub files: Vec<SourceFile>,
    pub includes: Vec<IncludeRecord>,
    pub comments: Vec<CommentRecord>,
    /// Files that were skipped because they failed to read or parse
    pub warnings: Vec<String>,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of comments across all files
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Append one file's extraction, numbering the file if it has comments.
    ///
    /// Includes are kept even when the file has no comments.
    pub fn add(&mut self, path: &Path, mut extraction: Extraction) {
        let order = if extraction.is_empty() {
            0
        } else {
            self.files.len() + 1
        };
        extraction.attach(path, order);

        debug!(
            file = %path.display(),
            comments = extraction.comments.len(),
            includes = extraction.includes.len(),
            "extracted"
        );

        self.includes.extend(extraction.includes);
        if order > 0 {
            self.files.push(SourceFile {
                order,
                path: path.to_path_buf(),
            });
            self.comments.extend(extraction.comments);
        }
    }

    /// Read and parse one file, appending its records.
    ///
    /// Empty files are skipped: the extractor rejects empty input.
    pub fn add_file(&mut self, path: &Path, content: &str) -> Result<()> {
        if let Some(extraction) = parse_content(path, content)? {
            self.add(path, extraction);
        }
        Ok(())
    }
}

/// Parse `content`, or return `None` for an empty file
fn parse_content(path: &Path, content: &str) -> Result<Option<Extraction>> {
    if content.is_empty() {
        debug!(file = %path.display(), "skipping empty file");
        return Ok(None);
    }
    let extraction = Extraction::parse(content)
        .wrap_err_with(|| format!("Failed to parse {}", path.display()))?;
    Ok(Some(extraction))
}

fn read_and_parse(path: &Path) -> Result<Option<Extraction>> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    parse_content(path, &content)
}

/// Trait for providing source files to extract comments from
pub trait Sources {
    /// Extract comments from all sources
    fn extract(self) -> Result<ExtractionResult>;
}

/// Sources from an explicit list of file paths, processed in list order
pub struct PathSources {
    paths: Vec<PathBuf>,
    skip_failures: bool,
}

impl PathSources {
    /// Create from an iterator of paths
    pub fn new(paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            skip_failures: false,
        }
    }

    /// Turn per-file read or parse failures into warnings instead of errors
    pub fn skip_failures(mut self, skip: bool) -> Self {
        self.skip_failures = skip;
        self
    }
}

impl Sources for PathSources {
    fn extract(self) -> Result<ExtractionResult> {
        // parsing may run in parallel, numbering must not
        #[cfg(feature = "parallel")]
        let parsed: Vec<(&PathBuf, Result<Option<Extraction>>)> = {
            use rayon::prelude::*;

            self.paths
                .par_iter()
                .map(|path| (path, read_and_parse(path)))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let parsed: Vec<(&PathBuf, Result<Option<Extraction>>)> = self
            .paths
            .iter()
            .map(|path| (path, read_and_parse(path)))
            .collect();

        let mut result = ExtractionResult::new();
        for (path, outcome) in parsed {
            match outcome {
                Ok(Some(extraction)) => result.add(path, extraction),
                Ok(None) => {}
                Err(e) if self.skip_failures => {
                    warn!(file = %path.display(), "skipping: {e:#}");
                    result.warnings.push(format!("{e:#}"));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(result)
    }
}

/// In-memory sources (useful for testing)
pub struct MemorySources(Vec<(PathBuf, String)>);

impl MemorySources {
    /// Create empty memory sources
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a file with content
    pub fn add(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.0.push((path.into(), content.into()));
        self
    }
}

impl Default for MemorySources {
    fn default() -> Self {
        Self::new()
    }
}

impl Sources for MemorySources {
    fn extract(self) -> Result<ExtractionResult> {
        let mut result = ExtractionResult::new();
        for (path, content) in self.0 {
            result.add_file(&path, &content)?;
        }
        Ok(result)
    }
}

/// Directory walker that picks up files of the configured dialects
#[cfg(feature = "walk")]
pub struct WalkSources {
    root: PathBuf,
    dialects: Dialects,
    recursive: bool,
    skip_failures: bool,
}

#[cfg(feature = "walk")]
impl WalkSources {
    /// Create a walker for the given code directory
    pub fn new(root: impl Into<PathBuf>, dialects: Dialects) -> Self {
        Self {
            root: root.into(),
            dialects,
            recursive: false,
            skip_failures: false,
        }
    }

    /// Descend into subdirectories (default: top level only)
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Turn per-file read or parse failures into warnings instead of errors
    pub fn skip_failures(mut self, skip: bool) -> Self {
        self.skip_failures = skip;
        self
    }

    /// List the files that would be parsed, sorted by file name
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        use ignore::WalkBuilder;

        if self.root.as_os_str().is_empty() {
            eyre::bail!("Code directory name is invalid");
        }

        let mut builder = WalkBuilder::new(&self.root);
        builder
            .follow_links(true)
            .hidden(false)
            .git_ignore(true)
            .git_exclude(true)
            .sort_by_file_name(|a, b| a.cmp(b));
        if !self.recursive {
            builder.max_depth(Some(1));
        }

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry
                .wrap_err_with(|| format!("Failed to read {}", self.root.display()))?;
            let path = entry.path();

            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if !self.dialects.accepts(path) {
                continue;
            }
            files.push(path.to_path_buf());
        }

        Ok(files)
    }
}

#[cfg(feature = "walk")]
impl Sources for WalkSources {
    fn extract(self) -> Result<ExtractionResult> {
        let files = self.files()?;
        if files.is_empty() {
            eyre::bail!("No parsable files were found in {}", self.root.display());
        }
        debug!(count = files.len(), root = %self.root.display(), "found source files");

        PathSources::new(files)
            .skip_failures(self.skip_failures)
            .extract()
    }
}
