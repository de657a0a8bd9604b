//! Grouping extracted comments into a documentation model

use crate::error::DocumentError;
use crate::sources::{Dialects, ExtractionResult};
use facet::Facet;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::path::PathBuf;

/// `:title `, `:version `, ... at the start of a title comment
static SUBTAG: Lazy<Regex> = Lazy::new(|| Regex::new(r":[a-zA-Z.]+ ").unwrap());

/// One `% ...` line of the document header
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct TitleLine {
    /// Sub-tag without the colon, e.g. `title` or `version`
    pub subtag: String,
    /// Title-cased value
    pub value: String,
}

impl TitleLine {
    pub fn is_version(&self) -> bool {
        self.subtag.eq_ignore_ascii_case("version")
    }
}

/// A code file listed in the document
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct DocFile {
    pub order: usize,
    pub path: PathBuf,
    /// Whether the file uses the secondary dialect
    pub secondary: bool,
}

/// One rendered comment inside a keyword section
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct Entry {
    /// File order, prefixed with `s` for secondary-dialect files
    pub file_label: String,
    /// 1-based position within its group
    pub counter: usize,
    pub line: usize,
    pub text: String,
}

impl Entry {
    /// `<file>.<counter>:<line>`
    pub fn reference(&self) -> String {
        format!("{}.{}:{}", self.file_label, self.counter, self.line)
    }
}

/// All comments sharing a keyword
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct Group {
    pub keyword: String,
    pub heading: String,
    pub entries: Vec<Entry>,
}

/// The assembled documentation for a set of source files
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct Documentation {
    pub titles: Vec<TitleLine>,
    pub files: Vec<DocFile>,
    /// Included macro paths, first occurrence only
    pub includes: Vec<String>,
    /// Keyword groups in first-seen order
    pub groups: Vec<Group>,
}

impl Documentation {
    /// Build the documentation model from extracted comments.
    ///
    /// Title comments (tagged, text starting with `:subtag`) feed the header.
    /// Every other tagged comment lands in the group of its keyword. Untagged
    /// comments are not rendered.
    pub fn assemble(result: &ExtractionResult, dialects: &Dialects) -> Result<Self, DocumentError> {
        if result.comments.is_empty() {
            return Err(DocumentError::NoComments);
        }

        let mut titles = Vec::new();
        let mut groups: Vec<Group> = Vec::new();

        for comment in &result.comments {
            if comment.is_title() {
                let (subtag, value) = split_title(&comment.text).ok_or_else(|| {
                    DocumentError::MalformedTitle {
                        file: comment.source_file.clone(),
                        line: comment.line,
                    }
                })?;
                titles.push(TitleLine {
                    subtag: subtag.to_string(),
                    value: title_case(value),
                });
                continue;
            }

            if !comment.is_tagged() {
                continue;
            }

            let index = match groups.iter().position(|g| g.keyword == comment.group_key) {
                Some(index) => index,
                None => {
                    groups.push(Group {
                        keyword: comment.group_key.clone(),
                        heading: title_case(&comment.group_key),
                        entries: Vec::new(),
                    });
                    groups.len() - 1
                }
            };

            let group = &mut groups[index];
            let mut file_label = comment.file_order.to_string();
            if dialects.is_secondary(&comment.source_file) {
                file_label.insert(0, 's');
            }
            group.entries.push(Entry {
                file_label,
                counter: group.entries.len() + 1,
                line: comment.line,
                text: comment.text.clone(),
            });
        }

        let files = result
            .files
            .iter()
            .map(|file| DocFile {
                order: file.order,
                path: file.path.clone(),
                secondary: dialects.is_secondary(&file.path),
            })
            .collect();

        let mut seen = HashSet::new();
        let includes = result
            .includes
            .iter()
            .filter(|include| seen.insert(include.path.as_str()))
            .map(|include| include.path.clone())
            .collect();

        Ok(Documentation {
            titles,
            files,
            includes,
            groups,
        })
    }

    /// Total number of entries across all groups
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }
}

/// Split `:subtag value` into its parts
fn split_title(text: &str) -> Option<(&str, &str)> {
    let m = SUBTAG.find(text)?;
    let subtag = m.as_str().trim().trim_start_matches(':');
    let value = text[m.end()..].trim();
    (!value.is_empty()).then_some((subtag, value))
}

/// Upper-case the first letter of every word.
///
/// A word starts after any character that is not alphanumeric or `_`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = !(ch.is_alphanumeric() || ch == '_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{MemorySources, Sources};

    fn assemble(sources: MemorySources) -> Result<Documentation, DocumentError> {
        let result = sources.extract().unwrap();
        Documentation::assemble(&result, &Dialects::default())
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("experiment #42"), "Experiment #42");
        assert_eq!(title_case("data-cleaning steps"), "Data-Cleaning Steps");
        assert_eq!(title_case("snake_case word"), "Snake_case Word");
        assert_eq!(title_case("1.0"), "1.0");
    }

    #[test]
    fn test_titles_and_groups() {
        let doc = assemble(
            MemorySources::new().add(
                "main.sas",
                "/**\n @main :title experiment #42\n @main :version 1.0b\n @main Loads the cohort.\n*/\n**@cleaning Drop duplicates;\n**@main Writes the report;\n",
            ),
        )
        .unwrap();

        assert_eq!(doc.titles.len(), 2);
        assert_eq!(doc.titles[0].subtag, "title");
        assert_eq!(doc.titles[0].value, "Experiment #42");
        assert!(doc.titles[1].is_version());
        assert_eq!(doc.titles[1].value, "1.0b");

        // line comments come before block pieces in extraction order
        let headings: Vec<_> = doc.groups.iter().map(|g| g.heading.as_str()).collect();
        assert_eq!(headings, vec!["Cleaning", "Main"]);

        let main = &doc.groups[1];
        let refs: Vec<_> = main.entries.iter().map(Entry::reference).collect();
        // the last block piece resolves on the closing delimiter line
        assert_eq!(refs, vec!["1.1:7", "1.2:5"]);
        assert_eq!(doc.entry_count(), 3);
    }

    #[test]
    fn test_secondary_dialect_prefix() {
        let doc = assemble(
            MemorySources::new()
                .add("a.sas", "**@main from sas;")
                .add("b.do", "**@main from stata;"),
        )
        .unwrap();

        let labels: Vec<_> = doc.groups[0]
            .entries
            .iter()
            .map(|e| e.file_label.as_str())
            .collect();
        assert_eq!(labels, vec!["1", "s2"]);
        assert!(doc.files[1].secondary);
    }

    #[test]
    fn test_includes_deduplicated() {
        let doc = assemble(
            MemorySources::new()
                .add("a.sas", "%include 'macros/x.sas';\n**@main a;")
                .add("b.sas", "%include 'macros/x.sas';\n%include 'macros/y.sas';\n**@main b;"),
        )
        .unwrap();
        assert_eq!(doc.includes, vec!["macros/x.sas", "macros/y.sas"]);
    }

    #[test]
    fn test_untagged_comments_not_grouped() {
        let doc = assemble(
            MemorySources::new().add("a.sas", "**Note plain comment;\n**@main tagged;"),
        )
        .unwrap();
        assert_eq!(doc.groups.len(), 1);
        assert_eq!(doc.entry_count(), 1);
    }

    #[test]
    fn test_no_comments() {
        let err = assemble(MemorySources::new().add("a.sas", "data x; run;")).unwrap_err();
        assert_eq!(err, DocumentError::NoComments);
    }

    #[test]
    fn test_malformed_title() {
        let err = assemble(MemorySources::new().add("a.sas", "\n/** @main :title */\n")).unwrap_err();
        assert_eq!(
            err,
            DocumentError::MalformedTitle {
                file: PathBuf::from("a.sas"),
                line: 2
            }
        );
    }
}
