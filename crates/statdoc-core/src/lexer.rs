//! Comment extraction for SAS and Stata sources
//!
//! This module turns raw file text into [`CommentRecord`]s and
//! [`IncludeRecord`]s. The pipeline runs in a fixed order:
//!
//! 1. build the [`LineIndex`] over the original text
//! 2. normalize whitespace ([`Normalized`])
//! 3. scan every [`PatternFamily`]
//! 4. resolve each fragment's line against the original offsets
//!
//! Resolving against the normalized text instead would silently shift line
//! numbers, so step 4 always goes through [`Normalized::end_to_original`].

use crate::error::ParseError;
use crate::line_index::LineIndex;
use crate::normalize::Normalized;
use crate::patterns::{INCLUDE_DIRECTIVE, PatternFamily};
use facet::Facet;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

/// One `@tag` and everything up to the next `@`
static TAG_PIECE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@[^@]+").unwrap());

/// An `@keyword` followed by its mandatory whitespace
static KEYWORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"@[^@\s]+\s").unwrap());

/// Straight and curly quotes stripped from include paths
const QUOTES: &[char] = &['"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

/// Byte span in normalized text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Facet)]
pub struct SourceSpan {
    /// Byte offset from start of the normalized text
    pub offset: usize,
    /// Byte length
    pub length: usize,
}

impl SourceSpan {
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// Exclusive end offset
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// A documentation comment found in source code
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct CommentRecord {
    /// Tag name without the `@` (e.g. `main`); empty for untagged comments
    pub keyword: String,
    /// Group this comment is rendered under
    pub group_key: String,
    /// File where the comment was found, filled in by [`Sources`](crate::Sources)
    pub source_file: PathBuf,
    /// 1-based order of the file among files with comments, 0 until assigned
    pub file_order: usize,
    /// Line number (1-indexed)
    pub line: usize,
    /// Comment text with markers and surrounding whitespace removed
    pub text: String,
}

impl CommentRecord {
    /// Whether this comment carried an `@tag`
    pub fn is_tagged(&self) -> bool {
        !self.keyword.is_empty()
    }

    /// The tag as written in source, e.g. `@main`
    pub fn tag(&self) -> Option<String> {
        self.is_tagged().then(|| format!("@{}", self.keyword))
    }

    /// Tagged comments whose text opens with a `:subtag` describe the document
    /// itself (title, author, version, ...)
    pub fn is_title(&self) -> bool {
        self.is_tagged() && self.text.starts_with(':')
    }
}

/// An included macro file
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct IncludeRecord {
    /// File containing the include directive
    pub source_file: PathBuf,
    /// Line number (1-indexed)
    pub line: usize,
    /// Included path, quotes removed
    pub path: String,
}

/// Everything extracted from one text
#[derive(Debug, Clone, Default, PartialEq, Eq, Facet)]
pub struct Extraction {
    pub includes: Vec<IncludeRecord>,
    pub comments: Vec<CommentRecord>,
}

impl Extraction {
    /// Extract comments and includes from raw text (no I/O)
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        parse(text)
    }

    /// Number of comments
    pub fn len(&self) -> usize {
        self.comments.len()
    }

    /// Whether no comments were found
    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Record the file every comment and include came from
    pub fn attach(&mut self, path: &Path, file_order: usize) {
        for include in &mut self.includes {
            include.source_file = path.to_path_buf();
        }
        for comment in &mut self.comments {
            comment.source_file = path.to_path_buf();
            comment.file_order = file_order;
        }
    }
}

/// A line-anchored fragment that has not been classified yet
#[derive(Debug, Clone, Copy)]
struct RawFragment<'a> {
    line: usize,
    text: &'a str,
}

/// Extract all comments and includes from `text`.
///
/// Fails on empty input, and when a fragment's line cannot be resolved. No
/// partial result is returned in either case.
pub fn parse(text: &str) -> Result<Extraction, ParseError> {
    if text.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    // The index must see the text before normalization rewrites it
    let index = LineIndex::build(text);
    let normalized = Normalized::new(text);
    let contents = normalized.as_str();

    let resolve = |span: SourceSpan| -> Result<usize, ParseError> {
        Ok(index.resolve(normalized.end_to_original(span.end()))?)
    };

    let mut include_fragments = Vec::new();
    let mut comment_fragments = Vec::new();

    for family in PatternFamily::ALL {
        for span in family.find(contents) {
            let raw = &contents[span.offset..span.end()];

            match family {
                PatternFamily::Include => include_fragments.push(RawFragment {
                    line: resolve(span)?,
                    text: raw,
                }),
                PatternFamily::Block => {
                    let pieces = tag_pieces(raw);
                    if pieces.len() <= 1 {
                        comment_fragments.push(RawFragment {
                            line: resolve(span)?,
                            text: raw,
                        });
                        continue;
                    }
                    // one marker per logical line: keep every piece on its own line
                    for (offset, piece) in pieces {
                        let content = piece.trim_end();
                        let piece_span = SourceSpan::new(span.offset + offset, content.len());
                        comment_fragments.push(RawFragment {
                            line: resolve(piece_span)?,
                            text: piece,
                        });
                    }
                }
                PatternFamily::TaggedLine | PatternFamily::UntaggedLine => {
                    comment_fragments.push(RawFragment {
                        line: resolve(span)?,
                        text: raw,
                    })
                }
            }
        }
    }

    let includes = include_fragments
        .into_iter()
        .filter_map(|fragment| {
            include_path(fragment.text).map(|path| IncludeRecord {
                source_file: PathBuf::new(),
                line: fragment.line,
                path,
            })
        })
        .collect();

    let comments = comment_fragments.into_iter().map(classify).collect();

    Ok(Extraction { includes, comments })
}

/// `@`-delimited pieces of a block with their offsets inside it
fn tag_pieces(block: &str) -> Vec<(usize, &str)> {
    TAG_PIECE
        .find_iter(block)
        .map(|m| (m.start(), m.as_str()))
        .collect()
}

/// Split a composite block into one fragment per `@tag`.
///
/// A block with a single tag is returned whole, so splitting is idempotent.
pub fn split_tags(block: &str) -> Vec<&str> {
    let pieces = tag_pieces(block);
    if pieces.len() <= 1 {
        return vec![block];
    }
    pieces.into_iter().map(|(_, piece)| piece).collect()
}

/// Recover the included path from an include directive, keeping only macro files
fn include_path(raw: &str) -> Option<String> {
    let directive = raw.trim_matches(';').trim();
    let (_, rest) = directive.split_once(INCLUDE_DIRECTIVE)?;
    if rest.is_empty() {
        return None;
    }

    // quotes may be doubled up, e.g. "'path'"
    let mut path = rest;
    for _ in 0..2 {
        path = path.trim().trim_matches(QUOTES);
    }
    let path = path.trim();

    if path.is_empty() || !path.to_lowercase().contains("macro") {
        return None;
    }
    Some(path.to_string())
}

/// Split a fragment into its keyword and cleaned-up text
fn classify(fragment: RawFragment<'_>) -> CommentRecord {
    let (keyword, body) = match KEYWORD.find(fragment.text) {
        Some(m) => {
            let tag = m.as_str().trim();
            let keyword = tag.strip_prefix('@').unwrap_or(tag).to_string();
            (keyword, &fragment.text[m.end()..])
        }
        None => (String::new(), fragment.text),
    };

    CommentRecord {
        group_key: keyword.clone(),
        keyword,
        source_file: PathBuf::new(),
        file_order: 0,
        line: fragment.line,
        text: clean_comment_text(body),
    }
}

/// Strip comment markers and surrounding whitespace, in a fixed order
pub fn clean_comment_text(text: &str) -> String {
    let text = text.trim();
    let text = text.strip_suffix(';').unwrap_or(text);
    let text = text.strip_prefix("**").unwrap_or(text);
    let text = text.strip_prefix("/*").unwrap_or(text);
    let text = text.strip_suffix("*/").unwrap_or(text);
    text.trim().to_string()
}
