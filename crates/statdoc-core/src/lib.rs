//! statdoc-core - Core library for documentation comment extraction
//!
//! This crate provides the building blocks for:
//! - Extracting documentation comments and macro includes from SAS and Stata sources
//! - Resolving every comment to its original line, whatever whitespace was stripped
//! - Grouping extracted comments by keyword into a [`Documentation`] model
//!
//! # Features
//!
//! - `walk` - Enable [`WalkSources`] for directory walking (brings in `ignore`)
//! - `parallel` - Enable parallel parsing in [`PathSources`] (brings in `rayon`)
//!
//! # Comment syntax
//!
//! ```text
//! **@keyword text ending in a semicolon;
//! **bare comment ending in a semicolon;
//! /** @keyword block comment */
//! /**
//!  @main :title Experiment #42
//!  @main One entry per tag.
//! */
//! %include 'macros/helpers.sas';
//! ```
//!
//! A block with several tags yields one comment per tag. Tagged comments whose
//! text starts with `:title`, `:version`, `:author` or `:org` become the
//! document header.
//!
//! # Example
//!
//! ```
//! use statdoc_core::{Dialects, Documentation, MemorySources, Sources};
//!
//! let result = MemorySources::new()
//!     .add("load.sas", "/** @main Hello world */")
//!     .add("clean.do", "**@main Tidy up;")
//!     .extract()
//!     .unwrap();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result.comments[0].keyword, "main");
//! assert_eq!(result.comments[0].text, "Hello world");
//!
//! let doc = Documentation::assemble(&result, &Dialects::default()).unwrap();
//! assert_eq!(doc.groups[0].entries[1].reference(), "s2.2:1");
//! ```

mod document;
mod error;
mod lexer;
mod line_index;
mod normalize;
mod patterns;
mod sources;

pub use document::{DocFile, Documentation, Entry, Group, TitleLine, title_case};
pub use error::{DocumentError, LineIndexError, ParseError};
pub use lexer::{
    CommentRecord, Extraction, IncludeRecord, SourceSpan, clean_comment_text, parse, split_tags,
};
pub use line_index::{LineIndex, LineSpan};
pub use normalize::{LAYOUT_WHITESPACE, Normalized};
pub use patterns::{INCLUDE_DIRECTIVE, PatternFamily};
pub use sources::{
    Dialects, ExtractionResult, MemorySources, PRIMARY_EXTENSION, PathSources,
    SECONDARY_EXTENSION, SourceFile, Sources,
};

#[cfg(feature = "walk")]
pub use sources::WalkSources;
