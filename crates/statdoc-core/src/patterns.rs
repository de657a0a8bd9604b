//! The fixed families of comment and include patterns
//!
//! Each family is an independent matcher over the normalized text. Families
//! are applied in the order of [`PatternFamily::ALL`] and their results are
//! concatenated: a later family may match text an earlier family already
//! matched, and both matches are kept.

use crate::lexer::SourceSpan;
use facet::Facet;
use once_cell::sync::Lazy;
use regex::Regex;

/// The directive keyword that introduces an include statement
pub const INCLUDE_DIRECTIVE: &str = "%include";

static INCLUDE: Lazy<Regex> = Lazy::new(|| Regex::new(r"%include\s+[^;]+;").unwrap());

// `**@keyword text;`
static TAGGED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^/]\s*\*\*@[a-zA-Z.]+ [^;]+;").unwrap());

// `**keyword text;`
static UNTAGGED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^/]\s*\*\*[a-zA-Z.]+ [^;]+;").unwrap());

// `/** @keyword text */`, the doubled marker is optional
static BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\s*\*{1,2}\s*@[a-zA-Z.]+ [^/]+\*/").unwrap());

/// One family of textual patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Facet)]
#[repr(u8)]
pub enum PatternFamily {
    /// `%include 'path';`
    Include,
    /// Double-marker comment carrying an `@tag`
    TaggedLine,
    /// Double-marker comment with a bare keyword
    UntaggedLine,
    /// Block comment carrying one or more `@tag`s
    Block,
}

impl PatternFamily {
    /// Every family, in application order
    pub const ALL: [PatternFamily; 4] = [
        PatternFamily::Include,
        PatternFamily::TaggedLine,
        PatternFamily::UntaggedLine,
        PatternFamily::Block,
    ];

    fn regex(&self) -> &'static Regex {
        match self {
            PatternFamily::Include => &INCLUDE,
            PatternFamily::TaggedLine => &TAGGED_LINE,
            PatternFamily::UntaggedLine => &UNTAGGED_LINE,
            PatternFamily::Block => &BLOCK,
        }
    }

    /// Whether the first character of a match is context rather than content
    pub fn is_anchored(&self) -> bool {
        !matches!(self, PatternFamily::Include)
    }

    /// Whether matches of this family are include directives
    pub fn is_include(&self) -> bool {
        matches!(self, PatternFamily::Include)
    }

    /// Find every candidate span of this family in `text`.
    ///
    /// Anchor characters are dropped from the returned spans, and spans left
    /// empty afterwards are discarded.
    pub fn find(&self, text: &str) -> Vec<SourceSpan> {
        self.regex()
            .find_iter(text)
            .filter_map(|m| {
                let start = if self.is_anchored() {
                    m.as_str()
                        .chars()
                        .next()
                        .map_or(m.start(), |c| m.start() + c.len_utf8())
                } else {
                    m.start()
                };
                (start < m.end()).then(|| SourceSpan::new(start, m.end() - start))
            })
            .collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternFamily::Include => "include",
            PatternFamily::TaggedLine => "tagged-line",
            PatternFamily::UntaggedLine => "untagged-line",
            PatternFamily::Block => "block",
        }
    }
}

impl std::fmt::Display for PatternFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched<'a>(family: PatternFamily, text: &'a str) -> Vec<&'a str> {
        family
            .find(text)
            .into_iter()
            .map(|span| &text[span.offset..span.end()])
            .collect()
    }

    #[test]
    fn test_include_family() {
        let text = " %include 'macros/a.sas'; data x; %include \"b.sas\";";
        assert_eq!(
            matched(PatternFamily::Include, text),
            vec!["%include 'macros/a.sas';", "%include \"b.sas\";"]
        );
    }

    #[test]
    fn test_tagged_line_drops_anchor() {
        let text = " **@main Loads the data;";
        assert_eq!(
            matched(PatternFamily::TaggedLine, text),
            vec!["**@main Loads the data;"]
        );
    }

    #[test]
    fn test_tagged_line_not_after_slash() {
        assert!(matched(PatternFamily::TaggedLine, "/**@main text;").is_empty());
    }

    #[test]
    fn test_untagged_line_requires_bare_keyword() {
        let text = " **Note this step is slow; **@main tagged;";
        assert_eq!(
            matched(PatternFamily::UntaggedLine, text),
            vec!["**Note this step is slow;"]
        );
    }

    #[test]
    fn test_block_family() {
        let text = " /** @main Hello world */ data y;";
        assert_eq!(
            matched(PatternFamily::Block, text),
            vec!["** @main Hello world */"]
        );
    }

    #[test]
    fn test_block_single_marker() {
        let text = " /*@main Hello */";
        assert_eq!(matched(PatternFamily::Block, text), vec!["*@main Hello */"]);
    }

    #[test]
    fn test_multibyte_anchor() {
        let text = "é**@main text;";
        assert_eq!(
            matched(PatternFamily::TaggedLine, text),
            vec!["**@main text;"]
        );
    }

    #[test]
    fn test_families_overlap() {
        // a tagged line inside a block comment is seen by both families
        let text = " /** @doc x **@main y; */";
        assert_eq!(matched(PatternFamily::TaggedLine, text).len(), 1);
        assert_eq!(matched(PatternFamily::Block, text).len(), 1);
    }
}
