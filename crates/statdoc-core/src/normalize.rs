//! Whitespace normalization ahead of pattern matching
//!
//! Newlines become spaces, the remaining layout whitespace (tab, carriage
//! return, form-feed, vertical-tab) is deleted, and a single space is prepended
//! so that anchored patterns can match at the very start of the text.
//!
//! Deleting characters moves every later offset, so the rewrite keeps a list of
//! shift points. [`Normalized::to_original`] uses it to translate a position in
//! the normalized text back into the text the [`LineIndex`](crate::LineIndex)
//! was built from.

/// Characters removed outright during normalization
pub const LAYOUT_WHITESPACE: [char; 4] = ['\t', '\r', '\x0C', '\x0B'];

/// A normalized copy of a source text, plus the information needed to map
/// offsets back to the original.
#[derive(Debug, Clone)]
pub struct Normalized {
    text: String,
    /// `(position, removed)` pairs: every normalized byte at or after
    /// `position` sits `removed` bytes earlier than in the original.
    shifts: Vec<(usize, usize)>,
}

impl Normalized {
    pub fn new(original: &str) -> Self {
        let mut text = String::with_capacity(original.len() + 1);
        let mut shifts: Vec<(usize, usize)> = Vec::new();
        let mut removed = 0;

        text.push(' ');

        for ch in original.chars() {
            match ch {
                '\n' => text.push(' '),
                c if LAYOUT_WHITESPACE.contains(&c) => {
                    removed += c.len_utf8();
                    let at = text.len();
                    match shifts.last_mut() {
                        Some(last) if last.0 == at => last.1 = removed,
                        _ => shifts.push((at, removed)),
                    }
                }
                c => text.push(c),
            }
        }

        Self { text, shifts }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Map a byte position in the normalized text to the original text.
    ///
    /// Position 0 is the synthetic leading space and maps to 0.
    pub fn to_original(&self, pos: usize) -> usize {
        if pos == 0 {
            return 0;
        }
        let idx = self.shifts.partition_point(|&(at, _)| at <= pos);
        let shift = match idx {
            0 => 0,
            n => self.shifts[n - 1].1,
        };
        pos - 1 + shift
    }

    /// Map an exclusive end offset to the exclusive end of the same last byte
    /// in the original text.
    pub fn end_to_original(&self, end: usize) -> usize {
        if end == 0 {
            return 0;
        }
        self.to_original(end - 1) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newlines_become_spaces() {
        let n = Normalized::new("a\nb\n");
        assert_eq!(n.as_str(), " a b ");
    }

    #[test]
    fn test_layout_whitespace_removed() {
        let n = Normalized::new("a\t\r\nb\x0C\x0Bc");
        assert_eq!(n.as_str(), " a bc");
    }

    #[test]
    fn test_offsets_without_removals() {
        let original = "ab\ncd";
        let n = Normalized::new(original);
        for pos in 1..n.as_str().len() {
            assert_eq!(n.to_original(pos), pos - 1);
        }
    }

    #[test]
    fn test_offsets_map_back_across_removals() {
        let original = "\t\tx\r\ny\tz";
        let n = Normalized::new(original);
        assert_eq!(n.as_str(), " x yz");

        for (pos, ch) in n.as_str().char_indices().skip(1) {
            let orig = n.to_original(pos);
            let expected = if ch == ' ' { '\n' } else { ch };
            assert_eq!(original[orig..].chars().next(), Some(expected), "pos {pos}");
        }
    }

    #[test]
    fn test_end_to_original() {
        let original = "\t\t**x;";
        let n = Normalized::new(original);
        let end = n.as_str().len();
        assert_eq!(n.end_to_original(end), original.len());
    }
}
