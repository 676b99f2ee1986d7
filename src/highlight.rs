//! Per-line syntax classification.
//!
//! Each rendered byte gets one [`Highlight`] class. Block comments carry across lines: a line is
//! classified from its own bytes plus whether the previous line left a block comment open, and
//! it reports whether it leaves one open itself. The cross-line walk lives in
//! [`crate::buffer::Document`].

use crate::syntax::SyntaxProfile;

/// Highlight class of one rendered byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    Normal,
    Comment,
    BlockComment,
    Keyword,
    SecondaryKeyword,
    String,
    Number,
    /// Transient overlay for the current search match.
    Match,
}

impl Highlight {
    /// SGR color code drawn for this class.
    pub fn color_code(self) -> u8 {
        match self {
            Self::Comment | Self::BlockComment => 96,
            Self::Keyword => 93,
            Self::SecondaryKeyword => 92,
            Self::String => 95,
            Self::Number => 91,
            Self::Match => 43,
            Self::Normal => 37,
        }
    }

    /// Foreground forced alongside a background color (only the search match has one).
    pub fn forced_foreground(self) -> Option<u8> {
        match self {
            Self::Match => Some(30),
            _ => None,
        }
    }
}

const PUNCTUATION: &[u8] = b",.()+-/*=~%<>[];";

/// Bytes that bound keywords and numbers.
pub fn is_separator(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0b || b == 0 || PUNCTUATION.contains(&b)
}

/// Classify one rendered line.
///
/// `in_comment` is the previous line's exit state. Returns the classes (one per byte) and this
/// line's exit state.
pub fn highlight_line(
    rendered: &[u8],
    profile: &SyntaxProfile,
    mut in_comment: bool,
) -> (Vec<Highlight>, bool) {
    let mut hl = vec![Highlight::Normal; rendered.len()];

    let line_comment = profile.line_comment.as_bytes();
    let block_start = profile.block_start.as_bytes();
    let block_end = profile.block_end.as_bytes();
    let has_block = !block_start.is_empty() && !block_end.is_empty();

    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;

    let mut i = 0;
    while i < rendered.len() {
        let c = rendered[i];
        let rest = &rendered[i..];
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };

        if !line_comment.is_empty()
            && in_string.is_none()
            && !in_comment
            && rest.starts_with(line_comment)
        {
            hl[i..].fill(Highlight::Comment);
            break;
        }

        if has_block && in_string.is_none() {
            if in_comment {
                if rest.starts_with(block_end) {
                    hl[i..i + block_end.len()].fill(Highlight::BlockComment);
                    i += block_end.len();
                    in_comment = false;
                    prev_sep = true;
                } else {
                    hl[i] = Highlight::BlockComment;
                    i += 1;
                }
                continue;
            } else if rest.starts_with(block_start) {
                hl[i..i + block_start.len()].fill(Highlight::BlockComment);
                i += block_start.len();
                in_comment = true;
                continue;
            }
        }

        if profile.highlight_strings {
            if let Some(quote) = in_string {
                hl[i] = Highlight::String;
                if c == b'\\' && i + 1 < rendered.len() {
                    hl[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if matches!(c, b'"' | b'\'' | b'`') {
                in_string = Some(c);
                hl[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if profile.highlight_numbers
            && ((c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (c == b'.' && prev_hl == Highlight::Number))
        {
            hl[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep {
            let hit = profile.keywords.iter().find(|kw| {
                let text = kw.text.as_bytes();
                !text.is_empty()
                    && rest.starts_with(text)
                    && rest.get(text.len()).map_or(true, |&b| is_separator(b))
            });
            if let Some(kw) = hit {
                let end = i + kw.text.len();
                hl[i..end].fill(kw.kind.highlight());
                i = end;
                prev_sep = false;
                continue;
            }
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    (hl, in_comment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{builtin_profiles, Keyword as KeywordEntry};
    use Highlight::*;

    fn c() -> SyntaxProfile {
        builtin_profiles().remove(0)
    }

    fn classes(line: &str, profile: &SyntaxProfile, open: bool) -> (Vec<Highlight>, bool) {
        highlight_line(line.as_bytes(), profile, open)
    }

    #[test]
    fn keyword_needs_trailing_separator() {
        let profile = SyntaxProfile {
            keywords: vec![KeywordEntry::primary("int")],
            ..SyntaxProfile::default()
        };
        let (hl, _) = classes("int x", &profile, false);
        assert_eq!(&hl[..3], &[Keyword, Keyword, Keyword]);
        assert!(hl[3..].iter().all(|&h| h == Normal));

        let (hl, _) = classes("integer x", &profile, false);
        assert!(hl.iter().all(|&h| h == Normal));
    }

    #[test]
    fn keyword_needs_leading_separator() {
        let (hl, _) = classes("xint", &c(), false);
        assert!(hl.iter().all(|&h| h == Normal));
        let (hl, _) = classes("(int)", &c(), false);
        assert_eq!(hl[1..4], [SecondaryKeyword; 3]);
    }

    #[test]
    fn keyword_at_end_of_line() {
        let (hl, _) = classes("x = NULL", &c(), false);
        assert_eq!(hl[4..], [SecondaryKeyword; 4]);
    }

    #[test]
    fn line_comment_runs_to_end() {
        let (hl, open) = classes("x // note", &c(), false);
        assert_eq!(hl[..2], [Normal, Normal]);
        assert!(hl[2..].iter().all(|&h| h == Comment));
        assert!(!open);
    }

    #[test]
    fn comment_marker_inside_string_is_text() {
        let (hl, _) = classes("\"a//b\"", &c(), false);
        assert!(hl.iter().all(|&h| h == String));
    }

    #[test]
    fn string_escape_does_not_close() {
        let (hl, _) = classes(r#""a\"b" x"#, &c(), false);
        assert!(hl[..6].iter().all(|&h| h == String));
        assert_eq!(hl[6..], [Normal, Normal]);
    }

    #[test]
    fn single_and_backtick_quotes() {
        let (hl, _) = classes("'a' `b`", &c(), false);
        assert_eq!(hl, [String, String, String, Normal, String, String, String]);
    }

    #[test]
    fn numbers_with_decimal_point() {
        let (hl, _) = classes("x = 3.14;", &c(), false);
        assert_eq!(hl[4..8], [Number; 4]);
        assert_eq!(hl[8], Normal);
    }

    #[test]
    fn digits_inside_identifiers_are_not_numbers() {
        let (hl, _) = classes("x1 = 2", &c(), false);
        assert_eq!(hl[1], Normal);
        assert_eq!(hl[5], Number);
    }

    #[test]
    fn block_comment_spanning_three_lines() {
        let profile = c();
        let (hl0, open0) = classes("/* start", &profile, false);
        assert!(hl0.iter().all(|&h| h == BlockComment));
        assert!(open0);

        let (hl1, open1) = classes("middle", &profile, open0);
        assert!(hl1.iter().all(|&h| h == BlockComment));
        assert!(open1);

        let (hl2, open2) = classes("end */ code", &profile, open1);
        assert!(hl2[..6].iter().all(|&h| h == BlockComment));
        assert!(hl2[6..].iter().all(|&h| h == Normal));
        assert!(!open2);
    }

    #[test]
    fn block_comment_after_code() {
        let (hl, open) = classes("x; /* a", &c(), false);
        assert_eq!(hl[..3], [Normal; 3]);
        assert!(hl[3..].iter().all(|&h| h == BlockComment));
        assert!(open);
    }

    #[test]
    fn block_comment_opened_and_closed_on_one_line() {
        let (hl, open) = classes("/* a */ if", &c(), false);
        assert!(hl[..7].iter().all(|&h| h == BlockComment));
        assert_eq!(hl[8..], [Keyword, Keyword]);
        assert!(!open);
    }

    #[test]
    fn line_comment_ignored_inside_block_comment() {
        let (hl, open) = classes("// */ x", &c(), true);
        assert!(hl[..5].iter().all(|&h| h == BlockComment));
        assert!(!open);
    }

    #[test]
    fn no_markers_means_no_comments() {
        let text = builtin_profiles().remove(2);
        let (hl, open) = classes("/* 42 // x", &text, false);
        assert_eq!(hl[3..5], [Number, Number]);
        assert!(hl.iter().all(|&h| h == Normal || h == Number));
        assert!(!open);
    }

    #[test]
    fn highlighting_is_idempotent() {
        let profile = c();
        for line in ["int main() { return 0; }", "/* open", "s = \"x\\\"y\"; // c", "a */ 1.5"] {
            for open in [false, true] {
                assert_eq!(classes(line, &profile, open), classes(line, &profile, open));
            }
        }
    }

    #[test]
    fn separators() {
        for b in b" \t\n\0,.()+-/*=~%<>[];" {
            assert!(is_separator(*b), "{b}");
        }
        for b in b"a_Z9#\"'{}" {
            assert!(!is_separator(*b), "{b}");
        }
    }

    #[test]
    fn color_codes() {
        assert_eq!(Comment.color_code(), BlockComment.color_code());
        assert_eq!(Match.color_code(), 43);
        assert_eq!(Match.forced_foreground(), Some(30));
        assert_eq!(Keyword.forced_foreground(), None);
    }
}
