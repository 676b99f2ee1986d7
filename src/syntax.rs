//! Syntax profiles: per-filetype keyword lists and comment/string/number rules.

use crate::highlight::Highlight;

/// Which keyword class a keyword is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordKind {
    Primary,
    Secondary,
}

impl KeywordKind {
    pub fn highlight(self) -> Highlight {
        match self {
            Self::Primary => Highlight::Keyword,
            Self::Secondary => Highlight::SecondaryKeyword,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub text: String,
    pub kind: KeywordKind,
}

impl Keyword {
    pub fn primary(text: &str) -> Self {
        Self {
            text: text.to_string(),
            kind: KeywordKind::Primary,
        }
    }

    pub fn secondary(text: &str) -> Self {
        Self {
            text: text.to_string(),
            kind: KeywordKind::Secondary,
        }
    }
}

/// Highlighting rules for one family of files.
///
/// An empty marker string disables the corresponding rule. Block comments need both markers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SyntaxProfile {
    pub name: String,
    /// Entries starting with `.` match the filename's extension exactly; anything else matches
    /// as a substring of the filename.
    pub filematch: Vec<String>,
    pub keywords: Vec<Keyword>,
    pub line_comment: String,
    pub block_start: String,
    pub block_end: String,
    pub highlight_numbers: bool,
    pub highlight_strings: bool,
}

impl SyntaxProfile {
    pub fn matches(&self, filename: &str) -> bool {
        let ext = filename.rfind('.').map(|i| &filename[i..]);
        self.filematch.iter().any(|pat| {
            if pat.starts_with('.') {
                ext == Some(pat.as_str())
            } else {
                filename.contains(pat.as_str())
            }
        })
    }
}

/// First profile (in order) whose patterns match `filename`.
pub fn select<'a>(profiles: &'a [SyntaxProfile], filename: &str) -> Option<&'a SyntaxProfile> {
    profiles.iter().find(|p| p.matches(filename))
}

/// Profiles compiled into the editor.
pub fn builtin_profiles() -> Vec<SyntaxProfile> {
    let c_primary = [
        "switch", "if", "while", "for", "break", "continue", "return", "else", "struct", "union",
        "typedef", "enum", "class", "case",
    ];
    let c_secondary = [
        "int", "long", "double", "float", "char", "unsigned", "signed", "void", "#define",
        "#include", "NULL",
    ];
    let shell = ["if", "fi", "read", "echo", "for", "while", "do", "done", "elif", "else"];

    vec![
        SyntaxProfile {
            name: "C".to_string(),
            filematch: vec![".c".into(), ".h".into(), ".cpp".into()],
            keywords: c_primary
                .iter()
                .map(|k| Keyword::primary(k))
                .chain(c_secondary.iter().map(|k| Keyword::secondary(k)))
                .collect(),
            line_comment: "//".into(),
            block_start: "/*".into(),
            block_end: "*/".into(),
            highlight_numbers: true,
            highlight_strings: true,
        },
        SyntaxProfile {
            name: "SHELL".to_string(),
            filematch: vec![".sh".into()],
            keywords: shell.iter().map(|k| Keyword::primary(k)).collect(),
            line_comment: "#".into(),
            block_start: "/*".into(),
            block_end: "*/".into(),
            highlight_numbers: true,
            highlight_strings: true,
        },
        SyntaxProfile {
            name: "TEXT FILE".to_string(),
            filematch: vec![".txt".into()],
            highlight_numbers: true,
            ..SyntaxProfile::default()
        },
    ]
}
