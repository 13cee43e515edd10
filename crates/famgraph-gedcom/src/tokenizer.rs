//! Line tokenizer: raw GEDCOM text to a flat sequence of tagged lines.
//!
//! Every non-blank line is matched against `LEVEL [@XREF@] TAG [VALUE]`.
//! Lines that do not fit are counted and skipped; tokenizing never fails.

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)\s+(?:@([^@]+)@\s+)?([A-Za-z0-9_]+)(?: (.*))?$")
        .expect("valid gedcom line regex")
});

/// One tokenized line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GedcomLine {
    /// Nesting depth
    pub level: usize,
    /// Cross-reference id without its `@` delimiters
    pub xref: Option<String>,
    /// Tag, upper case
    pub tag: String,
    /// Everything after the single delimiter space, if non-empty
    pub value: Option<String>,
    /// 1-based line number in the input
    pub line: usize,
}

/// Counters for one tokenizer run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStats {
    /// Non-blank lines seen
    pub lines: usize,
    /// Lines turned into tokens
    pub tokens: usize,
    /// Lines that did not match the line grammar
    pub skipped: usize,
}

/// Lazy tokenizer over a text buffer.
pub struct Tokenizer<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    stats: TokenStats,
}

impl<'a> Tokenizer<'a> {
    /// Tokenize `text`; a leading byte-order mark is ignored.
    pub fn new(text: &'a str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Self {
            lines: text.lines().enumerate(),
            stats: TokenStats::default(),
        }
    }

    /// Counters so far.
    pub fn stats(&self) -> TokenStats {
        self.stats
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = GedcomLine;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, raw) in self.lines.by_ref() {
            if raw.trim().is_empty() {
                continue;
            }
            self.stats.lines += 1;

            match parse_line(raw, index + 1) {
                Some(line) => {
                    self.stats.tokens += 1;
                    return Some(line);
                }
                None => {
                    trace!("Skipping malformed line {}: {raw:?}", index + 1);
                    self.stats.skipped += 1;
                }
            }
        }
        None
    }
}

/// Tokenize a whole buffer.
pub fn tokenize(text: &str) -> (Vec<GedcomLine>, TokenStats) {
    let mut tokenizer = Tokenizer::new(text);
    let lines = tokenizer.by_ref().collect();
    (lines, tokenizer.stats())
}

/// Match a single line against the grammar.
pub fn parse_line(raw: &str, line: usize) -> Option<GedcomLine> {
    let caps = LINE_RE.captures(raw)?;
    let level = caps.get(1)?.as_str().parse().ok()?;
    let xref = caps.get(2).map(|m| m.as_str().to_string());
    let tag = caps.get(3)?.as_str().to_ascii_uppercase();
    let value = caps
        .get(4)
        .map(|m| m.as_str().trim_end_matches('\r'))
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    Some(GedcomLine {
        level,
        xref,
        tag,
        value,
        line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_shape() {
        let line = parse_line("0 @I1@ INDI", 1).unwrap();
        assert_eq!(line.level, 0);
        assert_eq!(line.xref.as_deref(), Some("I1"));
        assert_eq!(line.tag, "INDI");
        assert_eq!(line.value, None);

        let line = parse_line("1 name John /Smith/", 2).unwrap();
        assert_eq!(line.tag, "NAME");
        assert_eq!(line.value.as_deref(), Some("John /Smith/"));
    }

    #[test]
    fn test_value_keeps_inner_spacing() {
        let line = parse_line("2 CONC  leading space", 1).unwrap();
        assert_eq!(line.value.as_deref(), Some(" leading space"));
    }

    #[test]
    fn test_pointer_value() {
        let line = parse_line("1 FAMC @F1@", 1).unwrap();
        assert_eq!(line.xref, None);
        assert_eq!(line.value.as_deref(), Some("@F1@"));
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let text = "0 HEAD\nthis is not gedcom\n\n   \nX TAG\n1 CHAR UTF-8\r\n";
        let (lines, stats) = tokenize(text);
        assert_eq!(lines.len(), 2);
        assert_eq!(stats.lines, 4);
        assert_eq!(stats.skipped, 2);
        assert_eq!(lines[1].value.as_deref(), Some("UTF-8"));
        assert_eq!(lines[1].line, 6);
    }

    #[test]
    fn test_bom_and_indentation() {
        let text = "\u{feff}0 HEAD\n    1 GEDC\n";
        let (lines, _) = tokenize(text);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].tag, "HEAD");
        assert_eq!(lines[1].level, 1);
    }

    #[test]
    fn test_custom_tags() {
        let line = parse_line("1 _UID 1234", 1).unwrap();
        assert_eq!(line.tag, "_UID");
    }

    #[test]
    fn test_trailing_space_is_no_value() {
        let line = parse_line("1 BIRT ", 1).unwrap();
        assert_eq!(line.value, None);
    }
}
