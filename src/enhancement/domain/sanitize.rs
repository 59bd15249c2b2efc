//! Normalization of free-form provider output into one usable line.
//!
//! Providers wrap the rewrite in markdown and chatter ("Here's a
//! version:", "Option 1:", "Why it's better:"). The decoration is stripped,
//! then the first substantial, non-meta line wins.

use regex::Regex;
use std::sync::LazyLock;

/// Lines must be longer than this many characters to be selected.
const MIN_LINE_CHARS: usize = 10;
/// Length cap for titles.
const TITLE_MAX_CHARS: usize = 100;
/// Words marking a line as commentary about the rewrite.
const META_WORDS: [&str; 4] = ["option", "why", "better", "consider"];

/// Task field receiving an enhancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnhancedField {
    /// The task title.
    Title,
    /// The task details.
    Details,
}

struct Patterns {
    heading: Regex,
    blockquote: Regex,
    bullet: Regex,
    strong: Regex,
    single_emphasis: Regex,
    inline_code: Regex,
    preamble: Regex,
    quoted: Regex,
}

#[expect(
    clippy::expect_used,
    reason = "patterns are string literals exercised by the unit tests"
)]
static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| Patterns {
    heading: Regex::new(r"^\s{0,3}#{1,6}\s*").expect("heading pattern"),
    blockquote: Regex::new(r"^\s*>\s?").expect("blockquote pattern"),
    bullet: Regex::new(r"^\s*(?:[-*+]|\d+[.)])\s+").expect("bullet pattern"),
    strong: Regex::new(r"\*\*|__|~~").expect("strong pattern"),
    single_emphasis: Regex::new(r"(^|[^\w*])\*(\S[^*]*\S|\S)\*($|[^\w*])")
        .expect("single emphasis pattern"),
    inline_code: Regex::new(r"`([^`]*)`").expect("inline code pattern"),
    preamble: Regex::new(
        r"(?i)^\s*(?:(?:here(?:'|’)?s|here is)\b[^:\n]*:|(?:sure|certainly|of course|okay|ok)[,!.][^:\n]*:)\s*",
    )
    .expect("preamble pattern"),
    quoted: Regex::new(r#"["“]([^"“”]+)["”]"#).expect("quoted pattern"),
});

/// Strips markdown decoration and preamble, then picks the first line that
/// is longer than ten characters and is not commentary. A quoted span in
/// that line is preferred over the whole line.
///
/// Falls back to the first non-empty line as is, and to an empty string
/// when nothing survives cleaning.
#[must_use]
pub fn sanitize_enhancement(raw: &str) -> String {
    let patterns = &*PATTERNS;
    let lines: Vec<String> = raw
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .map(|line| clean_line(patterns, line))
        .filter(|line| !line.is_empty())
        .collect();

    let selected = lines
        .iter()
        .find(|line| line.chars().count() > MIN_LINE_CHARS && !is_meta(line))
        .map(|line| quoted_span(patterns, line).unwrap_or_else(|| line.clone()));
    selected.unwrap_or_else(|| lines.first().cloned().unwrap_or_default())
}

/// Sanitizes provider output for a specific field. Titles are further
/// limited to their first line and 100 characters.
#[must_use]
pub fn sanitize_for_field(raw: &str, field: EnhancedField) -> String {
    let sanitized = sanitize_enhancement(raw);
    match field {
        EnhancedField::Details => sanitized,
        EnhancedField::Title => {
            let first_line = sanitized.lines().next().unwrap_or_default().trim();
            truncate_chars(first_line, TITLE_MAX_CHARS)
        }
    }
}

fn clean_line(patterns: &Patterns, line: &str) -> String {
    let without_heading = patterns.heading.replace(line, "");
    let without_quote = patterns.blockquote.replace(&without_heading, "");
    let without_bullet = patterns.bullet.replace(&without_quote, "");
    let without_strong = patterns.strong.replace_all(&without_bullet, "");
    let without_emphasis = strip_single_emphasis(&patterns.single_emphasis, &without_strong);
    let without_code = patterns.inline_code.replace_all(&without_emphasis, "$1");
    let without_preamble = patterns.preamble.replace(&without_code, "");
    without_preamble.replace('`', "").trim().to_owned()
}

/// Unwraps `*word*` spans whose asterisks sit at word boundaries. Asterisks
/// inside words, as in `a*b`, are content and stay.
fn strip_single_emphasis(pattern: &Regex, text: &str) -> String {
    let mut current = text.to_owned();
    loop {
        let next = pattern.replace_all(&current, "${1}${2}${3}").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

fn is_meta(line: &str) -> bool {
    let lowered = line.to_lowercase();
    META_WORDS.iter().any(|word| lowered.contains(word))
}

fn quoted_span(patterns: &Patterns, line: &str) -> Option<String> {
    patterns
        .quoted
        .captures(line)
        .and_then(|captures| captures.get(1))
        .map(|span| span.as_str().trim().to_owned())
        .filter(|span| !span.is_empty())
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
