use std::sync::OnceLock;

use regex::Regex;

fn tag_pattern() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"))
}

/// Naive tag stripper: every `<...>` run becomes a single space.
/// Script and style bodies are left in place and entities are not decoded.
pub fn strip_tags(input: &str) -> String {
    tag_pattern().replace_all(input, " ").into_owned()
}

/// ECMAScript `\s`: Unicode `White_Space` without NEL, plus the BOM.
fn is_word_separator(ch: char) -> bool {
    ch == '\u{FEFF}' || (ch.is_whitespace() && ch != '\u{85}')
}

/// Number of whitespace-separated tokens left after stripping tags.
pub fn count_words(html: &str) -> usize {
    strip_tags(html)
        .split(is_word_separator)
        .filter(|token| !token.is_empty())
        .count()
}
