use regex::Regex;
use std::sync::LazyLock;

fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(_compile_err) => match Regex::new(r"$^") {
            Ok(fallback) => fallback,
            Err(fallback_err) => panic!("hardcoded fallback regex must compile: {fallback_err}"),
        },
    }
}

/// `[[target]]` / `[[target|label]]` (groups 1) or `[label](target)` (groups 2, 3).
pub(super) static LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex(r"\[\[([^\[\]\n]+)\]\]|\[([^\[\]\n]+)\]\(([^)\n]*)\)")
});

/// ATX heading: hashes, horizontal whitespace, text.
pub(super) static HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"^(#{1,6})[ \t]+(.*)$"));

/// Inline tag, not glued to a word, path, entity, or another tag.
///
/// `[x](#anchor)` still matches here; callers drop matches preceded by `](`.
pub(super) static TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(r"(?:^|[^\w&/#])(#[A-Za-z0-9._-]+)"));

/// Opening fence character of a line, if it starts a code fence.
fn fence_marker(line: &str) -> Option<char> {
    let trimmed = line.trim_start();
    if trimmed.starts_with("```") {
        Some('`')
    } else if trimmed.starts_with("~~~") {
        Some('~')
    } else {
        None
    }
}

/// Lines outside fenced code blocks.
///
/// A fence closes only on the character that opened it.
pub(super) fn prose_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut open_fence: Option<char> = None;
    text.lines().filter(move |line| {
        let marker = fence_marker(line);
        match (open_fence, marker) {
            (None, Some(opening)) => {
                open_fence = Some(opening);
                false
            }
            (Some(opening), Some(closing)) if opening == closing => {
                open_fence = None;
                false
            }
            (Some(_), _) => false,
            (None, None) => true,
        }
    })
}
